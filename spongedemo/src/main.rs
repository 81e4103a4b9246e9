// Terminal front end for the spongelab analysis primitives.
//
// Collects text/file input, invokes the library, and renders the reports as
// hex strings, bit grids, and block-occupancy bars, or as raw JSON.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

use spongelab::avalanche::{self, AvalancheReport, BitMatch};
use spongelab::bits::BitPosition;
use spongelab::hash::Algorithm;
use spongelab::lengthext::{self, ExtensionReport};
use spongelab::speed::{self, Measurement};
use spongelab::sponge::{self, PaddingPlan};

#[derive(Parser)]
#[command(
    name = "spongedemo",
    version,
    about = "Avalanche, pad10*1 layout, timing, and length-extension demos over real hash backends"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Flip one input bit and show how many digest bits change.
    Avalanche(AvalancheArgs),
    /// Show the pad10*1 layout for a message length and rate.
    Padding(PaddingArgs),
    /// Time two algorithms over the same input.
    Speed(SpeedArgs),
    /// Compare length-extension exposure across constructions.
    Extend(ExtendArgs),
}

#[derive(Args)]
struct InputArgs {
    /// UTF-8 text input.
    #[arg(long, conflicts_with = "file")]
    text: Option<String>,
    /// Read the input bytes from a file.
    #[arg(long)]
    file: Option<PathBuf>,
}

impl InputArgs {
    fn read(&self) -> anyhow::Result<Vec<u8>> {
        match (&self.text, &self.file) {
            (Some(text), None) => Ok(text.clone().into_bytes()),
            (None, Some(path)) => {
                let data = std::fs::read(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                log::debug!("read {} bytes from {}", data.len(), path.display());
                Ok(data)
            }
            _ => bail!("provide exactly one of --text or --file"),
        }
    }
}

#[derive(Args)]
struct AvalancheArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Hash algorithm to analyze.
    #[arg(long, default_value = "sha3-256", value_parser = parse_algorithm)]
    algorithm: Algorithm,
    /// Force the flipped bit to BYTE:BIT instead of picking at random.
    #[arg(long, value_parser = parse_position)]
    position: Option<BitPosition>,
    /// Print the raw report as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct PaddingArgs {
    /// UTF-8 text whose byte length is laid out.
    #[arg(long, conflicts_with = "bytes")]
    text: Option<String>,
    /// Message length in bytes.
    #[arg(long)]
    bytes: Option<usize>,
    /// Rate in bits; overrides --algorithm.
    #[arg(long)]
    rate: Option<usize>,
    /// Take the rate from a named SHA-3 variant.
    #[arg(long, default_value = "sha3-224", value_parser = parse_algorithm)]
    algorithm: Algorithm,
    /// Print the raw plan as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct SpeedArgs {
    /// Input hashed on every iteration.
    #[arg(
        long,
        default_value = "Lorem ipsum dolor sit amet, consectetur adipiscing elit."
    )]
    text: String,
    /// Digest count per algorithm.
    #[arg(long, default_value_t = 1000)]
    iterations: u32,
    /// Baseline algorithm.
    #[arg(long, default_value = "sha256", value_parser = parse_algorithm)]
    first: Algorithm,
    /// Algorithm compared against the baseline.
    #[arg(long, default_value = "sha3-256", value_parser = parse_algorithm)]
    second: Algorithm,
    /// Print the raw report as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ExtendArgs {
    /// Simulated secret prefix.
    #[arg(long, default_value = "secret-key")]
    secret: String,
    /// Public part of the message.
    #[arg(long = "public", default_value = "public-message")]
    public_msg: String,
    /// Data an attacker wants to append.
    #[arg(long, default_value = "appended-data")]
    extra: String,
    /// Algorithm expected to be vulnerable.
    #[arg(long, default_value = "sha256", value_parser = parse_algorithm)]
    vulnerable: Algorithm,
    /// Algorithm expected to resist.
    #[arg(long, default_value = "sha3-256", value_parser = parse_algorithm)]
    resistant: Algorithm,
    /// Print the raw report as JSON.
    #[arg(long)]
    json: bool,
}

fn parse_algorithm(name: &str) -> Result<Algorithm, String> {
    Algorithm::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = Algorithm::ALL.iter().map(|a| a.name()).collect();
        format!("unknown algorithm {name:?}, expected one of: {}", known.join(", "))
    })
}

fn parse_position(value: &str) -> Result<BitPosition, String> {
    let (byte, bit) = value
        .split_once(':')
        .ok_or_else(|| format!("expected BYTE:BIT, got {value:?}"))?;
    let byte_index: usize = byte
        .parse()
        .map_err(|_| format!("invalid byte index {byte:?}"))?;
    let bit_index: u8 = bit
        .parse()
        .map_err(|_| format!("invalid bit index {bit:?}"))?;
    if bit_index > 7 {
        return Err(format!("bit index {bit_index} is out of range 0..=7"));
    }
    Ok(BitPosition::new(byte_index, bit_index))
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Avalanche(args) => run_avalanche(args),
        Command::Padding(args) => run_padding(args),
        Command::Speed(args) => run_speed(args),
        Command::Extend(args) => run_extend(args),
    }
}

// ---------------------------------------------------------------------------
// avalanche
// ---------------------------------------------------------------------------

fn run_avalanche(args: AvalancheArgs) -> anyhow::Result<()> {
    let input = args.input.read()?;
    let report = match args.position {
        Some(position) => avalanche::analyze_at(&input, &args.algorithm, position)?,
        None => avalanche::analyze(&input, &args.algorithm)?,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    render_avalanche(args.algorithm, &report);
    Ok(())
}

fn render_avalanche(alg: Algorithm, report: &AvalancheReport) {
    println!("algorithm   : {}", alg.name());
    println!(
        "flipped bit : byte {}, bit {}",
        report.flipped.byte_index, report.flipped.bit_index
    );
    println!("original    : {}", report.original_hex);
    println!("modified    : {}", report.modified_hex);
    println!(
        "avalanche   : {} of {} bits changed ({:.2}%)",
        report.bits_changed, report.total_digest_bits, report.percentage
    );
    println!();
    print_bit_grid("original digest bits", &report.comparison_original);
    println!();
    print_bit_grid("modified digest bits", &report.comparison_modified);
}

/// Bit rows of 64, with a marker row flagging the positions where the other
/// digest disagrees.
fn print_bit_grid(label: &str, rows: &[BitMatch]) {
    println!("{label}:");
    for chunk in rows.chunks(64) {
        let bits: String = chunk.iter().map(|m| if m.bit { '1' } else { '0' }).collect();
        let marks: String = chunk
            .iter()
            .map(|m| if m.matches_other { ' ' } else { '^' })
            .collect();
        println!("  {bits}");
        if marks.contains('^') {
            println!("  {marks}");
        }
    }
}

// ---------------------------------------------------------------------------
// padding
// ---------------------------------------------------------------------------

fn run_padding(args: PaddingArgs) -> anyhow::Result<()> {
    let message_bytes = match (&args.text, args.bytes) {
        (Some(text), None) => text.len(),
        (None, Some(bytes)) => bytes,
        (None, None) => bail!("provide --text or --bytes"),
        (Some(_), Some(_)) => bail!("provide only one of --text or --bytes"),
    };
    let rate_bits = match args.rate {
        Some(rate) => rate,
        None => match args.algorithm.sponge() {
            Some(params) => params.rate_bits,
            None => bail!(
                "{} has no sponge rate; pass --rate explicitly",
                args.algorithm.name()
            ),
        },
    };

    let plan = sponge::plan_padding(message_bytes, rate_bits)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }
    render_padding(&plan);
    Ok(())
}

fn render_padding(plan: &PaddingPlan) {
    println!(
        "message : {} bits ({} bytes)",
        plan.message_bits, plan.message_bytes
    );
    println!("rate    : {} bits", plan.rate_bits);
    println!(
        "padding : {} bits ({} bytes) = 1 + {} zeros + 1",
        plan.padding_bits, plan.padding_bytes, plan.zero_fill
    );
    println!(
        "total   : {} bits in {} block(s)",
        plan.total_bits, plan.block_count
    );
    println!();
    print_blocks(plan);
    println!();
    println!("pad10*1 : {}", plan.pattern_preview(50));
}

/// Occupancy bars, one row per rate-sized block: `#` message, `.` padding.
fn print_blocks(plan: &PaddingPlan) {
    const WIDTH: usize = 48;
    for block in plan.blocks() {
        let msg_cols = block.message_bits * WIDTH / plan.rate_bits;
        let pad_cols = WIDTH - msg_cols;
        println!(
            "  block {:>2} |{}{}| {} message / {} padding bits",
            block.index + 1,
            "#".repeat(msg_cols),
            ".".repeat(pad_cols),
            block.message_bits,
            block.padding_bits
        );
    }
}

// ---------------------------------------------------------------------------
// speed
// ---------------------------------------------------------------------------

fn run_speed(args: SpeedArgs) -> anyhow::Result<()> {
    let report = speed::compare(
        args.first,
        args.second,
        args.text.as_bytes(),
        args.iterations,
    )?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} iterations over {} input bytes",
        report.iterations, report.input_bytes
    );
    print_measurement(&report.first);
    print_measurement(&report.second);
    if report.percent_slower >= 0.0 {
        println!(
            "{} took {:.2}x the {} time ({:.1}% slower)",
            report.second.algorithm, report.ratio, report.first.algorithm, report.percent_slower
        );
    } else {
        println!(
            "{} took {:.2}x the {} time ({:.1}% faster)",
            report.second.algorithm, report.ratio, report.first.algorithm, -report.percent_slower
        );
    }
    Ok(())
}

fn print_measurement(m: &Measurement) {
    println!(
        "  {:<10} {:>10.2} ms   {:>12.0} ops/sec",
        m.algorithm,
        m.elapsed.as_secs_f64() * 1000.0,
        m.ops_per_sec
    );
}

// ---------------------------------------------------------------------------
// extend
// ---------------------------------------------------------------------------

fn run_extend(args: ExtendArgs) -> anyhow::Result<()> {
    let comparison = lengthext::compare(
        args.vulnerable,
        args.resistant,
        args.secret.as_bytes(),
        args.public_msg.as_bytes(),
        args.extra.as_bytes(),
    )?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
        return Ok(());
    }

    println!(
        "message  : {:?} + {:?}, attacker appends {:?}",
        args.secret, args.public_msg, args.extra
    );
    println!();
    render_extension(&comparison.vulnerable);
    println!();
    render_extension(&comparison.resistant);
    Ok(())
}

fn render_extension(report: &ExtensionReport) {
    let verdict = if report.vulnerable {
        "VULNERABLE: the digest is the chaining state, extension is possible"
    } else {
        "resistant: the hidden state blocks any continuation"
    };
    println!("{} ({:?})", report.algorithm, report.construction);
    println!("  original : {}", report.original_hex);
    println!("  extended : {}", report.extended_hex);
    println!("  {verdict}");
}
