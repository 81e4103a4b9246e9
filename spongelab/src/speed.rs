//! Timing-loop comparison of two hash algorithms over the same input.
//!
//! Repeated one-shot digests timed with `Instant` — the interactive figure
//! the demos display. The criterion benches under `benches/` are the
//! statistically honest version of the same comparison.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpongeLabError};
use crate::hash::Algorithm;

/// Timing for one algorithm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurement {
    pub algorithm: String,
    pub elapsed: Duration,
    pub ops_per_sec: f64,
}

/// Result of one timed comparison run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeedReport {
    pub iterations: u32,
    pub input_bytes: usize,
    pub first: Measurement,
    pub second: Measurement,
    /// `second.elapsed / first.elapsed`.
    pub ratio: f64,
    /// How much slower the second algorithm was, in percent. Negative when
    /// it was faster.
    pub percent_slower: f64,
}

fn measure(alg: Algorithm, data: &[u8], iterations: u32) -> Measurement {
    let start = Instant::now();
    for _ in 0..iterations {
        std::hint::black_box(alg.digest(std::hint::black_box(data)));
    }
    let elapsed = start.elapsed();
    Measurement {
        algorithm: alg.name().to_string(),
        ops_per_sec: f64::from(iterations) / elapsed.as_secs_f64(),
        elapsed,
    }
}

/// Time `iterations` one-shot digests of `data` under each algorithm.
pub fn compare(
    first: Algorithm,
    second: Algorithm,
    data: &[u8],
    iterations: u32,
) -> Result<SpeedReport> {
    if iterations == 0 {
        return Err(SpongeLabError::InvalidInput(
            "iterations must be at least 1".into(),
        ));
    }

    let a = measure(first, data, iterations);
    let b = measure(second, data, iterations);
    let ratio = b.elapsed.as_secs_f64() / a.elapsed.as_secs_f64();
    let percent_slower =
        (b.elapsed.as_secs_f64() - a.elapsed.as_secs_f64()) / a.elapsed.as_secs_f64() * 100.0;

    tracing::debug!(
        first = a.algorithm.as_str(),
        second = b.algorithm.as_str(),
        iterations,
        ratio,
        "speed comparison complete"
    );

    Ok(SpeedReport {
        iterations,
        input_bytes: data.len(),
        first: a,
        second: b,
        ratio,
        percent_slower,
    })
}
