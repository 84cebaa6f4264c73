//! Timing loop shared by the micro-benchmarks.

use std::time::{Duration, Instant};

/// Warmup and sample counts for one measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sampler {
    pub warmup: u32,
    pub samples: u32,
}

impl Default for Sampler {
    fn default() -> Self {
        Self {
            warmup: 2,
            samples: 7,
        }
    }
}

impl Sampler {
    /// A sampler taking at least one sample.
    #[must_use]
    pub fn new(warmup: u32, samples: u32) -> Self {
        Self {
            warmup,
            samples: samples.max(1),
        }
    }

    /// Run `f` `warmup` times untimed, then time it `samples` times.
    pub fn measure<F>(&self, name: impl Into<String>, mut f: F) -> Sample
    where
        F: FnMut(),
    {
        for _ in 0..self.warmup {
            f();
        }

        let samples = self.samples.max(1);
        let mut durations = Vec::with_capacity(samples as usize);
        for _ in 0..samples {
            let start = Instant::now();
            f();
            durations.push(start.elapsed());
        }

        durations.sort();
        let min = durations.first().copied().unwrap_or_default();
        let max = durations.last().copied().unwrap_or_default();
        let mid = durations.len() / 2;
        let median = if durations.len() % 2 == 1 {
            durations[mid]
        } else {
            (durations[mid - 1] + durations[mid]) / 2
        };
        let total: Duration = durations.iter().sum();

        Sample {
            name: name.into(),
            mean: total / samples,
            median,
            min,
            max,
            samples,
        }
    }
}

/// Timing summary of one measured routine.
#[derive(Debug, Clone)]
pub struct Sample {
    pub name: String,
    pub mean: Duration,
    pub median: Duration,
    pub min: Duration,
    pub max: Duration,
    pub samples: u32,
}

impl Sample {
    /// Median in nanoseconds, saturating.
    #[must_use]
    pub fn median_ns(&self) -> u64 {
        u64::try_from(self.median.as_nanos()).unwrap_or(u64::MAX)
    }
}
