//! Ambient-power traces.
//!
//! A harvest trace is a piecewise-constant function of simulated time: a
//! sequence of `(T_i, p_i)` samples, with power `p_i` holding on
//! `[T_i, T_{i+1})` and the final sample holding indefinitely. Power is
//! zero before the first sample.
//!
//! The on-disk form is one `time power` pair per line (seconds and watts),
//! with `#` comments and blank lines ignored:
//!
//! ```text
//! # bursty source
//! 0.0    0.002
//! 0.5    0.0
//! 1.25   0.004
//! ```

use std::fs;
use std::io;
use std::path::Path;

/// A piecewise-constant source-power trace.
#[derive(Debug, Clone)]
pub struct HarvestTrace {
    samples: Vec<(f64, f64)>,
}

impl HarvestTrace {
    /// Builds a trace from `(time, power)` samples, sorted by time.
    pub fn new(mut samples: Vec<(f64, f64)>) -> Self {
        samples.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { samples }
    }

    /// A trace with constant power from time zero onward.
    pub fn constant(power: f64) -> Self {
        Self {
            samples: vec![(0.0, power)],
        }
    }

    /// Reads a trace from a file of `time power` lines.
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        let mut samples = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let mut parts = line.split_whitespace();
            let parse = |field: Option<&str>| -> io::Result<f64> {
                field
                    .and_then(|s| s.parse().ok())
                    .ok_or_else(|| {
                        io::Error::new(
                            io::ErrorKind::InvalidData,
                            format!("bad harvest sample on line {}", lineno + 1),
                        )
                    })
            };
            let time = parse(parts.next())?;
            let power = parse(parts.next())?;
            samples.push((time, power));
        }
        if samples.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "harvest trace contains no samples",
            ));
        }
        Ok(Self::new(samples))
    }

    /// Source power at time `t`, in watts.
    pub fn power_at(&self, t: f64) -> f64 {
        let mut power = 0.0;
        for &(time, p) in &self.samples {
            if time > t {
                break;
            }
            power = p;
        }
        power
    }

    /// Time of the last sample: past this point the trace has no further
    /// transitions, so a zero reading here is zero forever.
    pub fn end_time(&self) -> f64 {
        self.samples.last().map_or(0.0, |&(t, _)| t)
    }

    /// Integrates the trace over `[t0, t1)`: the exact energy, in joules,
    /// that a source following this trace delivers over the interval.
    pub fn integrate(&self, t0: f64, t1: f64) -> f64 {
        if t1 <= t0 {
            return 0.0;
        }
        let mut energy = 0.0;
        for (i, &(start, power)) in self.samples.iter().enumerate() {
            let end = self
                .samples
                .get(i + 1)
                .map_or(f64::INFINITY, |&(t, _)| t);
            let lo = start.max(t0);
            let hi = end.min(t1);
            if hi > lo {
                energy += power * (hi - lo);
            }
        }
        energy
    }
}
