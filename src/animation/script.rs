use crate::animation::animated::{Animated, AnimatedOpts};
use crate::animation::value::Value;
use crate::foundation::core::{Clock, ManualClock, Timestamp};
use crate::foundation::error::{OlaError, OlaResult};

/// Upper bound on the samples a single replay produces (and writes a random walk generates).
pub const MAX_SCRIPT_SAMPLES: u64 = 1_000_000;

/// A timed list of writes replayed against an [`Animated`] value on a manual clock.
///
/// Times are milliseconds from the moment the value is created.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Value the animation starts from.
    pub initial: Value,
    /// Default transition length in milliseconds; 300 when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<f64>,
    /// Writes, applied in `at_ms` order.
    #[serde(default)]
    pub writes: Vec<ScriptWrite>,
    /// Last sampled instant (inclusive).
    pub until_ms: f64,
}

/// One write in a [`Script`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptWrite {
    /// When the write happens.
    pub at_ms: f64,
    /// Values to write, shaped like the script's initial value (or keyed).
    pub value: Value,
    /// Duration override for this write.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<f64>,
}

/// One sampled point of a replayed [`Script`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Sample {
    /// Sample instant.
    pub t_ms: f64,
    /// Most recent written value at `t_ms`, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Value>,
    /// Animated value at `t_ms`.
    pub value: Value,
}

fn sample_count(span_ms: f64, step_ms: f64) -> OlaResult<u64> {
    let steps = (span_ms / step_ms).floor();
    if !(steps < MAX_SCRIPT_SAMPLES as f64) {
        return Err(OlaError::shape(format!(
            "script needs more than {MAX_SCRIPT_SAMPLES} samples ({span_ms} ms every {step_ms} ms)"
        )));
    }
    Ok(steps as u64 + 1)
}

impl Script {
    /// Options for the animated value the script drives.
    pub fn opts(&self) -> AnimatedOpts {
        match self.duration_ms {
            Some(d) => AnimatedOpts::default().with_duration_ms(d),
            None => AnimatedOpts::default(),
        }
    }

    /// Check static invariants: finite, non-negative times.
    pub fn validate(&self) -> OlaResult<()> {
        if !(self.until_ms.is_finite() && self.until_ms >= 0.0) {
            return Err(OlaError::shape("script until_ms must be finite and >= 0"));
        }
        for w in &self.writes {
            if !(w.at_ms.is_finite() && w.at_ms >= 0.0) {
                return Err(OlaError::shape("script write at_ms must be finite and >= 0"));
            }
        }
        Ok(())
    }

    /// Replay the writes and sample the value every `step_ms`, from `0` to `until_ms`.
    #[tracing::instrument(skip(self))]
    pub fn run(&self, step_ms: f64) -> OlaResult<Vec<Sample>> {
        self.validate()?;
        if !(step_ms.is_finite() && step_ms > 0.0) {
            return Err(OlaError::shape("sample step must be finite and > 0"));
        }

        let mut writes: Vec<&ScriptWrite> = self.writes.iter().collect();
        writes.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));
        let mut pending = writes.into_iter().peekable();

        let clock = ManualClock::new();
        let count = sample_count(self.until_ms, step_ms)?;
        let mut animated = Animated::with_clock(self.initial.clone(), self.opts(), clock.clone())?;
        let mut target = None;

        let mut out = Vec::new();
        for i in 0..count {
            let t_ms = i as f64 * step_ms;
            while let Some(w) = pending.next_if(|w| w.at_ms <= t_ms) {
                clock.set(Timestamp::from_ms(w.at_ms));
                animated.set_with(w.value.clone(), w.duration_ms)?;
                target = Some(w.value.clone());
            }
            clock.set(Timestamp::from_ms(t_ms));
            out.push(Sample {
                t_ms,
                target: target.clone(),
                value: animated.get_all_at(clock.now())?,
            });
        }
        tracing::debug!(samples = out.len(), "script replayed");
        Ok(out)
    }

    /// A scalar wandering between random targets in `[0, 1)`: a new target every 1300 ms,
    /// each transition lasting 1000 ms.
    pub fn random_walk(seed: u64, until_ms: f64) -> OlaResult<Self> {
        const EVERY_MS: f64 = 1300.0;

        if !(until_ms.is_finite() && until_ms >= 0.0) {
            return Err(OlaError::shape("script until_ms must be finite and >= 0"));
        }
        let count = sample_count(until_ms, EVERY_MS)?;

        let mut rng = Rng64::new(seed);
        let writes = (0..count)
            .map(|i| ScriptWrite {
                at_ms: i as f64 * EVERY_MS,
                value: Value::Scalar(rng.next_f64_01()),
                duration_ms: None,
            })
            .collect();

        Ok(Self {
            initial: Value::Scalar(0.0),
            duration_ms: Some(1000.0),
            writes,
            until_ms,
        })
    }
}

/// SplitMix64, enough for reproducible demo targets.
#[derive(Clone, Copy, Debug)]
struct Rng64 {
    state: u64,
}

impl Rng64 {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/script.rs"]
mod tests;
