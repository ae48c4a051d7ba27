use crate::animation::curve;
use crate::foundation::core::Timestamp;
use crate::foundation::error::{OlaError, OlaResult, check_duration};

/// One animated scalar and its in-flight transition.
///
/// The transition runs from `from` at `start` to `to` at `start + duration`, leaving `from`
/// with velocity `rate` and arriving at rest. All instants are explicit; a `Tween` never reads a
/// clock.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tween {
    start: Timestamp,
    duration: f64, // seconds, > 0
    from: f64,
    to: f64,
    rate: f64, // d(value)/dt at `start`
}

impl Tween {
    /// A tween resting at `value` since `now`, with transitions lasting `duration_secs`.
    pub fn new(value: f64, duration_secs: f64, now: Timestamp) -> OlaResult<Self> {
        Ok(Self {
            start: now,
            duration: check_duration(duration_secs)?,
            from: value,
            to: value,
            rate: 0.0,
        })
    }

    /// Start of the current transition.
    pub fn start(&self) -> Timestamp {
        self.start
    }

    /// Length of the current (and following) transitions, in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration
    }

    /// Value the current transition started from.
    pub fn from(&self) -> f64 {
        self.from
    }

    /// Value the current transition is heading to.
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Seconds into the current transition, refusing instants before it started.
    fn elapsed(&self, now: Timestamp) -> OlaResult<f64> {
        let t = now.elapsed_since(self.start);
        if t < 0.0 {
            tracing::debug!(
                now = now.secs(),
                start = self.start.secs(),
                "refused read in the past"
            );
            return Err(OlaError::TimeTravel {
                now: now.secs(),
                start: self.start.secs(),
            });
        }
        Ok(t)
    }

    /// Value at `now`.
    pub fn evaluate(&self, now: Timestamp) -> OlaResult<f64> {
        let t = self.elapsed(now)?;
        if t >= self.duration {
            return Ok(self.to);
        }
        Ok(self.to - curve::position(self.to - self.from, -self.rate, self.duration, t))
    }

    /// Velocity (value units per second) at `now`; `0` once the transition has finished.
    pub fn evaluate_rate(&self, now: Timestamp) -> OlaResult<f64> {
        let t = self.elapsed(now)?;
        if t >= self.duration {
            return Ok(0.0);
        }
        Ok(-curve::rate(self.to - self.from, -self.rate, self.duration, t))
    }

    /// Whether the current transition has reached its target by `now`.
    pub fn is_settled(&self, now: Timestamp) -> OlaResult<bool> {
        Ok(self.elapsed(now)? >= self.duration)
    }

    /// Head for `target` starting at `now`, continuing from the current position and velocity.
    ///
    /// `duration_secs` replaces the transition length for this and later retargets. Returns the
    /// value at `now`, which is where the new transition starts.
    pub fn retarget(
        &mut self,
        target: f64,
        now: Timestamp,
        duration_secs: Option<f64>,
    ) -> OlaResult<f64> {
        let duration = duration_secs.map(check_duration).transpose()?;
        let current = self.evaluate(now)?;
        let rate = self.evaluate_rate(now)?;

        self.from = current;
        self.rate = rate;
        self.start = now;
        self.to = target;
        if let Some(d) = duration {
            self.duration = d;
        }
        tracing::trace!(from = current, to = target, rate, duration = self.duration, "retarget");
        Ok(current)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
