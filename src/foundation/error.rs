/// Convenience result type used across Ola.
pub type OlaResult<T> = Result<T, OlaError>;

/// Top-level error taxonomy used by the interpolation engine.
///
/// Every variant describes a caller mistake; nothing here is transient or retried.
#[derive(thiserror::Error, Debug)]
pub enum OlaError {
    /// A dimension was evaluated before its current transition began.
    #[error("time travel error: cannot read in the past (now {now}s, transition started {start}s)")]
    TimeTravel {
        /// Requested evaluation instant, in seconds.
        now: f64,
        /// Start of the dimension's current transition, in seconds.
        start: f64,
    },

    /// A read or write named a dimension the value was not constructed with.
    #[error("unknown dimension: {0:?}")]
    UnknownDimension(String),

    /// A transition duration that is not strictly positive.
    #[error("invalid duration: {0} (must be > 0)")]
    InvalidDuration(f64),

    /// A value whose shape cannot be used here (wrong container kind, non-numeric leaf).
    #[error("shape error: {0}")]
    Shape(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OlaError {
    /// Build an [`OlaError::Shape`] value.
    pub fn shape(msg: impl Into<String>) -> Self {
        Self::Shape(msg.into())
    }

    /// Build an [`OlaError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build an [`OlaError::UnknownDimension`] value.
    pub fn unknown_dimension(name: impl Into<String>) -> Self {
        Self::UnknownDimension(name.into())
    }
}

/// Reject durations that are zero, negative or NaN.
pub(crate) fn check_duration(duration: f64) -> OlaResult<f64> {
    if duration > 0.0 {
        Ok(duration)
    } else {
        Err(OlaError::InvalidDuration(duration))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
