use std::borrow::Cow;

use indexmap::IndexMap;
use serde::ser::{Error as _, SerializeMap as _};

use crate::animation::tween::Tween;
use crate::animation::value::{SCALAR_KEY, Shape, Value};
use crate::foundation::core::{Clock, SystemClock, Timestamp};
use crate::foundation::error::{OlaError, OlaResult, check_duration};

/// Transition length used when none is configured, in milliseconds.
pub const DEFAULT_DURATION_MS: f64 = 300.0;

/// Options for an [`Animated`] value.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimatedOpts {
    /// Default transition length in milliseconds. Must be > 0.
    pub duration_ms: f64,
}

impl Default for AnimatedOpts {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
        }
    }
}

impl AnimatedOpts {
    /// Return options with a different default transition length.
    pub fn with_duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms;
        self
    }
}

/// Address of one dimension: a key name, or a sequence index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dim<'a> {
    /// Key name (`"value"` for scalars, `"0"`, `"1"`, ... also address sequence items).
    Name(&'a str),
    /// Sequence index.
    Index(usize),
}

impl Dim<'_> {
    fn name(&self) -> Cow<'_, str> {
        match *self {
            Self::Name(n) => Cow::Borrowed(n),
            Self::Index(i) => Cow::Owned(i.to_string()),
        }
    }
}

impl<'a> From<&'a str> for Dim<'a> {
    fn from(n: &'a str) -> Self {
        Self::Name(n)
    }
}

impl<'a> From<&'a String> for Dim<'a> {
    fn from(n: &'a String) -> Self {
        Self::Name(n)
    }
}

impl From<usize> for Dim<'static> {
    fn from(i: usize) -> Self {
        Self::Index(i)
    }
}

fn ms_to_secs(ms: f64) -> OlaResult<f64> {
    Ok(check_duration(ms)? / 1000.0)
}

/// A scalar, keyed structure or sequence whose numbers glide toward every value written to it.
///
/// Each number is an independent [`Tween`]. The set of dimensions and the [`Shape`] are fixed
/// at construction. Methods ending in `_at` take the evaluation instant explicitly; the others
/// read it from the value's [`Clock`].
///
/// Serializing an `Animated` evaluates it at the clock's current instant. Scalars serialize as
/// `{"value": n}`, keyed values as an object in construction order, sequences as an array.
#[derive(Clone, Debug)]
pub struct Animated<C = SystemClock> {
    dims: IndexMap<String, Tween>,
    shape: Shape,
    opts: AnimatedOpts,
    clock: C,
}

impl Animated<SystemClock> {
    /// Animate `initial` on the wall clock with the default 300 ms transitions.
    pub fn new(initial: impl Into<Value>) -> OlaResult<Self> {
        Self::with_opts(initial, AnimatedOpts::default())
    }

    /// Animate `initial` on the wall clock with custom options.
    pub fn with_opts(initial: impl Into<Value>, opts: AnimatedOpts) -> OlaResult<Self> {
        Self::with_clock(initial, opts, SystemClock)
    }
}

impl<C: Clock> Animated<C> {
    /// Animate `initial` using `clock` as the ambient time source.
    pub fn with_clock(initial: impl Into<Value>, opts: AnimatedOpts, clock: C) -> OlaResult<Self> {
        let initial = initial.into();
        let duration = ms_to_secs(opts.duration_ms)?;
        let now = clock.now();

        let mut dims = IndexMap::new();
        for (name, v) in initial.entries() {
            dims.insert(name, Tween::new(v, duration, now)?);
        }

        tracing::debug!(shape = ?initial.shape(), dims = dims.len(), "animated value created");
        Ok(Self {
            dims,
            shape: initial.shape(),
            opts,
            clock,
        })
    }

    /// Shape the value was constructed from.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Options the value was constructed with.
    pub fn opts(&self) -> AnimatedOpts {
        self.opts
    }

    /// The ambient time source.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Dimension names in construction order.
    pub fn dimensions(&self) -> impl Iterator<Item = &str> {
        self.dims.keys().map(String::as_str)
    }

    /// Number of dimensions.
    pub fn len(&self) -> usize {
        self.dims.len()
    }

    /// Whether there are no dimensions (built from an empty structure or sequence).
    pub fn is_empty(&self) -> bool {
        self.dims.is_empty()
    }

    /// Direct access to one dimension's tween.
    pub fn tween<'d>(&self, dim: impl Into<Dim<'d>>) -> OlaResult<&Tween> {
        let idx = self.index_of(dim.into())?;
        Ok(&self.dims[idx])
    }

    fn index_of(&self, dim: Dim<'_>) -> OlaResult<usize> {
        let name = dim.name();
        self.dims
            .get_index_of(name.as_ref())
            .ok_or_else(|| OlaError::unknown_dimension(name.into_owned()))
    }

    /// Current value of one dimension.
    pub fn get<'d>(&self, dim: impl Into<Dim<'d>>) -> OlaResult<f64> {
        self.get_at(dim, self.clock.now())
    }

    /// Value of one dimension at `now`.
    pub fn get_at<'d>(&self, dim: impl Into<Dim<'d>>, now: Timestamp) -> OlaResult<f64> {
        self.tween(dim)?.evaluate(now)
    }

    /// Current velocity of one dimension, in value units per second.
    pub fn rate<'d>(&self, dim: impl Into<Dim<'d>>) -> OlaResult<f64> {
        self.rate_at(dim, self.clock.now())
    }

    /// Velocity of one dimension at `now`.
    pub fn rate_at<'d>(&self, dim: impl Into<Dim<'d>>, now: Timestamp) -> OlaResult<f64> {
        self.tween(dim)?.evaluate_rate(now)
    }

    /// Value one dimension is heading to.
    pub fn target<'d>(&self, dim: impl Into<Dim<'d>>) -> OlaResult<f64> {
        Ok(self.tween(dim)?.target())
    }

    /// Current value of every dimension, in the original shape.
    pub fn get_all(&self) -> OlaResult<Value> {
        self.get_all_at(self.clock.now())
    }

    /// Value of every dimension at `now`, in the original shape.
    #[tracing::instrument(level = "trace", skip(self), err(level = "debug"))]
    pub fn get_all_at(&self, now: Timestamp) -> OlaResult<Value> {
        let evaluated = self
            .dims
            .iter()
            .map(|(name, tw)| Ok((name.as_str(), tw.evaluate(now)?)))
            .collect::<OlaResult<Vec<_>>>()?;
        Ok(self.shape.assemble(evaluated))
    }

    /// Targets of every dimension, in the original shape.
    pub fn targets(&self) -> Value {
        self.shape
            .assemble(self.dims.iter().map(|(name, tw)| (name.as_str(), tw.target())))
    }

    /// Whether every dimension has reached its target.
    pub fn is_settled(&self) -> OlaResult<bool> {
        self.is_settled_at(self.clock.now())
    }

    /// Whether every dimension has reached its target by `now`.
    pub fn is_settled_at(&self, now: Timestamp) -> OlaResult<bool> {
        for tw in self.dims.values() {
            if !tw.is_settled(now)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Retarget one dimension now. Returns its value at the moment of the write.
    pub fn write<'d>(
        &mut self,
        dim: impl Into<Dim<'d>>,
        value: f64,
        duration_ms: Option<f64>,
    ) -> OlaResult<f64> {
        let now = self.clock.now();
        self.write_at(dim, value, duration_ms, now)
    }

    /// Retarget one dimension at `now`. Returns its value at that instant.
    pub fn write_at<'d>(
        &mut self,
        dim: impl Into<Dim<'d>>,
        value: f64,
        duration_ms: Option<f64>,
        now: Timestamp,
    ) -> OlaResult<f64> {
        let idx = self.index_of(dim.into())?;
        self.retarget_all(&[(idx, value)], duration_ms, now)?;
        Ok(self.dims[idx].from())
    }

    /// Retarget every dimension present in `values` now, keeping the current duration.
    ///
    /// Returns the values observed at the moment of the write for the dimensions written,
    /// shaped like `values`.
    pub fn set(&mut self, values: impl Into<Value>) -> OlaResult<Value> {
        self.set_with(values, None)
    }

    /// Retarget every dimension present in `values` now, optionally with a new duration.
    pub fn set_with(
        &mut self,
        values: impl Into<Value>,
        duration_ms: Option<f64>,
    ) -> OlaResult<Value> {
        let now = self.clock.now();
        self.set_at(values, duration_ms, now)
    }

    /// Retarget every dimension present in `values` at `now`.
    ///
    /// `values` must match the original shape: a scalar for scalars, a (possibly partial) keyed
    /// structure addressing existing names, or a sequence no longer than the original. Keyed
    /// input is accepted for every shape since sequence items and scalars also have names.
    /// Dimensions absent from `values` keep their transition. On error nothing is modified.
    pub fn set_at(
        &mut self,
        values: impl Into<Value>,
        duration_ms: Option<f64>,
        now: Timestamp,
    ) -> OlaResult<Value> {
        let values = values.into();
        self.set_value_at(&values, duration_ms, now)
    }

    #[tracing::instrument(level = "trace", skip(self), err(level = "debug"))]
    fn set_value_at(
        &mut self,
        values: &Value,
        duration_ms: Option<f64>,
        now: Timestamp,
    ) -> OlaResult<Value> {
        match (values, self.shape) {
            (Value::Scalar(_), Shape::Keyed | Shape::Sequence) => {
                return Err(OlaError::shape(format!(
                    "cannot write a scalar to a {:?} value",
                    self.shape
                )));
            }
            (Value::Sequence(_), Shape::Scalar | Shape::Keyed) => {
                return Err(OlaError::shape(format!(
                    "cannot write a sequence to a {:?} value",
                    self.shape
                )));
            }
            _ => {}
        }

        let updates = values
            .entries()
            .into_iter()
            .map(|(name, v)| Ok((self.index_of(Dim::Name(&name))?, v)))
            .collect::<OlaResult<Vec<_>>>()?;

        self.retarget_all(&updates, duration_ms, now)?;
        Ok(values.shape().assemble(
            updates
                .iter()
                .filter_map(|&(idx, _)| self.dims.get_index(idx))
                .map(|(name, tw)| (name.as_str(), tw.from())),
        ))
    }

    /// Retarget `(dimension index, target)` pairs atomically.
    fn retarget_all(
        &mut self,
        updates: &[(usize, f64)],
        duration_ms: Option<f64>,
        now: Timestamp,
    ) -> OlaResult<()> {
        let duration = duration_ms.map(ms_to_secs).transpose()?;

        let mut staged = Vec::with_capacity(updates.len());
        for &(idx, target) in updates {
            let Some((_, tw)) = self.dims.get_index(idx) else {
                return Err(OlaError::unknown_dimension(idx.to_string()));
            };
            let mut next = tw.clone();
            next.retarget(target, now, duration)?;
            staged.push((idx, next));
        }

        for (idx, next) in staged {
            if let Some((_, tw)) = self.dims.get_index_mut(idx) {
                *tw = next;
            }
        }
        Ok(())
    }

    /// Evaluate at the clock's current instant as a JSON value (see the type docs for layout).
    pub fn to_json(&self) -> OlaResult<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| OlaError::serde(e.to_string()))
    }
}

impl<C: Clock> serde::Serialize for Animated<C> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let now = self.clock.now();
        match self.get_all_at(now).map_err(S::Error::custom)? {
            Value::Scalar(v) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(SCALAR_KEY, &v)?;
                map.end()
            }
            other => serde::Serialize::serialize(&other, serializer),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/animated.rs"]
mod tests;
