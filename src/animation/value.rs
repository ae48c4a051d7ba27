use indexmap::IndexMap;

use crate::foundation::error::{OlaError, OlaResult};

/// Dimension name used for a scalar value.
pub const SCALAR_KEY: &str = "value";

/// Container kind a value was built from. Fixed for the lifetime of an animated value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// A single number, stored under [`SCALAR_KEY`].
    Scalar,
    /// Named numbers, in insertion order.
    Keyed,
    /// Numbers addressed by index (`"0"`, `"1"`, ...).
    Sequence,
}

/// A plain numeric value in one of the three supported shapes.
///
/// Serializes untagged: a number, an object (keys in insertion order) or an array.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A single number.
    Scalar(f64),
    /// Named numbers.
    Keyed(IndexMap<String, f64>),
    /// Ordered numbers.
    Sequence(Vec<f64>),
}

impl Value {
    /// Build a keyed value from `(name, number)` pairs, keeping their order.
    pub fn keyed<K: Into<String>>(entries: impl IntoIterator<Item = (K, f64)>) -> Self {
        Self::Keyed(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build a sequence value.
    pub fn sequence(values: impl IntoIterator<Item = f64>) -> Self {
        Self::Sequence(values.into_iter().collect())
    }

    /// Container kind of this value.
    pub fn shape(&self) -> Shape {
        match self {
            Self::Scalar(_) => Shape::Scalar,
            Self::Keyed(_) => Shape::Keyed,
            Self::Sequence(_) => Shape::Sequence,
        }
    }

    /// Flatten into `(dimension name, number)` pairs in dimension order.
    pub(crate) fn entries(&self) -> Vec<(String, f64)> {
        match self {
            Self::Scalar(v) => vec![(SCALAR_KEY.to_owned(), *v)],
            Self::Keyed(map) => map.iter().map(|(k, v)| (k.clone(), *v)).collect(),
            Self::Sequence(values) => values
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), *v))
                .collect(),
        }
    }
}

impl Shape {
    /// Rebuild a value of this shape from numbers listed in dimension order.
    pub(crate) fn assemble<'a>(self, entries: impl IntoIterator<Item = (&'a str, f64)>) -> Value {
        let mut entries = entries.into_iter();
        match self {
            Self::Scalar => Value::Scalar(entries.next().map(|(_, v)| v).unwrap_or_default()),
            Self::Keyed => Value::keyed(entries),
            Self::Sequence => Value::sequence(entries.map(|(_, v)| v)),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Scalar(f64::from(v))
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Scalar(f64::from(v))
    }
}

impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self {
        Self::Sequence(v)
    }
}

impl<const N: usize> From<[f64; N]> for Value {
    fn from(v: [f64; N]) -> Self {
        Self::Sequence(v.to_vec())
    }
}

impl From<IndexMap<String, f64>> for Value {
    fn from(v: IndexMap<String, f64>) -> Self {
        Self::Keyed(v)
    }
}

impl<K: Into<String>> From<Vec<(K, f64)>> for Value {
    fn from(v: Vec<(K, f64)>) -> Self {
        Self::keyed(v)
    }
}

impl<K: Into<String>, const N: usize> From<[(K, f64); N]> for Value {
    fn from(v: [(K, f64); N]) -> Self {
        Self::keyed(v)
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = OlaError;

    fn try_from(v: serde_json::Value) -> OlaResult<Self> {
        match v {
            serde_json::Value::Number(_)
            | serde_json::Value::Object(_)
            | serde_json::Value::Array(_) => serde_json::from_value(v)
                .map_err(|e| OlaError::shape(format!("expected numeric leaves: {e}"))),
            other => Err(OlaError::shape(format!(
                "expected a number, object or array, got {other}"
            ))),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Scalar(n) => serde_json::json!(n),
            Value::Keyed(map) => serde_json::Value::Object(
                map.into_iter()
                    .map(|(k, n)| (k, serde_json::json!(n)))
                    .collect(),
            ),
            Value::Sequence(values) => serde_json::json!(values),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/value.rs"]
mod tests;
