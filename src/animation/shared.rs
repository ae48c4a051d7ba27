use std::sync::{Arc, Mutex, MutexGuard};

use crate::animation::animated::{Animated, Dim};
use crate::animation::value::Value;
use crate::foundation::core::{Clock, SystemClock, Timestamp};
use crate::foundation::error::{OlaError, OlaResult};

/// Thread-safe handle to an [`Animated`] value.
///
/// Every read and write holds one exclusive lock for its whole duration, so a retarget (which
/// reads the current state, then replaces it) never interleaves with another operation.
#[derive(Debug)]
pub struct Shared<C = SystemClock> {
    inner: Arc<Mutex<Animated<C>>>,
}

impl<C> Clone for Shared<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Clock> Shared<C> {
    /// Wrap an animated value.
    pub fn new(animated: Animated<C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(animated)),
        }
    }

    fn lock(&self) -> OlaResult<MutexGuard<'_, Animated<C>>> {
        self.inner
            .lock()
            .map_err(|_| OlaError::Other(anyhow::anyhow!("animated value lock poisoned")))
    }

    /// See [`Animated::get`].
    pub fn get<'d>(&self, dim: impl Into<Dim<'d>>) -> OlaResult<f64> {
        self.lock()?.get(dim)
    }

    /// See [`Animated::get_at`].
    pub fn get_at<'d>(&self, dim: impl Into<Dim<'d>>, now: Timestamp) -> OlaResult<f64> {
        self.lock()?.get_at(dim, now)
    }

    /// See [`Animated::get_all`].
    pub fn get_all(&self) -> OlaResult<Value> {
        self.lock()?.get_all()
    }

    /// See [`Animated::get_all_at`].
    pub fn get_all_at(&self, now: Timestamp) -> OlaResult<Value> {
        self.lock()?.get_all_at(now)
    }

    /// See [`Animated::write`].
    pub fn write<'d>(
        &self,
        dim: impl Into<Dim<'d>>,
        value: f64,
        duration_ms: Option<f64>,
    ) -> OlaResult<f64> {
        self.lock()?.write(dim, value, duration_ms)
    }

    /// See [`Animated::write_at`].
    pub fn write_at<'d>(
        &self,
        dim: impl Into<Dim<'d>>,
        value: f64,
        duration_ms: Option<f64>,
        now: Timestamp,
    ) -> OlaResult<f64> {
        self.lock()?.write_at(dim, value, duration_ms, now)
    }

    /// See [`Animated::set_with`].
    pub fn set(&self, values: impl Into<Value>, duration_ms: Option<f64>) -> OlaResult<Value> {
        self.lock()?.set_with(values, duration_ms)
    }

    /// See [`Animated::set_at`].
    pub fn set_at(
        &self,
        values: impl Into<Value>,
        duration_ms: Option<f64>,
        now: Timestamp,
    ) -> OlaResult<Value> {
        self.lock()?.set_at(values, duration_ms, now)
    }

    /// Run `f` with exclusive access to the underlying value.
    pub fn with<R>(&self, f: impl FnOnce(&mut Animated<C>) -> R) -> OlaResult<R> {
        Ok(f(&mut *self.lock()?))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/shared.rs"]
mod tests;
