//! Ola turns discontinuous writes into smooth motion.
//!
//! Assign a new target to an animated value and reads made afterwards follow a cubic
//! trajectory from wherever the value currently is to the new target. Each retarget inherits
//! the instantaneous velocity of the transition it interrupts, so rapid writes never produce a
//! visible jump in position or speed.
//!
//! # Layers
//!
//! 1. **Curve**: pure cubic position/rate functions over an explicit elapsed time.
//! 2. **Tween**: one scalar dimension and its in-flight transition.
//! 3. **Animated**: a scalar, keyed structure or sequence fanned out into per-dimension tweens.
//!
//! Time is always explicit below [`Animated`]; only the convenience methods that omit `now`
//! consult the coordinator's [`Clock`].
//!
//! ```
//! use ola::{Animated, ManualClock, Value};
//!
//! let clock = ManualClock::new();
//! let mut pos = Animated::with_clock(0.0, Default::default(), clock.clone()).unwrap();
//! pos.set(100.0).unwrap();
//! assert_eq!(pos.get("value").unwrap(), 0.0);
//!
//! clock.advance_ms(300.0);
//! assert_eq!(pos.get_all().unwrap(), Value::Scalar(100.0));
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod foundation;

pub use animation::animated::{Animated, AnimatedOpts, DEFAULT_DURATION_MS, Dim};
pub use animation::curve::{position, rate};
pub use animation::script::{MAX_SCRIPT_SAMPLES, Sample, Script, ScriptWrite};
pub use animation::shared::Shared;
pub use animation::tween::Tween;
pub use animation::value::{SCALAR_KEY, Shape, Value};
pub use foundation::core::{Clock, ManualClock, SystemClock, Timestamp};
pub use foundation::error::{OlaError, OlaResult};
