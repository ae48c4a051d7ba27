//! Cubic transition curve.
//!
//! The curve describes the *remaining displacement* of a transition: it starts at `x0` with
//! slope `v0` and lands on `0` with slope `0` after `t1` seconds. Callers recover the animated
//! value as `target - position(..)`.
//!
//! Both functions are only meaningful for `0 <= t <= t1` and require `t1 > 0`; past the end the
//! caller is expected to use the closed-form endpoint (displacement `0`, rate `0`).

fn coefficients(x0: f64, v0: f64, t1: f64) -> (f64, f64) {
    let a = (v0 * t1 + 2.0 * x0) / t1.powi(3);
    let b = -(2.0 * v0 * t1 + 3.0 * x0) / t1.powi(2);
    (a, b)
}

/// Remaining displacement `t` seconds into a transition of length `t1`.
pub fn position(x0: f64, v0: f64, t1: f64, t: f64) -> f64 {
    let (a, b) = coefficients(x0, v0, t1);
    ((a * t + b) * t + v0) * t + x0
}

/// Rate of change of the remaining displacement `t` seconds into a transition of length `t1`.
pub fn rate(x0: f64, v0: f64, t1: f64, t: f64) -> f64 {
    let (a, b) = coefficients(x0, v0, t1);
    (3.0 * a * t + 2.0 * b) * t + v0
}

#[cfg(test)]
#[path = "../../tests/unit/animation/curve.rs"]
mod tests;
