//! Conversions between configured seconds and scheduler time.
//!
//! Tunables are authored as `f32` seconds, but the scheduler keeps time as
//! [`Duration`]. Rounding every configured value to whole microseconds keeps
//! sums like `25 * 0.12` landing exactly on `3.0`, which float accumulation
//! does not.

use std::time::Duration;

/// Convert configured seconds to a [`Duration`], rounded to the microsecond.
/// Negative and NaN inputs become zero.
pub fn secs(seconds: f32) -> Duration {
    if seconds.is_nan() || seconds <= 0.0 {
        return Duration::ZERO;
    }
    Duration::from_micros((f64::from(seconds) * 1_000_000.0).round() as u64)
}

/// `elapsed / total`, clamped to [0, 1]. A zero `total` counts as complete.
pub fn progress(elapsed: Duration, total: Duration) -> f32 {
    if total.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0) as f32
}
