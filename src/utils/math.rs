use std::f64::consts::PI;

use crate::utils::{SolverError, BISECTION_EPSILON, BISECTION_MAX_ITERATIONS};

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Convert radians to degrees
#[inline]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Wrap an angle onto [-pi, pi] along the shortest path.
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped == -PI && angle > 0.0 {
        PI
    } else {
        wrapped
    }
}

/// Sign that maps zero onto zero (`f64::signum` maps `+0.0` to `1.0`).
#[inline]
pub fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Apply `counter` to `original` unless doing so would reverse (or cancel) the
/// sign of `original`, in which case the result is exactly zero.
#[inline]
pub fn original_plus_counter(original: f64, counter: f64) -> f64 {
    let sum = original + counter;
    if original * sum <= 0.0 {
        0.0
    } else {
        sum
    }
}

/// Bisection search for a root of `f` in `[lo, hi]`.
///
/// Requires a sign change across the bracket. The returned value always lies
/// inside the bracket; iteration stops once `|f(x)| <= BISECTION_EPSILON` or the
/// bracket can no longer be halved.
pub fn bisect<F>(mut f: F, lo: f64, hi: f64) -> Result<f64, SolverError>
where
    F: FnMut(f64) -> f64,
{
    let (mut lo, mut hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    let mut f_lo = f(lo);
    let f_hi = f(hi);

    if f_lo.abs() <= BISECTION_EPSILON {
        return Ok(lo);
    }
    if f_hi.abs() <= BISECTION_EPSILON {
        return Ok(hi);
    }
    if !(f_lo * f_hi < 0.0) {
        return Err(SolverError::RootNotFound { lo, hi, f_lo, f_hi });
    }

    let mut mid = 0.5 * (lo + hi);
    for _ in 0..BISECTION_MAX_ITERATIONS {
        mid = 0.5 * (lo + hi);
        let f_mid = f(mid);
        if f_mid.abs() <= BISECTION_EPSILON || mid <= lo || mid >= hi {
            break;
        }
        if f_lo * f_mid < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }
    Ok(mid)
}
