//! Gravity-referenced pitch and roll from a filtered acceleration vector.
//!
//! Each angle normalizes one axis against the magnitude of the other two:
//!
//! - `pitch = atan2(x, sqrt(y² + z²))`
//! - `roll  = atan2(y, sqrt(x² + z²))`
//!
//! The norms are taken with `hypotf`, so huge but finite inputs stay exact.
//!
//! This stays well-conditioned while the device rotates about the queried axis,
//! unlike a single-axis `atan2(x, z)`.
//!
//! Degenerate inputs resolve deterministically:
//!
//! | input                                 | angle        |
//! |---------------------------------------|--------------|
//! | both normalizing axes exactly zero, queried axis zero | `0°` |
//! | both normalizing axes exactly zero, queried axis ≠ 0  | `±90°` (sign of queried axis) |
//! | any non-finite component              | `0°`         |

use micromath::vector::Vector3d;

use crate::TiltEstimate;

/// Estimate pitch and roll in degrees. Both are always finite and within `[-90, 90]`.
pub fn estimate(accel: Vector3d<f32>) -> TiltEstimate {
  TiltEstimate { pitch: axis_angle(accel.x, accel.y, accel.z), roll: axis_angle(accel.y, accel.x, accel.z) }
}

/// Angle of `axis` against the plane spanned by `a` and `b`.
fn axis_angle(axis: f32, a: f32, b: f32) -> f32 {
  if !(axis.is_finite() && a.is_finite() && b.is_finite()) {
    return 0.0;
  }

  // hypotf instead of sqrt(a² + b²): the squares overflow long before the norm does.
  let plane = libm::hypotf(a, b);
  let deg = if plane == 0.0 {
    if axis > 0.0 {
      90.0
    } else if axis < 0.0 {
      -90.0
    } else {
      0.0
    }
  } else {
    libm::atan2f(axis, plane).to_degrees()
  };

  // to_degrees can round a hair past ±90.
  deg.clamp(-90.0, 90.0)
}
