use core::fmt;

use micromath::vector::Vector3d;

/// One accelerometer reading in g, as delivered by an [`AccelSource`](crate::sensor::AccelSource).
pub type RawSample = Vector3d<f32>;

/// Pitch and roll in degrees, each within `[-90, 90]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TiltEstimate {
  pub pitch: f32,
  pub roll: f32,
}

impl TiltEstimate {
  /// Angle on the requested axis.
  pub fn angle(&self, axis: Axis) -> f32 {
    match axis {
      Axis::Pitch => self.pitch,
      Axis::Roll => self.roll,
    }
  }
}

/// Renders the diagnostic line, e.g. `Pitch: 12.50 Roll: -3.25`.
impl fmt::Display for TiltEstimate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Pitch: {:.2} Roll: {:.2}", self.pitch, self.roll)
  }
}

/// Which tilt angle drives the LED bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
  #[default]
  Pitch,
  Roll,
}

#[cfg(test)]
mod tests {
  use std::format;

  use super::*;

  #[test]
  fn test_diagnostic_line_format() {
    let t = TiltEstimate { pitch: 12.5, roll: -3.254 };
    assert_eq!(format!("{}", t), "Pitch: 12.50 Roll: -3.25");
  }

  #[test]
  fn test_axis_selects_angle() {
    let t = TiltEstimate { pitch: 10.0, roll: -20.0 };
    assert_eq!(t.angle(Axis::Pitch), 10.0);
    assert_eq!(t.angle(Axis::Roll), -20.0);
    assert_eq!(Axis::default(), Axis::Pitch);
  }
}
