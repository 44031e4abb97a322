//! Exponential low-pass filter over the three acceleration axes.

use micromath::vector::Vector3d;

use crate::RawSample;

/// Reference smoothing constant. Smaller means heavier smoothing and more lag.
pub const DEFAULT_ALPHA: f32 = 0.1;

/// Per-axis exponential smoother: `filtered = alpha * raw + (1 - alpha) * filtered`.
///
/// The state is seeded from the first sample rather than from zero, so the
/// first output equals the first input and there is no startup pull toward
/// the origin.
///
/// A sample with any NaN or infinite axis is dropped whole: it neither seeds
/// nor moves the state, so one bad read cannot poison every later output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LowPassFilter {
  alpha: f32,
  state: Option<Vector3d<f32>>,
}

impl LowPassFilter {
  /// Create an unseeded filter.
  ///
  /// `alpha` is clamped into `(0, 1]`; a non-finite value falls back to
  /// [`DEFAULT_ALPHA`].
  pub fn new(alpha: f32) -> Self {
    let alpha = if alpha.is_finite() { alpha.clamp(f32::EPSILON, 1.0) } else { DEFAULT_ALPHA };
    Self { alpha, state: None }
  }

  pub fn alpha(&self) -> f32 {
    self.alpha
  }

  /// Current filtered value, `None` until the first sample arrives.
  pub fn state(&self) -> Option<Vector3d<f32>> {
    self.state
  }

  /// Feed one raw sample and return the updated filtered value.
  ///
  /// A non-finite sample returns the previous state unchanged, or the sample
  /// itself while still unseeded (the tilt stage maps it to level).
  pub fn update(&mut self, raw: RawSample) -> Vector3d<f32> {
    if !(raw.x.is_finite() && raw.y.is_finite() && raw.z.is_finite()) {
      return self.state.unwrap_or(raw);
    }

    let next = match self.state {
      None => raw,
      Some(prev) => Vector3d {
        x: self.smooth(prev.x, raw.x),
        y: self.smooth(prev.y, raw.y),
        z: self.smooth(prev.z, raw.z),
      },
    };
    self.state = Some(next);
    next
  }

  /// Forget the seed; the next sample re-seeds the filter.
  pub fn reset(&mut self) {
    self.state = None;
  }

  #[inline]
  fn smooth(&self, prev: f32, raw: f32) -> f32 {
    self.alpha * raw + (1.0 - self.alpha) * prev
  }
}

impl Default for LowPassFilter {
  fn default() -> Self {
    Self::new(DEFAULT_ALPHA)
  }
}
