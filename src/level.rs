//! The I/O-free tilt pipeline: filter, estimate, map.

use crate::{
  display::{Changes, DisplayMapper, DisplayState},
  filter::LowPassFilter,
  tilt, Axis, RawSample, TiltEstimate,
};

/// Result of one pipeline cycle.
#[derive(Debug, Clone)]
pub struct Frame {
  /// Pitch and roll of the filtered sample.
  pub tilt: TiltEstimate,
  /// The angle on [`Level::axis`] that drove the bar.
  pub angle: f32,
  /// Number of cells lit after this frame.
  pub lit: usize,
  /// Writes that bring the bar from the previous frame to this one.
  pub changes: Changes,
}

/// Filter, tilt estimator and display mapper for an `N`-cell bar.
///
/// Holds all state carried between cycles. Both the filter and the display
/// start empty: the first sample seeds the filter and the bar starts dark.
#[derive(Debug, Clone)]
pub struct Level<const N: usize> {
  filter: LowPassFilter,
  mapper: DisplayMapper<N>,
  axis: Axis,
}

impl<const N: usize> Level<N> {
  pub fn new(filter: LowPassFilter, axis: Axis) -> Self {
    Self { filter, mapper: DisplayMapper::new(), axis }
  }

  pub fn axis(&self) -> Axis {
    self.axis
  }

  pub fn display(&self) -> DisplayState<N> {
    self.mapper.state()
  }

  pub fn filter(&self) -> &LowPassFilter {
    &self.filter
  }

  /// Run one sample through the pipeline.
  pub fn update(&mut self, raw: RawSample) -> Frame {
    let filtered = self.filter.update(raw);
    let tilt = tilt::estimate(filtered);
    let angle = tilt.angle(self.axis);
    let changes = self.mapper.update(angle);
    Frame { tilt, angle, lit: self.mapper.state().lit(), changes }
  }
}

impl<const N: usize> Default for Level<N> {
  fn default() -> Self {
    Self::new(LowPassFilter::default(), Axis::Pitch)
  }
}

#[cfg(test)]
mod tests {
  use micromath::vector::Vector3d;
  use std::vec::Vec;

  use super::*;
  use crate::display::{Change, DEFAULT_LED_COUNT};

  fn v(x: f32, y: f32, z: f32) -> RawSample {
    Vector3d { x, y, z }
  }

  #[test]
  fn test_flat_sample_lights_nothing() {
    let mut level = Level::<DEFAULT_LED_COUNT>::default();
    let frame = level.update(v(0.0, 0.0, 1.0));

    assert_eq!(frame.tilt.pitch, 0.0);
    assert_eq!(frame.tilt.roll, 0.0);
    assert_eq!(frame.lit, 0);
    assert_eq!(frame.changes.len(), 0);
    assert_eq!(level.display().to_array(), [false; DEFAULT_LED_COUNT]);
  }

  #[test]
  fn test_vertical_sample_lights_everything() {
    let mut level = Level::<DEFAULT_LED_COUNT>::default();
    let frame = level.update(v(1.0, 0.0, 0.0));

    assert_eq!(frame.tilt.pitch, 90.0);
    assert_eq!(frame.angle, 90.0);
    assert_eq!(frame.lit, DEFAULT_LED_COUNT);
    let changes: Vec<Change> = frame.changes.collect();
    assert_eq!(changes.len(), DEFAULT_LED_COUNT);
    assert!(changes.iter().all(|c| c.on));
    assert_eq!(level.display().to_array(), [true; DEFAULT_LED_COUNT]);
  }

  #[test]
  fn test_filter_lag_walks_the_bar_up() {
    let mut level = Level::<DEFAULT_LED_COUNT>::default();
    let _ = level.update(v(0.0, 0.0, 1.0));

    let mut prev = 0;
    let mut total_writes = 0;
    for _ in 0..100 {
      let frame = level.update(v(1.0, 0.0, 0.0));
      assert!(frame.lit >= prev);
      total_writes += frame.changes.len();
      prev = frame.lit;
    }
    // Each cell is switched on exactly once on the way up.
    assert_eq!(total_writes, prev);
    assert!(prev >= DEFAULT_LED_COUNT - 1);
  }

  #[test]
  fn test_roll_axis_drives_the_bar() {
    let mut level = Level::<10>::new(LowPassFilter::default(), Axis::Roll);
    let frame = level.update(v(0.0, -1.0, 1.0));
    assert!((frame.tilt.roll + 45.0).abs() < 1e-4);
    assert_eq!(frame.angle, frame.tilt.roll);
    assert_eq!(frame.lit, 5);
  }

  #[test]
  fn test_recovers_after_non_finite_sample() {
    let mut level = Level::<DEFAULT_LED_COUNT>::default();
    let _ = level.update(v(0.5, 0.0, 0.8));
    let before = level.display().lit();

    let frame = level.update(v(f32::NAN, 0.0, 1.0));
    assert_eq!(frame.lit, before);
    assert_eq!(frame.changes.len(), 0);

    for _ in 0..500 {
      let _ = level.update(v(1.0, 0.0, 0.0));
    }
    assert_eq!(level.display().lit(), DEFAULT_LED_COUNT);
    assert!(level.filter().state().unwrap().x.is_finite());
  }
}
