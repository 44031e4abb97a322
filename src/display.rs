//! Angle-to-LED-bar mapping and minimal frame diffing.
//!
//! The bar is a row of `N` outputs in ascending severity. The lit outputs are
//! always a contiguous prefix `[0, k)`, so a frame is fully described by `k`
//! and moving from `k_prev` to `k` only touches `[min, max)` of the two.

use core::iter::FusedIterator;

/// LED count of the reference hardware.
pub const DEFAULT_LED_COUNT: usize = 20;

/// Angle magnitude that lights the whole bar.
pub const FULL_SCALE_DEG: f32 = 90.0;

/// Map `|angle|` from `[0, 90]` degrees onto `[0, n]` lit cells, rounding toward
/// zero. Anything past 90° lights the whole bar; a non-finite angle lights nothing.
pub fn lit_count(angle: f32, n: usize) -> usize {
  if !angle.is_finite() {
    return 0;
  }
  let magnitude = libm::fabsf(angle).min(FULL_SCALE_DEG);
  // `as` truncates toward zero and saturates.
  let k = (magnitude * n as f32 / FULL_SCALE_DEG) as usize;
  k.min(n)
}

/// What is currently lit: the prefix `[0, lit)` of an `N`-cell bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayState<const N: usize> {
  lit: usize,
}

impl<const N: usize> DisplayState<N> {
  /// All cells off.
  pub const fn new() -> Self {
    Self { lit: 0 }
  }

  /// Number of lit cells, always `<= N`.
  pub fn lit(&self) -> usize {
    self.lit
  }

  pub fn is_lit(&self, index: usize) -> bool {
    index < self.lit
  }

  pub fn to_array(&self) -> [bool; N] {
    core::array::from_fn(|i| self.is_lit(i))
  }
}

/// A single output write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Change {
  pub index: usize,
  pub on: bool,
}

/// The writes needed to move between two frames, in ascending index order.
///
/// Growing the bar yields only `on` changes, shrinking it only `off` changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changes {
  next: usize,
  end: usize,
  on: bool,
}

impl Changes {
  pub(crate) fn between(prev: usize, lit: usize) -> Self {
    Self { next: prev.min(lit), end: prev.max(lit), on: lit > prev }
  }
}

impl Iterator for Changes {
  type Item = Change;

  fn next(&mut self) -> Option<Change> {
    if self.next >= self.end {
      return None;
    }
    let index = self.next;
    self.next += 1;
    Some(Change { index, on: self.on })
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    let n = self.end.saturating_sub(self.next);
    (n, Some(n))
  }
}

impl ExactSizeIterator for Changes {}
impl FusedIterator for Changes {}

/// Owns the [`DisplayState`] and turns new angles into minimal change sets.
#[derive(Debug, Clone, Default)]
pub struct DisplayMapper<const N: usize> {
  state: DisplayState<N>,
}

impl<const N: usize> DisplayMapper<N> {
  pub const fn new() -> Self {
    Self { state: DisplayState::new() }
  }

  pub fn state(&self) -> DisplayState<N> {
    self.state
  }

  /// Light `lit_count(angle, N)` cells and return the writes that get there.
  pub fn update(&mut self, angle: f32) -> Changes {
    self.set_lit(lit_count(angle, N))
  }

  /// Move to `lit` cells (clamped to `N`) and return the writes that get there.
  pub fn set_lit(&mut self, lit: usize) -> Changes {
    let lit = lit.min(N);
    let changes = Changes::between(self.state.lit, lit);
    self.state.lit = lit;
    changes
  }
}
