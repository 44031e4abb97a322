//! LED bar output sink.

use embedded_hal::digital::{OutputPin, PinState};

use crate::display::{Change, DisplayState};

/// LED bar error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedError<E> {
  /// Pin driver error
  Pin(E),
  /// Index past the end of the bar
  InvalidIndex(usize),
}

/// Fixed, ordered set of LED pins. Index 0 is the least severe cell.
pub struct LedBar<P, const N: usize> {
  pins: [P; N],
}

impl<P, E, const N: usize> LedBar<P, N>
where
  P: OutputPin<Error = E>,
{
  /// Take ownership of the pins and drive them all low so the hardware
  /// matches an all-off display.
  pub fn new(mut pins: [P; N]) -> Result<Self, LedError<E>> {
    for pin in pins.iter_mut() {
      pin.set_low().map_err(LedError::Pin)?;
    }
    Ok(Self { pins })
  }

  pub const fn len(&self) -> usize {
    N
  }

  pub const fn is_empty(&self) -> bool {
    N == 0
  }

  pub fn set(&mut self, index: usize, on: bool) -> Result<(), LedError<E>> {
    let pin = self.pins.get_mut(index).ok_or(LedError::InvalidIndex(index))?;
    pin.set_state(PinState::from(on)).map_err(LedError::Pin)
  }

  /// Write each change in order, stopping at the first failure.
  pub fn apply(&mut self, changes: impl IntoIterator<Item = Change>) -> Result<(), LedError<E>> {
    for c in changes {
      self.set(c.index, c.on)?;
    }
    Ok(())
  }

  /// Rewrite every pin from `state`, e.g. after a failed write left the
  /// hardware out of step with the display.
  pub fn show(&mut self, state: &DisplayState<N>) -> Result<(), LedError<E>> {
    for (i, pin) in self.pins.iter_mut().enumerate() {
      pin.set_state(PinState::from(state.is_lit(i))).map_err(LedError::Pin)?;
    }
    Ok(())
  }

  pub fn release(self) -> [P; N] {
    self.pins
  }
}

#[cfg(test)]
mod tests {
  use core::{cell::RefCell, convert::Infallible};
  use embedded_hal::digital::ErrorType;
  use std::{rc::Rc, vec::Vec};

  use super::*;
  use crate::display::DisplayMapper;

  type Log = Rc<RefCell<Vec<(usize, bool)>>>;

  struct FakePin {
    id: usize,
    log: Log,
  }

  impl ErrorType for FakePin {
    type Error = Infallible;
  }

  impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Infallible> {
      self.log.borrow_mut().push((self.id, false));
      Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
      self.log.borrow_mut().push((self.id, true));
      Ok(())
    }
  }

  fn bar<const N: usize>() -> (LedBar<FakePin, N>, Log) {
    let log = Log::default();
    let pins = core::array::from_fn(|id| FakePin { id, log: log.clone() });
    let bar = LedBar::new(pins).unwrap();
    (bar, log)
  }

  #[test]
  fn test_new_drives_all_pins_low() {
    let (_bar, log) = bar::<4>();
    assert_eq!(*log.borrow(), [(0, false), (1, false), (2, false), (3, false)]);
  }

  #[test]
  fn test_apply_writes_only_changed_pins() {
    let (mut bar, log) = bar::<20>();
    let mut mapper = DisplayMapper::<20>::new();
    bar.apply(mapper.set_lit(5)).unwrap();
    log.borrow_mut().clear();

    bar.apply(mapper.set_lit(12)).unwrap();
    let expected: Vec<(usize, bool)> = (5..12).map(|i| (i, true)).collect();
    assert_eq!(*log.borrow(), expected);
  }

  #[test]
  fn test_show_rewrites_every_pin() {
    let (mut bar, log) = bar::<4>();
    let mut mapper = DisplayMapper::<4>::new();
    let _ = mapper.set_lit(2).count();
    log.borrow_mut().clear();

    bar.show(&mapper.state()).unwrap();
    assert_eq!(*log.borrow(), [(0, true), (1, true), (2, false), (3, false)]);
  }

  #[test]
  fn test_out_of_range_index_is_an_error() {
    let (mut bar, log) = bar::<3>();
    log.borrow_mut().clear();
    assert_eq!(bar.set(3, true), Err(LedError::InvalidIndex(3)));
    assert!(log.borrow().is_empty());
    assert_eq!(bar.len(), 3);
  }
}
