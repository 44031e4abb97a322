#![no_std]
#![doc = include_str!("../README.md")]
//!
//! ## Design Principles
//!
//! - **Allocation-free core**: filter, tilt estimator and display mapper are plain
//!   synchronous state machines usable without any I/O
//! - **Async-first glue**: sensor bring-up and the polling loop are built on
//!   `embedded-hal-async` I2C and delay traits
//! - **Minimal output churn**: each frame only writes the LEDs that change
//! - **Deterministic math**: degenerate or non-finite inputs map to defined angles
//!
//! ## Module Organization
//!
//! - [`filter`]: exponential low-pass filter over the three axes
//! - [`tilt`]: pitch and roll from a filtered acceleration vector
//! - [`display`]: angle to lit-count mapping and frame diffing
//! - [`level`]: the three above composed into one pipeline
//! - [`sensor`]: accelerometer source trait and range configuration
//! - [`mpu6050`]: MPU-6050 accelerometer source
//! - [`leds`]: LED bar output sink
//! - [`startup`]: bounded sensor bring-up
//! - [`driver`]: the fixed-cadence polling loop
//!
//! ## Basic Usage
//!
//! ```
//! use bubble_level::{level::Level, RawSample};
//!
//! let mut level = Level::<20>::default();
//! let frame = level.update(RawSample { x: 0.0, y: 0.0, z: 1.0 });
//! assert_eq!(frame.lit, 0);
//!
//! let frame = level.update(RawSample { x: 1.0, y: 0.0, z: 0.0 });
//! for change in frame.changes {
//!   // drive LED `change.index` to `change.on`
//! #   let _ = change;
//! }
//! ```

#[cfg(test)]
extern crate std;

#[macro_use]
mod fmt;

pub mod display;
pub mod driver;
pub mod filter;
pub mod leds;
pub mod level;
pub mod mpu6050;
pub mod sensor;
pub mod startup;
pub mod tilt;
mod types;

pub use types::*;

use leds::LedError;

/// Crate error type.
///
/// Wraps the sensor error `S` and the LED pin error `P` and adds the
/// startup failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<S, P> {
  /// Sensor read failed
  Sensor(S),
  /// Sensor never came up; `source` is the error of the last attempt
  Init { attempts: u32, source: S },
  /// LED write failed
  Led(LedError<P>),
}
