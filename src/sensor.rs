//! Accelerometer source abstraction and full-scale range selection.
//!
//! Any sensor able to report acceleration in g can drive the level by
//! implementing [`AccelSource`]. The crate ships one implementation,
//! [`Mpu6050`](crate::mpu6050::Mpu6050).
//!
//! # Examples
//!
//! ```no_run
//! # async fn example<S: bubble_level::sensor::AccelSource>(mut sensor: S) -> Result<(), S::Error> {
//! use bubble_level::sensor::{AccelRange, ScaleConfig};
//!
//! let scale = ScaleConfig { accel: AccelRange::G4, ..Default::default() };
//! sensor.init(scale).await?;
//! let _a = sensor.read_accel().await?;
//! # Ok(())
//! # }
//! ```

use micromath::vector::Vector3d;

use crate::RawSample;

/// A device producing tri-axial acceleration samples.
#[allow(async_fn_in_trait)]
pub trait AccelSource {
  type Error;

  /// Bring the device up with the given full-scale ranges. An error means the
  /// device is not (yet) reachable and the caller may retry.
  async fn init(&mut self, scale: ScaleConfig) -> Result<(), Self::Error>;

  /// Read one sample in g.
  async fn read_accel(&mut self) -> Result<RawSample, Self::Error>;
}

impl<T: AccelSource> AccelSource for &mut T {
  type Error = T::Error;

  async fn init(&mut self, scale: ScaleConfig) -> Result<(), Self::Error> {
    T::init(self, scale).await
  }

  async fn read_accel(&mut self) -> Result<RawSample, Self::Error> {
    T::read_accel(self).await
  }
}

/// Full-scale ranges, chosen once at startup.
///
/// Defaults to ±2000 °/s and ±2 g: the widest rate range and the finest
/// acceleration resolution, which is what a level wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScaleConfig {
  pub gyro: GyroRange,
  pub accel: AccelRange,
}

impl ScaleConfig {
  /// Scale raw 16-bit accelerometer counts to g for the configured range.
  pub fn accel_from_raw(&self, raw: Vector3d<i16>) -> RawSample {
    let m = self.accel.multiplier();
    Vector3d { x: raw.x as f32 * m, y: raw.y as f32 * m, z: raw.z as f32 * m }
  }
}

impl Default for ScaleConfig {
  fn default() -> Self {
    Self { gyro: GyroRange::DPS2000, accel: AccelRange::G2 }
  }
}

/// Accelerometer measurement range.
///
/// Higher ranges allow measuring stronger accelerations but with
/// lower resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelRange {
  /// ±2g range
  G2 = 0x00,
  /// ±4g range
  G4 = 0x01,
  /// ±8g range
  G8 = 0x02,
  /// ±16g range
  G16 = 0x03,
}

impl AccelRange {
  pub fn g(self) -> f32 {
    match self {
      AccelRange::G2 => 2.0,
      AccelRange::G4 => 4.0,
      AccelRange::G8 => 8.0,
      AccelRange::G16 => 16.0,
    }
  }

  /// g per LSB of a 16-bit sample.
  pub fn multiplier(self) -> f32 {
    match self {
      AccelRange::G2 => 1. / 16384.,
      AccelRange::G4 => 1. / 8192.,
      AccelRange::G8 => 1. / 4096.,
      AccelRange::G16 => 1. / 2048.,
    }
  }
}

impl From<AccelRange> for u8 {
  fn from(value: AccelRange) -> Self {
    value as u8
  }
}

impl TryFrom<u8> for AccelRange {
  type Error = ();

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      0x00 => Ok(AccelRange::G2),
      0x01 => Ok(AccelRange::G4),
      0x02 => Ok(AccelRange::G8),
      0x03 => Ok(AccelRange::G16),
      _ => Err(()),
    }
  }
}

/// Gyroscope measurement ranges. Unused by the tilt pipeline itself but
/// programmed at startup so the device runs in a known configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroRange {
  /// ±250 degrees per second
  DPS250 = 0,
  /// ±500 degrees per second
  DPS500 = 1,
  /// ±1000 degrees per second
  DPS1000 = 2,
  /// ±2000 degrees per second
  DPS2000 = 3,
}

impl GyroRange {
  pub fn dps(&self) -> f32 {
    match self {
      GyroRange::DPS250 => 250.0,
      GyroRange::DPS500 => 500.0,
      GyroRange::DPS1000 => 1000.0,
      GyroRange::DPS2000 => 2000.0,
    }
  }

  pub fn multiplier(&self) -> f32 {
    self.dps() / f32::from(i16::MAX)
  }
}

impl From<GyroRange> for u8 {
  fn from(value: GyroRange) -> Self {
    value as u8
  }
}

impl TryFrom<u8> for GyroRange {
  type Error = ();

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      0 => Ok(GyroRange::DPS250),
      1 => Ok(GyroRange::DPS500),
      2 => Ok(GyroRange::DPS1000),
      3 => Ok(GyroRange::DPS2000),
      _ => Err(()),
    }
  }
}
