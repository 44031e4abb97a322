//! InvenSense MPU-6050 as an [`AccelSource`].
//!
//! Startup follows the usual sequence for this part:
//! - Check `WHO_AM_I` reads `0x68`.
//! - Select the X-gyro PLL as clock and clear `SLEEP` in `PWR_MGMT_1`.
//! - Program `GYRO_CONFIG.FS_SEL` and `ACCEL_CONFIG.AFS_SEL`.
//!
//! Samples are read as one 6-byte burst from `ACCEL_XOUT_H` (big-endian)
//! and scaled by the range chosen at [`init`](AccelSource::init).
//!
//! # Examples
//!
//! ```no_run
//! # async fn example(i2c: impl embedded_hal_async::i2c::I2c) {
//! use bubble_level::mpu6050::Mpu6050;
//! use bubble_level::sensor::{AccelSource, ScaleConfig};
//!
//! let mut imu = Mpu6050::new(i2c);
//! imu.init(ScaleConfig::default()).await.unwrap();
//! let g = imu.read_accel().await.unwrap();
//! # }
//! ```

use embedded_hal_async::i2c::*;
use micromath::vector::Vector3d;

use crate::{
  sensor::{AccelRange, AccelSource, GyroRange, ScaleConfig},
  RawSample,
};

mod defs;
mod rw;

use defs::*;

/// MPU-6050 driver error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mpu6050Error<E> {
  /// I2C communication error
  I2c(E),
  /// `WHO_AM_I` mismatch (expected 0x68)
  InvalidChipId(u8),
  /// Register contents could not be decoded
  Data,
}

/// MPU-6050 over I2C.
pub struct Mpu6050<I> {
  i2c: I,
  address: u8,
  scale: ScaleConfig,
}

impl<I, E> Mpu6050<I>
where
  I: I2c<SevenBitAddress, Error = E>,
{
  /// Driver at the default address `0x68` (AD0 low).
  pub fn new(i2c: I) -> Self {
    Self::with_address(i2c, ADDR_I2C_PRIM)
  }

  /// Driver at `0x69` (AD0 high).
  pub fn new_secondary(i2c: I) -> Self {
    Self::with_address(i2c, ADDR_I2C_SEC)
  }

  fn with_address(i2c: I, address: u8) -> Self {
    Self { i2c, address, scale: ScaleConfig::default() }
  }

  /// Give the bus back.
  pub fn release(self) -> I {
    self.i2c
  }

  /// Read `WHO_AM_I`. Genuine parts report `0x68` regardless of AD0.
  pub async fn get_id(&mut self) -> Result<u8, Mpu6050Error<E>> {
    let r: WhoAmI = self.read(Reg::WhoAmI).await?;
    Ok(r.id)
  }

  /// Read back the ranges currently programmed in the device.
  pub async fn get_scale(&mut self) -> Result<ScaleConfig, Mpu6050Error<E>> {
    let g: GyroConfig = self.read(Reg::GyroConfig).await?;
    let a: AccelConfig = self.read(Reg::AccelConfig).await?;
    Ok(ScaleConfig { gyro: g.fs_sel, accel: a.afs_sel })
  }

  /// Read raw accelerometer counts.
  pub async fn get_raw_accel_data(&mut self) -> Result<Vector3d<i16>, Mpu6050Error<E>> {
    let mut b = [0u8; 6];
    self.read_bytes(Reg::AccelXoutH, &mut b).await?;
    Ok(Vector3d {
      x: i16::from_be_bytes([b[0], b[1]]),
      y: i16::from_be_bytes([b[2], b[3]]),
      z: i16::from_be_bytes([b[4], b[5]]),
    })
  }
}

impl<I, E> AccelSource for Mpu6050<I>
where
  I: I2c<SevenBitAddress, Error = E>,
{
  type Error = Mpu6050Error<E>;

  async fn init(&mut self, scale: ScaleConfig) -> Result<(), Self::Error> {
    let id = self.get_id().await?;
    if id != MPU6050_WHO_AM_I {
      return Err(Mpu6050Error::InvalidChipId(id));
    }

    let pwr = PowerMgmt1 {
      clksel: ClockSource::PllXGyro.into(),
      temp_dis: false,
      cycle: false,
      sleep: false,
      device_reset: false,
    };
    self.write(Reg::PwrMgmt1, pwr).await?;
    self.write(Reg::GyroConfig, GyroConfig { fs_sel: scale.gyro }).await?;
    self.write(Reg::AccelConfig, AccelConfig { afs_sel: scale.accel }).await?;

    self.scale = scale;
    debug!("mpu6050: ready at {}", self.address);
    Ok(())
  }

  async fn read_accel(&mut self) -> Result<RawSample, Self::Error> {
    let raw = self.get_raw_accel_data().await?;
    Ok(self.scale.accel_from_raw(raw))
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[packbits::pack(bytes = 1)]
struct WhoAmI {
  pub id: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[packbits::pack(bytes = 1)]
struct PowerMgmt1 {
  #[bits(3)]
  pub clksel: u8,
  pub temp_dis: bool,
  #[skip(1)]
  pub cycle: bool,
  pub sleep: bool,
  pub device_reset: bool,
}

/// `GYRO_CONFIG`; self-test bits 7:5 stay clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[packbits::pack(bytes = 1)]
struct GyroConfig {
  #[skip(3)]
  #[bits(2)]
  pub fs_sel: GyroRange,
}

/// `ACCEL_CONFIG`; self-test bits 7:5 stay clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[packbits::pack(bytes = 1)]
struct AccelConfig {
  #[skip(3)]
  #[bits(2)]
  pub afs_sel: AccelRange,
}
