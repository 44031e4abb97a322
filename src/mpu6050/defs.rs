#[repr(u8)]
pub(crate) enum Reg {
  GyroConfig = 0x1B,
  AccelConfig = 0x1C,
  AccelXoutH = 0x3B,
  PwrMgmt1 = 0x6B,
  WhoAmI = 0x75,
}

impl From<Reg> for u8 {
  #[inline]
  fn from(r: Reg) -> Self {
    r as u8
  }
}

/// `PWR_MGMT_1.CLKSEL` values.
#[repr(u8)]
pub(crate) enum ClockSource {
  PllXGyro = 1,
}

impl From<ClockSource> for u8 {
  #[inline]
  fn from(c: ClockSource) -> Self {
    c as u8
  }
}

// Constants used across the driver
pub(crate) const MPU6050_WHO_AM_I: u8 = 0x68;

// I2C addresses (AD0 low / high)
pub(crate) const ADDR_I2C_PRIM: u8 = 0x68;
pub(crate) const ADDR_I2C_SEC: u8 = 0x69;
