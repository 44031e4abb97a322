use embedded_hal_async::i2c::*;

use super::{defs::Reg, Mpu6050, Mpu6050Error};

impl<I, E> Mpu6050<I>
where
  I: I2c<SevenBitAddress, Error = E>,
{
  pub(crate) async fn read<const N: usize, T: TryFrom<[u8; N]>>(&mut self, reg: Reg) -> Result<T, Mpu6050Error<E>> {
    let mut b = [0u8; N];
    self.read_bytes(reg, &mut b).await?;
    TryFrom::try_from(b).map_err(|_| Mpu6050Error::Data)
  }

  pub(crate) async fn read_bytes(&mut self, reg: Reg, buf: &mut [u8]) -> Result<(), Mpu6050Error<E>> {
    // Consecutive registers auto-increment, so one write-read covers burst reads.
    self.i2c.write_read(self.address, &[reg.into()], buf).await.map_err(Mpu6050Error::I2c)
  }

  pub(crate) async fn write<const N: usize, T: TryInto<[u8; N]>>(&mut self, reg: Reg, v: T) -> Result<(), Mpu6050Error<E>> {
    let b = v.try_into().map_err(|_| Mpu6050Error::Data)?;
    self.write_bytes(reg, &b).await
  }

  pub(crate) async fn write_bytes(&mut self, reg: Reg, data: &[u8]) -> Result<(), Mpu6050Error<E>> {
    debug_assert!(data.len() <= 7, "write_bytes buffer too small");
    let mut buf = [0u8; 8];
    let len = 1 + data.len();
    buf[0] = reg.into();
    buf[1..len].copy_from_slice(data);
    self.i2c.write(self.address, &buf[..len]).await.map_err(Mpu6050Error::I2c)
  }
}
