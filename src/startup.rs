//! Sensor bring-up with a bounded retry policy.

use embedded_hal_async::delay::DelayNs;

use crate::{
  sensor::{AccelSource, ScaleConfig},
  Error,
};

/// How long to keep trying to bring the sensor up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RetryPolicy {
  /// Attempts before giving up, `None` to retry forever.
  pub max_attempts: Option<u32>,
  /// Pause between failed attempts.
  pub delay_ms: u32,
}

impl RetryPolicy {
  /// Keep trying until the sensor answers. Every failure is still logged.
  pub const fn forever(delay_ms: u32) -> Self {
    Self { max_attempts: None, delay_ms }
  }

  fn exhausted(&self, attempts: u32) -> bool {
    matches!(self.max_attempts, Some(max) if attempts >= max)
  }
}

impl Default for RetryPolicy {
  fn default() -> Self {
    Self { max_attempts: Some(20), delay_ms: 500 }
  }
}

/// Initialize `sensor`, retrying per `policy`.
///
/// Returns the number of attempts it took, or [`Error::Init`] carrying the
/// last sensor error once the policy is exhausted. No delay follows the final
/// failed attempt.
pub async fn init_sensor<S, D, P>(
  sensor: &mut S,
  delay: &mut D,
  scale: ScaleConfig,
  policy: RetryPolicy,
) -> Result<u32, Error<S::Error, P>>
where
  S: AccelSource,
  D: DelayNs,
{
  let mut attempts = 0u32;
  loop {
    attempts = attempts.saturating_add(1);
    match sensor.init(scale).await {
      Ok(()) => {
        info!("sensor ready after {} attempt(s)", attempts);
        return Ok(attempts);
      }
      Err(source) => {
        warn!("could not find a valid sensor, check wiring (attempt {})", attempts);
        if policy.exhausted(attempts) {
          error!("giving up on sensor after {} attempts", attempts);
          return Err(Error::Init { attempts, source });
        }
        delay.delay_ms(policy.delay_ms).await;
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use embassy_futures::block_on;

  use super::*;
  use crate::RawSample;

  /// Fails `failures` times, then comes up.
  struct Flaky {
    failures: u32,
    calls: u32,
  }

  impl AccelSource for Flaky {
    type Error = &'static str;

    async fn init(&mut self, _scale: ScaleConfig) -> Result<(), Self::Error> {
      self.calls += 1;
      if self.calls <= self.failures {
        Err("no ack")
      } else {
        Ok(())
      }
    }

    async fn read_accel(&mut self) -> Result<RawSample, Self::Error> {
      Ok(RawSample { x: 0.0, y: 0.0, z: 1.0 })
    }
  }

  #[derive(Default)]
  struct Clock {
    slept_ms: u64,
    sleeps: u32,
  }

  impl DelayNs for Clock {
    async fn delay_ns(&mut self, ns: u32) {
      self.slept_ms += u64::from(ns) / 1_000_000;
      self.sleeps += 1;
    }

    async fn delay_ms(&mut self, ms: u32) {
      self.slept_ms += u64::from(ms);
      self.sleeps += 1;
    }
  }

  #[test]
  fn test_ready_on_first_attempt() {
    let mut s = Flaky { failures: 0, calls: 0 };
    let mut clock = Clock::default();
    let r: Result<u32, Error<_, ()>> = block_on(init_sensor(&mut s, &mut clock, ScaleConfig::default(), RetryPolicy::default()));
    assert_eq!(r, Ok(1));
    assert_eq!(clock.sleeps, 0);
  }

  #[test]
  fn test_retries_with_delay_until_ready() {
    let mut s = Flaky { failures: 3, calls: 0 };
    let mut clock = Clock::default();
    let r: Result<u32, Error<_, ()>> = block_on(init_sensor(&mut s, &mut clock, ScaleConfig::default(), RetryPolicy::default()));
    assert_eq!(r, Ok(4));
    assert_eq!(clock.sleeps, 3);
    assert_eq!(clock.slept_ms, 1500);
  }

  #[test]
  fn test_gives_up_after_max_attempts() {
    let mut s = Flaky { failures: u32::MAX, calls: 0 };
    let mut clock = Clock::default();
    let policy = RetryPolicy { max_attempts: Some(5), delay_ms: 10 };
    let r: Result<u32, Error<_, ()>> = block_on(init_sensor(&mut s, &mut clock, ScaleConfig::default(), policy));
    assert_eq!(r, Err(Error::Init { attempts: 5, source: "no ack" }));
    assert_eq!(s.calls, 5);
    assert_eq!(clock.sleeps, 4);
  }

  #[test]
  fn test_forever_keeps_going() {
    let mut s = Flaky { failures: 100, calls: 0 };
    let mut clock = Clock::default();
    let r: Result<u32, Error<_, ()>> = block_on(init_sensor(&mut s, &mut clock, ScaleConfig::default(), RetryPolicy::forever(1)));
    assert_eq!(r, Ok(101));
    assert_eq!(clock.slept_ms, 100);
  }
}
