//! The polling loop tying a sensor, the pipeline and an LED bar together.
//!
//! One cycle reads a sample, runs it through [`Level`], writes a diagnostic
//! line and applies the LED changes. [`BubbleLevel::run`] repeats that with a
//! fixed pause between cycles.
//!
//! # Examples
//!
//! ```no_run
//! # use core::fmt::Write;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal_async::delay::DelayNs;
//! # use bubble_level::sensor::AccelSource;
//! # async fn example<S, D, P, W>(sensor: S, delay: D, pins: [P; 20], serial: W)
//! # where S: AccelSource, D: DelayNs, P: OutputPin, W: Write {
//! use bubble_level::{driver::{BubbleLevel, Config}, leds::LedBar};
//!
//! let leds = LedBar::new(pins).ok().unwrap();
//! let mut level = BubbleLevel::new(sensor, delay, leds, serial, Config::default());
//! if level.start().await.is_ok() {
//!   let _ = level.run().await;
//! }
//! # }
//! ```

use core::{convert::Infallible, fmt::Write};

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use heapless::String;

use crate::{
  filter::{LowPassFilter, DEFAULT_ALPHA},
  leds::LedBar,
  level::{Frame, Level},
  sensor::{AccelSource, ScaleConfig},
  startup::{self, RetryPolicy},
  Axis, Error, TiltEstimate,
};

/// Fits `Pitch: -90.00 Roll: -90.00` with room to spare.
const DIAG_LINE_LEN: usize = 32;

/// Startup-time settings. Defaults reproduce the reference hardware:
/// α = 0.1, pitch-driven bar, ±2000 °/s / ±2 g, 50 ms cycle, 500 ms retry delay.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
  /// Low-pass smoothing constant in `(0, 1]`.
  pub alpha: f32,
  /// Axis driving the LED bar.
  pub axis: Axis,
  pub scale: ScaleConfig,
  /// Pause between cycles.
  pub period_ms: u32,
  pub retry: RetryPolicy,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      alpha: DEFAULT_ALPHA,
      axis: Axis::Pitch,
      scale: ScaleConfig::default(),
      period_ms: 50,
      retry: RetryPolicy::default(),
    }
  }
}

/// Sensor, delay, LED bar and diagnostic sink driven by one [`Level`].
///
/// # Type Parameters
///
/// - `S`: accelerometer (must implement [`AccelSource`])
/// - `D`: delay provider (must implement `embedded_hal_async::delay::DelayNs`)
/// - `P`: LED pin (must implement `embedded_hal::digital::OutputPin`)
/// - `W`: diagnostic text sink, typically a serial port
pub struct BubbleLevel<S, D, P, W, const N: usize> {
  sensor: S,
  delay: D,
  leds: LedBar<P, N>,
  diag: W,
  level: Level<N>,
  config: Config,
}

impl<S, D, P, W, const N: usize> BubbleLevel<S, D, P, W, N>
where
  S: AccelSource,
  D: DelayNs,
  P: OutputPin,
  W: Write,
{
  pub fn new(sensor: S, delay: D, leds: LedBar<P, N>, diag: W, config: Config) -> Self {
    let level = Level::new(LowPassFilter::new(config.alpha), config.axis);
    Self { sensor, delay, leds, diag, level, config }
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  pub fn level(&self) -> &Level<N> {
    &self.level
  }

  pub fn diagnostics(&self) -> &W {
    &self.diag
  }

  /// Bring the sensor up per [`Config::retry`]. Returns the attempts used.
  pub async fn start(&mut self) -> Result<u32, Error<S::Error, P::Error>> {
    startup::init_sensor(&mut self.sensor, &mut self.delay, self.config.scale, self.config.retry).await
  }

  /// Run one cycle without the trailing pause.
  ///
  /// A failed sensor read leaves all state untouched. A failed LED write is
  /// reported after the display state has already moved; call
  /// [`resync`](Self::resync) to bring the pins back in line.
  pub async fn step(&mut self) -> Result<Frame, Error<S::Error, P::Error>> {
    let raw = self.sensor.read_accel().await.map_err(Error::Sensor)?;
    let frame = self.level.update(raw);
    self.report(&frame.tilt);
    trace!("lit {} ({} writes)", frame.lit, frame.changes.len());
    self.leds.apply(frame.changes.clone()).map_err(Error::Led)?;
    Ok(frame)
  }

  /// Cycle forever at [`Config::period_ms`]. Returns only on error.
  pub async fn run(&mut self) -> Result<Infallible, Error<S::Error, P::Error>> {
    loop {
      self.step().await?;
      self.delay.delay_ms(self.config.period_ms).await;
    }
  }

  /// Rewrite every LED from the current display state.
  pub fn resync(&mut self) -> Result<(), Error<S::Error, P::Error>> {
    self.leds.show(&self.level.display()).map_err(Error::Led)
  }

  /// Give back sensor, delay, pins and diagnostic sink.
  pub fn release(self) -> (S, D, [P; N], W) {
    (self.sensor, self.delay, self.leds.release(), self.diag)
  }

  // The line is formatted up front so the sink only ever sees whole lines.
  fn report(&mut self, tilt: &TiltEstimate) {
    let mut line: String<DIAG_LINE_LEN> = String::new();
    if write!(line, "{}", tilt).is_ok() {
      let _ = writeln!(self.diag, "{}", line);
    }
  }
}
