//! Crate-internal logging macros.
//!
//! Forward to `defmt` when the `defmt` feature is enabled, otherwise to `log`
//! when the `log` feature is enabled, otherwise expand to nothing. Arguments are
//! still type-checked in the no-backend case so call sites cannot rot.
//!
//! Only plain `{}` placeholders are portable across both backends.
#![allow(unused_macros)]

macro_rules! trace {
  ($($arg:tt)*) => {{
    #[cfg(feature = "defmt")]
    ::defmt::trace!($($arg)*);
    #[cfg(all(feature = "log", not(feature = "defmt")))]
    ::log::trace!($($arg)*);
    #[cfg(not(any(feature = "defmt", feature = "log")))]
    let _ = ::core::format_args!($($arg)*);
  }};
}

macro_rules! debug {
  ($($arg:tt)*) => {{
    #[cfg(feature = "defmt")]
    ::defmt::debug!($($arg)*);
    #[cfg(all(feature = "log", not(feature = "defmt")))]
    ::log::debug!($($arg)*);
    #[cfg(not(any(feature = "defmt", feature = "log")))]
    let _ = ::core::format_args!($($arg)*);
  }};
}

macro_rules! info {
  ($($arg:tt)*) => {{
    #[cfg(feature = "defmt")]
    ::defmt::info!($($arg)*);
    #[cfg(all(feature = "log", not(feature = "defmt")))]
    ::log::info!($($arg)*);
    #[cfg(not(any(feature = "defmt", feature = "log")))]
    let _ = ::core::format_args!($($arg)*);
  }};
}

macro_rules! warn {
  ($($arg:tt)*) => {{
    #[cfg(feature = "defmt")]
    ::defmt::warn!($($arg)*);
    #[cfg(all(feature = "log", not(feature = "defmt")))]
    ::log::warn!($($arg)*);
    #[cfg(not(any(feature = "defmt", feature = "log")))]
    let _ = ::core::format_args!($($arg)*);
  }};
}

macro_rules! error {
  ($($arg:tt)*) => {{
    #[cfg(feature = "defmt")]
    ::defmt::error!($($arg)*);
    #[cfg(all(feature = "log", not(feature = "defmt")))]
    ::log::error!($($arg)*);
    #[cfg(not(any(feature = "defmt", feature = "log")))]
    let _ = ::core::format_args!($($arg)*);
  }};
}
