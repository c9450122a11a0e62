//! Error types returned by the driver.

use core::fmt::{self, Debug};

use crate::command::Command;

/// Errors from driver operations, generic over the error type `E` of the display interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The interface failed to send a command or data. The controller may be left part way
    /// through a command sequence.
    Interface(E),
    /// Hardware scrolling was requested while it is already running. Call `scroll_off` first.
    AlreadyScrolling,
    /// Scroll pages must satisfy `start <= end <= 7`.
    PageRange { start: u8, end: u8 },
    /// Scroll rate index must be in 1..=8.
    ScrollRate(u8),
    /// A command argument was outside the range the controller accepts. Nothing was sent.
    CommandArgument(Command),
}

impl<E: Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Interface(e) => write!(f, "display interface error: {:?}", e),
            Error::AlreadyScrolling => f.write_str("scroll already active, disable it first"),
            Error::PageRange { start, end } => {
                write!(f, "scroll pages {}..={} not within 0..=7", start, end)
            }
            Error::ScrollRate(rate) => write!(f, "scroll rate {} not within 1..=8", rate),
            Error::CommandArgument(cmd) => write!(f, "argument out of range in {:?}", cmd),
        }
    }
}

impl<E: Debug> core::error::Error for Error<E> {}

/// Errors from building a `Config`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Width must be 1..=128 and height a multiple of 8 in 16..=64.
    InvalidDimensions { width: u8, height: u8 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDimensions { width, height } => {
                write!(f, "display size {}x{} not supported by SSD1306", width, height)
            }
        }
    }
}

impl core::error::Error for ConfigError {}
