//! Driver library for the Solomon Systech SSD1306 monochrome dot matrix OLED display controller,
//! over I2C or 4-wire SPI.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate embedded_hal as hal;


pub mod buffer;
pub mod command;
pub mod config;
pub mod display;
pub mod error;
#[cfg(feature = "graphics")]
pub mod graphics;
pub mod interface;

// Re-exports for primary API.
pub use buffer::FrameBuffer;
pub use command::{consts, Command, ScrollDirection};
pub use config::{Config, SupplyMode};
pub use display::scroll::SCROLL_RATES;
pub use display::Display;
pub use error::{ConfigError, Error};
pub use interface::i2c::{I2cInterface, ALTERNATE_ADDRESS, DEFAULT_ADDRESS};
pub use interface::spi::{SpiError, SpiInterface, SPI_FREQUENCY_HZ, SPI_MODE};
pub use interface::DisplayInterface;
