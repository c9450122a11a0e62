//! The command set for the SSD1306.
//!
//! Note 1: The display RAM of the SSD1306 is arranged in 8 pages of 128 columns, where each
//! column byte of a page drives 8 vertically adjacent pixels, LSB on top. Anywhere there is a
//! "page" address, it refers to one of these 8-row bands.
//!
//! Note 2: Unlike controllers with a separate parameter phase, the SSD1306 expects command
//! parameters on the command channel too, so every byte a `Command` encodes is sent with
//! `DisplayInterface::send_command`.

use crate::error::Error;
use crate::interface::DisplayInterface;

use self::consts::*;

pub mod consts {
    pub const NUM_COLUMNS: u8 = 128;
    pub const NUM_PAGES: u8 = 8;
    pub const MIN_ROWS: u8 = 16;
    pub const MAX_ROWS: u8 = NUM_PAGES * 8;
    pub const COLUMN_MAX: u8 = NUM_COLUMNS - 1;
    pub const PAGE_MAX: u8 = NUM_PAGES - 1;
    pub const ROW_MAX: u8 = MAX_ROWS - 1;
}

/// The address increment mode when writing image data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressMode {
    /// The column address increments as data is written, wrapping to the next page at the end of
    /// the range set by `SetColumnAddress`, within the range set by `SetPageAddress`.
    Horizontal,
    /// The page address increments as data is written, wrapping to the next column.
    Vertical,
    /// The column address increments within a single page and never wraps.
    Page,
}

/// Setting of column address remapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColumnRemap {
    /// Column address 0 maps to SEG0.
    Forward,
    /// Column address 127 maps to SEG0, mirroring the image horizontally.
    Reverse,
}

/// Setting of the COM line scanning of rows. Changing this setting will flip the image vertically
/// immediately, without rewriting display RAM.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ComScanDirection {
    /// COM lines scan from COM0 to COM[N-1].
    RowZeroFirst,
    /// COM lines scan from COM[N-1] to COM0.
    RowZeroLast,
}

/// The hardware layout of the COM pins. This is dictated by how the display module wires the
/// OLED matrix to the driver chip; see `Config::com_layout` for how the driver picks one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ComLayout {
    /// Sequential COM pin configuration, used by panels twice or more as wide as they are tall.
    Sequential,
    /// Alternative COM pin configuration.
    Alternative,
}

/// Setting of the display mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// A RAM bit of 1 lights the pixel.
    Normal,
    /// A RAM bit of 0 lights the pixel.
    Inverse,
}

/// Horizontal scroll direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollDirection {
    Right,
    Left,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Turn the panel on or off. Display RAM is retained while off.
    SetDisplayOn(bool),
    /// Set how the RAM address pointer advances as data is written.
    SetAddressMode(AddressMode),
    /// Set the column start and end address range when writing to the display RAM in horizontal
    /// or vertical address mode. Range is 0-127.
    SetColumnAddress(u8, u8),
    /// Set the page start and end address range when writing to the display RAM in horizontal or
    /// vertical address mode. Range is 0-7. (Note 1)
    SetPageAddress(u8, u8),
    /// Set the display RAM row shown on the first COM line. Range is 0-63.
    SetStartLine(u8),
    /// Set column address to segment mapping. Only affects data written afterwards.
    SetColumnRemap(ColumnRemap),
    /// Set the MUX ratio, the number of active COM lines. Range 16-64.
    SetMuxRatio(u8),
    /// Set the COM output scan direction.
    SetComScanDirection(ComScanDirection),
    /// Set the vertical shift of the COM lines. Range is 0-63.
    SetDisplayOffset(u8),
    /// Set the COM pin hardware layout.
    SetComLayout(ComLayout),
    /// Set the oscillator frequency Fosc (0-15) and the display clock divide ratio minus one
    /// (0-15).
    SetClockFoscDivset(u8, u8),
    /// Set the pre-charge phase lengths in DCLKs: phase 1 (1-15) and phase 2 (1-15).
    SetPrechargePeriod(u8, u8),
    /// Set the VCOMH deselect level register: 0x00 is ~0.65*Vcc, 0x20 ~0.77*Vcc, 0x30 ~0.83*Vcc.
    /// No other value is accepted.
    SetComDeselectLevel(u8),
    /// Set the contrast. Range 0-255.
    SetContrast(u8),
    /// Light every pixel regardless of RAM contents (true), or follow RAM (false).
    SetEntireDisplayOn(bool),
    /// Set the display mode. See enum for details.
    SetDisplayMode(DisplayMode),
    /// Enable or disable the internal charge pump.
    SetChargePump(bool),
    /// Set up continuous horizontal scrolling of pages `start` through `end` with the raw
    /// controller frame interval code `rate` (0-7). Takes effect on `SetScrolling(true)`.
    SetupHorizontalScroll {
        direction: ScrollDirection,
        start: u8,
        rate: u8,
        end: u8,
    },
    /// Start or stop scrolling. RAM must be rewritten after stopping.
    SetScrolling(bool),
}

macro_rules! ok_command {
    ($buf:ident, [$($byte:expr),+]) => {{
        let bytes = [$($byte),+];
        $buf[..bytes.len()].copy_from_slice(&bytes);
        Ok(bytes.len())
    }};
}

impl Command {
    /// Encode the command and send it. Arguments outside the ranges documented on each variant
    /// are rejected with `Error::CommandArgument` before anything is sent.
    pub fn send<DI>(self, iface: &mut DI) -> Result<(), Error<DI::Error>>
    where
        DI: DisplayInterface,
    {
        let mut buf = [0u8; 7];
        let len = match self {
            Command::SetDisplayOn(on) => ok_command!(buf, [0xAE | on as u8]),
            Command::SetAddressMode(mode) => {
                let m = match mode {
                    AddressMode::Horizontal => 0x00,
                    AddressMode::Vertical => 0x01,
                    AddressMode::Page => 0x02,
                };
                ok_command!(buf, [0x20, m])
            }
            Command::SetColumnAddress(start, end) => match (start, end) {
                (0..=COLUMN_MAX, 0..=COLUMN_MAX) if start <= end => {
                    ok_command!(buf, [0x21, start, end])
                }
                _ => Err(()),
            },
            Command::SetPageAddress(start, end) => match (start, end) {
                (0..=PAGE_MAX, 0..=PAGE_MAX) if start <= end => {
                    ok_command!(buf, [0x22, start, end])
                }
                _ => Err(()),
            },
            Command::SetStartLine(line) => match line {
                0..=ROW_MAX => ok_command!(buf, [0x40 | line]),
                _ => Err(()),
            },
            Command::SetColumnRemap(remap) => {
                let r = match remap {
                    ColumnRemap::Forward => 0x00,
                    ColumnRemap::Reverse => 0x01,
                };
                ok_command!(buf, [0xA0 | r])
            }
            Command::SetMuxRatio(ratio) => match ratio {
                MIN_ROWS..=MAX_ROWS => ok_command!(buf, [0xA8, ratio - 1]),
                _ => Err(()),
            },
            Command::SetComScanDirection(dir) => {
                let d = match dir {
                    ComScanDirection::RowZeroFirst => 0x00,
                    ComScanDirection::RowZeroLast => 0x08,
                };
                ok_command!(buf, [0xC0 | d])
            }
            Command::SetDisplayOffset(offset) => match offset {
                0..=ROW_MAX => ok_command!(buf, [0xD3, offset]),
                _ => Err(()),
            },
            Command::SetComLayout(layout) => {
                let l = match layout {
                    ComLayout::Sequential => 0x02,
                    ComLayout::Alternative => 0x12,
                };
                ok_command!(buf, [0xDA, l])
            }
            Command::SetClockFoscDivset(fosc, divset) => match (fosc, divset) {
                (0..=15, 0..=15) => ok_command!(buf, [0xD5, (fosc << 4) | divset]),
                _ => Err(()),
            },
            Command::SetPrechargePeriod(phase_1, phase_2) => match (phase_1, phase_2) {
                (1..=15, 1..=15) => ok_command!(buf, [0xD9, (phase_2 << 4) | phase_1]),
                _ => Err(()),
            },
            Command::SetComDeselectLevel(level) => match level {
                0x00 | 0x20 | 0x30 => ok_command!(buf, [0xDB, level]),
                _ => Err(()),
            },
            Command::SetContrast(contrast) => ok_command!(buf, [0x81, contrast]),
            Command::SetEntireDisplayOn(on) => ok_command!(buf, [0xA4 | on as u8]),
            Command::SetDisplayMode(mode) => {
                let m = match mode {
                    DisplayMode::Normal => 0x00,
                    DisplayMode::Inverse => 0x01,
                };
                ok_command!(buf, [0xA6 | m])
            }
            Command::SetChargePump(enabled) => {
                ok_command!(buf, [0x8D, 0x10 | ((enabled as u8) << 2)])
            }
            Command::SetupHorizontalScroll {
                direction,
                start,
                rate,
                end,
            } => {
                let d = match direction {
                    ScrollDirection::Right => 0x00,
                    ScrollDirection::Left => 0x01,
                };
                match (start, rate, end) {
                    (0..=PAGE_MAX, 0..=7, 0..=PAGE_MAX) if start <= end => {
                        ok_command!(buf, [0x26 | d, 0x00, start, rate, end, 0x00, 0xFF])
                    }
                    _ => Err(()),
                }
            }
            Command::SetScrolling(enabled) => ok_command!(buf, [0x2E | enabled as u8]),
        }
        .map_err(|()| Error::CommandArgument(self))?;
        for &byte in &buf[..len] {
            iface.send_command(byte).map_err(Error::Interface)?;
        }
        Ok(())
    }
}
