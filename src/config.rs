//! Defines the static configuration of a display: its visible size and how its panel is
//! powered. Everything here is fixed once the `Display` is constructed.

use crate::command::consts::*;
use crate::command::ComLayout;
use crate::error::ConfigError;

/// Where the panel's high voltage drive comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SupplyMode {
    /// The SSD1306 generates the panel voltage with its internal charge pump.
    #[default]
    Internal,
    /// The panel voltage is supplied externally on VCC; the charge pump is left disabled.
    External,
}

/// A configuration for the display. Builder methods offer a declarative way to change the
/// settings that have a sensible default.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    width: u8,
    height: u8,
    supply_mode: SupplyMode,
}

impl Config {
    /// Create a new configuration for a panel `width` pixels wide and `height` pixels tall.
    /// Width must be in 1..=128 and height a multiple of 8 in 16..=64, the range the SSD1306 MUX
    /// ratio can drive.
    pub fn new(width: u8, height: u8) -> Result<Self, ConfigError> {
        if false
            || width == 0
            || width > NUM_COLUMNS
            || height < MIN_ROWS
            || height > MAX_ROWS
            || height % 8 != 0
        {
            return Err(ConfigError::InvalidDimensions { width, height });
        }
        Ok(Config {
            width,
            height,
            supply_mode: SupplyMode::Internal,
        })
    }

    /// Extend this `Config` to select the panel supply. Defaults to `SupplyMode::Internal`.
    pub fn supply_mode(self, supply_mode: SupplyMode) -> Self {
        Self {
            supply_mode,
            ..self
        }
    }

    /// Panel width in pixels.
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Panel height in pixels, a multiple of 8.
    pub fn height(&self) -> u8 {
        self.height
    }

    /// The selected panel supply.
    pub fn supply(&self) -> SupplyMode {
        self.supply_mode
    }

    /// Number of 8-row pages.
    pub fn pages(&self) -> u8 {
        self.height / 8
    }

    /// Length in bytes of a frame buffer covering the whole display.
    pub fn buffer_len(&self) -> usize {
        self.pages() as usize * self.width as usize
    }

    /// Whether the panel is more than twice as wide as it is tall (e.g. 128x32), which is wired
    /// with sequential rather than alternative COM pins.
    pub fn is_wide(&self) -> bool {
        self.width as u16 > 2 * self.height as u16
    }

    pub(crate) fn com_layout(&self) -> ComLayout {
        if self.is_wide() {
            ComLayout::Sequential
        } else {
            ComLayout::Alternative
        }
    }

    /// Pre-charge phase 1 and phase 2 lengths in DCLKs.
    pub(crate) fn precharge_period(&self) -> (u8, u8) {
        match self.supply_mode {
            SupplyMode::External => (2, 2),
            SupplyMode::Internal => (1, 15),
        }
    }

    pub(crate) fn charge_pump(&self) -> bool {
        self.supply_mode == SupplyMode::Internal
    }

    /// The column range that display RAM data is written into. Panels 64 pixels wide are wired
    /// to the middle of the 128 column drivers.
    pub(crate) fn column_window(&self) -> (u8, u8) {
        let offset = if self.width == 64 { 32 } else { 0 };
        (offset, offset + self.width - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_and_buffer_len() {
        for &(w, h) in &[(128, 64), (128, 32), (96, 16), (64, 48), (72, 40), (1, 16)] {
            let cfg = Config::new(w, h).unwrap();
            assert_eq!(cfg.pages(), h / 8);
            assert_eq!(cfg.buffer_len(), (h / 8) as usize * w as usize);
        }
    }

    #[test]
    fn rejects_bad_dimensions() {
        assert_eq!(
            Config::new(128, 60),
            Err(ConfigError::InvalidDimensions {
                width: 128,
                height: 60
            })
        );
        assert!(Config::new(128, 65).is_err());
        assert!(Config::new(128, 72).is_err());
        assert!(Config::new(128, 8).is_err());
        assert!(Config::new(129, 64).is_err());
        assert!(Config::new(0, 64).is_err());
    }

    #[test]
    fn wide_panel_layout() {
        let cfg = Config::new(128, 64).unwrap();
        assert!(!cfg.is_wide());
        assert_eq!(cfg.com_layout(), ComLayout::Alternative);

        let cfg = Config::new(128, 32).unwrap();
        assert!(cfg.is_wide());
        assert_eq!(cfg.com_layout(), ComLayout::Sequential);

        // Exactly twice as wide is not "wide".
        let cfg = Config::new(64, 32).unwrap();
        assert!(!cfg.is_wide());
    }

    #[test]
    fn supply_constants() {
        let cfg = Config::new(128, 64).unwrap();
        assert_eq!(cfg.supply(), SupplyMode::Internal);
        assert_eq!(cfg.precharge_period(), (1, 15));
        assert!(cfg.charge_pump());

        let cfg = cfg.supply_mode(SupplyMode::External);
        assert_eq!(cfg.precharge_period(), (2, 2));
        assert!(!cfg.charge_pump());
    }

    #[test]
    fn column_window() {
        assert_eq!(Config::new(128, 64).unwrap().column_window(), (0, 127));
        assert_eq!(Config::new(64, 48).unwrap().column_window(), (32, 95));
        assert_eq!(Config::new(96, 16).unwrap().column_window(), (0, 95));
    }
}
