//! The in-memory copy of display RAM.

use crate::command::consts::*;
use crate::config::Config;

const CAPACITY: usize = NUM_COLUMNS as usize * NUM_PAGES as usize;

/// A 1 bit per pixel frame buffer laid out the way the SSD1306 RAM is: `pages` rows of `width`
/// bytes, where each byte is a column of 8 pixels within its page and bit `b` is pixel row
/// `page * 8 + b`. A set bit is a lit pixel (before any inversion by the controller).
///
/// Drawing code may write the bytes directly through `as_mut_bytes` as long as it follows this
/// packing.
pub struct FrameBuffer {
    width: u8,
    height: u8,
    data: [u8; CAPACITY],
}

impl FrameBuffer {
    pub(crate) fn new(config: &Config) -> Self {
        FrameBuffer {
            width: config.width(),
            height: config.height(),
            data: [0; CAPACITY],
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn pages(&self) -> u8 {
        self.height / 8
    }

    /// Length in bytes of the part of the buffer that covers the display.
    pub fn len(&self) -> usize {
        self.pages() as usize * self.width as usize
    }

    /// Always `false`: a valid `Config` covers at least one column of two pages.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len()]
    }

    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        let len = self.len();
        &mut self.data[..len]
    }

    /// Set every pixel on or off.
    pub fn fill(&mut self, on: bool) {
        let byte = if on { 0xFF } else { 0x00 };
        self.as_mut_bytes().iter_mut().for_each(|b| *b = byte);
    }

    /// Byte index and bit mask of pixel (`x`, `y`), or `None` if it lies off the display.
    fn locate(&self, x: u32, y: u32) -> Option<(usize, u8)> {
        if x >= self.width as u32 || y >= self.height as u32 {
            return None;
        }
        let index = (y / 8) as usize * self.width as usize + x as usize;
        Some((index, 1 << (y % 8)))
    }

    /// Set pixel (`x`, `y`). Pixels off the display are ignored and `false` is returned.
    pub fn set_pixel(&mut self, x: u32, y: u32, on: bool) -> bool {
        match self.locate(x, y) {
            Some((index, mask)) => {
                if on {
                    self.data[index] |= mask;
                } else {
                    self.data[index] &= !mask;
                }
                true
            }
            None => false,
        }
    }

    /// Read pixel (`x`, `y`), or `None` if it lies off the display.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<bool> {
        self.locate(x, y)
            .map(|(index, mask)| self.data[index] & mask != 0)
    }
}
