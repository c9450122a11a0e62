//! `embedded-graphics` support, enabled by the `graphics` feature.
//!
//! `Display` implements `DrawTarget` with `BinaryColor`, writing into the frame buffer. Drawing
//! does not touch the controller; call `Display::flush` to show the result.

use core::convert::Infallible;

use embedded_graphics_core::draw_target::DrawTarget;
use embedded_graphics_core::geometry::{OriginDimensions, Size};
use embedded_graphics_core::pixelcolor::BinaryColor;
use embedded_graphics_core::Pixel;

use crate::display::Display;
use crate::interface::DisplayInterface;

impl<DI> DrawTarget for Display<DI>
where
    DI: DisplayInterface,
{
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let buffer = self.buffer_mut();
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            buffer.set_pixel(point.x as u32, point.y as u32, color.is_on());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.buffer_mut().fill(color.is_on());
        Ok(())
    }
}

impl<DI> OriginDimensions for Display<DI>
where
    DI: DisplayInterface,
{
    fn size(&self) -> Size {
        let buffer = self.buffer();
        Size::new(buffer.width() as u32, buffer.height() as u32)
    }
}
