//! The main API to the display driver. It owns the frame buffer, sends it to the controller on
//! `flush`, and exposes the controller features that can't be expressed through the buffer.

pub mod scroll;

use crate::buffer::FrameBuffer;
use crate::command::*;
use crate::config::Config;
use crate::display::scroll::ScrollState;
use crate::error::Error;
use crate::interface;

/// A driver for an SSD1306 display.
pub struct Display<DI>
where
    DI: interface::DisplayInterface,
{
    iface: DI,
    config: Config,
    buffer: FrameBuffer,
    scroll: ScrollState,
}

impl<DI> Display<DI>
where
    DI: interface::DisplayInterface,
{
    /// Construct a new display driver for the panel described by `config`, connected to the
    /// interface `iface`, and initialize it: the controller is configured, the buffer cleared, and
    /// the blank buffer shown.
    ///
    /// If any part of initialization fails to send, the error is returned and the driver is
    /// dropped; the controller is in an unknown state and should be reset before trying again.
    /// To keep the interface after a failure, pass it as `&mut iface`.
    pub fn new(iface: DI, config: Config) -> Result<Self, Error<DI::Error>> {
        log::debug!(
            "ssd1306: init {}x{} supply {:?}",
            config.width(),
            config.height(),
            config.supply()
        );
        let mut disp = Display {
            iface,
            config,
            buffer: FrameBuffer::new(&config),
            scroll: ScrollState::Idle,
        };
        disp.init()?;
        Ok(disp)
    }

    fn init(&mut self) -> Result<(), Error<DI::Error>> {
        let (phase_1, phase_2) = self.config.precharge_period();
        self.send(Command::SetDisplayOn(false))?;
        self.send(Command::SetAddressMode(AddressMode::Horizontal))?;
        self.send(Command::SetStartLine(0))?;
        self.send(Command::SetColumnRemap(ColumnRemap::Reverse))?;
        self.send(Command::SetMuxRatio(self.config.height()))?;
        self.send(Command::SetComScanDirection(ComScanDirection::RowZeroLast))?;
        self.send(Command::SetDisplayOffset(0))?;
        self.send(Command::SetComLayout(self.config.com_layout()))?;
        self.send(Command::SetClockFoscDivset(8, 0))?;
        self.send(Command::SetPrechargePeriod(phase_1, phase_2))?;
        self.send(Command::SetComDeselectLevel(0x30))?;
        self.send(Command::SetContrast(0xFF))?;
        self.send(Command::SetEntireDisplayOn(false))?;
        self.send(Command::SetDisplayMode(DisplayMode::Normal))?;
        self.send(Command::SetChargePump(self.config.charge_pump()))?;
        self.send(Command::SetDisplayOn(true))?;
        self.buffer.fill(false);
        self.flush()
    }

    fn send(&mut self, cmd: Command) -> Result<(), Error<DI::Error>> {
        cmd.send(&mut self.iface)
    }

    /// The configuration the display was initialized with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The frame buffer as last drawn, which is not necessarily what the panel shows.
    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    /// The frame buffer to draw into. Changes become visible on the next `flush`.
    pub fn buffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.buffer
    }

    /// Turn the panel off. Display RAM and the frame buffer are kept.
    pub fn power_off(&mut self) -> Result<(), Error<DI::Error>> {
        self.send(Command::SetDisplayOn(false))
    }

    /// Turn the panel on.
    pub fn power_on(&mut self) -> Result<(), Error<DI::Error>> {
        self.send(Command::SetDisplayOn(true))
    }

    /// Control the contrast, 0 to 255.
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), Error<DI::Error>> {
        self.send(Command::SetContrast(contrast))
    }

    /// Show lit pixels as dark and vice versa. The buffer is not touched.
    pub fn set_invert(&mut self, invert: bool) -> Result<(), Error<DI::Error>> {
        self.send(Command::SetDisplayMode(if invert {
            DisplayMode::Inverse
        } else {
            DisplayMode::Normal
        }))
    }

    /// Rotate the image by 180 degrees (`true`) or set it back to 0 degrees (`false`).
    ///
    /// The COM scan direction flips the image vertically straight away, but the column remap only
    /// applies to data written afterwards, so this always flushes the buffer to make the whole
    /// rotation visible at once.
    pub fn rotate(&mut self, rotate: bool) -> Result<(), Error<DI::Error>> {
        log::debug!("ssd1306: rotate {}", if rotate { 180 } else { 0 });
        let (dir, remap) = if rotate {
            (ComScanDirection::RowZeroLast, ColumnRemap::Reverse)
        } else {
            (ComScanDirection::RowZeroFirst, ColumnRemap::Forward)
        };
        self.send(Command::SetComScanDirection(dir))?;
        self.send(Command::SetColumnRemap(remap))?;
        self.flush()
    }

    /// Send the whole frame buffer to display RAM.
    pub fn flush(&mut self) -> Result<(), Error<DI::Error>> {
        let (start, end) = self.config.column_window();
        log::trace!(
            "ssd1306: flush {} bytes to columns {}..={}",
            self.buffer.len(),
            start,
            end
        );
        self.send(Command::SetColumnAddress(start, end))?;
        self.send(Command::SetPageAddress(0, self.config.pages() - 1))?;
        self.iface
            .send_data(self.buffer.as_bytes())
            .map_err(Error::Interface)
    }

    /// Start continuous hardware scrolling of pages `start_page` through `end_page` (0-7) in
    /// `direction`. `rate` selects the step interval from 1 (every 256 frames) to 8 (every 2
    /// frames); see `scroll::SCROLL_RATES`.
    ///
    /// Scrolling must be stopped with `scroll_off` before it can be started again. Arguments
    /// are checked before anything is sent.
    pub fn scroll_on(
        &mut self,
        direction: ScrollDirection,
        start_page: u8,
        end_page: u8,
        rate: u8,
    ) -> Result<(), Error<DI::Error>> {
        let code = scroll::validate(self.scroll, start_page, end_page, rate)?;
        log::debug!(
            "ssd1306: scroll {:?} pages {}..={} rate {}",
            direction,
            start_page,
            end_page,
            rate
        );
        self.send(Command::SetupHorizontalScroll {
            direction,
            start: start_page,
            rate: code,
            end: end_page,
        })?;
        self.scroll = ScrollState::Scrolling;
        self.send(Command::SetScrolling(true))
    }

    /// Stop hardware scrolling. Does nothing if scrolling is not active.
    ///
    /// The controller leaves display RAM shifted after a scroll; `flush` again to restore the
    /// buffer's image.
    pub fn scroll_off(&mut self) -> Result<(), Error<DI::Error>> {
        if self.scroll == ScrollState::Scrolling {
            log::debug!("ssd1306: scroll off");
            self.send(Command::SetScrolling(false))?;
        }
        self.scroll = ScrollState::Idle;
        Ok(())
    }

    /// Whether hardware scrolling has been started and not stopped since.
    pub fn is_scrolling(&self) -> bool {
        self.scroll == ScrollState::Scrolling
    }

    /// Consume the driver and give back the interface.
    pub fn release(self) -> DI {
        self.iface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SupplyMode;
    use crate::interface::test_spy::{Sent, SpyError, TestSpyInterface};

    /// The commands `flush` sends ahead of the buffer for a 128-column, 8-page display.
    const FLUSH_128X64: &[u8] = &[0x21, 0, 127, 0x22, 0, 7];

    fn display(di: &TestSpyInterface, w: u8, h: u8) -> Display<TestSpyInterface> {
        Display::new(di.split(), Config::new(w, h).unwrap()).unwrap()
    }

    fn cmds(bytes: &[u8]) -> Vec<Sent> {
        bytes.iter().map(|&b| Sent::Cmd(b)).collect()
    }

    #[test]
    fn init_128x64_internal() {
        let di = TestSpyInterface::new();
        display(&di, 128, 64);
        let mut expected = Vec::new();
        #[cfg_attr(rustfmt, rustfmt_skip)]
        expected.extend_from_slice(sends!(
            0xAE, // display off
            0x20, 0x00, // horizontal addressing
            0x40, // start line 0
            0xA1, // column 127 -> SEG0
            0xA8, 63, // mux ratio 64 lines
            0xC8, // COM scan N -> 0
            0xD3, 0x00, // display offset 0
            0xDA, 0x12, // alternative COM pins
            0xD5, 0x80, // clock
            0xD9, 0xF1, // precharge, internal pump
            0xDB, 0x30, // VCOMH deselect
            0x81, 0xFF, // contrast max
            0xA4, // follow RAM
            0xA6, // normal
            0x8D, 0x14, // charge pump on
            0xAF // display on
        ));
        expected.extend(cmds(FLUSH_128X64));
        expected.push(Sent::Data(vec![0; 1024]));
        di.check_multi(&expected);
    }

    #[test]
    fn init_128x32_external() {
        let di = TestSpyInterface::new();
        let cfg = Config::new(128, 32)
            .unwrap()
            .supply_mode(SupplyMode::External);
        Display::new(di.split(), cfg).unwrap();
        let mut expected = Vec::new();
        #[cfg_attr(rustfmt, rustfmt_skip)]
        expected.extend_from_slice(sends!(
            0xAE,
            0x20, 0x00,
            0x40,
            0xA1,
            0xA8, 31, // mux ratio 32 lines
            0xC8,
            0xD3, 0x00,
            0xDA, 0x02, // sequential COM pins
            0xD5, 0x80,
            0xD9, 0x22, // precharge, external VCC
            0xDB, 0x30,
            0x81, 0xFF,
            0xA4,
            0xA6,
            0x8D, 0x10, // charge pump off
            0xAF,
            0x21, 0, 127,
            0x22, 0, 3,
            [0; 512]
        ));
        di.check_multi(&expected);
    }

    #[test]
    fn init_failure_at_any_command_aborts() {
        // 31 command bytes then the data block.
        for n in 0..32 {
            let di = TestSpyInterface::new();
            di.fail_at(n);
            let result = Display::new(di.split(), Config::new(128, 64).unwrap());
            assert_eq!(result.err(), Some(Error::Interface(SpyError)));
            assert_eq!(di.sent().len(), n);
        }
    }

    #[test]
    fn lent_interface_survives_failed_init() {
        let mut di = TestSpyInterface::new();
        di.fail_at(3);
        let result = Display::new(&mut di, Config::new(128, 64).unwrap());
        assert_eq!(result.err(), Some(Error::Interface(SpyError)));
        di.check_multi(sends!(0xAE, 0x20, 0x00));

        di.clear();
        let disp = Display::new(&mut di, Config::new(128, 64).unwrap()).unwrap();
        assert!(!disp.is_scrolling());
        drop(disp);
        assert_eq!(di.commands()[..3], [0xAE, 0x20, 0x00]);
        assert_eq!(di.sent().last(), Some(&Sent::Data(vec![0; 1024])));
    }

    #[test]
    fn flush_window_64_wide() {
        let mut di = TestSpyInterface::new();
        let mut disp = display(&di, 64, 48);
        di.clear();
        disp.buffer_mut().set_pixel(0, 0, true);
        disp.flush().unwrap();
        let mut data = vec![0; 384];
        data[0] = 1;
        di.check_multi(&[
            Sent::Cmd(0x21),
            Sent::Cmd(32),
            Sent::Cmd(95),
            Sent::Cmd(0x22),
            Sent::Cmd(0),
            Sent::Cmd(5),
            Sent::Data(data),
        ]);
    }

    #[test]
    fn flush_window_128_wide() {
        let mut di = TestSpyInterface::new();
        let mut disp = display(&di, 128, 64);
        di.clear();
        disp.flush().unwrap();
        let mut expected = cmds(FLUSH_128X64);
        expected.push(Sent::Data(vec![0; 1024]));
        di.check_multi(&expected);
    }

    #[test]
    fn power_contrast_invert() {
        let mut di = TestSpyInterface::new();
        let mut disp = display(&di, 128, 64);
        di.clear();
        disp.power_off().unwrap();
        disp.power_on().unwrap();
        disp.set_contrast(0x42).unwrap();
        disp.set_invert(true).unwrap();
        disp.set_invert(false).unwrap();
        di.check_multi(sends!(0xAE, 0xAF, 0x81, 0x42, 0xA7, 0xA6));
    }

    #[test]
    fn invert_leaves_buffer_alone() {
        let mut di = TestSpyInterface::new();
        let mut disp = display(&di, 128, 64);
        disp.buffer_mut().set_pixel(10, 10, true);
        di.clear();
        disp.set_invert(true).unwrap();
        assert_eq!(disp.buffer().get_pixel(10, 10), Some(true));
        assert_eq!(di.sent().len(), 1);
    }

    #[test]
    fn rotate_flushes() {
        let mut di = TestSpyInterface::new();
        let mut disp = display(&di, 128, 64);
        di.clear();
        disp.rotate(true).unwrap();
        let mut expected = cmds(&[0xC8, 0xA1]);
        expected.extend(cmds(FLUSH_128X64));
        expected.push(Sent::Data(vec![0; 1024]));
        di.check_multi(&expected);

        di.clear();
        disp.rotate(false).unwrap();
        let mut expected = cmds(&[0xC0, 0xA0]);
        expected.extend(cmds(FLUSH_128X64));
        expected.push(Sent::Data(vec![0; 1024]));
        di.check_multi(&expected);
    }

    #[test]
    fn scroll_on_off() {
        let mut di = TestSpyInterface::new();
        let mut disp = display(&di, 128, 64);
        di.clear();
        assert!(!disp.is_scrolling());
        disp.scroll_on(ScrollDirection::Right, 0, 7, 4).unwrap();
        assert!(disp.is_scrolling());
        di.check_multi(sends!(0x26, 0x00, 0, 0x06, 7, 0x00, 0xFF, 0x2F));

        di.clear();
        disp.scroll_off().unwrap();
        assert!(!disp.is_scrolling());
        di.check_multi(sends!(0x2E));

        di.clear();
        disp.scroll_on(ScrollDirection::Left, 2, 5, 8).unwrap();
        di.check_multi(sends!(0x27, 0x00, 2, 0x07, 5, 0x00, 0xFF, 0x2F));
    }

    #[test]
    fn scroll_rate_fastest_and_slowest() {
        let mut di = TestSpyInterface::new();
        let mut disp = display(&di, 128, 64);
        di.clear();
        disp.scroll_on(ScrollDirection::Right, 0, 0, 1).unwrap();
        assert_eq!(di.commands()[3], 0x03);
        disp.scroll_off().unwrap();

        di.clear();
        disp.scroll_on(ScrollDirection::Right, 0, 0, 8).unwrap();
        assert_eq!(di.commands()[3], 0x07);
    }

    #[test]
    fn scroll_on_twice_conflicts() {
        let mut di = TestSpyInterface::new();
        let mut disp = display(&di, 128, 64);
        disp.scroll_on(ScrollDirection::Right, 0, 7, 1).unwrap();
        di.clear();
        assert_eq!(
            disp.scroll_on(ScrollDirection::Right, 0, 7, 1),
            Err(Error::AlreadyScrolling)
        );
        assert!(di.sent().is_empty());
        assert!(disp.is_scrolling());
    }

    #[test]
    fn scroll_off_is_idempotent() {
        let mut di = TestSpyInterface::new();
        let mut disp = display(&di, 128, 64);
        di.clear();
        disp.scroll_off().unwrap();
        disp.scroll_off().unwrap();
        assert!(di.sent().is_empty());

        disp.scroll_on(ScrollDirection::Right, 0, 7, 2).unwrap();
        di.clear();
        disp.scroll_off().unwrap();
        disp.scroll_off().unwrap();
        di.check_multi(sends!(0x2E));
    }

    #[test]
    fn scroll_argument_errors_send_nothing() {
        let mut di = TestSpyInterface::new();
        let mut disp = display(&di, 128, 64);
        di.clear();
        assert_eq!(
            disp.scroll_on(ScrollDirection::Right, 0, 7, 0),
            Err(Error::ScrollRate(0))
        );
        assert_eq!(
            disp.scroll_on(ScrollDirection::Right, 0, 7, 9),
            Err(Error::ScrollRate(9))
        );
        assert_eq!(
            disp.scroll_on(ScrollDirection::Left, 5, 2, 1),
            Err(Error::PageRange { start: 5, end: 2 })
        );
        assert_eq!(
            disp.scroll_on(ScrollDirection::Left, 0, 8, 1),
            Err(Error::PageRange { start: 0, end: 8 })
        );
        assert!(di.sent().is_empty());
        assert!(!disp.is_scrolling());
    }

    #[test]
    fn interface_error_propagates() {
        let mut di = TestSpyInterface::new();
        let mut disp = display(&di, 128, 64);
        di.clear();
        // Init made 32 sends; let the contrast command through and fail its value.
        di.fail_at(33);
        assert_eq!(disp.set_contrast(1), Err(Error::Interface(SpyError)));
        di.check_multi(sends!(0x81));
    }
}
