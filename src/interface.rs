/// The transport used to talk to the SSD1306. The driver only ever needs to send a single command
/// byte or a block of display RAM bytes; each bus frames the two differently so the controller can
/// tell them apart.
pub trait DisplayInterface {
    type Error;

    fn send_command(&mut self, cmd: u8) -> Result<(), Self::Error>;
    fn send_data(&mut self, buf: &[u8]) -> Result<(), Self::Error>;
}

/// Lending an interface to a `Display` leaves it with the caller if initialization fails.
impl<T> DisplayInterface for &mut T
where
    T: DisplayInterface + ?Sized,
{
    type Error = T::Error;

    fn send_command(&mut self, cmd: u8) -> Result<(), Self::Error> {
        (**self).send_command(cmd)
    }

    fn send_data(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
        (**self).send_data(buf)
    }
}

pub mod i2c {
    //! The I2C interface. Every write starts with a control byte whose D/C# bit tells the SSD1306
    //! whether the rest of the write is a command or display RAM data.

    use core::iter;

    use hal::blocking::i2c::{Write, WriteIter};

    use super::DisplayInterface;

    /// The address the SSD1306 answers on with its SA0 pin pulled low.
    pub const DEFAULT_ADDRESS: u8 = 0x3C;
    /// The address the SSD1306 answers on with its SA0 pin pulled high.
    pub const ALTERNATE_ADDRESS: u8 = 0x3D;

    /// Co = 1, D/C# = 0: a single command byte follows.
    const CONTROL_COMMAND: u8 = 0x80;
    /// Co = 0, D/C# = 1: every following byte is display RAM data.
    const CONTROL_DATA: u8 = 0x40;

    pub struct I2cInterface<I2C> {
        i2c: I2C,
        addr: u8,
    }

    impl<I2C> I2cInterface<I2C> {
        /// Create a new I2C interface to the display at 7-bit address `addr`, usually
        /// `DEFAULT_ADDRESS`.
        pub fn new(i2c: I2C, addr: u8) -> Self {
            Self { i2c, addr }
        }

        /// Give the bus back to the caller.
        pub fn release(self) -> I2C {
            self.i2c
        }
    }

    impl<I2C, E> DisplayInterface for I2cInterface<I2C>
    where
        I2C: Write<Error = E> + WriteIter<Error = E>,
    {
        type Error = E;

        fn send_command(&mut self, cmd: u8) -> Result<(), E> {
            Write::write(&mut self.i2c, self.addr, &[CONTROL_COMMAND, cmd])
        }

        fn send_data(&mut self, buf: &[u8]) -> Result<(), E> {
            // The control byte and the buffer must land in one bus transaction, so stream them
            // rather than copying the buffer behind the control byte.
            WriteIter::write(
                &mut self.i2c,
                self.addr,
                iter::once(CONTROL_DATA).chain(buf.iter().cloned()),
            )
        }
    }
}

pub mod spi {
    //! The SPI interface supports the "4-wire" interface of the driver, such that each word on the
    //! SPI bus is 8 bits and the D/C GPIO selects between command and data. Chip select is driven
    //! by the interface around every transfer.

    use core::fmt::{self, Debug};

    use hal::blocking::delay::DelayMs;
    use hal::blocking::spi::Write;
    use hal::digital::v2::OutputPin;
    use hal::spi::{Mode, MODE_0};

    use super::DisplayInterface;

    /// The SPI mode the SSD1306 expects: clock idle low, data captured on the first edge.
    pub const SPI_MODE: Mode = MODE_0;
    /// The fastest SPI clock the SSD1306 accepts.
    pub const SPI_FREQUENCY_HZ: u32 = 10_000_000;

    /// Errors from the SPI bus or from one of the GPIO lines.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub enum SpiError<SpiE, PinE> {
        Spi(SpiE),
        Pin(PinE),
    }

    impl<SpiE: Debug, PinE: Debug> fmt::Display for SpiError<SpiE, PinE> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                SpiError::Spi(e) => write!(f, "SPI error: {:?}", e),
                SpiError::Pin(e) => write!(f, "pin error: {:?}", e),
            }
        }
    }

    impl<SpiE: Debug, PinE: Debug> core::error::Error for SpiError<SpiE, PinE> {}

    pub struct SpiInterface<SPI, DC, CS> {
        /// The SPI master device connected to the SSD1306.
        spi: SPI,
        /// A GPIO output pin connected to the D/C (data/command) pin of the SSD1306 (the fourth
        /// "wire" of "4-wire" mode).
        dc: DC,
        /// A GPIO output pin connected to the active-low chip select of the SSD1306.
        cs: CS,
    }

    impl<SPI, DC, CS, PinE> SpiInterface<SPI, DC, CS>
    where
        SPI: Write<u8>,
        DC: OutputPin<Error = PinE>,
        CS: OutputPin<Error = PinE>,
    {
        /// Create a new SPI interface to communicate with the display driver. `spi` is the SPI
        /// master device, configured with `SPI_MODE` at up to `SPI_FREQUENCY_HZ`, `dc` is the
        /// GPIO output pin connected to the D/C pin and `cs` the one connected to chip select.
        ///
        /// The controller is assumed to be out of reset already; see `with_reset`.
        pub fn new(spi: SPI, dc: DC, cs: CS) -> Self {
            Self { spi, dc, cs }
        }

        /// Create a new SPI interface and pulse the display's /RESET line before returning it, so
        /// the controller is in its power-on state when `Display::new` initializes it.
        pub fn with_reset<RST, DELAY>(
            spi: SPI,
            mut dc: DC,
            mut cs: CS,
            rst: &mut RST,
            delay: &mut DELAY,
        ) -> Result<Self, SpiError<SPI::Error, PinE>>
        where
            RST: OutputPin<Error = PinE>,
            DELAY: DelayMs<u8>,
        {
            cs.set_high().map_err(SpiError::Pin)?;
            dc.set_low().map_err(SpiError::Pin)?;

            rst.set_high().map_err(SpiError::Pin)?;
            delay.delay_ms(1);
            rst.set_low().map_err(SpiError::Pin)?;
            delay.delay_ms(10);
            rst.set_high().map_err(SpiError::Pin)?;
            log::debug!("ssd1306: reset pulse done");

            Ok(Self { spi, dc, cs })
        }

        /// Give the bus and pins back to the caller.
        pub fn release(self) -> (SPI, DC, CS) {
            (self.spi, self.dc, self.cs)
        }

        fn transfer(
            &mut self,
            data_mode: bool,
            buf: &[u8],
        ) -> Result<(), SpiError<SPI::Error, PinE>> {
            self.cs.set_high().map_err(SpiError::Pin)?;
            if data_mode {
                self.dc.set_high().map_err(SpiError::Pin)?;
            } else {
                self.dc.set_low().map_err(SpiError::Pin)?;
            }
            self.cs.set_low().map_err(SpiError::Pin)?;
            self.spi.write(buf).map_err(SpiError::Spi)?;
            self.cs.set_high().map_err(SpiError::Pin)
        }
    }

    impl<SPI, DC, CS, PinE> DisplayInterface for SpiInterface<SPI, DC, CS>
    where
        SPI: Write<u8>,
        DC: OutputPin<Error = PinE>,
        CS: OutputPin<Error = PinE>,
    {
        type Error = SpiError<SPI::Error, PinE>;

        fn send_command(&mut self, cmd: u8) -> Result<(), Self::Error> {
            self.transfer(false, &[cmd])
        }

        fn send_data(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
            self.transfer(true, buf)
        }
    }
}
