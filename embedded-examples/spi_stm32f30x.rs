//! Full example code for setting up an SSD1306 display over SPI. This runs on an STM32F303RE,
//! using a 128x64 module connected to SPI1, PA8 for D/C, PA9 for /RESET and PA10 for C/S.

#![deny(unsafe_code)]
#![no_main]
#![no_std]

extern crate cortex_m;
extern crate embedded_hal as hal_api;
extern crate stm32f30x;
extern crate stm32f30x_hal as hal;
#[macro_use]
extern crate cortex_m_rt;
extern crate panic_abort;
extern crate ssd1306;

use cortex_m::asm;
use cortex_m_rt::ExceptionFrame;
use hal::prelude::*;
use hal::spi;
use ssd1306 as oled;

entry!(main);

exception!(*, default_handler);
exception!(HardFault, hard_fault);

fn hard_fault(_ef: &ExceptionFrame) -> ! {
    asm::bkpt();
    loop {}
}

fn default_handler(_irqn: i16) {
    loop {}
}

fn main() -> ! {
    let cp = cortex_m::Peripherals::take().unwrap();
    let dp = stm32f30x::Peripherals::take().unwrap();

    let mut flash = dp.FLASH.constrain();
    let mut rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze(&mut flash.acr);
    let mut delay = hal::delay::Delay::new(cp.SYST, clocks);

    let mut gpioa = dp.GPIOA.split(&mut rcc.ahb);

    // SPI1 is Alternate Function 5 for GPIOs PA5,6,7. The SSD1306 wants mode 0 at up to 10 MHz.
    let disp_sck = gpioa.pa5.into_af5(&mut gpioa.moder, &mut gpioa.afrl);
    let disp_miso = gpioa.pa6.into_af5(&mut gpioa.moder, &mut gpioa.afrl);
    let disp_mosi = gpioa.pa7.into_af5(&mut gpioa.moder, &mut gpioa.afrl);

    let disp_spi = spi::Spi::spi1(
        dp.SPI1,
        (disp_sck, disp_miso, disp_mosi),
        oled::SPI_MODE,
        oled::SPI_FREQUENCY_HZ.hz(),
        clocks,
        &mut rcc.apb2,
    );

    let disp_dc = gpioa
        .pa8
        .into_push_pull_output(&mut gpioa.moder, &mut gpioa.otyper);
    let mut disp_rst = gpioa
        .pa9
        .into_push_pull_output(&mut gpioa.moder, &mut gpioa.otyper);
    let disp_cs = gpioa
        .pa10
        .into_push_pull_output(&mut gpioa.moder, &mut gpioa.otyper);

    // Pulse /RESET, then initialize; init leaves the screen cleared.
    let iface =
        oled::SpiInterface::with_reset(disp_spi, disp_dc, disp_cs, &mut disp_rst, &mut delay)
            .unwrap();
    let mut disp = oled::Display::new(iface, oled::Config::new(128, 64).unwrap()).unwrap();

    // A frame around the edge of the panel.
    {
        let buf = disp.buffer_mut();
        for x in 0..128 {
            buf.set_pixel(x, 0, true);
            buf.set_pixel(x, 63, true);
        }
        for y in 0..64 {
            buf.set_pixel(0, y, true);
            buf.set_pixel(127, y, true);
        }
    }
    disp.flush().unwrap();
    delay.delay_ms(2000_u16);

    disp.set_invert(true).unwrap();
    delay.delay_ms(2000_u16);
    disp.set_invert(false).unwrap();

    disp.rotate(false).unwrap();
    delay.delay_ms(2000_u16);

    // Pan the top half left, slowly.
    disp.scroll_on(oled::ScrollDirection::Left, 0, 3, 4).unwrap();
    delay.delay_ms(5000_u16);
    disp.scroll_off().unwrap();
    disp.flush().unwrap();

    loop {
        asm::wfi();
    }
}
