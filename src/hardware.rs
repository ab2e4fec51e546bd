//! Hardware abstraction and initialization
//!
//! This module turns the RP2040 peripherals into the pieces the controllers
//! need: a UART console for the status lines and a bank of GPIO pins that
//! hands out each offset at most once, with its direction fixed on claim.

use core::fmt;

use embassy_rp::gpio::{AnyPin, Input, Level, Output, Pull};
use embassy_rp::uart::{self, Blocking, UartTx};
use embassy_rp::{Peri, Peripherals};
use embassy_sync::blocking_mutex::raw::ThreadModeRawMutex;
use embassy_time::Delay;

use crate::channel::ChannelController;
use crate::config::{self, ChannelConfig, GPIO_PIN_COUNT};
use crate::line::Line;
use crate::output::OutputMutex;
use crate::types::{Direction, LineError};

pub type BoardOutput = OutputMutex<ThreadModeRawMutex, UartConsole>;
pub type BoardChannel<'a> =
    ChannelController<'a, ThreadModeRawMutex, UartConsole, Input<'static>, Output<'static>, Delay>;

// ===================================================================
// Console
// ===================================================================

/// Blocking UART transmitter used as the status console
pub struct UartConsole {
    tx: UartTx<'static, Blocking>,
}

impl UartConsole {
    pub fn new(tx: UartTx<'static, Blocking>) -> Self {
        Self { tx }
    }
}

impl fmt::Write for UartConsole {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.tx.blocking_write(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

// ===================================================================
// GPIO Line Bank
// ===================================================================

/// GPIO pins not yet handed out, indexed by offset
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_PIN_COUNT],
}

impl PinBank {
    /// Take a pin out of the bank; each offset can be claimed once
    pub fn claim(&mut self, offset: u8, direction: Direction) -> Result<Peri<'static, AnyPin>, LineError> {
        let index = offset as usize;
        if index >= GPIO_PIN_COUNT {
            return Err(LineError::UnknownPin(offset));
        }
        if config::is_reserved(offset) {
            return Err(LineError::Reserved(offset));
        }

        let pin = self.pins[index].take().ok_or(LineError::AlreadyClaimed(offset))?;
        debug!("Claimed GPIO{} as {:?}", offset, direction);
        Ok(pin)
    }

    /// LED line, driven low until the controller runs
    pub fn output(&mut self, offset: u8) -> Result<Line<Output<'static>>, LineError> {
        let pin = self.claim(offset, Direction::Output)?;
        Ok(Line::new(Output::new(pin, Level::Low), offset))
    }

    /// Button line, active high with the internal pull-down
    pub fn input(&mut self, offset: u8) -> Result<Line<Input<'static>>, LineError> {
        let pin = self.claim(offset, Direction::Input)?;
        Ok(Line::new(Input::new(pin, Pull::Down), offset))
    }
}

// ===================================================================
// Board
// ===================================================================

/// Everything the bootstrap takes from the chip
pub struct Board {
    pub console: UartConsole,
    pub bank: PinBank,
}

impl Board {
    /// Split the peripherals into the console UART and the GPIO line bank.
    /// GPIO0/GPIO1 stay with UART0 and never enter the bank.
    pub fn init(p: Peripherals) -> Self {
        let mut uart_config = uart::Config::default();
        uart_config.baudrate = config::CONSOLE_BAUDRATE;
        let tx = UartTx::new_blocking(p.UART0, p.PIN_0, uart_config);

        let bank = PinBank {
            pins: [
                None, // GPIO0: UART0 TX
                None, // GPIO1: UART0 RX
                Some(p.PIN_2.into()),
                Some(p.PIN_3.into()),
                Some(p.PIN_4.into()),
                Some(p.PIN_5.into()),
                Some(p.PIN_6.into()),
                Some(p.PIN_7.into()),
                Some(p.PIN_8.into()),
                Some(p.PIN_9.into()),
                Some(p.PIN_10.into()),
                Some(p.PIN_11.into()),
                Some(p.PIN_12.into()),
                Some(p.PIN_13.into()),
                Some(p.PIN_14.into()),
                Some(p.PIN_15.into()),
                Some(p.PIN_16.into()),
                Some(p.PIN_17.into()),
                Some(p.PIN_18.into()),
                Some(p.PIN_19.into()),
                Some(p.PIN_20.into()),
                Some(p.PIN_21.into()),
                Some(p.PIN_22.into()),
                Some(p.PIN_23.into()),
                Some(p.PIN_24.into()),
                Some(p.PIN_25.into()),
                Some(p.PIN_26.into()),
                Some(p.PIN_27.into()),
                Some(p.PIN_28.into()),
                Some(p.PIN_29.into()),
            ],
        };

        info!("Console on UART0 TX GPIO{}", config::CONSOLE_TX_PIN);

        Self {
            console: UartConsole::new(tx),
            bank,
        }
    }
}

/// Acquire the three lines of one channel and build its controller
pub fn acquire_channel<'a>(
    bank: &mut PinBank,
    output: &'a BoardOutput,
    channel: &ChannelConfig,
) -> Result<BoardChannel<'a>, LineError> {
    let led_a = bank.output(channel.led_a_pin)?;
    let led_b = bank.output(channel.led_b_pin)?;
    let button = bank.input(channel.button_pin)?;

    info!(
        "Acquired button GPIO{} and LEDs GPIO{}/GPIO{}",
        channel.button_pin, channel.led_a_pin, channel.led_b_pin
    );

    Ok(ChannelController::new(
        output,
        button,
        led_a,
        led_b,
        Delay,
        channel.blink_period,
    ))
}
