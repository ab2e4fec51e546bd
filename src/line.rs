//! Digital lines
//!
//! A [`Line`] is one GPIO pin plus the logical offset it was acquired at.
//! Pins are taken through the embedded-hal 1.0 traits with an `Infallible`
//! error type, which is what the RP2040 HAL provides; steady-state reads and
//! writes therefore cannot fail.

use core::convert::Infallible;

use embedded_hal::digital::{InputPin, OutputPin, PinState};

pub struct Line<P> {
    pin: P,
    offset: u8,
}

impl<P> Line<P> {
    pub fn new(pin: P, offset: u8) -> Self {
        Self { pin, offset }
    }

    /// Logical pin identifier this line was acquired with
    pub fn offset(&self) -> u8 {
        self.offset
    }
}

impl<P: InputPin<Error = Infallible>> Line<P> {
    /// Instantaneous input level
    pub fn read(&mut self) -> bool {
        infallible(self.pin.is_high())
    }

    /// Sample the line and report a 0 -> 1 transition against `last_sample`.
    ///
    /// `last_sample` always ends up holding the level just read, so a level
    /// that stays high reports exactly one edge.
    pub fn detect_rising_edge(&mut self, last_sample: &mut bool) -> bool {
        let level = self.read();
        let rising = level && !*last_sample;
        *last_sample = level;
        rising
    }
}

impl<P: OutputPin<Error = Infallible>> Line<P> {
    pub fn write(&mut self, level: bool) {
        infallible(self.pin.set_state(PinState::from(level)))
    }
}

fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}
