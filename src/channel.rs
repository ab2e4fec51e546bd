//! Channel controller
//!
//! One controller owns a button and two LEDs. Each iteration it polls the
//! button for a rising edge, toggles its blink state (announcing the change
//! on the console while holding the output mutex), then either forces both
//! LEDs low or runs one full blink cycle.
//!
//! Button polling is blocked while a blink half-cycle is held: an edge that
//! happens then is seen at the next poll if the button is still pressed.

use core::convert::Infallible;
use core::fmt::{self, Write};

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::Duration;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;
use heapless::String;

use crate::config::{ChannelConfig, SETTLE_DELAY_MS, STATUS_LINE_CAPACITY};
use crate::line::Line;
use crate::output::OutputMutex;
use crate::types::ChannelState;

pub struct ChannelController<'a, M: RawMutex, W, B, L, D> {
    output: &'a OutputMutex<M, W>,
    button: Line<B>,
    led_a: Line<L>,
    led_b: Line<L>,
    delay: D,
    blink_period: Duration,
    state: ChannelState,
    last_sample: bool,
}

impl<'a, M, W, B, L, D> ChannelController<'a, M, W, B, L, D>
where
    M: RawMutex,
    W: Write,
    B: InputPin<Error = Infallible>,
    L: OutputPin<Error = Infallible>,
    D: DelayNs,
{
    pub fn new(
        output: &'a OutputMutex<M, W>,
        button: Line<B>,
        led_a: Line<L>,
        led_b: Line<L>,
        delay: D,
        blink_period: Duration,
    ) -> Self {
        debug_assert!(blink_period.as_ticks() > 0);
        Self {
            output,
            button,
            led_a,
            led_b,
            delay,
            blink_period,
            state: ChannelState::Disabled,
            last_sample: false,
        }
    }

    /// Build a controller from a channel table entry and already acquired lines
    pub fn from_config(
        output: &'a OutputMutex<M, W>,
        config: &ChannelConfig,
        button: B,
        led_a: L,
        led_b: L,
        delay: D,
    ) -> Self {
        Self::new(
            output,
            Line::new(button, config.button_pin),
            Line::new(led_a, config.led_a_pin),
            Line::new(led_b, config.led_b_pin),
            delay,
            config.blink_period,
        )
    }

    pub fn state(&self) -> ChannelState {
        self.state
    }

    pub fn blink_period(&self) -> Duration {
        self.blink_period
    }

    pub fn led_pins(&self) -> (u8, u8) {
        (self.led_a.offset(), self.led_b.offset())
    }

    pub fn button_pin(&self) -> u8 {
        self.button.offset()
    }

    /// Run the control loop forever
    pub async fn run(mut self) {
        let (a, b) = self.led_pins();
        info!(
            "Channel started: button {} LEDs {}/{} period {} ms",
            self.button_pin(),
            a,
            b,
            self.blink_period.as_millis()
        );

        loop {
            self.step().await;
        }
    }

    /// One control loop iteration
    pub async fn step(&mut self) {
        if self.button.detect_rising_edge(&mut self.last_sample) {
            self.toggle().await;
        }

        match self.state {
            ChannelState::Disabled => {
                self.led_a.write(false);
                self.led_b.write(false);
                // No idle delay here: re-poll as soon as the executor comes
                // back, but give the sibling controller its turn first.
                embassy_futures::yield_now().await;
            }
            ChannelState::Enabled => {
                let half_cycle = half_cycle_us(self.blink_period);

                self.led_a.write(true);
                self.led_b.write(false);
                self.delay.delay_us(half_cycle).await;

                self.led_a.write(false);
                self.led_b.write(true);
                self.delay.delay_us(half_cycle).await;
            }
        }
    }

    async fn toggle(&mut self) {
        let output = self.output;
        let mut console = output.acquire().await;

        self.state = self.state.toggled();
        let (a, b) = self.led_pins();
        debug!("LEDs {}/{} toggled to {}", a, b, self.state.as_str());

        let written = status_line(a, b, self.state).and_then(|line| console.write_str(&line));
        if written.is_err() {
            warn!("Console write failed for LEDs {}/{}", a, b);
        }

        // Keep the console for the settle delay so the transition is visible
        self.delay.delay_ms(SETTLE_DELAY_MS).await;
    }
}

/// Render the console announcement for a state change
pub fn status_line(
    led_a: u8,
    led_b: u8,
    state: ChannelState,
) -> Result<String<STATUS_LINE_CAPACITY>, fmt::Error> {
    let mut line = String::new();
    write!(line, "LEDs connected to pin {} and {} {}!\n\n", led_a, led_b, state.as_str())?;
    Ok(line)
}

fn half_cycle_us(period: Duration) -> u32 {
    u32::try_from(period.as_micros()).unwrap_or(u32::MAX)
}
