//! Application supervisor
//!
//! Prints the startup banner, checks the channel table and then runs the
//! two channel controllers side by side until the device is reset.

use core::convert::Infallible;
use core::fmt::Write;

use embassy_futures::join::join;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;

use crate::channel::ChannelController;
use crate::config::{self, ChannelConfig};
use crate::types::LineError;

pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application supervisor responsible for startup checks and the controller lifecycle
pub struct AppSupervisor<'c> {
    channels: &'c [ChannelConfig],
}

impl<'c> AppSupervisor<'c> {
    pub fn new(channels: &'c [ChannelConfig]) -> Self {
        Self { channels }
    }

    /// Channel table this supervisor starts
    pub fn channels(&self) -> &'c [ChannelConfig] {
        self.channels
    }

    /// Reject a channel table with shared, reserved or unknown pins before any
    /// line is acquired
    pub fn check(&self) -> Result<(), LineError> {
        config::validate_channels(self.channels)
    }

    /// Print application startup banner with channel assignments
    pub fn print_startup_banner(&self) {
        info!("========================================");
        info!("Twinblink v{}", APP_VERSION);
        info!("Hardware: RP2040 (Raspberry Pi Pico)");
        info!(
            "Console: UART0 TX GPIO{} @ {} baud",
            config::CONSOLE_TX_PIN,
            config::CONSOLE_BAUDRATE
        );
        for (index, channel) in self.channels.iter().enumerate() {
            info!(
                "Channel {}: button GPIO{} LEDs GPIO{}/GPIO{} blink {} ms",
                index,
                channel.button_pin,
                channel.led_a_pin,
                channel.led_b_pin,
                channel.blink_period.as_millis()
            );
        }
        info!("========================================");
    }

    /// Run both controllers concurrently. Neither loop ends, so neither does this.
    pub async fn run<M, W, B, L, D>(
        &self,
        first: ChannelController<'_, M, W, B, L, D>,
        second: ChannelController<'_, M, W, B, L, D>,
    ) where
        M: RawMutex,
        W: Write,
        B: InputPin<Error = Infallible>,
        L: OutputPin<Error = Infallible>,
        D: DelayNs,
    {
        info!("Starting {} channel controllers", self.channels.len());
        join(first.run(), second.run()).await;
        error!("Channel controllers returned");
    }
}
