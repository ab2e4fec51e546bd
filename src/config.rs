//! Hardware configuration for Twinblink
//! RP2040 (Raspberry Pi Pico) with two LED pairs and two buttons

use embassy_time::Duration;

use crate::types::LineError;

// ===================================================================
// GPIO Bank
// ===================================================================

pub const GPIO_PIN_COUNT: usize = 30; // GPIO 0..=29 on RP2040

// ===================================================================
// Console - UART0
// ===================================================================

pub const CONSOLE_TX_PIN: u8 = 0;
pub const CONSOLE_RX_PIN: u8 = 1; // Not driven, kept out of the line bank
pub const CONSOLE_BAUDRATE: u32 = 115_200;
pub const RESERVED_PINS: [u8; 2] = [CONSOLE_TX_PIN, CONSOLE_RX_PIN];

// Longest status line is "LEDs connected to pin 29 and 28 disabled!\n\n" (44 bytes)
pub const STATUS_LINE_CAPACITY: usize = 64;

// ===================================================================
// GPIO Pin Assignments
// ===================================================================

pub const LED_PINS: [u8; 4] = [17, 22, 23, 24]; // Outputs, idle low
pub const BUTTON_PINS: [u8; 2] = [27, 25]; // Inputs, pull-down, active high

// ===================================================================
// Timing
// ===================================================================

pub const SETTLE_DELAY_MS: u32 = 10; // Output mutex hold time after a toggle
pub const FAST_BLINK_MS: u64 = 100;
pub const SLOW_BLINK_MS: u64 = 500;

// ===================================================================
// Channel Table
// ===================================================================

/// One button, two LEDs and the half-cycle length of their blink
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelConfig {
    pub led_a_pin: u8,
    pub led_b_pin: u8,
    pub button_pin: u8,
    pub blink_period: Duration,
}

impl ChannelConfig {
    pub const fn new(led_a_pin: u8, led_b_pin: u8, button_pin: u8, blink_period_ms: u64) -> Self {
        Self {
            led_a_pin,
            led_b_pin,
            button_pin,
            blink_period: Duration::from_millis(blink_period_ms),
        }
    }

    /// Every offset this channel claims
    pub const fn pins(&self) -> [u8; 3] {
        [self.led_a_pin, self.led_b_pin, self.button_pin]
    }
}

pub const CHANNELS: [ChannelConfig; 2] = [
    ChannelConfig::new(LED_PINS[0], LED_PINS[2], BUTTON_PINS[0], FAST_BLINK_MS),
    ChannelConfig::new(LED_PINS[1], LED_PINS[3], BUTTON_PINS[1], SLOW_BLINK_MS),
];

/// Check a channel table: offsets exist, avoid the console, never repeat,
/// and every blink period is non-zero.
pub const fn validate_channels(channels: &[ChannelConfig]) -> Result<(), LineError> {
    let mut i = 0;
    while i < channels.len() {
        if channels[i].blink_period.as_ticks() == 0 {
            return Err(LineError::ZeroPeriod(i));
        }

        let pins = channels[i].pins();
        let mut p = 0;
        while p < pins.len() {
            let pin = pins[p];
            if pin as usize >= GPIO_PIN_COUNT {
                return Err(LineError::UnknownPin(pin));
            }
            if is_reserved(pin) {
                return Err(LineError::Reserved(pin));
            }
            if occurrences(channels, pin) > 1 {
                return Err(LineError::DuplicatePin(pin));
            }
            p += 1;
        }
        i += 1;
    }
    Ok(())
}

pub const fn is_reserved(pin: u8) -> bool {
    let mut r = 0;
    while r < RESERVED_PINS.len() {
        if RESERVED_PINS[r] == pin {
            return true;
        }
        r += 1;
    }
    false
}

const fn occurrences(channels: &[ChannelConfig], pin: u8) -> usize {
    let mut count = 0;
    let mut i = 0;
    while i < channels.len() {
        let pins = channels[i].pins();
        let mut p = 0;
        while p < pins.len() {
            if pins[p] == pin {
                count += 1;
            }
            p += 1;
        }
        i += 1;
    }
    count
}

const _: () = assert!(validate_channels(&CHANNELS).is_ok());
