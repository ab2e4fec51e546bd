//! Common types shared by the lines, the controllers and the board bootstrap

/// Blink enablement of one channel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum ChannelState {
    /// Both LEDs forced low, button polled continuously
    #[default]
    Disabled,
    /// LEDs alternate every blink period
    Enabled,
}

impl ChannelState {
    /// State after one detected rising edge
    pub const fn toggled(self) -> Self {
        match self {
            Self::Disabled => Self::Enabled,
            Self::Enabled => Self::Disabled,
        }
    }

    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }

    /// Word used in the console status line
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Enabled => "enabled",
        }
    }
}

/// Direction a line is configured for when it is acquired
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Direction {
    Input,
    Output,
}

/// Reasons a line cannot be acquired or a channel table is rejected.
///
/// All of them are fatal at startup: the controllers are never started
/// with a missing or misconfigured line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum LineError {
    /// Offset outside the GPIO bank
    UnknownPin(u8),
    /// Offset held by another peripheral (console UART)
    Reserved(u8),
    /// Offset already handed out to a line
    AlreadyClaimed(u8),
    /// Offset used twice in the channel table
    DuplicatePin(u8),
    /// Channel at this index has a zero blink period
    ZeroPeriod(usize),
}
