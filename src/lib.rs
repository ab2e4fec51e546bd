//! Twinblink - two independently switched LED blinkers for RP2040
//!
//! Two channel controllers run concurrently on one Embassy executor. Each
//! owns a button and an LED pair: a rising edge on the button toggles
//! blinking, and the change is announced on the UART console while holding
//! a shared output mutex so the two controllers never interleave lines.
//!
//! ## Architecture
//! - **Lines**: embedded-hal pins tagged with their GPIO offset
//! - **Output mutex**: async mutex owning the console, released by guard drop
//! - **Channel controllers**: per-channel control loop with exclusively owned state
//! - **Supervisor**: startup checks and joining both controllers
//!
//! Everything except `hardware` is target independent and unit tested on the host.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod channel;
pub mod config;
pub mod line;
pub mod output;
pub mod supervisor;
pub mod types;

#[cfg(target_os = "none")]
pub mod hardware;

#[cfg(test)]
mod testing;
