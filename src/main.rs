//! Twinblink - firmware entry point
//!
//! Hardware: Raspberry Pi Pico (RP2040)
//! LEDs: GPIO 17/23 (fast pair) and GPIO 22/24 (slow pair)
//! Buttons: GPIO 27 (fast pair) and GPIO 25 (slow pair), active high
//! Console: UART0 TX on GPIO 0

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_sync::blocking_mutex::raw::ThreadModeRawMutex;
use panic_halt as _;
use defmt_rtt as _; // global logger

use twinblink::config::CHANNELS;
use twinblink::hardware::{self, Board, BoardOutput};
use twinblink::output::OutputMutex;
use twinblink::supervisor::AppSupervisor;

// ===================================================================
// Main Application Entry Point
// ===================================================================

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let supervisor = AppSupervisor::new(&CHANNELS);
    supervisor.print_startup_banner();
    unwrap!(supervisor.check());

    let p = embassy_rp::init(Default::default());
    let Board { console, mut bank } = Board::init(p);

    // The only value shared between the two controllers
    let output: BoardOutput = OutputMutex::<ThreadModeRawMutex, _>::new(console);

    // Any acquisition failure stops here, before a controller runs
    let [fast, slow] = supervisor.channels() else {
        defmt::panic!("Twinblink drives exactly two channels");
    };
    let fast = unwrap!(hardware::acquire_channel(&mut bank, &output, fast));
    let slow = unwrap!(hardware::acquire_channel(&mut bank, &output, slow));

    info!("Twinblink initialized successfully");
    supervisor.run(fast, slow).await;
}
