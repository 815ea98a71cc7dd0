//! Keylatch firmware — main entry point.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                    │
//! │                                                               │
//! │  HardwareAdapter        SpiPanelBus         LogEventSink      │
//! │  (Keypad+LockPort)      (PanelBus)          (EventSink)       │
//! │                                                               │
//! │  ───────────────── Port trait boundary ─────────────────      │
//! │                                                               │
//! │  ┌─────────────────────────┐   ┌──────────────────────────┐   │
//! │  │ input task              │   │ display task             │   │
//! │  │ LockService (FSM, edge) │──▶│ St7735 + screens         │   │
//! │  └─────────────────────────┘   └──────────────────────────┘   │
//! │              └──── PanelState (one atomic word) ───┘          │
//! └───────────────────────────────────────────────────────────────┘
//! ```

#![deny(unused_must_use)]

use std::sync::Arc;
use std::thread;

use anyhow::{anyhow, Result};
use log::{error, info};

use keylatch::adapters::hardware::HardwareAdapter;
use keylatch::adapters::log_sink::LogEventSink;
use keylatch::adapters::panel::SpiPanelBus;
use keylatch::app::service::LockService;
use keylatch::config::LockConfig;
use keylatch::shared::PanelState;
use keylatch::tasks;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("Keylatch v{} starting", env!("CARGO_PKG_VERSION"));

    let config = LockConfig::default();
    let peripherals = esp_idf_hal::peripherals::Peripherals::take()
        .map_err(|e| anyhow!("peripherals already taken: {e}"))?;

    // ── 2. Shared panel word ──────────────────────────────────
    let panel_state = Arc::new(PanelState::new());

    // ── 3. Keypad + servo ─────────────────────────────────────
    // Keypad bring-up failure is fatal — without it the unit is inert.
    let hw = HardwareAdapter::new(&config).map_err(|e| anyhow!("hardware init: {e}"))?;

    // ── 4. Display task ───────────────────────────────────────
    // Panel bring-up failure is not fatal to the lock itself: log it and
    // run headless, attempting no further rendering.
    match SpiPanelBus::new(peripherals.spi2) {
        Ok(bus) => {
            let display_panel = panel_state.clone();
            let display_config = config.clone();
            thread::Builder::new()
                .name("display".into())
                .stack_size(8 * 1024)
                .spawn(move || tasks::display_task(bus, display_panel, &display_config))
                .map_err(|e| anyhow!("display task spawn: {e}"))?;
        }
        Err(e) => error!("display: bring-up failed ({e}) — rendering disabled"),
    }

    // ── 5. Input task (this thread) ───────────────────────────
    let service = LockService::new(config.clone(), panel_state);
    let sink = LogEventSink::new();
    tasks::input_task(hw, service, sink, &config)
}
