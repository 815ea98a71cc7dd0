//! The two periodic task bodies.
//!
//! ```text
//! ┌─────────────────────────┐         ┌──────────────────────────┐
//! │ input task   (~10 ms)   │         │ display task  (~100 ms)  │
//! │                         │ publish │                          │
//! │ keypad → FSM → servo ───┼────────▶│ poll word → redraw       │
//! │                         │ AtomicU32                          │
//! └─────────────────────────┘         └──────────────────────────┘
//! ```
//!
//! The input task owns the keypad, the FSM, and the servo; the display task
//! owns the panel. The only thing they share is the packed word inside
//! [`PanelState`], so neither task ever blocks the other.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::{error, info, warn};

use crate::app::ports::{EventSink, KeypadPort, LockPort};
use crate::app::service::LockService;
use crate::config::LockConfig;
use crate::drivers::display::{screens, PanelBus, St7735};
use crate::shared::{PanelState, ScreenId};

/// Per-column delay of the boot progress sweep, in milliseconds.
const SPLASH_STEP_MS: u64 = 10;

/// Input task: sample → FSM → latch → publish, forever.
///
/// Locks the door before the first sample — the unit always boots locked.
/// During an unlock/outcome sequence the FSM simply ignores key events, and
/// each latch command additionally blocks this loop for the servo settle;
/// both are deliberate (see the service docs).
pub fn input_task<H>(
    mut hw: H,
    mut service: LockService,
    mut sink: impl EventSink,
    config: &LockConfig,
) -> !
where
    H: KeypadPort + LockPort,
{
    hw.set_locked(true);
    service.start(&mut sink);
    info!("input task: running at {} ms", config.input_period_ms);

    let period = Duration::from_millis(u64::from(config.input_period_ms));
    loop {
        service.tick(&mut hw, &mut sink);
        thread::sleep(period);
    }
}

/// Display task: init + splash, then poll the shared word and redraw on
/// change.
///
/// If panel init fails the task logs and returns — the controller keeps
/// working headless, and no further rendering is attempted for the life of
/// the process.
pub fn display_task<B: PanelBus>(bus: B, panel: Arc<PanelState>, config: &LockConfig) {
    let mut lcd = St7735::new(bus);
    if let Err(e) = lcd.init() {
        error!("display: init failed ({e}) — rendering disabled");
        return;
    }
    if let Err(e) = screens::splash(&mut lcd, SPLASH_STEP_MS) {
        warn!("display: splash aborted ({e})");
    }

    // First real frame: whatever the input task has published by now.
    let mut last = panel.load();
    if let Err(e) = draw_screen(&mut lcd, last.0).and_then(|()| {
        if last.0 == ScreenId::Idle {
            screens::entry_row(&mut lcd, &last.1)
        } else {
            Ok(())
        }
    }) {
        warn!("display: initial frame failed ({e})");
    }
    info!("display task: running at {} ms", config.display_period_ms);

    let period = Duration::from_millis(u64::from(config.display_period_ms));
    loop {
        thread::sleep(period);

        let now = panel.load();
        if now == last {
            continue;
        }
        let (screen, entry) = now;

        let result = if screen != last.0 {
            // Full screen change; on Idle also repaint the entry row in
            // case digits were already published.
            draw_screen(&mut lcd, screen).and_then(|()| {
                if screen == ScreenId::Idle && entry.len > 0 {
                    screens::entry_row(&mut lcd, &entry)
                } else {
                    Ok(())
                }
            })
        } else if screen == ScreenId::Idle {
            // Same screen, entry changed: repaint only the digit row.
            screens::entry_row(&mut lcd, &entry)
        } else {
            Ok(())
        };

        if let Err(e) = result {
            // Transient bus trouble: keep the cadence, retry on next change.
            warn!("display: redraw failed ({e})");
        } else {
            last = now;
        }
    }
}

fn draw_screen<B: PanelBus>(
    lcd: &mut St7735<B>,
    screen: ScreenId,
) -> Result<(), crate::error::DisplayError> {
    match screen {
        ScreenId::Idle => screens::idle(lcd),
        ScreenId::Success => screens::success(lcd),
        ScreenId::Failure => screens::failure(lcd),
    }
}
