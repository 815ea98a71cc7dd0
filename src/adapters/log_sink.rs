//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to the
//! logger (UART / USB-CDC in production). No error ever reaches the keypad
//! user through the panel — this log line is the only place a developer
//! sees what the lock decided and why.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
            AppEvent::DigitAccepted { len } => {
                // Never log the digit itself — the code must not leak
                // into the serial trace.
                info!("ENTRY | digits={}/6", len);
            }
            AppEvent::EntryCleared => {
                info!("ENTRY | cleared");
            }
            AppEvent::AccessGranted => {
                info!("AUTH  | access granted, opening latch");
            }
            AppEvent::AccessDenied => {
                warn!("AUTH  | access denied");
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
        }
    }
}
