//! Fuzz the entry pipeline with arbitrary raw sample streams.
//!
//! Every byte is fed to the service as a keypad sample — including codes
//! the scanner can never produce. The pipeline must never panic, and the
//! entry buffer must stay within its six-digit bound.

#![no_main]

use std::sync::Arc;

use libfuzzer_sys::fuzz_target;

use keylatch::app::events::AppEvent;
use keylatch::app::ports::{EventSink, KeypadPort, LockPort};
use keylatch::app::service::LockService;
use keylatch::config::LockConfig;
use keylatch::keymap::KeyCode;
use keylatch::shared::PanelState;

struct FuzzHw<'a> {
    samples: &'a [u8],
    cursor: usize,
}

impl KeypadPort for FuzzHw<'_> {
    fn sample(&mut self) -> KeyCode {
        let code = self.samples.get(self.cursor).copied().unwrap_or(0);
        self.cursor += 1;
        code
    }
}

impl LockPort for FuzzHw<'_> {
    fn set_locked(&mut self, _locked: bool) {}
}

struct NullSink;
impl EventSink for NullSink {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let panel = Arc::new(PanelState::new());
    let mut svc = LockService::new(LockConfig::default(), panel.clone());
    let mut sink = NullSink;
    svc.start(&mut sink);

    let mut hw = FuzzHw {
        samples: data,
        cursor: 0,
    };
    for _ in 0..data.len() {
        svc.tick(&mut hw, &mut sink);
        assert!(svc.entry_len() <= 6);
        assert!(panel.load().1.len <= 6);
    }
});
