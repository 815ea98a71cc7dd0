//! Mock hardware for integration tests.
//!
//! Records every latch call (with the tick it happened on) so tests can
//! assert on the full command history without touching real GPIO/PWM.

use keylatch::app::events::AppEvent;
use keylatch::app::ports::{EventSink, KeypadPort, LockPort};
use keylatch::keymap::KeyCode;

// ── Latch call record ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatchCall {
    pub locked: bool,
    /// Keypad samples taken before this call — i.e. the input tick index.
    pub at_tick: u64,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    samples: Vec<KeyCode>,
    cursor: usize,
    pub latch_calls: Vec<LatchCall>,
}

#[allow(dead_code)]
impl MockHardware {
    /// Feed raw samples verbatim; once exhausted the keypad reads idle.
    pub fn from_samples(samples: Vec<KeyCode>) -> Self {
        Self {
            samples,
            cursor: 0,
            latch_calls: Vec::new(),
        }
    }

    /// One press-and-release pair per code, so the edge detector sees each
    /// as a distinct press.
    pub fn from_presses(codes: &[KeyCode]) -> Self {
        let mut samples = Vec::with_capacity(codes.len() * 2);
        for &code in codes {
            samples.push(code);
            samples.push(0);
        }
        Self::from_samples(samples)
    }

    pub fn unlocks(&self) -> usize {
        self.latch_calls.iter().filter(|c| !c.locked).count()
    }

    pub fn locks(&self) -> usize {
        self.latch_calls.iter().filter(|c| c.locked).count()
    }
}

impl KeypadPort for MockHardware {
    fn sample(&mut self) -> KeyCode {
        let code = self.samples.get(self.cursor).copied().unwrap_or(0);
        self.cursor += 1;
        code
    }
}

impl LockPort for MockHardware {
    fn set_locked(&mut self, locked: bool) {
        self.latch_calls.push(LatchCall {
            locked,
            at_tick: self.cursor as u64,
        });
    }
}

// ── Recording event sink ──────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, event: &AppEvent) -> bool {
        self.events.contains(event)
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}
