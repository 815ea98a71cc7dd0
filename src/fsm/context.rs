//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and write
//! to. It contains the key event decoded this tick, the entry buffer,
//! actuator/screen command outputs, timing information, and configuration.
//! Think of it as the "blackboard" in a blackboard architecture.

use crate::config::{CODE_LEN, LockConfig};
use crate::keymap::Key;
use crate::shared::{EntrySnapshot, ScreenId};

// ---------------------------------------------------------------------------
// Entry buffer
// ---------------------------------------------------------------------------

/// The access-code entry buffer: up to six digits.
///
/// Invariants: never holds more than [`CODE_LEN`] digits; everything a
/// reader can observe beyond the entered length (comparison cells,
/// published snapshots) is zero.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntryBuffer {
    digits: heapless::Vec<u8, CODE_LEN>,
}

impl EntryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a digit. Silently ignored once the buffer is full.
    pub fn push(&mut self, digit: u8) {
        let _ = self.digits.push(digit);
    }

    /// Reset to empty.
    pub fn clear(&mut self) {
        self.digits.clear();
    }

    pub fn len(&self) -> u8 {
        self.digits.len() as u8
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// The digits entered so far.
    pub fn entered(&self) -> &[u8] {
        &self.digits
    }

    /// Compare all six cells against `code`, element-wise, failing fast on
    /// the first mismatch. Cells beyond the entered length compare as
    /// zero, so a short entry only matches a code with trailing zeros.
    pub fn matches(&self, code: &[u8; CODE_LEN]) -> bool {
        for (i, want) in code.iter().enumerate() {
            let have = self.digits.get(i).copied().unwrap_or(0);
            if have != *want {
                return false;
            }
        }
        true
    }

    /// Coherent zero-padded copy for publication to the display task.
    pub fn snapshot(&self) -> EntrySnapshot {
        let mut digits = [0; CODE_LEN];
        digits[..self.digits.len()].copy_from_slice(&self.digits);
        EntrySnapshot {
            digits,
            len: self.len(),
        }
    }
}

// ---------------------------------------------------------------------------
// Commands (written by state handlers; consumed by the service)
// ---------------------------------------------------------------------------

/// Commands that state handlers write to request actuator/screen actions.
/// The service applies these through the port traits after each tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandSet {
    /// `Some(true)` = drive the latch closed, `Some(false)` = open it.
    pub set_lock: Option<bool>,
    /// Full screen the display task should switch to.
    pub screen: Option<ScreenId>,
}

impl CommandSet {
    /// Take and clear both commands.
    pub fn take(&mut self) -> Self {
        core::mem::take(self)
    }
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct FsmContext {
    // -- Timing --
    /// Ticks elapsed since the current state was entered.
    pub ticks_in_state: u64,
    /// Monotonic total tick count.
    pub total_ticks: u64,

    // -- Input --
    /// Key event decoded this tick, if any. Set by the service before the
    /// FSM tick; states that ignore input simply leave it untouched.
    pub key: Option<Key>,

    // -- Entry state --
    /// The access-code entry buffer.
    pub entry: EntryBuffer,

    // -- Outputs --
    /// Commands to be applied after the FSM tick.
    pub commands: CommandSet,

    // -- Configuration --
    /// System configuration (tunable parameters).
    pub config: LockConfig,
}

impl FsmContext {
    /// Create a new context with the given configuration.
    pub fn new(config: LockConfig) -> Self {
        Self {
            ticks_in_state: 0,
            total_ticks: 0,
            key: None,
            entry: EntryBuffer::new(),
            commands: CommandSet::default(),
            config,
        }
    }

    /// Consume this tick's key event.
    pub fn take_key(&mut self) -> Option<Key> {
        self.key.take()
    }

    /// Input ticks that make up `ms` milliseconds.
    pub fn ms_to_ticks(&self, ms: u32) -> u64 {
        self.config.ms_to_input_ticks(ms)
    }
}
