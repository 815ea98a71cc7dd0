//! Cross-task hand-off between the input task and the display task.
//!
//! The input task owns the entry buffer; the display task needs a coherent
//! view of it (plus which screen should be up) at its own 10 Hz cadence.
//! Everything the renderer needs fits in one machine word:
//!
//! ```text
//!  bit 31..29   28..27   26..24   23..20  ...  3..0
//!  ┌────────┬─────────┬────────┬────────┬───┬────────┐
//!  │ unused │ screen  │ length │ digit5 │...│ digit0 │
//!  └────────┴─────────┴────────┴────────┴───┴────────┘
//! ```
//!
//! Publisher and consumer exchange the word through a single
//! `AtomicU32` store/load (Release/Acquire), so the renderer can never
//! observe a length from one entry paired with digits from another.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::config::CODE_LEN;

// ---------------------------------------------------------------------------
// Screen identity
// ---------------------------------------------------------------------------

/// Which full screen the display task should have up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ScreenId {
    /// Prompt + entry box, door locked.
    #[default]
    Idle = 0,
    /// Access granted, door open.
    Success = 1,
    /// Access denied.
    Failure = 2,
}

impl ScreenId {
    fn from_bits(bits: u32) -> Self {
        match bits {
            1 => Self::Success,
            2 => Self::Failure,
            _ => Self::Idle,
        }
    }
}

// ---------------------------------------------------------------------------
// Entry snapshot
// ---------------------------------------------------------------------------

/// A coherent copy of the entry state, as published to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntrySnapshot {
    pub digits: [u8; CODE_LEN],
    pub len: u8,
}

impl EntrySnapshot {
    /// The digits actually entered.
    pub fn entered(&self) -> &[u8] {
        &self.digits[..usize::from(self.len.min(CODE_LEN as u8))]
    }
}

const LEN_SHIFT: u32 = 24;
const SCREEN_SHIFT: u32 = 27;

fn pack(screen: ScreenId, entry: &EntrySnapshot) -> u32 {
    let mut word = 0u32;
    for (i, &d) in entry.digits.iter().enumerate() {
        word |= u32::from(d & 0x0F) << (4 * i as u32);
    }
    word |= u32::from(entry.len.min(CODE_LEN as u8)) << LEN_SHIFT;
    word |= (screen as u32) << SCREEN_SHIFT;
    word
}

fn unpack(word: u32) -> (ScreenId, EntrySnapshot) {
    let mut entry = EntrySnapshot::default();
    for (i, d) in entry.digits.iter_mut().enumerate() {
        *d = ((word >> (4 * i as u32)) & 0x0F) as u8;
    }
    entry.len = ((word >> LEN_SHIFT) & 0x07) as u8;
    (ScreenId::from_bits((word >> SCREEN_SHIFT) & 0x03), entry)
}

// ---------------------------------------------------------------------------
// PanelState
// ---------------------------------------------------------------------------

/// Single-writer / single-reader panel state.
///
/// One instance is created at startup and handed to both tasks
/// (`Arc<PanelState>`). The input task is the only writer.
#[derive(Debug, Default)]
pub struct PanelState {
    word: AtomicU32,
}

impl PanelState {
    pub fn new() -> Self {
        Self {
            word: AtomicU32::new(pack(ScreenId::Idle, &EntrySnapshot::default())),
        }
    }

    /// Publish screen + entry as one unit. Called from the input task.
    pub fn publish(&self, screen: ScreenId, entry: &EntrySnapshot) {
        self.word.store(pack(screen, entry), Ordering::Release);
    }

    /// Raw packed word — cheap change detection for the renderer.
    pub fn raw(&self) -> u32 {
        self.word.load(Ordering::Acquire)
    }

    /// Coherent view for the renderer.
    pub fn load(&self) -> (ScreenId, EntrySnapshot) {
        unpack(self.raw())
    }
}
