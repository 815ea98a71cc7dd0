//! Concrete state handler functions and table builder.
//!
//! Each state is defined by three plain `fn` pointers — no closures, no
//! dynamic dispatch, no heap.
//!
//! ```text
//!  IDLE ──[digit]──▶ SCANNING ──[clear]──▶ IDLE
//!    │                   │
//!    │ [confirm]         │ [confirm]
//!    ▼                   ▼
//!  ┌──────── code matches? ────────┐
//!  │ yes                        no │
//!  ▼                               ▼
//!  UNLOCKING ──[hold up]──▶   SHOWING_OUTCOME
//!       │                          │
//!       ▼                          │ [hold up]
//!  RELOCKING ──────▶ IDLE ◀────────┘
//! ```
//!
//! While UNLOCKING / SHOWING_OUTCOME / RELOCKING are active, key events are
//! deliberately not processed: the lock is unresponsive mid-sequence.

use super::context::FsmContext;
use super::{StateDescriptor, StateId};
use crate::keymap::Key;
use crate::shared::ScreenId;
use log::{info, warn};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table. Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 — Idle
        StateDescriptor {
            id: StateId::Idle,
            name: "Idle",
            on_enter: Some(idle_enter),
            on_exit: None,
            on_update: idle_update,
        },
        // Index 1 — Scanning
        StateDescriptor {
            id: StateId::Scanning,
            name: "Scanning",
            on_enter: None,
            on_exit: None,
            on_update: scanning_update,
        },
        // Index 2 — Unlocking
        StateDescriptor {
            id: StateId::Unlocking,
            name: "Unlocking",
            on_enter: Some(unlocking_enter),
            on_exit: None,
            on_update: unlocking_update,
        },
        // Index 3 — ShowingOutcome
        StateDescriptor {
            id: StateId::ShowingOutcome,
            name: "ShowingOutcome",
            on_enter: Some(showing_outcome_enter),
            on_exit: None,
            on_update: showing_outcome_update,
        },
        // Index 4 — Relocking
        StateDescriptor {
            id: StateId::Relocking,
            name: "Relocking",
            on_enter: Some(relocking_enter),
            on_exit: None,
            on_update: relocking_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  Shared dispatch helpers
// ═══════════════════════════════════════════════════════════════════════════

/// Evaluate the entry against the configured code and route to the outcome
/// state. The buffer is cleared unconditionally, match or not, before the
/// outcome state is entered.
fn evaluate_entry(ctx: &mut FsmContext) -> StateId {
    let granted = ctx.entry.matches(&ctx.config.password);
    ctx.entry.clear();
    if granted {
        StateId::Unlocking
    } else {
        StateId::ShowingOutcome
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE state — empty buffer, waiting for the first digit
// ═══════════════════════════════════════════════════════════════════════════

fn idle_enter(ctx: &mut FsmContext) {
    ctx.entry.clear();
    ctx.commands.screen = Some(ScreenId::Idle);
    info!("IDLE: door locked, awaiting entry");
}

fn idle_update(ctx: &mut FsmContext) -> Option<StateId> {
    match ctx.take_key()? {
        Key::Digit(d) => {
            ctx.entry.push(d);
            Some(StateId::Scanning)
        }
        // Clearing an already-empty buffer is a no-op.
        Key::Clear => {
            ctx.entry.clear();
            None
        }
        // Confirm on an empty buffer still evaluates: the all-zero entry
        // is compared against the code like any other.
        Key::Confirm => Some(evaluate_entry(ctx)),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  SCANNING state — collecting digits
// ═══════════════════════════════════════════════════════════════════════════

fn scanning_update(ctx: &mut FsmContext) -> Option<StateId> {
    match ctx.take_key()? {
        Key::Digit(d) => {
            // push() ignores digits once six are held.
            ctx.entry.push(d);
            None
        }
        Key::Clear => {
            ctx.entry.clear();
            Some(StateId::Idle)
        }
        Key::Confirm => Some(evaluate_entry(ctx)),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  UNLOCKING state — latch open, success screen held up
// ═══════════════════════════════════════════════════════════════════════════

fn unlocking_enter(ctx: &mut FsmContext) {
    ctx.commands.set_lock = Some(false);
    ctx.commands.screen = Some(ScreenId::Success);
    info!(
        "UNLOCKING: access granted, holding open for {} ms",
        ctx.config.success_hold_ms
    );
}

fn unlocking_update(ctx: &mut FsmContext) -> Option<StateId> {
    let hold = ctx.ms_to_ticks(ctx.config.success_hold_ms);
    (ctx.ticks_in_state >= hold).then_some(StateId::Relocking)
}

// ═══════════════════════════════════════════════════════════════════════════
//  SHOWING_OUTCOME state — rejection screen held up
// ═══════════════════════════════════════════════════════════════════════════

fn showing_outcome_enter(ctx: &mut FsmContext) {
    // Defensive: the latch is already closed, but re-command it anyway.
    ctx.commands.set_lock = Some(true);
    ctx.commands.screen = Some(ScreenId::Failure);
    warn!("OUTCOME: access denied");
}

fn showing_outcome_update(ctx: &mut FsmContext) -> Option<StateId> {
    let hold = ctx.ms_to_ticks(ctx.config.fail_hold_ms);
    (ctx.ticks_in_state >= hold).then_some(StateId::Idle)
}

// ═══════════════════════════════════════════════════════════════════════════
//  RELOCKING state — driving the latch closed after a successful open
// ═══════════════════════════════════════════════════════════════════════════

fn relocking_enter(ctx: &mut FsmContext) {
    ctx.commands.set_lock = Some(true);
    info!("RELOCKING: hold elapsed, driving latch closed");
}

fn relocking_update(_ctx: &mut FsmContext) -> Option<StateId> {
    // Single-tick state: the lock command was applied on entry.
    Some(StateId::Idle)
}
