//! Lock service — the application core.
//!
//! [`LockService`] owns the entry FSM, the press-edge detector, and the
//! published panel state. It exposes a clean, hardware-agnostic API: one
//! `tick()` per input period. All I/O flows through port traits injected at
//! call sites, making the entire service testable with mock adapters.
//!
//! ```text
//!  KeypadPort ──▶ ┌───────────────────────────┐ ──▶ EventSink
//!                 │        LockService        │
//!    LockPort ◀── │  EdgeDetector · FSM       │ ──▶ PanelState (atomic)
//!                 └───────────────────────────┘
//! ```

use std::sync::Arc;

use log::info;

use crate::config::LockConfig;
use crate::fsm::context::FsmContext;
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::keymap::{decode, EdgeDetector, Key};
use crate::shared::{PanelState, ScreenId};

use super::events::AppEvent;
use super::ports::{EventSink, KeypadPort, LockPort};

// ───────────────────────────────────────────────────────────────
// LockService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct LockService {
    fsm: Fsm,
    ctx: FsmContext,
    edge: EdgeDetector,
    /// Screen currently requested of the display task.
    screen: ScreenId,
    /// Hand-off word shared with the display task.
    panel: Arc<PanelState>,
    tick_count: u64,
}

impl LockService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the FSM — call [`start`](Self::start) next.
    pub fn new(config: LockConfig, panel: Arc<PanelState>) -> Self {
        let ctx = FsmContext::new(config);
        let fsm = Fsm::new(build_state_table(), StateId::Idle);
        Self {
            fsm,
            ctx,
            edge: EdgeDetector::new(),
            screen: ScreenId::Idle,
            panel,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the FSM in Idle and publish the initial panel state.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        self.absorb_screen_command();
        self.publish();
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!("LockService started in {:?}", self.fsm.current_state());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full input cycle: sample → edge detect → FSM → latch →
    /// publish.
    ///
    /// The `hw` parameter satisfies **both** [`KeypadPort`] and
    /// [`LockPort`] — this avoids a double mutable borrow while keeping
    /// the port boundary explicit. Note that a latch command makes this
    /// call block for the servo settle time.
    pub fn tick(&mut self, hw: &mut (impl KeypadPort + LockPort), sink: &mut impl EventSink) {
        self.tick_count += 1;
        let prev_state = self.fsm.current_state();
        let prev_len = self.ctx.entry.len();

        // 1. Sample the matrix and turn the level into a press edge.
        let code = hw.sample();
        let key = self.edge.feed(code).and_then(decode);
        self.ctx.key = key;

        // 2. FSM tick (pure state logic).
        self.fsm.tick(&mut self.ctx);

        // 3. Entry bookkeeping events.
        match key {
            Some(Key::Digit(_)) if self.ctx.entry.len() > prev_len => {
                sink.emit(&AppEvent::DigitAccepted {
                    len: self.ctx.entry.len(),
                });
            }
            Some(Key::Clear) if prev_state != self.fsm.current_state() || prev_len > 0 => {
                sink.emit(&AppEvent::EntryCleared);
            }
            _ => {}
        }

        // 4. Apply latch/screen commands written by the state handlers.
        let cmds = self.ctx.commands.take();
        if let Some(locked) = cmds.set_lock {
            // Blocks for the servo settle — deliberate: the lock is meant
            // to be unresponsive while the mechanism moves.
            hw.set_locked(locked);
        }
        if let Some(screen) = cmds.screen {
            self.screen = screen;
        }

        // 5. Publish screen + entry to the display task as one word.
        self.publish();

        // 6. Emit outcome + state change events if the FSM moved.
        let new_state = self.fsm.current_state();
        if new_state != prev_state {
            match new_state {
                StateId::Unlocking => sink.emit(&AppEvent::AccessGranted),
                StateId::ShowingOutcome => sink.emit(&AppEvent::AccessDenied),
                _ => {}
            }
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: new_state,
            });
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current FSM state.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// Digits currently held in the entry buffer.
    pub fn entry_len(&self) -> u8 {
        self.ctx.entry.len()
    }

    /// Total input ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ── Internal ──────────────────────────────────────────────

    fn absorb_screen_command(&mut self) {
        if let Some(screen) = self.ctx.commands.take().screen {
            self.screen = screen;
        }
    }

    fn publish(&self) {
        self.panel.publish(self.screen, &self.ctx.entry.snapshot());
    }
}
