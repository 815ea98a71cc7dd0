//! Port traits — the boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ LockService (domain)
//! ```
//!
//! Driven adapters (keypad, latch servo, event sinks) implement these
//! traits. The [`LockService`](super::service::LockService) consumes them
//! via generics, so the domain core never touches hardware directly.

use crate::keymap::KeyCode;

// ───────────────────────────────────────────────────────────────
// Keypad port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per input tick.
pub trait KeypadPort {
    /// Scan the matrix and return the key currently down (0 = none).
    ///
    /// Implementations must swallow electrical faults and report them as
    /// "no key" — scan errors never reach the entry logic (they are logged
    /// by the adapter instead).
    fn sample(&mut self) -> KeyCode;
}

// ───────────────────────────────────────────────────────────────
// Lock port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to move the latch.
pub trait LockPort {
    /// Drive the latch to the requested position and block until the
    /// mechanism has had time to finish moving (the servo settle).
    ///
    /// Must be idempotent in effect but not in cost: commanding the
    /// position the latch is already in still re-drives the servo and
    /// still incurs the full settle delay.
    fn set_locked(&mut self, locked: bool);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (serial log today;
/// nothing else exists in this headless unit).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
