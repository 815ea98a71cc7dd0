//! Outbound application events.
//!
//! The [`LockService`](super::service::LockService) emits these through the
//! [`EventSink`](super::ports::EventSink) port. The only adapter in this
//! unit writes them to the serial log; the enum exists so tests can assert
//! on the exact event sequence.

use crate::fsm::StateId;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The service has started (carries initial state).
    Started(StateId),

    /// A digit was accepted into the entry buffer (carries new length).
    DigitAccepted { len: u8 },

    /// The entry buffer was cleared by the clear key.
    EntryCleared,

    /// Confirm matched the access code; the latch is being opened.
    AccessGranted,

    /// Confirm did not match the access code.
    AccessDenied,

    /// The FSM transitioned between states.
    StateChanged { from: StateId, to: StateId },
}
