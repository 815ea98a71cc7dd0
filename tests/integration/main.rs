//! Host-side integration test suite.
//!
//! Drives the full LockService pipeline — edge detection, entry FSM,
//! latch sequencing, panel publication — against mock hardware.

mod lock_service_tests;
mod mock_hw;
