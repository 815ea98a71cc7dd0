//! Keylatch firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod fsm;
pub mod keymap;
pub mod shared;
pub mod tasks;

pub mod pins;

// Hardware-facing modules; the actual peripheral code inside is guarded by
// cfg attributes, so these compile (and their algorithms test) on the host.
pub mod adapters;
pub mod drivers;
