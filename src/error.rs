//! Unified error types for the Keylatch firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! top-level task loops' error handling uniform. All variants are `Copy` so
//! they can be cheaply passed between tasks without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Display bus or addressing failure.
    Display(DisplayError),
    /// Lock actuator command failed.
    Actuator(ActuatorError),
    /// Keypad matrix scan failed.
    Keypad(KeypadError),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Display(e) => write!(f, "display: {e}"),
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Keypad(e) => write!(f, "keypad: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Display errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// The command/data link rejected a transfer.
    Bus,
    /// An address window violated `x1 <= x2 < W`, `y1 <= y2 < H`.
    WindowOutOfRange,
    /// Requested a font size the asset tables do not carry.
    UnsupportedFontSize,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus => write!(f, "bus transfer failed"),
            Self::WindowOutOfRange => write!(f, "address window out of range"),
            Self::UnsupportedFontSize => write!(f, "unsupported font size"),
        }
    }
}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Self::Display(e)
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// PWM duty-cycle write failed.
    PwmWriteFailed,
    /// The PWM channel never came up and re-initialisation failed too.
    Unavailable,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PwmWriteFailed => write!(f, "PWM write failed"),
            Self::Unavailable => write!(f, "servo channel unavailable"),
        }
    }
}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// Keypad errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadError {
    /// A row drive line could not be set.
    RowDrive,
    /// A column sense line could not be read.
    ColRead,
}

impl fmt::Display for KeypadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RowDrive => write!(f, "row drive failed"),
            Self::ColRead => write!(f, "column read failed"),
        }
    }
}

impl From<KeypadError> for Error {
    fn from(e: KeypadError) -> Self {
        Self::Keypad(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
