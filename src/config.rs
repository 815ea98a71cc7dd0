//! System configuration parameters
//!
//! All tunable parameters for the Keylatch controller. Defaults mirror the
//! shipped hardware; integrators override by constructing the struct before
//! the tasks are spawned.

use serde::{Deserialize, Serialize};

/// Number of digits in the access code.
pub const CODE_LEN: usize = 6;

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockConfig {
    // --- Access code ---
    /// Reference access code, compared digit-for-digit on confirm.
    pub password: [u8; CODE_LEN],

    // --- Keypad ---
    /// Electrical settle delay after driving a scan row (microseconds).
    /// Absorbs switching transients; this is not a debounce.
    pub keypad_settle_us: u32,

    // --- Servo ---
    /// Pulse width for the locked position (microseconds).
    pub locked_pulse_us: u32,
    /// Pulse width for the unlocked position (microseconds).
    pub unlocked_pulse_us: u32,
    /// Blocking wait after commanding the servo, to let the mechanism
    /// finish moving (milliseconds).
    pub servo_settle_ms: u32,

    // --- Outcome screens ---
    /// How long the failure screen stays up (milliseconds).
    pub fail_hold_ms: u32,
    /// How long the success screen stays up before auto-relock (milliseconds).
    pub success_hold_ms: u32,

    // --- Timing ---
    /// Input task period: keypad sample + state machine tick (milliseconds).
    pub input_period_ms: u32,
    /// Display task period: snapshot poll + redraw (milliseconds).
    pub display_period_ms: u32,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            password: [1, 2, 3, 4, 5, 6],

            // Keypad
            keypad_settle_us: 10,

            // Servo: 0.5 ms = locked (0 deg), 1.5 ms = unlocked (90 deg)
            locked_pulse_us: 500,
            unlocked_pulse_us: 1500,
            servo_settle_ms: 300,

            // Outcome screens
            fail_hold_ms: 1000,
            success_hold_ms: 5000,

            // Timing
            input_period_ms: 10,    // 100 Hz scan
            display_period_ms: 100, // 10 Hz refresh
        }
    }
}

impl LockConfig {
    /// Ticks of the input task that make up `ms` milliseconds (rounded up,
    /// at least one tick).
    pub fn ms_to_input_ticks(&self, ms: u32) -> u64 {
        let period = self.input_period_ms.max(1);
        u64::from(ms.div_ceil(period).max(1))
    }
}
