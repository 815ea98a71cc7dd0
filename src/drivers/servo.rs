//! Latch servo driver (SG90-class positional servo).
//!
//! ## Hardware
//!
//! Standard 50 Hz hobby-servo control signal: the pulse width within each
//! 20 ms period selects the horn angle. Two positions are used —
//! 0.5 ms = 0° (latch closed) and 1.5 ms = 90° (latch open).
//!
//! ## Timing contract
//!
//! [`set_locked`](LockServo::set_locked) blocks the caller for the
//! configured settle time after writing the duty, so the mechanism has
//! finished moving when the call returns. This is a deliberate physical
//! synchronisation point, not incidental latency. Repeat commands to the
//! same position are not suppressed: they re-drive the servo and incur the
//! full settle again.

use embedded_hal::delay::DelayNs;
use embedded_hal::pwm::SetDutyCycle;

use crate::config::LockConfig;
use crate::error::ActuatorError;

/// Control signal period at 50 Hz.
const PERIOD_US: u32 = 20_000;

/// Two-position latch servo over any `SetDutyCycle` channel.
pub struct LockServo<P, D> {
    pwm: P,
    delay: D,
    locked_pulse_us: u32,
    unlocked_pulse_us: u32,
    settle_ms: u32,
    /// Last position actually commanded; `None` before the first command.
    position: Option<bool>,
}

impl<P, D> LockServo<P, D>
where
    P: SetDutyCycle,
    D: DelayNs,
{
    /// Wrap a PWM channel already configured for 50 Hz.
    pub fn new(pwm: P, delay: D, config: &LockConfig) -> Self {
        Self {
            pwm,
            delay,
            locked_pulse_us: config.locked_pulse_us,
            unlocked_pulse_us: config.unlocked_pulse_us,
            settle_ms: config.servo_settle_ms,
            position: None,
        }
    }

    /// Drive the latch and block until the motion settle has elapsed.
    pub fn set_locked(&mut self, locked: bool) -> Result<(), ActuatorError> {
        let pulse_us = if locked {
            self.locked_pulse_us
        } else {
            self.unlocked_pulse_us
        };

        let max = u32::from(self.pwm.max_duty_cycle());
        let duty = (u64::from(pulse_us) * u64::from(max) / u64::from(PERIOD_US)) as u16;
        self.pwm
            .set_duty_cycle(duty)
            .map_err(|_| ActuatorError::PwmWriteFailed)?;

        // Mechanical completion wait.
        self.delay.delay_ms(self.settle_ms);

        self.position = Some(locked);
        Ok(())
    }

    /// Last commanded position, if any command has succeeded yet.
    pub fn position(&self) -> Option<bool> {
        self.position
    }
}
