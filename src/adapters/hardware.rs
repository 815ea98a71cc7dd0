//! Hardware adapter — bridges real peripherals to the domain port traits.
//!
//! Owns the matrix keypad and the latch servo, exposing them through
//! [`KeypadPort`] and [`LockPort`]. This is the only module (together with
//! [`panel`](super::panel)) that touches actual ESP-IDF peripherals; on
//! non-espidf targets a simulation stub keeps the crate host-buildable.
//!
//! ## Servo lifecycle
//!
//! If the LEDC channel fails to come up at boot, the adapter keeps running:
//! the first latch command makes exactly one lazy re-initialisation
//! attempt, and if that fails too every further command is a silent no-op
//! (diagnostic log only). The keypad user never sees a fault — the door
//! simply stays in whatever position it was in.

use crate::app::ports::{KeypadPort, LockPort};
use crate::keymap::KeyCode;
#[cfg(not(target_os = "espidf"))]
use crate::keymap::KEY_NONE;

#[cfg(target_os = "espidf")]
mod esp {
    use esp_idf_hal::delay::Delay;
    use esp_idf_hal::gpio::{AnyIOPin, Input, Output, PinDriver, Pull};
    use esp_idf_hal::ledc::{config::TimerConfig, LedcDriver, LedcTimerDriver, Resolution};
    use esp_idf_hal::prelude::*;
    use esp_idf_sys::EspError;
    use log::{error, info, warn};

    use crate::config::LockConfig;
    use crate::drivers::keypad::MatrixKeypad;
    use crate::drivers::servo::LockServo;
    use crate::error::Error;
    use crate::keymap::{KeyCode, KEY_NONE};
    use crate::pins;

    type Keypad = MatrixKeypad<
        PinDriver<'static, AnyIOPin, Output>,
        PinDriver<'static, AnyIOPin, Input>,
        Delay,
    >;
    type Servo = LockServo<LedcDriver<'static>, Delay>;

    pub struct HardwareAdapter {
        keypad: Keypad,
        servo: Option<Servo>,
        servo_reinit_attempted: bool,
        config: LockConfig,
    }

    impl HardwareAdapter {
        /// Claim the matrix GPIOs and the LEDC servo channel.
        ///
        /// Servo bring-up failure is tolerated (see module docs); keypad
        /// bring-up failure is not — without it the unit is inert.
        pub fn new(config: &LockConfig) -> Result<Self, Error> {
            let rows = Self::row_pins().map_err(|_| Error::Init("keypad row GPIO"))?;
            let cols = Self::col_pins().map_err(|_| Error::Init("keypad column GPIO"))?;
            let keypad = MatrixKeypad::new(rows, cols, Delay::new_default(), config.keypad_settle_us)
                .map_err(Error::Keypad)?;

            let servo = match Self::build_servo(config) {
                Ok(s) => {
                    info!("servo: LEDC channel up ({} Hz)", pins::SERVO_PWM_FREQ_HZ);
                    Some(s)
                }
                Err(e) => {
                    error!("servo: LEDC init failed ({e}), will retry on first use");
                    None
                }
            };

            Ok(Self {
                keypad,
                servo,
                servo_reinit_attempted: false,
                config: config.clone(),
            })
        }

        fn row_pins() -> Result<[PinDriver<'static, AnyIOPin, Output>; 4], EspError> {
            // SAFETY: each GPIO number appears exactly once across
            // pins::KEY_ROW_GPIOS / KEY_COL_GPIOS / the servo and panel
            // pins, and this constructor runs once at boot.
            let mk = |n: usize| {
                let mut pin = PinDriver::output(unsafe { AnyIOPin::new(pins::KEY_ROW_GPIOS[n]) })?;
                pin.set_high()?;
                Ok::<_, EspError>(pin)
            };
            Ok([mk(0)?, mk(1)?, mk(2)?, mk(3)?])
        }

        fn col_pins() -> Result<[PinDriver<'static, AnyIOPin, Input>; 4], EspError> {
            // SAFETY: see row_pins().
            let mk = |n: usize| {
                let mut pin = PinDriver::input(unsafe { AnyIOPin::new(pins::KEY_COL_GPIOS[n]) })?;
                pin.set_pull(Pull::Up)?;
                Ok::<_, EspError>(pin)
            };
            Ok([mk(0)?, mk(1)?, mk(2)?, mk(3)?])
        }

        fn build_servo(config: &LockConfig) -> Result<Servo, EspError> {
            // SAFETY: the LEDC timer/channel singletons are claimed only
            // here — at boot, or again after a failed boot attempt (in
            // which case the earlier claim was dropped with the error).
            let timer = LedcTimerDriver::new(
                unsafe { esp_idf_hal::ledc::TIMER0::new() },
                &TimerConfig::new()
                    .frequency(pins::SERVO_PWM_FREQ_HZ.Hz())
                    .resolution(Resolution::Bits14),
            )?;
            let channel = LedcDriver::new(
                unsafe { esp_idf_hal::ledc::CHANNEL0::new() },
                timer,
                unsafe { AnyIOPin::new(pins::SERVO_PWM_GPIO) },
            )?;
            Ok(LockServo::new(channel, Delay::new_default(), config))
        }

        pub fn sample_keypad(&mut self) -> KeyCode {
            match self.keypad.sample() {
                Ok(code) => code,
                Err(e) => {
                    warn!("keypad: scan failed ({e}), reporting no key");
                    KEY_NONE
                }
            }
        }

        pub fn drive_latch(&mut self, locked: bool) {
            if self.servo.is_none() && !self.servo_reinit_attempted {
                self.servo_reinit_attempted = true;
                match Self::build_servo(&self.config) {
                    Ok(s) => {
                        info!("servo: lazy re-init succeeded");
                        self.servo = Some(s);
                    }
                    Err(e) => error!("servo: lazy re-init failed ({e}), latch disabled"),
                }
            }

            match self.servo.as_mut() {
                Some(servo) => {
                    if servo.set_locked(locked).is_err() {
                        warn!("servo: duty write failed, latch position unknown");
                    } else {
                        info!("latch: {}", if locked { "locked" } else { "unlocked" });
                    }
                }
                // Permanent no-op: the mechanism stays where it physically is.
                None => {}
            }
        }
    }
}

#[cfg(target_os = "espidf")]
pub use esp::HardwareAdapter;

#[cfg(target_os = "espidf")]
impl KeypadPort for HardwareAdapter {
    fn sample(&mut self) -> KeyCode {
        self.sample_keypad()
    }
}

#[cfg(target_os = "espidf")]
impl LockPort for HardwareAdapter {
    fn set_locked(&mut self, locked: bool) {
        self.drive_latch(locked);
    }
}

// ── Host simulation stub ──────────────────────────────────────

/// In-memory stand-in so the full task stack can run on a dev host.
#[cfg(not(target_os = "espidf"))]
pub struct HardwareAdapter {
    locked: Option<bool>,
}

#[cfg(not(target_os = "espidf"))]
impl HardwareAdapter {
    pub fn new(_config: &crate::config::LockConfig) -> Result<Self, crate::error::Error> {
        log::info!("hardware(sim): no peripherals, keypad reads idle");
        Ok(Self { locked: None })
    }

    /// Last commanded latch position.
    pub fn latch_position(&self) -> Option<bool> {
        self.locked
    }
}

#[cfg(not(target_os = "espidf"))]
impl KeypadPort for HardwareAdapter {
    fn sample(&mut self) -> KeyCode {
        KEY_NONE
    }
}

#[cfg(not(target_os = "espidf"))]
impl LockPort for HardwareAdapter {
    fn set_locked(&mut self, locked: bool) {
        log::info!("latch(sim): {}", if locked { "locked" } else { "unlocked" });
        self.locked = Some(locked);
    }
}
