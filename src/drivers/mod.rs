//! Hardware drivers: matrix keypad, latch servo, TFT panel.
//!
//! Every driver is generic over `embedded-hal` traits (or the local
//! [`display::PanelBus`] seam) so the algorithms run identically against
//! real ESP-IDF peripherals and against host-side fakes in tests.

pub mod display;
pub mod keypad;
pub mod servo;
