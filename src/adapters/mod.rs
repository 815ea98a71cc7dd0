//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter    | Implements           | Connects to                 |
//! |------------|----------------------|-----------------------------|
//! | `hardware` | KeypadPort, LockPort | ESP32 GPIO matrix, LEDC PWM |
//! | `panel`    | PanelBus             | ESP32 SPI + DC/RST/BLK GPIO |
//! | `log_sink` | EventSink            | Serial log output           |

pub mod hardware;
pub mod log_sink;
pub mod panel;
