//! GPIO / peripheral pin assignments for the Keylatch main board.
//!
//! Single source of truth — every adapter references this module rather than
//! hard-coding pin numbers. Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// 4x4 matrix keypad
// ---------------------------------------------------------------------------

/// Row drive lines (push-pull outputs, idle HIGH, driven LOW during scan).
pub const KEY_ROW_GPIOS: [i32; 4] = [4, 5, 6, 7];

/// Column sense lines (inputs with internal pull-up, LOW = key pressed).
pub const KEY_COL_GPIOS: [i32; 4] = [15, 16, 17, 18];

// ---------------------------------------------------------------------------
// Lock servo (SG90-class, 50 Hz control signal)
// ---------------------------------------------------------------------------

/// LEDC PWM output to the servo signal wire.
pub const SERVO_PWM_GPIO: i32 = 2;

/// LEDC timer resolution for the servo channel. 14 bits gives ~1.2 µs of
/// pulse-width granularity at 50 Hz — ample for a two-position latch.
pub const SERVO_PWM_RESOLUTION_BITS: u32 = 14;

/// Servo control signal frequency.
pub const SERVO_PWM_FREQ_HZ: u32 = 50;

// ---------------------------------------------------------------------------
// ST7735S TFT panel (SPI2)
// ---------------------------------------------------------------------------

pub const LCD_SCLK_GPIO: i32 = 12;
pub const LCD_MOSI_GPIO: i32 = 11;
pub const LCD_CS_GPIO: i32 = 10;

/// Data/command select: LOW = command byte, HIGH = data bytes.
pub const LCD_DC_GPIO: i32 = 9;
/// Active-low hardware reset.
pub const LCD_RST_GPIO: i32 = 8;
/// Backlight enable (active HIGH).
pub const LCD_BLK_GPIO: i32 = 3;

/// SPI clock for the panel. The ST7735S tops out at 15 ns serial cycle;
/// 20 MHz is the conventional margin.
pub const LCD_SPI_FREQ_HZ: u32 = 20_000_000;
