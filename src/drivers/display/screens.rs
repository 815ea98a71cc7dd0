//! The fixed screens this unit shows.
//!
//! Layout constants trace back to the shipped faceplate: the entry box sits
//! at (16,45)–(112,60) with digits every 16 px starting at x = 20.

use super::assets::{ICON_CHECK, ICON_CROSS, ICON_KEY, ICON_LOCK, LOGO, LOGO_HEIGHT, LOGO_WIDTH};
use super::color::{BLUE, GRAY, GREEN, RED, WHITE, YELLOW};
use super::{PanelBus, St7735, HEIGHT, WIDTH};
use crate::error::DisplayError;
use crate::shared::EntrySnapshot;

// Entry box geometry (exclusive-end fill coordinates).
const ENTRY_BOX_X1: u16 = 16;
const ENTRY_BOX_Y1: u16 = 45;
const ENTRY_BOX_X2: u16 = 112;
const ENTRY_BOX_Y2: u16 = 60;

/// First digit cell x and per-digit pitch inside the entry box.
const DIGIT_X0: u16 = 20;
const DIGIT_PITCH: u16 = 16;

/// Boot splash: banner, progress sweep, logo. `step_ms` scales every
/// animation delay (the shipped firmware uses 10; tests pass 0).
pub fn splash<B: PanelBus>(lcd: &mut St7735<B>, step_ms: u64) -> Result<(), DisplayError> {
    lcd.fill(0, 0, WIDTH, HEIGHT, WHITE)?;
    lcd.draw_icon(52, 12, ICON_KEY, BLUE, WHITE, 24, false)?;
    lcd.draw_text(32, 40, "KEYLATCH", BLUE, WHITE, 16, false)?;
    lcd.draw_text(32, 64, "STARTING", RED, WHITE, 16, false)?;

    // Progress sweep: one vertical line per column, left to right.
    for x in 0..WIDTH {
        lcd.draw_line(x, 100, x, HEIGHT - 1, RED)?;
        sleep_ms(step_ms);
    }

    lcd.draw_text(32, 64, "READY   ", RED, WHITE, 16, false)?;
    sleep_ms(step_ms * 50);

    lcd.fill(0, 0, WIDTH, HEIGHT, WHITE)?;
    lcd.draw_image(
        (WIDTH - LOGO_WIDTH) / 2,
        (HEIGHT - LOGO_HEIGHT) / 2,
        LOGO_WIDTH,
        LOGO_HEIGHT,
        &LOGO,
    )?;
    sleep_ms(step_ms * 100);
    Ok(())
}

/// Idle prompt: door locked, waiting for code entry.
pub fn idle<B: PanelBus>(lcd: &mut St7735<B>) -> Result<(), DisplayError> {
    lcd.fill(0, 0, WIDTH, HEIGHT, WHITE)?;
    lcd.draw_icon(4, 2, ICON_LOCK, BLUE, WHITE, 16, false)?;
    lcd.draw_text(24, 2, "DOOR LOCKED", BLUE, WHITE, 16, false)?;
    lcd.draw_text(4, 24, "ENTER CODE:", GRAY, WHITE, 16, false)?;
    lcd.fill(ENTRY_BOX_X1, ENTRY_BOX_Y1, ENTRY_BOX_X2, ENTRY_BOX_Y2, YELLOW)
}

/// Redraw the entry box with the digits entered so far.
pub fn entry_row<B: PanelBus>(
    lcd: &mut St7735<B>,
    entry: &EntrySnapshot,
) -> Result<(), DisplayError> {
    lcd.fill(ENTRY_BOX_X1, ENTRY_BOX_Y1, ENTRY_BOX_X2, ENTRY_BOX_Y2, YELLOW)?;
    for (i, &digit) in entry.entered().iter().enumerate() {
        lcd.draw_char(
            DIGIT_X0 + DIGIT_PITCH * i as u16,
            ENTRY_BOX_Y1,
            b'0' + digit,
            RED,
            YELLOW,
            16,
            false,
        )?;
    }
    Ok(())
}

/// Access granted: latch open until the hold elapses.
pub fn success<B: PanelBus>(lcd: &mut St7735<B>) -> Result<(), DisplayError> {
    lcd.fill(0, 0, WIDTH, HEIGHT, WHITE)?;
    lcd.draw_icon(48, 20, ICON_CHECK, GREEN, WHITE, 32, false)?;
    lcd.draw_text(32, 70, "OPEN", GREEN, WHITE, 32, false)
}

/// Access denied.
pub fn failure<B: PanelBus>(lcd: &mut St7735<B>) -> Result<(), DisplayError> {
    lcd.fill(0, 0, WIDTH, HEIGHT, WHITE)?;
    lcd.draw_icon(48, 20, ICON_CROSS, RED, WHITE, 32, false)?;
    lcd.draw_text(16, 70, "DENIED", RED, WHITE, 32, false)
}

fn sleep_ms(ms: u64) {
    if ms > 0 {
        std::thread::sleep(std::time::Duration::from_millis(ms));
    }
}
