//! 4x4 matrix keypad scan driver.
//!
//! ## Hardware
//!
//! Four row lines driven push-pull (idle HIGH), four column lines with
//! pull-ups. A pressed key conducts its row onto its column, so driving one
//! row LOW and finding a LOW column resolves the key's coordinate with
//! eight I/O lines instead of sixteen.
//!
//! ## Scan algorithm
//!
//! Rows are scanned in order 1→4. The row under test is the only one driven
//! LOW; the previous row is restored HIGH first. After driving, a short
//! electrical settle delay (default 10 µs) absorbs the switching transient —
//! this is not a timing debounce. Columns are then read in fixed order
//! C4, C3, C2, C1, each active column overwriting the result. **Last writer
//! wins**: if more than one column reads active within a row (an abnormal
//! condition — keys are single-contact), the lowest-numbered column is the
//! one reported. A full pass with no active column returns 0.
//!
//! Debounce and press-edge detection live upstream in
//! [`keymap::EdgeDetector`](crate::keymap::EdgeDetector); this driver only
//! reports the level seen on one pass.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::error::KeypadError;
use crate::keymap::{KeyCode, KEY_NONE};

/// Rows and columns of the matrix.
pub const MATRIX_DIM: usize = 4;

/// Generic matrix scanner over `embedded-hal` pins.
pub struct MatrixKeypad<R, C, D> {
    rows: [R; MATRIX_DIM],
    cols: [C; MATRIX_DIM],
    delay: D,
    settle_us: u32,
}

impl<R, C, D> MatrixKeypad<R, C, D>
where
    R: OutputPin,
    C: InputPin,
    D: DelayNs,
{
    /// Take ownership of the matrix pins and park all rows inactive (HIGH).
    pub fn new(
        mut rows: [R; MATRIX_DIM],
        cols: [C; MATRIX_DIM],
        delay: D,
        settle_us: u32,
    ) -> Result<Self, KeypadError> {
        for row in &mut rows {
            row.set_high().map_err(|_| KeypadError::RowDrive)?;
        }
        Ok(Self {
            rows,
            cols,
            delay,
            settle_us,
        })
    }

    /// One full scan pass. Returns the key code currently down, 0 for none.
    pub fn sample(&mut self) -> Result<KeyCode, KeypadError> {
        let mut code = KEY_NONE;

        for row_idx in 0..MATRIX_DIM {
            self.rows[row_idx]
                .set_low()
                .map_err(|_| KeypadError::RowDrive)?;

            // Let the lines settle before trusting the column levels.
            self.delay.delay_us(self.settle_us);

            // Fixed evaluation order C4..C1; later checks overwrite earlier
            // ones, so the lowest-numbered active column is reported.
            for col_idx in (0..MATRIX_DIM).rev() {
                let active = self.cols[col_idx]
                    .is_low()
                    .map_err(|_| KeypadError::ColRead)?;
                if active {
                    code = (row_idx * MATRIX_DIM + (MATRIX_DIM - col_idx)) as KeyCode;
                }
            }

            // Restore before moving on so only one row is ever driven.
            self.rows[row_idx]
                .set_high()
                .map_err(|_| KeypadError::RowDrive)?;
        }

        Ok(code)
    }
}
