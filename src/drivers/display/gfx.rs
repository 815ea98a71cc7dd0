//! Drawing primitives over the address-window core.
//!
//! Integer-only algorithms: lines are Bresenham on the dominant axis,
//! circles are the midpoint algorithm with 8-way symmetry. Everything
//! bottoms out in [`St7735::address_window`] + pixel writes.

use super::{PanelBus, St7735};
use crate::error::DisplayError;

impl<B: PanelBus> St7735<B> {
    /// Fill the exclusive-end rectangle `[x_start, x_end) × [y_start, y_end)`
    /// with one colour: window programmed once, `w*h` identical pixel writes.
    pub fn fill(
        &mut self,
        x_start: u16,
        y_start: u16,
        x_end: u16,
        y_end: u16,
        color: u16,
    ) -> Result<(), DisplayError> {
        if x_end <= x_start || y_end <= y_start {
            return Err(DisplayError::WindowOutOfRange);
        }
        self.address_window(x_start, y_start, x_end - 1, y_end - 1)?;
        for _ in y_start..y_end {
            for _ in x_start..x_end {
                self.write_pixel(color)?;
            }
        }
        Ok(())
    }

    /// Plot a single pixel: 1x1 window + one write.
    pub fn draw_point(&mut self, x: u16, y: u16, color: u16) -> Result<(), DisplayError> {
        self.address_window(x, y, x, y)?;
        self.write_pixel(color)
    }

    /// Bresenham line, endpoints inclusive.
    ///
    /// The dominant axis is `max(|dx|, |dy|)`; both error accumulators grow
    /// by their axis delta each step and give back the dominant delta once
    /// they reach it, stepping that coordinate by its signed increment
    /// (zero for a zero delta). `(x1,y1) == (x2,y2)` draws exactly one point.
    pub fn draw_line(
        &mut self,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        color: u16,
    ) -> Result<(), DisplayError> {
        let delta_x = i32::from(x2) - i32::from(x1);
        let delta_y = i32::from(y2) - i32::from(y1);
        let inc_x = delta_x.signum();
        let inc_y = delta_y.signum();
        let delta_x = delta_x.abs();
        let delta_y = delta_y.abs();

        let distance = delta_x.max(delta_y);
        let mut x_err = 0;
        let mut y_err = 0;
        let mut x = i32::from(x1);
        let mut y = i32::from(y1);

        for _ in 0..=distance {
            self.draw_point(x as u16, y as u16, color)?;
            x_err += delta_x;
            y_err += delta_y;
            if x_err >= distance {
                x_err -= distance;
                x += inc_x;
            }
            if y_err >= distance {
                y_err -= distance;
                y += inc_y;
            }
        }
        Ok(())
    }

    /// Rectangle outline: four edge lines, corners inclusive.
    pub fn draw_rectangle(
        &mut self,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        color: u16,
    ) -> Result<(), DisplayError> {
        self.draw_line(x1, y1, x2, y1, color)?;
        self.draw_line(x1, y1, x1, y2, color)?;
        self.draw_line(x1, y2, x2, y2, color)?;
        self.draw_line(x2, y1, x2, y2, color)
    }

    /// Midpoint circle outline, radius `r` around `(cx, cy)`.
    ///
    /// Walks `a` up from 0 while `b` descends from `r` whenever
    /// `a² + b² > r²`, plotting all eight symmetric points per step.
    /// `r == 0` yields the single centre pixel.
    pub fn draw_circle(
        &mut self,
        cx: u16,
        cy: u16,
        r: u16,
        color: u16,
    ) -> Result<(), DisplayError> {
        let cx = i32::from(cx);
        let cy = i32::from(cy);
        let r = i32::from(r);
        let mut a = 0;
        let mut b = r;

        while a <= b {
            self.draw_point((cx - b) as u16, (cy - a) as u16, color)?;
            self.draw_point((cx + b) as u16, (cy - a) as u16, color)?;
            self.draw_point((cx - a) as u16, (cy + b) as u16, color)?;
            self.draw_point((cx - a) as u16, (cy - b) as u16, color)?;
            self.draw_point((cx + b) as u16, (cy + a) as u16, color)?;
            self.draw_point((cx + a) as u16, (cy - b) as u16, color)?;
            self.draw_point((cx + a) as u16, (cy + b) as u16, color)?;
            self.draw_point((cx - b) as u16, (cy + a) as u16, color)?;
            a += 1;
            if a * a + b * b > r * r {
                b -= 1;
            }
        }
        Ok(())
    }
}
