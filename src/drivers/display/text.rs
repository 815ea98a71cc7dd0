//! Bitmap font and icon glyph blitting.
//!
//! Two rendering modes, as the asset tables were generated for:
//!
//! - **opaque** (`overlay = false`): the glyph cell becomes one address
//!   window and every bit is written, foreground or background;
//! - **overlay** (`overlay = true`): only foreground bits are plotted as
//!   individual points, leaving whatever was underneath showing through.
//!
//! Text runs wrap to their starting column once x passes
//! [`TEXT_WRAP_COLUMN`](super::TEXT_WRAP_COLUMN), regardless of glyph
//! boundaries.

use super::assets::{AsciiFont, IconGlyph, FONT_16X32, FONT_8X16, ICONS_16, ICONS_24, ICONS_32};
use super::{PanelBus, St7735, TEXT_WRAP_COLUMN};
use crate::error::DisplayError;

fn ascii_font(size: u8) -> Result<&'static AsciiFont, DisplayError> {
    match size {
        16 => Ok(&FONT_8X16),
        32 => Ok(&FONT_16X32),
        _ => Err(DisplayError::UnsupportedFontSize),
    }
}

fn icon_table(size: u8) -> Result<&'static [IconGlyph], DisplayError> {
    match size {
        16 => Ok(ICONS_16),
        24 => Ok(ICONS_24),
        32 => Ok(ICONS_32),
        _ => Err(DisplayError::UnsupportedFontSize),
    }
}

/// Linear table scan. Duplicate codes are tolerated; the first entry wins
/// and later ones are never rendered.
pub(crate) fn find_icon(table: &'static [IconGlyph], code: [u8; 2]) -> Option<&'static [u8]> {
    for glyph in table {
        if glyph.code == code {
            return Some(glyph.bitmap);
        }
    }
    None
}

impl<B: PanelBus> St7735<B> {
    /// Render one ASCII character. `size` selects the cell height (16 or
    /// 32); the cell is half as wide. Characters the font does not cover
    /// render as a blank cell.
    pub fn draw_char(
        &mut self,
        x: u16,
        y: u16,
        ch: u8,
        fg: u16,
        bg: u16,
        size: u8,
        overlay: bool,
    ) -> Result<(), DisplayError> {
        let font = ascii_font(size)?;
        match font.glyph(ch) {
            Some(bitmap) => self.blit(x, y, font.width, bitmap, fg, bg, overlay),
            None if overlay => Ok(()),
            None => self.fill(x, y, x + font.width, y + font.height, bg),
        }
    }

    /// Render an ASCII string, advancing by the glyph width and wrapping
    /// back to the starting column past [`TEXT_WRAP_COLUMN`].
    pub fn draw_text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        fg: u16,
        bg: u16,
        size: u8,
        overlay: bool,
    ) -> Result<(), DisplayError> {
        let width = u16::from(size / 2);
        let start_x = x;
        let mut x = x;
        let mut y = y;
        for ch in text.bytes() {
            self.draw_char(x, y, ch, fg, bg, size, overlay)?;
            x += width;
            if x > TEXT_WRAP_COLUMN {
                x = start_x;
                y += u16::from(size);
            }
        }
        Ok(())
    }

    /// Render an unsigned integer right-aligned in a `len`-digit field,
    /// with leading zeros shown as blanks.
    pub fn draw_int(
        &mut self,
        x: u16,
        y: u16,
        num: u16,
        len: u8,
        fg: u16,
        bg: u16,
        size: u8,
    ) -> Result<(), DisplayError> {
        let width = u16::from(size / 2);
        let mut significant = false;
        for t in 0..u16::from(len) {
            let digit = (u32::from(num) / pow10(u32::from(len) - u32::from(t) - 1)) % 10;
            if !significant && t < u16::from(len) - 1 {
                if digit == 0 {
                    self.draw_char(x + t * width, y, b' ', fg, bg, size, false)?;
                    continue;
                }
                significant = true;
            }
            self.draw_char(x + t * width, y, b'0' + digit as u8, fg, bg, size, false)?;
        }
        Ok(())
    }

    /// Render one icon glyph by its two-byte code. `size` selects the table
    /// (16, 24 or 32). Unknown codes render nothing.
    pub fn draw_icon(
        &mut self,
        x: u16,
        y: u16,
        code: [u8; 2],
        fg: u16,
        bg: u16,
        size: u8,
        overlay: bool,
    ) -> Result<(), DisplayError> {
        let table = icon_table(size)?;
        match find_icon(table, code) {
            Some(bitmap) => self.blit(x, y, u16::from(size), bitmap, fg, bg, overlay),
            None => Ok(()),
        }
    }

    /// Render a run of icon glyphs, advancing by the square size and
    /// wrapping like [`draw_text`](Self::draw_text).
    pub fn draw_icons(
        &mut self,
        x: u16,
        y: u16,
        codes: &[[u8; 2]],
        fg: u16,
        bg: u16,
        size: u8,
        overlay: bool,
    ) -> Result<(), DisplayError> {
        let start_x = x;
        let mut x = x;
        let mut y = y;
        for &code in codes {
            self.draw_icon(x, y, code, fg, bg, size, overlay)?;
            x += u16::from(size);
            if x > TEXT_WRAP_COLUMN {
                x = start_x;
                y += u16::from(size);
            }
        }
        Ok(())
    }

    // ── Internal ──────────────────────────────────────────────

    /// Core bitmap blit. `bitmap` holds `width / 8` bytes per row, LSB =
    /// leftmost pixel of each 8-pixel group.
    fn blit(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        bitmap: &[u8],
        fg: u16,
        bg: u16,
        overlay: bool,
    ) -> Result<(), DisplayError> {
        if !overlay {
            let height = (bitmap.len() as u16) / (width / 8);
            self.address_window(x, y, x + width - 1, y + height - 1)?;
            for &byte in bitmap {
                for bit in 0..8 {
                    if byte & (1 << bit) != 0 {
                        self.write_pixel(fg)?;
                    } else {
                        self.write_pixel(bg)?;
                    }
                }
            }
        } else {
            let x0 = x;
            let mut x = x;
            let mut y = y;
            for &byte in bitmap {
                for bit in 0..8 {
                    if byte & (1 << bit) != 0 {
                        self.draw_point(x, y, fg)?;
                    }
                    x += 1;
                    if x - x0 == width {
                        x = x0;
                        y += 1;
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}

fn pow10(n: u32) -> u32 {
    let mut result = 1;
    for _ in 0..n {
        result *= 10;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::super::assets::{self, IconGlyph};
    use super::super::sim::SimPanel;
    use super::super::St7735;
    use super::find_icon;
    use crate::error::DisplayError;

    const FG: u16 = 0xF800;
    const BG: u16 = 0xFFE0;

    fn lcd() -> St7735<SimPanel> {
        St7735::new(SimPanel::new())
    }

    fn set_bits(bitmap: &[u8]) -> usize {
        bitmap.iter().map(|b| b.count_ones() as usize).sum()
    }

    #[test]
    fn opaque_char_partitions_the_cell() {
        let mut lcd = lcd();
        lcd.draw_char(20, 45, b'1', FG, BG, 16, false).unwrap();

        let fg_count = lcd.bus.pixels_with(FG).len();
        let bg_count = lcd.bus.pixels_with(BG).len();
        let expected_fg = set_bits(assets::FONT_8X16.glyph(b'1').unwrap());
        assert_eq!(fg_count, expected_fg);
        assert_eq!(fg_count + bg_count, 8 * 16, "cell fully written");

        for (x, y) in lcd.bus.touched() {
            assert!((20..28).contains(&x) && (45..61).contains(&y));
        }
    }

    #[test]
    fn overlay_char_touches_only_foreground_bits() {
        let mut lcd = lcd();
        lcd.draw_char(0, 0, b'7', FG, BG, 16, true).unwrap();
        let expected_fg = set_bits(assets::FONT_8X16.glyph(b'7').unwrap());
        assert_eq!(lcd.bus.touched().len(), expected_fg);
        assert!(lcd.bus.pixels_with(BG).is_empty());
    }

    #[test]
    fn large_font_cell_is_16_by_32() {
        let mut lcd = lcd();
        lcd.draw_char(10, 10, b'A', FG, BG, 32, false).unwrap();
        for (x, y) in lcd.bus.touched() {
            assert!((10..26).contains(&x) && (10..42).contains(&y));
        }
        assert_eq!(lcd.bus.touched().len(), 16 * 32);
    }

    #[test]
    fn uncovered_char_renders_blank_cell() {
        let mut lcd = lcd();
        lcd.draw_char(0, 0, b'z', FG, BG, 16, false).unwrap();
        assert_eq!(lcd.bus.pixels_with(FG).len(), 0);
        assert_eq!(lcd.bus.pixels_with(BG).len(), 8 * 16);
    }

    #[test]
    fn unsupported_size_is_rejected() {
        let mut lcd = lcd();
        assert_eq!(
            lcd.draw_char(0, 0, b'A', FG, BG, 24, false),
            Err(DisplayError::UnsupportedFontSize)
        );
    }

    #[test]
    fn text_wraps_past_column_120() {
        let mut lcd = lcd();
        // 17 glyphs at 8 px: 16 fit on the first line, the 17th wraps back
        // to the starting column.
        lcd.draw_text(0, 0, "AAAAAAAAAAAAAAAAA", FG, BG, 16, false)
            .unwrap();
        let second_line: Vec<_> = lcd
            .bus
            .touched()
            .into_iter()
            .filter(|&(_, y)| y >= 16)
            .collect();
        assert!(!second_line.is_empty(), "17th glyph must wrap");
        for (x, y) in second_line {
            assert!(x < 8, "wrapped glyph restarts at the original column");
            assert!(y < 32);
        }
    }

    #[test]
    fn draw_int_blanks_leading_zeros() {
        let mut lcd = lcd();
        lcd.draw_int(0, 0, 42, 4, FG, BG, 16).unwrap();
        // First two cells blank, then '4' and '2'.
        let fg_px = lcd.bus.pixels_with(FG);
        assert!(fg_px.iter().all(|&(x, _)| x >= 16), "cells 0-1 stay blank");
        assert!(fg_px.iter().any(|&(x, _)| (16..24).contains(&x)));
        assert!(fg_px.iter().any(|&(x, _)| (24..32).contains(&x)));
    }

    #[test]
    fn draw_int_zero_keeps_final_digit() {
        let mut lcd = lcd();
        lcd.draw_int(0, 0, 0, 3, FG, BG, 16).unwrap();
        // "  0": only the last cell carries foreground.
        let fg_px = lcd.bus.pixels_with(FG);
        assert!(!fg_px.is_empty());
        assert!(fg_px.iter().all(|&(x, _)| (16..24).contains(&x)));
    }

    #[test]
    fn icon_lookup_first_match_wins() {
        static DUPES: [IconGlyph; 3] = [
            IconGlyph {
                code: [1, 2],
                bitmap: &[0xAA],
            },
            IconGlyph {
                code: [9, 9],
                bitmap: &[0xBB],
            },
            IconGlyph {
                code: [1, 2],
                bitmap: &[0xCC],
            },
        ];
        assert_eq!(find_icon(&DUPES, [1, 2]), Some(&[0xAA][..]));
        assert_eq!(find_icon(&DUPES, [9, 9]), Some(&[0xBB][..]));
        assert_eq!(find_icon(&DUPES, [0, 0]), None);
    }

    #[test]
    fn icon_blit_matches_table_bitmap() {
        let mut lcd = lcd();
        lcd.draw_icon(4, 2, assets::ICON_LOCK, FG, BG, 16, false)
            .unwrap();
        let expected_fg = set_bits(find_icon(assets::ICONS_16, assets::ICON_LOCK).unwrap());
        assert_eq!(lcd.bus.pixels_with(FG).len(), expected_fg);
        for (x, y) in lcd.bus.touched() {
            assert!((4..20).contains(&x) && (2..18).contains(&y));
        }
    }

    #[test]
    fn icon_run_advances_and_wraps() {
        let mut lcd = lcd();
        // Five 32 px icons from x = 0: four fill the first line
        // (0, 32, 64, 96), then x = 128 passes the margin and the fifth
        // wraps back to the starting column on the next line.
        let codes = [
            assets::ICON_CHECK,
            assets::ICON_CROSS,
            assets::ICON_CHECK,
            assets::ICON_CROSS,
            assets::ICON_CHECK,
        ];
        lcd.draw_icons(0, 0, &codes, FG, BG, 32, false).unwrap();
        let touched = lcd.bus.touched();
        // Fourth icon occupies x 96..128 on the first line.
        assert!(touched.iter().any(|&(x, y)| x >= 96 && y < 32));
        // Fifth icon wrapped to (0, 32).
        assert!(touched.iter().any(|&(_, y)| (32..64).contains(&y)));
        assert!(touched
            .iter()
            .filter(|&&(_, y)| y >= 32)
            .all(|&(x, _)| x < 32));
    }

    #[test]
    fn unknown_icon_code_renders_nothing() {
        let mut lcd = lcd();
        lcd.draw_icon(0, 0, [0xFF, 0xFE], FG, BG, 32, false).unwrap();
        assert!(lcd.bus.touched().is_empty());
    }
}
