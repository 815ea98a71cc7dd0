//! Keypad layout: raw scan codes, their meanings, and press-edge detection.
//!
//! ## Layout
//!
//! The scanner reports one code per matrix position, row-major, counting
//! from the physically-last column within each row:
//!
//! ```text
//!        C1     C2     C3     C4
//! R1      4      3      2      1     ->  digits 3, 2, 1   (4 unbound)
//! R2      8      7      6      5     ->  digits 6, 5, 4   (8 unbound)
//! R3     12     11     10      9     ->  digits 9, 8, 7   (12 unbound)
//! R4     16     15     14     13     ->  confirm, 0, clear (16 unbound)
//! ```
//!
//! Code 0 means "no key down this sample".

/// Raw matrix scan code: 0 = none, 1..=16 = one key position.
pub type KeyCode = u8;

/// The no-key scan code.
pub const KEY_NONE: KeyCode = 0;

/// Decoded meaning of a keypad position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A numeric digit, 0..=9.
    Digit(u8),
    /// Erase the current entry.
    Clear,
    /// Evaluate the current entry against the access code.
    Confirm,
}

/// Map a raw scan code to its bound meaning.
///
/// Returns `None` for code 0 and for the four unbound fourth-column keys.
pub fn decode(code: KeyCode) -> Option<Key> {
    match code {
        1..=3 => Some(Key::Digit(code)),
        5..=7 => Some(Key::Digit(code - 1)),
        9..=11 => Some(Key::Digit(code - 2)),
        13 => Some(Key::Clear),
        14 => Some(Key::Digit(0)),
        15 => Some(Key::Confirm),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Edge detection
// ---------------------------------------------------------------------------

/// Detects the release-to-press transition across successive scan samples.
///
/// A key event fires only when the current sample is nonzero **and** differs
/// from the previous sample. Holding a key produces exactly one event; so
/// does rolling directly from one key to another. Multi-key chords within a
/// single sample are not distinguishable from scan noise and get whatever
/// single code the scanner resolved.
#[derive(Debug, Default)]
pub struct EdgeDetector {
    previous: KeyCode,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self { previous: KEY_NONE }
    }

    /// Feed one scan sample; returns the code that just went down, if any.
    pub fn feed(&mut self, current: KeyCode) -> Option<KeyCode> {
        let pressed = current != KEY_NONE && current != self.previous;
        self.previous = current;
        pressed.then_some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_rows_decode_to_digits() {
        assert_eq!(decode(1), Some(Key::Digit(1)));
        assert_eq!(decode(2), Some(Key::Digit(2)));
        assert_eq!(decode(3), Some(Key::Digit(3)));
        assert_eq!(decode(5), Some(Key::Digit(4)));
        assert_eq!(decode(6), Some(Key::Digit(5)));
        assert_eq!(decode(7), Some(Key::Digit(6)));
        assert_eq!(decode(9), Some(Key::Digit(7)));
        assert_eq!(decode(10), Some(Key::Digit(8)));
        assert_eq!(decode(11), Some(Key::Digit(9)));
        assert_eq!(decode(14), Some(Key::Digit(0)));
    }

    #[test]
    fn bottom_row_controls() {
        assert_eq!(decode(13), Some(Key::Clear));
        assert_eq!(decode(15), Some(Key::Confirm));
    }

    #[test]
    fn unbound_codes_decode_to_none() {
        for code in [0, 4, 8, 12, 16, 17, 255] {
            assert_eq!(decode(code), None, "code {code} must be unbound");
        }
    }

    #[test]
    fn edge_fires_once_per_press() {
        let mut edge = EdgeDetector::new();
        assert_eq!(edge.feed(0), None);
        assert_eq!(edge.feed(5), Some(5));
        assert_eq!(edge.feed(5), None, "held key must not repeat");
        assert_eq!(edge.feed(5), None);
        assert_eq!(edge.feed(0), None, "release is not an event");
        assert_eq!(edge.feed(5), Some(5), "second press fires again");
    }

    #[test]
    fn rollover_between_keys_fires() {
        let mut edge = EdgeDetector::new();
        assert_eq!(edge.feed(1), Some(1));
        assert_eq!(edge.feed(2), Some(2), "direct roll to another key fires");
        assert_eq!(edge.feed(0), None);
    }
}
