// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hex color parsing and status bar contrast selection.

use peniko::Color;

/// Parses a hex color string into a [`Color`].
///
/// Characters outside `[a-zA-Z0-9 -]` are stripped first, so `"#2196F3"` and
/// `"2196F3"` are equivalent. The remaining digits are read as:
///
/// - 3 digits: 12-bit RGB, each nibble expanded (`"F80"` is `#FF8800`).
/// - 6 digits: 24-bit RGB, fully opaque.
/// - 8 digits: 32-bit ARGB with the alpha channel first.
///
/// Any other length, or any non-hex digit left after stripping, yields
/// [`Color::TRANSPARENT`]. Malformed input is never an error.
///
/// ```
/// use understory_spotlight::color::parse_hex_color;
///
/// let blue = parse_hex_color("#2196F3").to_rgba8();
/// assert_eq!((blue.r, blue.g, blue.b, blue.a), (0x21, 0x96, 0xF3, 0xFF));
///
/// let clear = parse_hex_color("12345").to_rgba8();
/// assert_eq!(clear.a, 0);
/// ```
pub fn parse_hex_color(input: &str) -> Color {
    let mut digits = [0_u8; 8];
    let mut len = 0;
    for b in input.bytes() {
        if !(b.is_ascii_alphanumeric() || b == b' ' || b == b'-') {
            continue;
        }
        let Some(slot) = digits.get_mut(len) else {
            return Color::TRANSPARENT;
        };
        *slot = b;
        len += 1;
    }

    let Some(value) = digits[..len]
        .iter()
        .try_fold(0_u32, |acc, &b| hex_value(b).map(|v| (acc << 4) | v))
    else {
        return Color::TRANSPARENT;
    };

    let (a, r, g, b) = match len {
        3 => (
            0xFF,
            ((value >> 8) & 0xF) * 17,
            ((value >> 4) & 0xF) * 17,
            (value & 0xF) * 17,
        ),
        6 => (0xFF, (value >> 16) & 0xFF, (value >> 8) & 0xFF, value & 0xFF),
        8 => (
            value >> 24,
            (value >> 16) & 0xFF,
            (value >> 8) & 0xFF,
            value & 0xFF,
        ),
        _ => return Color::TRANSPARENT,
    };
    Color::from_rgba8(channel(r), channel(g), channel(b), channel(a))
}

fn hex_value(b: u8) -> Option<u32> {
    char::from(b).to_digit(16)
}

fn channel(v: u32) -> u8 {
    u8::try_from(v).unwrap_or(u8::MAX)
}

/// Status bar appearance requested while an overlay is on screen.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum StatusBarStyle {
    /// Dark content, for light backgrounds.
    #[default]
    Default,
    /// Light content, for dark backgrounds.
    LightContent,
}

impl StatusBarStyle {
    /// Perceived brightness below which light status bar content is used,
    /// on a 0-255 scale.
    pub const LIGHT_CONTENT_THRESHOLD: f64 = 125.0;

    /// Picks a status bar style that contrasts with `background`.
    ///
    /// Uses the `(299 R + 587 G + 114 B) / 1000` brightness formula on 0-255
    /// channels; alpha is ignored.
    pub fn for_background(background: Color) -> Self {
        let c = background.to_rgba8();
        let (r, g, b) = (f64::from(c.r), f64::from(c.g), f64::from(c.b));
        let brightness = (r * 299.0 + g * 587.0 + b * 114.0) / 1000.0;
        if brightness < Self::LIGHT_CONTENT_THRESHOLD {
            Self::LightContent
        } else {
            Self::Default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba(c: Color) -> (u8, u8, u8, u8) {
        let c = c.to_rgba8();
        (c.r, c.g, c.b, c.a)
    }

    #[test]
    fn six_digit_rgb() {
        assert_eq!(rgba(parse_hex_color("2196F3")), (0x21, 0x96, 0xF3, 0xFF));
        assert_eq!(rgba(parse_hex_color("#2196f3")), (0x21, 0x96, 0xF3, 0xFF));
    }

    #[test]
    fn eight_digit_argb_has_alpha_first() {
        assert_eq!(rgba(parse_hex_color("80FFFFFF")), (0xFF, 0xFF, 0xFF, 0x80));
    }

    #[test]
    fn three_digit_expands_nibbles() {
        assert_eq!(rgba(parse_hex_color("#F80")), (0xFF, 0x88, 0x00, 0xFF));
    }

    #[test]
    fn bad_lengths_are_transparent() {
        for s in ["", "1", "12345", "1234567", "123456789", "#"] {
            assert_eq!(rgba(parse_hex_color(s)).3, 0, "{s:?} is opaque");
        }
    }

    #[test]
    fn non_hex_digits_are_transparent() {
        // `g` survives stripping but is not a hex digit.
        assert_eq!(rgba(parse_hex_color("gg0000")).3, 0);
        // Spaces survive stripping but are not hex digits either.
        assert_eq!(rgba(parse_hex_color("21 96F3")).3, 0);
    }

    #[test]
    fn dark_backgrounds_get_light_status_bar() {
        assert_eq!(
            StatusBarStyle::for_background(parse_hex_color("1A237E")),
            StatusBarStyle::LightContent
        );
        // Material blue sits just above the threshold (about 125.6).
        assert_eq!(
            StatusBarStyle::for_background(parse_hex_color("2196F3")),
            StatusBarStyle::Default
        );
        assert_eq!(
            StatusBarStyle::for_background(Color::WHITE),
            StatusBarStyle::Default
        );
        assert_eq!(
            StatusBarStyle::for_background(Color::BLACK),
            StatusBarStyle::LightContent
        );
    }
}
