use eframe::egui::Color32;

/// Red used for the overlay's positioning aid.
pub const ACCENT: Color32 = Color32::from_rgb(0xff, 0x47, 0x57);
/// Translucent fill behind an unlocked overlay.
pub const ACCENT_TINT: Color32 = Color32::from_rgba_premultiplied(38, 11, 13, 38);
pub const FALLBACK_DIGIT_COLOR: Color32 = Color32::from_rgb(0xff, 0xff, 0x00);

pub const DIGIT_FONT_SIZE: f32 = 36.0;
pub const HINT_FONT_SIZE: f32 = 16.0;

/// Parse `#rrggbb` or `#rgb`. The leading `#` is optional.
pub fn parse_hex(input: &str) -> Option<Color32> {
    let s = input.trim().trim_start_matches('#');
    if !s.is_ascii() {
        return None;
    }
    let bytes = match s.len() {
        6 => (
            u8::from_str_radix(&s[0..2], 16).ok()?,
            u8::from_str_radix(&s[2..4], 16).ok()?,
            u8::from_str_radix(&s[4..6], 16).ok()?,
        ),
        3 => (
            u8::from_str_radix(&s[0..1], 16).ok()? * 17,
            u8::from_str_radix(&s[1..2], 16).ok()? * 17,
            u8::from_str_radix(&s[2..3], 16).ok()? * 17,
        ),
        _ => return None,
    };
    Some(Color32::from_rgb(bytes.0, bytes.1, bytes.2))
}

/// Lowercase `#rrggbb`, ignoring alpha.
pub fn to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

/// Color for digit text; falls back to yellow if the stored value is unusable.
pub fn digit_color(hex: &str) -> Color32 {
    parse_hex(hex).unwrap_or(FALLBACK_DIGIT_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_forms() {
        assert_eq!(parse_hex("#ffff00"), Some(Color32::from_rgb(255, 255, 0)));
        assert_eq!(parse_hex("0f0"), Some(Color32::from_rgb(0, 255, 0)));
        assert_eq!(parse_hex("#12345"), None);
        assert_eq!(parse_hex("#gg0000"), None);
    }

    #[test]
    fn hex_is_lowercase() {
        assert_eq!(to_hex(Color32::from_rgb(0xAB, 0x01, 0xFF)), "#ab01ff");
    }

    #[test]
    fn invalid_color_falls_back_to_yellow() {
        assert_eq!(digit_color("not a color"), FALLBACK_DIGIT_COLOR);
    }
}
