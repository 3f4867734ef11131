use egui::Color32;

use crate::error::{SurfaceError, SurfaceResult};

/// Named colors accepted by [`parse_color`], as packed `0xAARRGGBB`.
const NAMED_COLORS: &[(&str, u32)] = &[
    ("black", 0xFF00_0000),
    ("darkgray", 0xFF44_4444),
    ("gray", 0xFF88_8888),
    ("lightgray", 0xFFCC_CCCC),
    ("white", 0xFFFF_FFFF),
    ("red", 0xFFFF_0000),
    ("green", 0xFF00_FF00),
    ("blue", 0xFF00_00FF),
    ("yellow", 0xFFFF_FF00),
    ("cyan", 0xFF00_FFFF),
    ("magenta", 0xFFFF_00FF),
    ("aqua", 0xFF00_FFFF),
    ("fuchsia", 0xFFFF_00FF),
    ("darkgrey", 0xFF44_4444),
    ("grey", 0xFF88_8888),
    ("lightgrey", 0xFFCC_CCCC),
    ("lime", 0xFF00_FF00),
    ("maroon", 0xFF80_0000),
    ("navy", 0xFF00_0080),
    ("olive", 0xFF80_8000),
    ("purple", 0xFF80_0080),
    ("silver", 0xFFC0_C0C0),
    ("teal", 0xFF00_8080),
];

/// Parse a color specification into a [`Color32`].
///
/// Accepted forms:
/// - `#RRGGBB` (fully opaque)
/// - `#AARRGGBB`
/// - one of the symbolic names above, case-insensitive
pub fn parse_color(spec: &str) -> SurfaceResult<Color32> {
    let invalid = || SurfaceError::InvalidColorFormat(spec.to_string());

    if let Some(hex) = spec.strip_prefix('#') {
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
        return match hex.len() {
            6 => Ok(from_argb(0xFF00_0000 | value)),
            8 => Ok(from_argb(value)),
            _ => Err(invalid()),
        };
    }

    let name = spec.to_ascii_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, argb)| from_argb(*argb))
        .ok_or_else(invalid)
}

/// Unpack a `0xAARRGGBB` value into a premultiplied [`Color32`]
pub fn from_argb(argb: u32) -> Color32 {
    let [a, r, g, b] = argb.to_be_bytes();
    Color32::from_rgba_unmultiplied(r, g, b, a)
}
