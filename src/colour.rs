//! Magnitude to colour mapping.

use image::Rgb;

/// Smallest maximum a column is normalised against.
pub const LEVEL_FLOOR: f32 = 1e-5;

/// Rescales `magnitude` from `[0, max(max_level, LEVEL_FLOOR)]` to `[0, 1]`.
pub fn normalise(magnitude: f32, max_level: f32) -> f32 {
    let level = magnitude / max_level.max(LEVEL_FLOOR);
    level.max(0.0).min(1.0)
}

/// Colour for a normalised level: used as both hue and brightness at full saturation.
pub fn level_colour(level: f32) -> Rgb<u8> {
    from_hsv(level, 1.0, level)
}

/// HSV to RGB. Hue is in turns, so 0 and 1 are both red.
pub fn from_hsv(hue: f32, saturation: f32, brightness: f32) -> Rgb<u8> {
    let v = brightness.max(0.0).min(1.0);
    let s = saturation.max(0.0).min(1.0);
    if s == 0.0 {
        let grey = to_u8(v);
        return Rgb([grey, grey, grey]);
    }

    let h = (hue - hue.floor()) * 6.0;
    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector as u32 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Rgb([to_u8(r), to_u8(g), to_u8(b)])
}

fn to_u8(x: f32) -> u8 {
    (x * 255.0).round().max(0.0).min(255.0) as u8
}

/// Packs a colour as `0x00RRGGBB`.
pub fn to_xrgb(colour: Rgb<u8>) -> u32 {
    let Rgb([r, g, b]) = colour;
    (r as u32) << 16 | (g as u32) << 8 | b as u32
}
