//! Color math — direct conversions without external dependencies.
//!
//! Conversions operate on normalized f64 channels; hue is in degrees. No
//! rounding or 8-bit scaling happens here — that is format-codec territory.

use crate::color::{Hsl, Hsv, Rgb};

/// Clamp into the 0.0–1.0 range.
pub(crate) fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

/// HSV → RGB.
///
/// Hue may be any real and is taken mod 360; saturation and value are
/// clamped to 0.0–1.0 here, not by the caller.
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let h = hsv.h.rem_euclid(360.0);
    let s = clamp01(hsv.s);
    let v = clamp01(hsv.v);

    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    // 60-degree sector decomposition
    let (r, g, b) = match (h / 60.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Rgb {
        r: r + m,
        g: g + m,
        b: b + m,
    }
}

/// RGB → HSV.
///
/// Channels are assumed to be in 0.0–1.0 already. Achromatic inputs (gray,
/// black, white) map to hue 0 and saturation 0.
pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    let Rgb { r, g, b } = rgb;

    let v = r.max(g).max(b);
    let d = v - r.min(g).min(b);

    if d == 0.0 {
        return Hsv { h: 0.0, s: 0.0, v };
    }

    let s = d / v;
    let h = if v == r {
        (((g - b) / d + if g < b { 6.0 } else { 0.0 }) % 6.0) * 60.0
    } else if v == g {
        ((b - r) / d + 2.0) * 60.0
    } else {
        ((r - g) / d + 4.0) * 60.0
    };

    Hsv { h, s, v }
}

/// HSL → HSV. Hue passes through unchanged.
pub fn hsl_to_hsv(hsl: Hsl) -> Hsv {
    let s = clamp01(hsl.s);
    let l = clamp01(hsl.l);

    let v = l + s * l.min(1.0 - l);
    let s_hsv = if v == 0.0 { 0.0 } else { 2.0 * (1.0 - l / v) };

    Hsv {
        h: hsl.h,
        s: s_hsv,
        v,
    }
}

/// HSV → HSL. Hue passes through unchanged.
pub fn hsv_to_hsl(hsv: Hsv) -> Hsl {
    let s = clamp01(hsv.s);
    let v = clamp01(hsv.v);

    let l = v * (1.0 - s / 2.0);
    let s_hsl = if l == 0.0 || l == 1.0 {
        0.0
    } else {
        (v - l) / l.min(1.0 - l)
    };

    Hsl {
        h: hsv.h,
        s: s_hsl,
        l,
    }
}
