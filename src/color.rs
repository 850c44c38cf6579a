use image::{Rgb, Rgba};

const ONE_THIRD: f64 = 1.0 / 3.0;
const ONE_SIXTH: f64 = 1.0 / 6.0;
const TWO_THIRDS: f64 = 2.0 / 3.0;

/// Hue of image `index` out of `total`, spread evenly around the colour wheel.
pub fn base_hue(index: u32, total: u32) -> f64 {
    (index as f64 / total as f64).rem_euclid(1.0)
}

/// Rotates a normalised hue, wrapping back into [0, 1).
pub fn shift_hue(hue: f64, delta: f64) -> f64 {
    (hue + delta).rem_euclid(1.0)
}

pub fn complement(hue: f64) -> f64 {
    shift_hue(hue, 0.5)
}

/// Converts hue, saturation and lightness (each in [0, 1]) to an 8-bit colour.
///
/// Channels are truncated rather than rounded, so `hsl_to_rgb(h, s, 0.5)` with
/// a fully saturated primary hue yields exactly 255 in that channel.
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> Rgb<u8> {
    if saturation == 0.0 {
        let v = channel(lightness);
        return Rgb([v, v, v]);
    }

    let m2 = if lightness <= 0.5 {
        lightness * (1.0 + saturation)
    } else {
        lightness + saturation - lightness * saturation
    };
    let m1 = 2.0 * lightness - m2;

    Rgb([
        channel(hue_component(m1, m2, hue + ONE_THIRD)),
        channel(hue_component(m1, m2, hue)),
        channel(hue_component(m1, m2, hue - ONE_THIRD)),
    ])
}

/// Attaches an alpha channel to an opaque colour.
pub fn with_alpha(color: Rgb<u8>, alpha: u8) -> Rgba<u8> {
    let [r, g, b] = color.0;
    Rgba([r, g, b, alpha])
}

fn hue_component(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < ONE_SIXTH {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < TWO_THIRDS {
        m1 + (m2 - m1) * (TWO_THIRDS - hue) * 6.0
    } else {
        m1
    }
}

#[inline(always)]
fn channel(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0) as u8
}
