// src/generator.rs
use crate::canvas::Canvas;
use crate::color::{base_hue, complement, hsl_to_rgb, shift_hue, with_alpha};
use crate::config::Preset;
use crate::pattern::{linear_gradient, Decoration, GradientDirection};
use crate::shapes::{draw_border, draw_wave, fill_triangle};
use crate::text::{draw_text, FontFace};
use image::{Rgb, RgbImage, Rgba};
use imageproc::drawing::draw_filled_circle_mut;
use imageproc::point::Point;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 600;
pub const BORDER_WIDTH: u32 = 10;
pub const SHADOW_LAYERS: i32 = 5;

/// Colours every element of one image is derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
    pub start: Rgb<u8>,
    pub end: Rgb<u8>,
}

impl Palette {
    pub fn for_index(preset: Preset, index: u32, total: u32) -> Self {
        let hue = base_hue(index, total);
        match preset {
            Preset::Simple => {
                let (saturation, lightness) = (0.7, 0.9);
                Self {
                    hue,
                    saturation,
                    lightness,
                    start: hsl_to_rgb(hue, saturation, lightness),
                    end: hsl_to_rgb(hue, saturation, lightness - 0.2),
                }
            }
            Preset::Complex => {
                // stepped by index parity and residue, never interpolated
                let saturation = 0.6 + 0.1 * (index % 3) as f64;
                let lightness = 0.55 + 0.1 * (index % 2) as f64;
                Self {
                    hue,
                    saturation,
                    lightness,
                    start: hsl_to_rgb(hue, saturation, lightness),
                    end: hsl_to_rgb(complement(hue), saturation * 0.7, lightness * 0.6),
                }
            }
        }
    }
}

/// Random stream for image `index`; reseeding gives back the same image.
pub fn random_stream(index: u32) -> StdRng {
    StdRng::seed_from_u64(u64::from(index) * 42)
}

/// Render image `index` of `total`. Pure: nothing is read or written.
///
/// The simple preset never touches `rng`.
pub fn generate_image<R: Rng>(
    preset: Preset,
    index: u32,
    total: u32,
    face: &FontFace,
    rng: &mut R,
) -> RgbImage {
    let palette = Palette::for_index(preset, index, total);
    debug!("rendering image {index}/{total} ({preset:?}), hue {:.4}", palette.hue);

    match preset {
        Preset::Simple => render_simple(index, &palette, face),
        Preset::Complex => render_complex(index, &palette, face, rng),
    }
}

fn render_simple(index: u32, palette: &Palette, face: &FontFace) -> RgbImage {
    let mut canvas = Canvas::new(linear_gradient(
        WIDTH,
        HEIGHT,
        palette.start,
        palette.end,
        GradientDirection::Vertical,
    ));

    let circle = Rgba([255, 255, 255, (255.0 * 0.3) as u8]);
    for i in 0..3u32 {
        let center = ((WIDTH / 4 + i * WIDTH / 4) as i32, (HEIGHT / 2) as i32);
        let diameter = 150 - i as i32 * 20;
        canvas.composite(|layer| draw_filled_circle_mut(layer, center, diameter / 2, circle));
    }

    stamp_number(
        &mut canvas,
        face,
        index,
        &[(3, Rgba([0, 0, 0, 255]))],
        Rgb([255, 255, 255]),
    );

    canvas.into_image()
}

fn render_complex<R: Rng>(index: u32, palette: &Palette, face: &FontFace, rng: &mut R) -> RgbImage {
    let mut canvas = Canvas::new(linear_gradient(
        WIDTH,
        HEIGHT,
        palette.start,
        palette.end,
        GradientDirection::Diagonal,
    ));
    let (w, h) = (WIDTH as i32, HEIGHT as i32);

    let circles = 3 + index % 4;
    for i in 0..circles {
        let center = (rng.gen_range(0..w), rng.gen_range(0..h));
        let radius = rng.gen_range(40..=140);
        let alpha = rng.gen_range(50..=110);
        let color = hsl_to_rgb(shift_hue(palette.hue, 0.08 * i as f64), palette.saturation, 0.75);
        canvas.composite(|layer| draw_filled_circle_mut(layer, center, radius, with_alpha(color, alpha)));
    }

    let triangle = with_alpha(hsl_to_rgb(shift_hue(palette.hue, 0.33), 0.6, 0.6), 60);
    for _ in 0..2 + index % 3 {
        let corners: [Point<i32>; 3] =
            std::array::from_fn(|_| Point::new(rng.gen_range(0..w), rng.gen_range(0..h)));
        canvas.composite(|layer| fill_triangle(layer, &corners, triangle));
    }

    let wave = with_alpha(hsl_to_rgb(shift_hue(palette.hue, 0.15), 0.5, 0.9), 110);
    for _ in 0..2 + index % 2 {
        let from = (rng.gen_range(0.0..WIDTH as f64), rng.gen_range(0.0..HEIGHT as f64));
        let to = (rng.gen_range(0.0..WIDTH as f64), rng.gen_range(0.0..HEIGHT as f64));
        canvas.composite(|layer| draw_wave(layer, from, to, wave));
    }

    let decoration = Decoration::for_index(index);
    if decoration != Decoration::Plain {
        canvas.composite(|layer| decoration.paint(layer, Rgba([255, 255, 255, 40])));
    }

    // farthest shadow first, each nearer layer darker
    let shadows: Vec<(i32, Rgba<u8>)> = (1..=SHADOW_LAYERS)
        .rev()
        .map(|layer| (layer * 2, Rgba([0, 0, 0, (150 - layer * 25) as u8])))
        .collect();
    stamp_number(
        &mut canvas,
        face,
        index,
        &shadows,
        hsl_to_rgb(shift_hue(palette.hue, 0.1), 0.9, 0.95),
    );

    draw_border(
        canvas.image_mut(),
        BORDER_WIDTH,
        hsl_to_rgb(palette.hue, palette.saturation * 0.5, 0.3),
    );

    canvas.into_image()
}

/// Centre `index` on the canvas, drawing each `(offset, colour)` shadow pass
/// before the glyphs themselves.
fn stamp_number(
    canvas: &mut Canvas,
    face: &FontFace,
    index: u32,
    shadows: &[(i32, Rgba<u8>)],
    color: Rgb<u8>,
) {
    let text = index.to_string();
    let Some(ink) = face.measure(&text) else {
        return;
    };
    let (x, y) = ink.centered_origin(WIDTH, HEIGHT);

    for &(offset, shadow) in shadows {
        canvas.composite(|layer| draw_text(layer, face, &text, (x + offset, y + offset), shadow));
    }
    canvas.composite(|layer| draw_text(layer, face, &text, (x, y), with_alpha(color, 255)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FONT_SIZE, IMAGE_COUNT};
    use approx::assert_relative_eq;

    fn render(preset: Preset, index: u32) -> RgbImage {
        let face = FontFace::builtin(FONT_SIZE);
        generate_image(preset, index, IMAGE_COUNT, &face, &mut random_stream(index))
    }

    #[test]
    fn test_every_index_renders_full_size() {
        for preset in [Preset::Simple, Preset::Complex] {
            for index in 1..=IMAGE_COUNT {
                let img = render(preset, index);
                assert_eq!(img.dimensions(), (800, 600), "{preset:?} #{index}");
            }
        }
    }

    #[test]
    fn test_complex_is_deterministic_per_index() {
        for index in [1, 7, 30] {
            assert!(render(Preset::Complex, index) == render(Preset::Complex, index));
        }
        assert!(render(Preset::Complex, 4) != render(Preset::Complex, 5));
    }

    #[test]
    fn test_simple_ignores_random_stream() {
        let face = FontFace::builtin(FONT_SIZE);
        let a = generate_image(Preset::Simple, 3, 30, &face, &mut random_stream(1));
        let b = generate_image(Preset::Simple, 3, 30, &face, &mut random_stream(99));
        assert!(a == b);
    }

    #[test]
    fn test_random_stream_seeding() {
        let mut a = random_stream(3);
        let mut b = StdRng::seed_from_u64(126);
        assert_eq!(a.gen::<u64>(), b.gen::<u64>());
        assert_ne!(random_stream(3).gen::<u64>(), random_stream(4).gen::<u64>());
    }

    #[test]
    fn test_palette_hues() {
        let first = Palette::for_index(Preset::Complex, 1, 30);
        assert_relative_eq!(first.hue, 1.0 / 30.0, epsilon = 1e-12);

        let middle = Palette::for_index(Preset::Complex, 15, 30);
        assert_relative_eq!(middle.hue, 0.5, epsilon = 1e-12);
        assert_eq!(middle.end, hsl_to_rgb(0.0, middle.saturation * 0.7, middle.lightness * 0.6));
    }

    #[test]
    fn test_palette_steps_are_discrete() {
        let p = |i| Palette::for_index(Preset::Complex, i, 30);
        assert_relative_eq!(p(1).saturation, p(4).saturation);
        assert_relative_eq!(p(3).saturation, 0.6);
        assert_relative_eq!(p(5).saturation, 0.8, epsilon = 1e-12);
        assert_relative_eq!(p(2).lightness, p(8).lightness);
        assert_relative_eq!(p(7).lightness, 0.65, epsilon = 1e-12);
    }

    #[test]
    fn test_simple_gradient_runs_top_to_bottom() {
        let palette = Palette::for_index(Preset::Simple, 12, 30);
        let img = render(Preset::Simple, 12);
        // the top-left corner is clear of circles and text
        assert_eq!(*img.get_pixel(0, 0), palette.start);
        assert_eq!(*img.get_pixel(799, 0), palette.start);
    }

    #[test]
    fn test_complex_border_colour() {
        let palette = Palette::for_index(Preset::Complex, 9, 30);
        let border = hsl_to_rgb(palette.hue, palette.saturation * 0.5, 0.3);
        let img = render(Preset::Complex, 9);
        for (x, y) in [(0, 0), (799, 599), (5, 300), (400, 595)] {
            assert_eq!(*img.get_pixel(x, y), border);
        }
    }

    #[test]
    fn test_number_is_drawn_at_centre() {
        let img = render(Preset::Simple, 8);
        // '8' with 17px cells: the centre column of the middle row is inked
        assert_eq!(*img.get_pixel(400, 300), Rgb([255, 255, 255]));
    }
}
