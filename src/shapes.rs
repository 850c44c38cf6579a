use image::{Rgb, RgbImage, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_polygon_mut};
use imageproc::point::Point;
use imageproc::rect::Rect;
use ndarray::Array1;
use std::f64::consts::TAU;

pub const WAVE_SAMPLES: usize = 100;
pub const WAVE_AMPLITUDE: f64 = 30.0;
pub const WAVE_PERIODS: f64 = 2.0;
pub const WAVE_DOT_RADIUS: i32 = 3;

/// Filled triangle. A triangle whose first and last corners coincide cannot be
/// closed as a polygon and is left out.
pub fn fill_triangle(layer: &mut RgbaImage, corners: &[Point<i32>; 3], color: Rgba<u8>) {
    if corners[0] == corners[2] {
        return;
    }
    draw_polygon_mut(layer, corners, color);
}

/// Centre points of a wavy stroke from `from` to `to`.
///
/// Samples `t` evenly over [0, 1] and pushes each point of the straight
/// segment sideways by `WAVE_AMPLITUDE * sin(2π · WAVE_PERIODS · t)`.
pub fn wave_points(from: (f64, f64), to: (f64, f64)) -> Vec<(f64, f64)> {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let length = dx.hypot(dy);
    let (nx, ny) = if length > 0.0 {
        (-dy / length, dx / length)
    } else {
        (0.0, 0.0)
    };

    Array1::linspace(0.0, 1.0, WAVE_SAMPLES)
        .iter()
        .map(|&t| {
            let offset = WAVE_AMPLITUDE * (TAU * WAVE_PERIODS * t).sin();
            (from.0 + dx * t + nx * offset, from.1 + dy * t + ny * offset)
        })
        .collect()
}

/// Wavy stroke rendered as a chain of small dots.
pub fn draw_wave(layer: &mut RgbaImage, from: (f64, f64), to: (f64, f64), color: Rgba<u8>) {
    for (x, y) in wave_points(from, to) {
        draw_filled_circle_mut(layer, (x.round() as i32, y.round() as i32), WAVE_DOT_RADIUS, color);
    }
}

/// Solid frame `thickness` pixels wide along every edge.
pub fn draw_border(image: &mut RgbImage, thickness: u32, color: Rgb<u8>) {
    let (width, height) = image.dimensions();
    let thickness = thickness.min(width / 2).min(height / 2);
    if thickness == 0 {
        return;
    }
    let far_x = (width - thickness) as i32;
    let far_y = (height - thickness) as i32;

    draw_filled_rect_mut(image, Rect::at(0, 0).of_size(width, thickness), color);
    draw_filled_rect_mut(image, Rect::at(0, far_y).of_size(width, thickness), color);
    draw_filled_rect_mut(image, Rect::at(0, 0).of_size(thickness, height), color);
    draw_filled_rect_mut(image, Rect::at(far_x, 0).of_size(thickness, height), color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Distance of `p` from the infinite line through `a` and `b`.
    fn distance_from_line(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        ((p.0 - a.0) * dy - (p.1 - a.1) * dx).abs() / dx.hypot(dy)
    }

    #[test]
    fn test_wave_sampling() {
        let from = (10.0, 20.0);
        let to = (410.0, 320.0);
        let points = wave_points(from, to);

        assert_eq!(points.len(), WAVE_SAMPLES);
        assert_abs_diff_eq!(points[0].0, from.0, epsilon = 1e-9);
        assert_abs_diff_eq!(points[0].1, from.1, epsilon = 1e-9);
        assert_abs_diff_eq!(points[WAVE_SAMPLES - 1].0, to.0, epsilon = 1e-6);
        assert_abs_diff_eq!(points[WAVE_SAMPLES - 1].1, to.1, epsilon = 1e-6);
    }

    #[test]
    fn test_wave_amplitude() {
        let from = (0.0, 300.0);
        let to = (800.0, 300.0);
        let points = wave_points(from, to);

        let peak = points
            .iter()
            .map(|&p| distance_from_line(p, from, to))
            .fold(0.0_f64, f64::max);
        assert!(peak <= WAVE_AMPLITUDE + 1e-9);
        assert!(peak > WAVE_AMPLITUDE * 0.99, "peak = {peak}");
    }

    #[test]
    fn test_wave_with_coincident_endpoints_collapses() {
        let points = wave_points((5.0, 5.0), (5.0, 5.0));
        assert!(points.iter().all(|&p| p == (5.0, 5.0)));
    }

    #[test]
    fn test_draw_wave_touches_endpoints() {
        let mut layer = RgbaImage::new(100, 100);
        draw_wave(&mut layer, (10.0, 50.0), (90.0, 50.0), Rgba([255, 255, 255, 90]));
        assert_eq!(layer.get_pixel(10, 50)[3], 90);
        assert_eq!(layer.get_pixel(90, 50)[3], 90);
    }

    #[test]
    fn test_triangle_fill() {
        let mut layer = RgbaImage::new(50, 50);
        let corners = [Point::new(5, 5), Point::new(45, 5), Point::new(5, 45)];
        fill_triangle(&mut layer, &corners, Rgba([0, 0, 255, 70]));

        assert_eq!(*layer.get_pixel(10, 10), Rgba([0, 0, 255, 70]));
        assert_eq!(layer.get_pixel(44, 44)[3], 0);
    }

    #[test]
    fn test_degenerate_triangle_is_skipped() {
        let mut layer = RgbaImage::new(20, 20);
        let corners = [Point::new(3, 3), Point::new(10, 10), Point::new(3, 3)];
        fill_triangle(&mut layer, &corners, Rgba([255, 0, 0, 255]));
        assert!(layer.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_border() {
        let mut image = RgbImage::new(60, 40);
        let color = Rgb([9, 8, 7]);
        draw_border(&mut image, 10, color);

        for (x, y) in [(0, 0), (59, 39), (9, 20), (50, 20), (30, 9), (30, 30)] {
            assert_eq!(*image.get_pixel(x, y), color, "edge pixel ({x}, {y})");
        }
        for (x, y) in [(10, 10), (49, 29), (30, 20)] {
            assert_eq!(*image.get_pixel(x, y), Rgb([0, 0, 0]), "inner pixel ({x}, {y})");
        }
    }
}
