// src/pattern.rs
use image::{ImageBuffer, Rgb, RgbImage, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
use ndarray::{Array1, Array2, Zip};

pub const DOT_SPACING: u32 = 40;
pub const DOT_RADIUS: i32 = 3;
pub const GRID_SPACING: u32 = 50;

/// Create a meshgrid from x and y arrays, similar to numpy's meshgrid
pub fn meshgrid(x: &Array1<f64>, y: &Array1<f64>) -> (Array2<f64>, Array2<f64>) {
    let nx = x.len();
    let ny = y.len();

    // Create x grid
    let mut x_grid = Array2::zeros((ny, nx));
    for i in 0..ny {
        x_grid.row_mut(i).assign(x);
    }

    // Create y grid
    let mut y_grid = Array2::zeros((ny, nx));
    for j in 0..nx {
        y_grid.column_mut(j).assign(y);
    }

    (x_grid, y_grid)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientDirection {
    /// Blend by row: `y / height`
    Vertical,
    /// Blend along the main diagonal: `(x + y) / (width + height)`
    Diagonal,
}

/// Per-pixel blend position in [0, 1), laid out as (row, column).
pub fn blend_ratios(width: u32, height: u32, direction: GradientDirection) -> Array2<f64> {
    let x: Array1<f64> = Array1::range(0.0, width as f64, 1.0);
    let y: Array1<f64> = Array1::range(0.0, height as f64, 1.0);
    let (x_grid, y_grid) = meshgrid(&x, &y);

    match direction {
        GradientDirection::Vertical => y_grid / height as f64,
        GradientDirection::Diagonal => (&x_grid + &y_grid) / (width + height) as f64,
    }
}

/// Fill a fresh image with a two-colour linear gradient.
pub fn linear_gradient(
    width: u32,
    height: u32,
    start: Rgb<u8>,
    end: Rgb<u8>,
    direction: GradientDirection,
) -> RgbImage {
    let ratios = blend_ratios(width, height, direction);

    let channels: Vec<Array2<u8>> = (0..3)
        .map(|c| blend_channel(&ratios, start.0[c], end.0[c]))
        .collect();

    let mut img = ImageBuffer::new(width, height);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        *pixel = Rgb([
            channels[0][[y as usize, x as usize]],
            channels[1][[y as usize, x as usize]],
            channels[2][[y as usize, x as usize]],
        ]);
    }
    img
}

/// Interpolate one channel over the ratio grid, truncating to a byte.
fn blend_channel(ratios: &Array2<f64>, from: u8, to: u8) -> Array2<u8> {
    let (from, to) = (from as f64, to as f64);
    let mut out = Array2::zeros(ratios.dim());
    Zip::from(&mut out)
        .and(ratios)
        .par_for_each(|out, &ratio| {
            *out = (from * (1.0 - ratio) + to * ratio) as u8;
        });
    out
}

/// Repeating overlay stamped over the shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoration {
    Dots,
    Grid,
    Plain,
}

impl Decoration {
    pub fn for_index(index: u32) -> Self {
        match index % 3 {
            0 => Decoration::Dots,
            1 => Decoration::Grid,
            _ => Decoration::Plain,
        }
    }

    pub fn paint(self, layer: &mut RgbaImage, color: Rgba<u8>) {
        let (width, height) = layer.dimensions();
        match self {
            Decoration::Dots => {
                for row in 0..=height / DOT_SPACING {
                    for col in 0..=width / DOT_SPACING {
                        if (row + col) % 2 != 0 {
                            continue;
                        }
                        let center = ((col * DOT_SPACING) as i32, (row * DOT_SPACING) as i32);
                        draw_filled_circle_mut(layer, center, DOT_RADIUS, color);
                    }
                }
            }
            Decoration::Grid => {
                let (w, h) = (width as f32, height as f32);
                for x in (0..width).step_by(GRID_SPACING as usize) {
                    draw_line_segment_mut(layer, (x as f32, 0.0), (x as f32, h), color);
                }
                for y in (0..height).step_by(GRID_SPACING as usize) {
                    draw_line_segment_mut(layer, (0.0, y as f32), (w, y as f32), color);
                }
            }
            Decoration::Plain => {}
        }
    }
}
