use crate::error::{Error, Result};
use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// Font files tried in order, preferred bold face first.
pub const FONT_CANDIDATES: [&str; 4] = [
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
];

const GLYPH_COLUMNS: i32 = 5;
const GLYPH_ROWS: i32 = 7;

/// A face able to rasterize the image numbers.
pub enum FontFace {
    /// TrueType/OpenType outlines loaded from disk
    Outline { font: FontVec, scale: PxScale },
    /// Built-in 5x7 digits, each bit drawn as a `cell`-sized square
    Bitmap { cell: i32 },
}

/// Inked area of some rasterized text, relative to its drawing origin.
/// `right` and `bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InkBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl InkBox {
    fn at(x: i32, y: i32) -> Self {
        Self {
            left: x,
            top: y,
            right: x + 1,
            bottom: y + 1,
        }
    }

    fn include(self, x: i32, y: i32) -> Self {
        Self {
            left: self.left.min(x),
            top: self.top.min(y),
            right: self.right.max(x + 1),
            bottom: self.bottom.max(y + 1),
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Drawing origin that puts this box in the middle of a `width`×`height` area.
    pub fn centered_origin(&self, width: u32, height: u32) -> (i32, i32) {
        (
            (width as i32 - self.width()).div_euclid(2) - self.left,
            (height as i32 - self.height()).div_euclid(2) - self.top,
        )
    }
}

impl FontFace {
    /// Returns the first candidate that loads, or the built-in face.
    pub fn resolve<P: AsRef<Path>>(candidates: &[P], size: f32) -> Self {
        for path in candidates {
            let path = path.as_ref();
            match load_outline(path) {
                Ok(font) => {
                    info!("using font {}", path.display());
                    let scale = em_scale(&font, size);
                    return FontFace::Outline { font, scale };
                }
                Err(err) => debug!("skipping font candidate: {err}"),
            }
        }

        warn!("no font candidate could be loaded, falling back to the built-in digits");
        FontFace::builtin(size)
    }

    pub fn builtin(size: f32) -> Self {
        FontFace::Bitmap {
            cell: ((size / GLYPH_ROWS as f32).round() as i32).max(1),
        }
    }

    /// Calls `plot(x, y, coverage)` for every pixel `text` covers when drawn at
    /// the origin.
    pub fn rasterize<F>(&self, text: &str, mut plot: F)
    where
        F: FnMut(i32, i32, f32),
    {
        match self {
            FontFace::Outline { font, scale } => {
                let scaled = font.as_scaled(*scale);
                let mut caret = 0.0_f32;
                let mut previous = None;

                for ch in text.chars() {
                    let id = scaled.glyph_id(ch);
                    if let Some(prev) = previous {
                        caret += scaled.kern(prev, id);
                    }
                    let glyph = id.with_scale_and_position(*scale, point(caret, scaled.ascent()));
                    caret += scaled.h_advance(id);
                    previous = Some(id);

                    if let Some(outlined) = font.outline_glyph(glyph) {
                        let bounds = outlined.px_bounds();
                        let (left, top) = (bounds.min.x as i32, bounds.min.y as i32);
                        outlined.draw(|x, y, coverage| plot(left + x as i32, top + y as i32, coverage));
                    }
                }
            }
            FontFace::Bitmap { cell } => {
                let cell = *cell;
                let advance = (GLYPH_COLUMNS + 1) * cell;

                for (i, ch) in text.chars().enumerate() {
                    let Some(rows) = glyph5x7(ch) else {
                        continue;
                    };
                    let left = i as i32 * advance;
                    for (ry, &bits) in rows.iter().enumerate() {
                        for rx in 0..GLYPH_COLUMNS {
                            if (bits >> (GLYPH_COLUMNS - 1 - rx)) & 1 == 0 {
                                continue;
                            }
                            let (x0, y0) = (left + rx * cell, ry as i32 * cell);
                            for dy in 0..cell {
                                for dx in 0..cell {
                                    plot(x0 + dx, y0 + dy, 1.0);
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    /// Bounding box of the inked pixels, `None` when nothing would be drawn.
    pub fn measure(&self, text: &str) -> Option<InkBox> {
        let mut ink: Option<InkBox> = None;
        self.rasterize(text, |x, y, coverage| {
            if coverage > 0.0 {
                ink = Some(match ink {
                    Some(b) => b.include(x, y),
                    None => InkBox::at(x, y),
                });
            }
        });
        ink
    }
}

/// Draw `text` onto a transparent layer with its origin at `origin`. Coverage
/// scales the colour's alpha; overlapping glyph pixels keep the stronger one.
pub fn draw_text(layer: &mut RgbaImage, face: &FontFace, text: &str, origin: (i32, i32), color: Rgba<u8>) {
    let (width, height) = (layer.width() as i32, layer.height() as i32);
    let [r, g, b, a] = color.0;

    face.rasterize(text, |x, y, coverage| {
        let (px, py) = (origin.0 + x, origin.1 + y);
        if px < 0 || py < 0 || px >= width || py >= height {
            return;
        }
        let alpha = (a as f32 * coverage.clamp(0.0, 1.0)).round() as u8;
        let pixel = layer.get_pixel_mut(px as u32, py as u32);
        if alpha > pixel.0[3] {
            *pixel = Rgba([r, g, b, alpha]);
        }
    });
}

/// Pixel scale giving `font` an em of `size` pixels. ab_glyph scales by the
/// ascent-to-descent height, which is usually taller than the em square.
pub fn em_scale(font: &FontVec, size: f32) -> PxScale {
    match font.units_per_em() {
        Some(units) if units > 0.0 => PxScale::from(size * font.height_unscaled() / units),
        _ => PxScale::from(size),
    }
}

fn load_outline(path: &Path) -> Result<FontVec> {
    let data = std::fs::read(path).map_err(|source| Error::FontRead {
        path: path.to_path_buf(),
        source,
    })?;
    FontVec::try_from_vec(data).map_err(|_| Error::FontParse {
        path: path.to_path_buf(),
    })
}

/// Candidate list with an optional user font in front of the defaults.
pub fn font_candidates(preferred: Option<PathBuf>) -> Vec<PathBuf> {
    preferred
        .into_iter()
        .chain(FONT_CANDIDATES.iter().map(PathBuf::from))
        .collect()
}

/// 5x7 digit bitmaps; each u8 is a row, bit 4 is the leftmost pixel.
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    match ch {
        '0' => Some([0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110]),
        '1' => Some([0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110]),
        '2' => Some([0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111]),
        '3' => Some([0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110]),
        '4' => Some([0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010]),
        '5' => Some([0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110]),
        '6' => Some([0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110]),
        '7' => Some([0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000]),
        '8' => Some([0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110]),
        '9' => Some([0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100]),
        _ => None,
    }
}
