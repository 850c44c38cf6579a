use image::{RgbImage, RgbaImage};
use rayon::prelude::*;

/// Opaque drawing surface that takes translucent shapes through overlays.
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }

    /// Hands `paint` a transparent layer the size of the canvas, then blends
    /// whatever it drew over the canvas.
    pub fn composite<F>(&mut self, paint: F)
    where
        F: FnOnce(&mut RgbaImage),
    {
        let mut layer = RgbaImage::new(self.image.width(), self.image.height());
        paint(&mut layer);
        blend_layer(&mut self.image, &layer);
    }

    /// Direct access for opaque drawing.
    pub fn image_mut(&mut self) -> &mut RgbImage {
        &mut self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }
}

/// Source-over blend of `layer` onto `base`. Both must share dimensions.
pub fn blend_layer(base: &mut RgbImage, layer: &RgbaImage) {
    debug_assert_eq!(base.dimensions(), layer.dimensions());

    base.par_chunks_exact_mut(3)
        .zip(layer.par_chunks_exact(4))
        .for_each(|(dst, src)| {
            let alpha = src[3];
            if alpha == 0 {
                return;
            }
            let a = alpha as f32 / 255.0;
            for c in 0..3 {
                dst[c] = (src[c] as f32 * a + dst[c] as f32 * (1.0 - a)).round() as u8;
            }
        });
}
