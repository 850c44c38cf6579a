use crate::config::{BatchConfig, FONT_SIZE};
use crate::error::{Error, Result};
use crate::generator::{generate_image, random_stream};
use crate::text::FontFace;
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Render and write every image of the batch in index order, returning the
/// written paths. The first failure stops the batch: earlier files stay and
/// later indices are never rendered.
pub fn run(config: &BatchConfig) -> Result<Vec<PathBuf>> {
    println!("Generating {} images...", config.total);
    let started = Instant::now();

    let face = FontFace::resolve(config.font_candidates.as_slice(), FONT_SIZE);

    let mut written = Vec::with_capacity(config.total as usize);
    for index in 1..=config.total {
        written.push(render_and_save(config, &face, index)?);
    }

    println!(
        "\nDone! Generated {} images (1.jpg through {}.jpg)",
        written.len(),
        config.total
    );
    info!("batch finished in {:.2?}", started.elapsed());
    Ok(written)
}

fn render_and_save(config: &BatchConfig, face: &FontFace, index: u32) -> Result<PathBuf> {
    let mut rng = random_stream(index);
    let image = generate_image(config.preset, index, config.total, face, &mut rng);

    let filename = format!("{index}.jpg");
    let path = config.out_dir.join(&filename);
    save_jpeg(&path, &image, config.preset.jpeg_quality())?;

    println!("Generated {filename}");
    Ok(path)
}

/// Encode `image` as a baseline JPEG at `quality` (1-100).
pub fn save_jpeg(path: &Path, image: &RgbImage, quality: u8) -> Result<()> {
    let io_error = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    JpegEncoder::new_with_quality(&mut writer, quality)
        .encode_image(image)
        .map_err(|source| Error::Encode {
            path: path.to_path_buf(),
            source,
        })?;
    writer.flush().map_err(io_error)?;

    debug!("wrote {} at quality {quality}", path.display());
    Ok(())
}
