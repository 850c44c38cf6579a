use crate::text::font_candidates;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Number of images in a batch.
pub const IMAGE_COUNT: u32 = 30;

/// Point size the image numbers are drawn at.
pub const FONT_SIZE: f32 = 120.0;

#[derive(Parser, Debug)]
#[command(version, about = "Render the numbered placeholder images 1.jpg to 30.jpg")]
pub struct Args {
    /// Look of the generated images
    #[arg(short, long, value_enum, default_value_t = Preset::Complex)]
    pub preset: Preset,

    /// Directory the numbered JPEGs are written into
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Font file tried before the built-in candidates
    #[arg(long)]
    pub font: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Vertical gradient, three fixed circles, single shadow
    Simple,
    /// Diagonal gradient, seeded shapes, waves, patterns and a border
    Complex,
}

impl Preset {
    pub fn jpeg_quality(self) -> u8 {
        match self {
            Preset::Simple => 90,
            Preset::Complex => 95,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub preset: Preset,
    pub out_dir: PathBuf,
    pub total: u32,
    pub font_candidates: Vec<PathBuf>,
}

impl From<Args> for BatchConfig {
    fn from(args: Args) -> Self {
        Self {
            preset: args.preset,
            out_dir: args.out_dir,
            total: IMAGE_COUNT,
            font_candidates: font_candidates(args.font),
        }
    }
}
