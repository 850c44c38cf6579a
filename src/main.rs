mod canvas;
mod color;
mod config;
mod driver;
mod error;
mod generator;
mod pattern;
mod shapes;
mod text;

use clap::Parser;
use config::{Args, BatchConfig};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = BatchConfig::from(Args::parse());
    log::debug!("{config:?}");

    driver::run(&config)?;
    Ok(())
}
