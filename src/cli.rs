use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use kenburns::constants::*;

/// Ken Burns slideshow player.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Directory holding the images (png, jpg, jpeg, bmp, gif)
    pub directory: PathBuf,

    /// How images are handed to the view
    #[arg(long, value_enum, default_value_t = SourceKind::Paths)]
    pub source: SourceKind,

    /// Seconds each image stays current
    #[arg(long, default_value_t = TRANSITION_DURATION)]
    pub duration: f32,

    /// Start over after the last image
    #[arg(long = "loop")]
    pub looping: bool,

    /// Crop for a portrait frame (also swaps the render size)
    #[arg(long)]
    pub portrait: bool,

    /// Seed for the pan/zoom choices, random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = RENDER_WIDTH as u32)]
    pub width: u32,

    #[arg(long, default_value_t = RENDER_HEIGHT as u32)]
    pub height: u32,

    #[arg(long, default_value_t = FPS, value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: u32,

    /// Record to this video file through ffmpeg instead of playing in real time
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    /// Decode every image up front
    Images,
    /// Decode each file when its turn comes
    Paths,
    /// Pull images from a lazy datasource
    Datasource,
}

impl Args {
    /// Render target size, long side first unless `--portrait`.
    pub fn render_size(&self) -> (u32, u32) {
        let long = self.width.max(self.height);
        let short = self.width.min(self.height);
        if self.portrait { (short, long) } else { (long, short) }
    }
}
