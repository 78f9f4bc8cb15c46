use crate::data::config::Config;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "radial-visualizer")]
#[command(about = "Audio-reactive radial spectrum visualizer for the terminal", long_about = None)]
pub struct Args {
    /// Audio file to play and visualize; omit to capture live input
    #[arg(value_name = "FILE", conflicts_with = "capture")]
    pub file: Option<PathBuf>,

    /// Visualize the best available input/loopback device (the default when no FILE is given)
    #[arg(long)]
    pub capture: bool,

    /// Config file (defaults to $RADIAL_VISUALIZER_CONFIG or the per-user config)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Number of spectrum bins per frame
    #[arg(long, value_name = "N")]
    pub bins: Option<usize>,

    /// Redraw rate
    #[arg(long, value_name = "FPS")]
    pub fps: Option<u32>,

    /// Theme name: system, latte, mocha
    #[arg(long)]
    pub theme: Option<String>,
}

impl Args {
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(bins) = self.bins {
            config.bins = bins;
        }
        if let Some(fps) = self.fps {
            config.ui_fps = fps;
        }
        if let Some(theme) = &self.theme {
            config.theme = theme.clone();
        }
    }
}
