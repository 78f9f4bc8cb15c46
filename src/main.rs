mod app;
mod audio;
mod cli;
mod data;
mod geometry;
mod render;
mod ui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;

fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();
    let mut config = data::config::Config::load(args.config.as_deref())?;
    args.apply_overrides(&mut config);
    config.validate().context("invalid settings")?;

    let theme = data::theme_loader::ThemeLoader::load(&config.theme).unwrap_or_else(|e| {
        log::warn!("theme {:?} unavailable ({e:#}); using fallback", config.theme);
        ui::theme::Theme::fallback()
    });

    let file = if args.capture { None } else { args.file.as_deref() };
    let mut source = audio::open_source(file, config.analyser_settings())?;
    let mut app = app::state::AppState::new(config, theme, source.describe())?;
    app::event_loop::run(&mut app, source.as_mut())
}
