use crate::audio::spectrum::AnalyserSettings;
use crate::data::assets;
use crate::geometry::colormap::ColormapName;
use crate::render::layers::Layer;
use crate::ui::theme::Theme;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const ENV_CONFIG: &str = "RADIAL_VISUALIZER_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub colormap: ColormapName,
    pub scale: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: String,
    pub ui_fps: u32,
    pub transparent_background: bool,

    pub bins: usize,
    pub fft_size: usize,
    pub min_db: f32,
    pub max_db: f32,
    pub smoothing: f32,

    /// Drawn in order; the first layer sits underneath.
    pub layers: Vec<LayerSpec>,
}

pub fn default_layers() -> Vec<LayerSpec> {
    vec![
        LayerSpec { colormap: ColormapName::Sinebow, scale: 2.0 },
        LayerSpec { colormap: ColormapName::Inferno, scale: 1.0 },
        LayerSpec { colormap: ColormapName::Sinebow, scale: 0.5 },
    ]
}

impl Default for Config {
    fn default() -> Self {
        let analyser = AnalyserSettings::default();
        Self {
            theme: "mocha".to_string(),
            ui_fps: 60,
            transparent_background: false,
            bins: analyser.bins,
            fft_size: analyser.fft_size,
            min_db: analyser.min_db,
            max_db: analyser.max_db,
            smoothing: analyser.smoothing,
            layers: default_layers(),
        }
    }
}

impl Config {
    /// Explicit path first, then `$RADIAL_VISUALIZER_CONFIG`, then the per-user config dir.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => Self::default_path(),
        };
        if !path.is_file() {
            if explicit.is_some() {
                anyhow::bail!("config not found: {}", path.display());
            }
            log::info!("no config at {}; using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
        let config = Self::parse(&raw).with_context(|| format!("parse {}", path.display()))?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.bins > 0, "bins must be at least 1");
        anyhow::ensure!(self.fft_size >= 32, "fft_size must be at least 32");
        anyhow::ensure!(self.min_db < self.max_db, "min_db must be below max_db");
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.smoothing),
            "smoothing must be within 0..=1"
        );
        anyhow::ensure!(!self.layers.is_empty(), "at least one layer is required");
        Ok(())
    }

    pub fn analyser_settings(&self) -> AnalyserSettings {
        AnalyserSettings {
            fft_size: self.fft_size,
            bins: self.bins,
            min_db: self.min_db,
            max_db: self.max_db,
            smoothing: self.smoothing,
        }
    }

    /// Gradient layers blend the theme's two accent colors.
    pub fn build_layers(&self, theme: &Theme) -> Result<Vec<Layer>> {
        let (from, to) = (theme.palette.accent, theme.palette.accent2);
        self.layers
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                Layer::new(spec.colormap.build(from, to), spec.scale)
                    .with_context(|| format!("layer {i}"))
            })
            .collect()
    }

    fn default_path() -> PathBuf {
        if let Some(p) = std::env::var_os(ENV_CONFIG) {
            return PathBuf::from(p);
        }
        assets::resolve_config_path()
    }
}
