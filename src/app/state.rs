use crate::data::config::Config;
use crate::data::theme_loader::ThemeLoader;
use crate::render::layers::LayeredRenderer;
use crate::render::view::RadialView;
use crate::ui::theme::Theme;
use anyhow::Result;
use std::time::{Duration, Instant};

pub struct AppState {
    pub config: Config,
    pub theme: Theme,
    pub view: RadialView,

    pub source_label: String,
    pub paused: bool,
    pub finished: bool,

    pub toast: Option<(String, Instant)>,
}

impl AppState {
    pub fn new(config: Config, theme: Theme, source_label: String) -> Result<Self> {
        let view = RadialView::new(LayeredRenderer::new(config.build_layers(&theme)?));
        Ok(Self {
            config,
            theme,
            view,
            source_label,
            paused: false,
            finished: false,
            toast: None,
        })
    }

    /// Swaps the theme; gradient layers depend on it so the layer list is rebuilt.
    pub fn cycle_theme(&mut self) -> Result<()> {
        let next = self.theme.name.next();
        let theme = ThemeLoader::load(next.as_label())?;
        self.apply_theme(theme)?;
        self.set_toast(format!("Theme: {}", next.as_label()));
        Ok(())
    }

    pub fn apply_theme(&mut self, theme: Theme) -> Result<()> {
        let layers = self.config.build_layers(&theme)?;
        self.theme = theme;
        self.view.set_renderer(LayeredRenderer::new(layers));
        Ok(())
    }

    pub fn set_toast(&mut self, msg: impl Into<String>) {
        self.toast = Some((msg.into(), Instant::now()));
    }

    pub fn active_toast(&self) -> Option<&str> {
        let (msg, at) = self.toast.as_ref()?;
        (at.elapsed() < Duration::from_secs(2)).then_some(msg.as_str())
    }

    pub fn status_line(&self) -> String {
        let state = if self.finished {
            "finished"
        } else if self.paused {
            "paused"
        } else {
            "live"
        };
        let intensity = self
            .view
            .scene()
            .layers
            .first()
            .map(|l| l.intensity)
            .unwrap_or(0.0);
        format!(
            "{} | {} | intensity {:>3.0}% | {} layers",
            self.source_label,
            state,
            intensity * 100.0,
            self.view.scene().layers.len()
        )
    }
}
