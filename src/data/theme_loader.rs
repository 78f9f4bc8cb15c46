use crate::data::assets;
use crate::geometry::colormap::Rgb;
use crate::ui::theme::{detect_color_capability, Theme, ThemeName, ThemePalette};
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub struct ThemeLoader;

#[derive(Debug, Deserialize)]
struct ThemeToml {
    text: String,
    subtext: String,
    base: String,
    accent: String,
    accent2: String,
}

impl ThemeLoader {
    /// Reads the user's copy of the theme, falling back to the embedded one.
    pub fn load(name: &str) -> Result<Theme> {
        let name = ThemeName::from_str_or_system(name);
        let rel = Path::new("themes").join(name.file_name());
        let path = assets::resolve_asset_path(&rel);

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("theme {} unreadable ({e}); using built-in copy", path.display());
                assets::embedded_theme(name.file_name())
                    .ok_or_else(|| anyhow!("no built-in theme {}", name.as_label()))?
                    .to_string()
            }
        };
        Self::parse(name, &raw).with_context(|| format!("theme {}", path.display()))
    }

    pub fn parse(name: ThemeName, raw: &str) -> Result<Theme> {
        let t: ThemeToml = toml::from_str(raw)?;
        Ok(Theme {
            name,
            palette: ThemePalette {
                text: parse_hex(&t.text)?,
                subtext: parse_hex(&t.subtext)?,
                base: parse_hex(&t.base)?,
                accent: parse_hex(&t.accent)?,
                accent2: parse_hex(&t.accent2)?,
            },
            capability: detect_color_capability(),
        })
    }
}

fn parse_hex(s: &str) -> Result<Rgb> {
    let s = s.trim_start_matches('#');
    if s.len() != 6 || !s.is_ascii() {
        return Err(anyhow!("expected #rrggbb, got {s:?}"));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&s[i..i + 2], 16).with_context(|| format!("bad hex color {s:?}"))
    };
    Ok((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_hex("#1e1e2e").unwrap(), (30, 30, 46));
        assert_eq!(parse_hex("FFFFFF").unwrap(), (255, 255, 255));
        assert!(parse_hex("#12345").is_err());
        assert!(parse_hex("#zz0000").is_err());
    }

    #[test]
    fn bundled_themes_parse() {
        for name in [ThemeName::System, ThemeName::Latte, ThemeName::Mocha] {
            let raw = assets::embedded_theme(name.file_name()).unwrap();
            let theme = ThemeLoader::parse(name, raw).unwrap();
            assert_eq!(theme.name, name);
        }
    }
}
