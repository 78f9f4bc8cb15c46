use anyhow::{Context, Result};
use directories::BaseDirs;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "radial-visualizer";

pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../config/default.toml");

pub const THEME_SYSTEM_TOML: &str = include_str!("../../themes/system.toml");
pub const THEME_LATTE_TOML: &str = include_str!("../../themes/catppuccin_latte.toml");
pub const THEME_MOCHA_TOML: &str = include_str!("../../themes/catppuccin_mocha.toml");

/// Per-user asset root, seeded with the embedded defaults on first use.
///
/// Linux: $XDG_CONFIG_HOME/radial-visualizer, macOS: ~/Library/Application Support/radial-visualizer,
/// Windows: %APPDATA%\radial-visualizer. Falls back to ./.config when no home is known.
pub fn resolve_asset_root() -> PathBuf {
    let root = BaseDirs::new()
        .map(|d| d.config_dir().join(APP_DIR))
        .unwrap_or_else(local_config_root);
    if let Err(e) = ensure_all_assets(&root) {
        log::warn!("could not seed assets in {}: {e:#}", root.display());
    }
    root
}

pub fn resolve_asset_path(rel: &Path) -> PathBuf {
    resolve_asset_root().join(rel)
}

pub fn resolve_config_path() -> PathBuf {
    resolve_asset_path(Path::new("config/default.toml"))
}

/// Embedded copy of a theme file, keyed by its file name under `themes/`.
pub fn embedded_theme(file_name: &str) -> Option<&'static str> {
    match file_name {
        "system.toml" => Some(THEME_SYSTEM_TOML),
        "catppuccin_latte.toml" => Some(THEME_LATTE_TOML),
        "catppuccin_mocha.toml" => Some(THEME_MOCHA_TOML),
        _ => None,
    }
}

fn local_config_root() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".config")
}

fn ensure_all_assets(root: &Path) -> Result<()> {
    // Create:
    //   <root>/config/default.toml
    //   <root>/themes/*.toml
    write_if_missing(&root.join("config/default.toml"), DEFAULT_CONFIG_TOML)?;
    for name in ["system.toml", "catppuccin_latte.toml", "catppuccin_mocha.toml"] {
        if let Some(contents) = embedded_theme(name) {
            write_if_missing(&root.join("themes").join(name), contents)?;
        }
    }
    Ok(())
}

fn write_if_missing(path: &Path, contents: &str) -> Result<()> {
    if path.is_file() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("mkdir {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_missing_files_without_clobbering() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join(APP_DIR);

        ensure_all_assets(&root).unwrap();
        let cfg = root.join("config/default.toml");
        assert_eq!(fs::read_to_string(&cfg).unwrap(), DEFAULT_CONFIG_TOML);
        assert!(root.join("themes/catppuccin_mocha.toml").is_file());

        fs::write(&cfg, "ui_fps = 12\n").unwrap();
        ensure_all_assets(&root).unwrap();
        assert_eq!(fs::read_to_string(&cfg).unwrap(), "ui_fps = 12\n");
    }

    #[test]
    fn knows_every_bundled_theme() {
        assert!(embedded_theme("catppuccin_latte.toml").is_some());
        assert!(embedded_theme("nope.toml").is_none());
    }
}
