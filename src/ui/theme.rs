use crate::geometry::colormap::Rgb;
use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCapability {
    TrueColor,
    Ansi256,
    NoColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeName {
    System,
    Latte,
    Mocha,
}

impl ThemeName {
    pub fn from_str_or_system(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "latte" => Self::Latte,
            "mocha" => Self::Mocha,
            _ => Self::System,
        }
    }

    pub fn as_label(&self) -> &'static str {
        match self {
            ThemeName::System => "System",
            ThemeName::Latte => "Latte",
            ThemeName::Mocha => "Mocha",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ThemeName::System => "system.toml",
            ThemeName::Latte => "catppuccin_latte.toml",
            ThemeName::Mocha => "catppuccin_mocha.toml",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ThemeName::System => ThemeName::Latte,
            ThemeName::Latte => ThemeName::Mocha,
            ThemeName::Mocha => ThemeName::System,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    pub text: Rgb,
    pub subtext: Rgb,
    pub base: Rgb,
    pub accent: Rgb,
    pub accent2: Rgb,
}

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub name: ThemeName,
    pub palette: ThemePalette,
    pub capability: ColorCapability,
}

impl Theme {
    /// Used when no theme file can be read.
    pub fn fallback() -> Self {
        Self {
            name: ThemeName::System,
            palette: ThemePalette {
                text: (205, 214, 244),
                subtext: (166, 173, 200),
                base: (30, 30, 46),
                accent: (137, 180, 250),
                accent2: (243, 139, 168),
            },
            capability: detect_color_capability(),
        }
    }

    pub fn color_text(&self) -> Color {
        self.map_rgb(self.palette.text)
    }
    pub fn color_subtext(&self) -> Color {
        self.map_rgb(self.palette.subtext)
    }
    pub fn color_base(&self) -> Color {
        self.map_rgb(self.palette.base)
    }

    pub fn map_rgb(&self, rgb: Rgb) -> Color {
        map_color(self.capability, rgb)
    }
}

pub fn detect_color_capability() -> ColorCapability {
    let colorterm = std::env::var("COLORTERM").unwrap_or_default().to_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorCapability::TrueColor;
    }

    let term = std::env::var("TERM").unwrap_or_default().to_lowercase();
    if term.contains("256color") {
        return ColorCapability::Ansi256;
    }

    ColorCapability::NoColor
}

fn map_color(cap: ColorCapability, t: Rgb) -> Color {
    match cap {
        ColorCapability::TrueColor => Color::Rgb(t.0, t.1, t.2),
        ColorCapability::Ansi256 => Color::Indexed(rgb_to_ansi256(t.0, t.1, t.2)),
        ColorCapability::NoColor => Color::Reset,
    }
}

fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    // 6x6x6 color cube, 16..231
    let r6 = (r as u16 * 5 / 255) as u8;
    let g6 = (g as u16 * 5 / 255) as u8;
    let b6 = (b as u16 * 5 / 255) as u8;
    16 + 36 * r6 + 6 * g6 + b6
}
