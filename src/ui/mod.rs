pub mod theme;
pub mod tui;
