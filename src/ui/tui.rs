use crate::app::state::AppState;
use crate::render::radial_canvas;
use anyhow::Result;
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Terminal;
use std::io::{self, Stdout};

pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    entered: bool,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal, entered: false })
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        self.terminal.hide_cursor()?;
        self.entered = true;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        terminal::disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    pub fn draw(&mut self, app: &AppState) -> Result<()> {
        self.terminal.draw(|f| {
            let size = f.size();
            f.render_widget(Clear, size);

            let mut base_style = Style::default().fg(app.theme.color_text());
            if !app.config.transparent_background {
                base_style = base_style.bg(app.theme.color_base());
            }
            f.render_widget(Block::default().style(base_style), size);

            if size.width < 10 || size.height < 5 {
                f.render_widget(
                    Paragraph::new("Terminal too small").style(Style::default().fg(app.theme.color_subtext())),
                    size,
                );
                return;
            }

            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(size);

            radial_canvas::render(f, rows[0], app);

            let footer = match app.active_toast() {
                Some(msg) => msg.to_string(),
                None => format!("{}  [space] pause  [t] theme  [q] quit", app.status_line()),
            };
            f.render_widget(
                Paragraph::new(footer)
                    .style(Style::default().fg(app.theme.color_subtext()))
                    .alignment(Alignment::Center),
                rows[1],
            );
        })?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        // Leave the terminal usable even when the loop bailed out with an error.
        let _ = self.exit();
    }
}
