use crate::app::state::AppState;
use crate::audio::source::FrameSource;
use crate::ui::tui::Tui;
use crate::utils::input::{map_key, Action};
use anyhow::Result;
use crossterm::event::{self, Event};
use std::time::{Duration, Instant};

pub fn run(app: &mut AppState, source: &mut dyn FrameSource) -> Result<()> {
    let mut tui = Tui::new()?;
    tui.enter()?;

    let frame_budget = Duration::from_secs_f64(1.0 / app.config.ui_fps.clamp(1, 240) as f64);

    loop {
        let frame_start = Instant::now();

        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(k) = event::read()? {
                match map_key(k) {
                    Action::Quit => {
                        tui.exit()?;
                        log::info!("quit after {} scene recomputes", app.view.recomputes());
                        return Ok(());
                    }
                    Action::TogglePause => {
                        app.paused = source.toggle_pause();
                        app.set_toast(if app.paused { "Paused" } else { "Resumed" });
                    }
                    Action::NextTheme => {
                        if let Err(e) = app.cycle_theme() {
                            log::warn!("theme switch failed: {e:#}");
                            app.set_toast(format!("Theme error: {e}"));
                        }
                    }
                    Action::None => {}
                }
            }
        }

        // One recompute per new frame; ticks without new audio keep the last scene.
        if let Some(tagged) = source.poll_frame() {
            if app.view.update(&tagged) {
                log::debug!("frame {} -> {} segments", tagged.seq, app.view.scene().segment_count());
                if log::log_enabled!(log::Level::Trace) {
                    if let Some(seg) = app.view.scene().layers.last().and_then(|l| l.segments.first()) {
                        log::trace!("first wedge: {}", seg.svg_path());
                    }
                }
            }
        }

        if !app.finished && source.is_finished() {
            app.finished = true;
            app.view.reset();
            app.set_toast("Playback finished");
        }

        tui.draw(app)?;

        // frame pacing
        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            std::thread::sleep(frame_budget - elapsed);
        }
    }
}
