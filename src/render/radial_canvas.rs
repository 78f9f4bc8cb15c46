use crate::app::state::AppState;
use crate::geometry::arc::ArcSegment;
use crate::geometry::colormap::Rgb;
use crate::render::layers::Scene;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Logical half extent of the view box, centered on the origin.
pub const VIEW_HALF_EXTENT: f64 = 100.0;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let w_cells = area.width as usize;
    let h_cells = area.height as usize;
    if w_cells == 0 || h_cells == 0 {
        return;
    }

    let raster = BrailleRaster::from_scene(app.view.scene(), w_cells, h_cells);

    let mut lines: Vec<Line> = Vec::with_capacity(h_cells);
    for row in 0..h_cells {
        let mut spans: Vec<Span> = Vec::new();
        let mut run = String::new();
        let mut run_color: Option<Rgb> = None;

        for col in 0..w_cells {
            let (ch, color) = raster.cell(col, row);
            if color != run_color && !run.is_empty() {
                spans.push(styled(std::mem::take(&mut run), run_color, app));
            }
            run_color = color;
            run.push(ch);
        }
        if !run.is_empty() {
            spans.push(styled(run, run_color, app));
        }
        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn styled(s: String, color: Option<Rgb>, app: &AppState) -> Span<'static> {
    match color {
        Some(rgb) => Span::styled(s, Style::default().fg(app.theme.map_rgb(rgb))),
        None => Span::raw(s),
    }
}

/// Braille dot grid: 2x4 dots per terminal cell, one color per cell.
#[derive(Debug, Clone)]
pub struct BrailleRaster {
    w_cells: usize,
    h_cells: usize,
    bits: Vec<u8>,
    colors: Vec<Option<Rgb>>,
}

impl BrailleRaster {
    pub fn new(w_cells: usize, h_cells: usize) -> Self {
        Self {
            w_cells,
            h_cells,
            bits: vec![0; w_cells * h_cells],
            colors: vec![None; w_cells * h_cells],
        }
    }

    /// Paints layers bottom-up; a later layer owns the color of any cell it touches.
    pub fn from_scene(scene: &Scene, w_cells: usize, h_cells: usize) -> Self {
        let mut raster = Self::new(w_cells, h_cells);
        let w_px = w_cells * 2;
        let h_px = h_cells * 4;
        if w_px == 0 || h_px == 0 {
            return raster;
        }

        // Fit the square view box into the dot grid, centered.
        let units_per_px = 2.0 * VIEW_HALF_EXTENT / w_px.min(h_px) as f64;
        let cx = w_px as f64 / 2.0;
        let cy = h_px as f64 / 2.0;

        for layer in &scene.layers {
            if layer.segments.is_empty() || layer.scale_factor <= 0.0 {
                continue;
            }
            let reach = layer
                .segments
                .iter()
                .map(|s| s.outer_radius)
                .fold(0.0_f64, f64::max)
                * layer.scale_factor;
            // Nothing past the grid edge is drawn, so the reach never needs to exceed it.
            let reach_px = (reach / units_per_px).min(w_px.max(h_px) as f64).ceil() as i64 + 1;
            let x0 = (cx as i64 - reach_px).max(0);
            let x1 = (cx as i64 + reach_px).min(w_px as i64 - 1);
            let y0 = (cy as i64 - reach_px).max(0);
            let y1 = (cy as i64 + reach_px).min(h_px as i64 - 1);

            for py in y0..=y1 {
                for px in x0..=x1 {
                    // Sample the dot center, undo the group zoom.
                    let x = (px as f64 + 0.5 - cx) * units_per_px / layer.scale_factor;
                    let y = (py as f64 + 0.5 - cy) * units_per_px / layer.scale_factor;
                    if let Some(seg) = segment_at(&layer.segments, x, y) {
                        raster.set_pixel(px as usize, py as usize, seg.color);
                    }
                }
            }
        }
        raster
    }

    pub fn cell(&self, col: usize, row: usize) -> (char, Option<Rgb>) {
        let idx = row * self.w_cells + col;
        match self.bits.get(idx) {
            Some(&bits) => (braille_from_bits(bits), self.colors[idx]),
            None => (' ', None),
        }
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb) {
        let cell_x = x / 2;
        let cell_y = y / 4;
        if cell_x >= self.w_cells || cell_y >= self.h_cells {
            return;
        }
        let idx = cell_y * self.w_cells + cell_x;
        self.bits[idx] |= braille_bit(x % 2, y % 4);
        self.colors[idx] = Some(color);
    }
}

/// Finds the wedge covering a point given in y-down view coordinates.
pub fn segment_at(segments: &[ArcSegment], x: f64, y: f64) -> Option<&ArcSegment> {
    let r = x.hypot(y);
    // Clockwise from 12 o'clock.
    let angle = x.atan2(-y);
    let idx = segments.partition_point(|s| s.end_angle <= angle);
    let seg = segments.get(idx)?;
    if seg.start_angle <= angle && r >= seg.inner_radius && r <= seg.outer_radius {
        Some(seg)
    } else {
        None
    }
}

fn braille_bit(dx: usize, dy: usize) -> u8 {
    match (dx, dy) {
        (0, 0) => 0x01,
        (0, 1) => 0x02,
        (0, 2) => 0x04,
        (0, 3) => 0x40,
        (1, 0) => 0x08,
        (1, 1) => 0x10,
        (1, 2) => 0x20,
        (1, 3) => 0x80,
        _ => 0,
    }
}

fn braille_from_bits(bits: u8) -> char {
    char::from_u32(0x2800 + bits as u32).unwrap_or(' ')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::colormap::sinebow;
    use crate::geometry::frame::SpectrumFrame;
    use crate::render::layers::{Layer, LayerDrawing, LayeredRenderer};
    use std::sync::Arc;
    use std::f64::consts::PI;

    fn lit_dots(raster: &BrailleRaster) -> u32 {
        raster.bits.iter().map(|b| b.count_ones()).sum()
    }

    fn wedge(start: f64, end: f64, color: Rgb) -> ArcSegment {
        ArcSegment {
            inner_radius: 40.0,
            outer_radius: 60.0,
            start_angle: start,
            end_angle: end,
            color,
        }
    }

    #[test]
    fn finds_segment_by_angle_and_radius() {
        let segs = [wedge(-PI / 2.0, 0.0, (1, 0, 0)), wedge(0.0, PI / 2.0, (2, 0, 0))];
        // Up-right quadrant is clockwise from 12 o'clock.
        assert_eq!(segment_at(&segs, 35.0, -35.0).map(|s| s.color), Some((2, 0, 0)));
        assert_eq!(segment_at(&segs, -35.0, -35.0).map(|s| s.color), Some((1, 0, 0)));
        // Too close to the center, and below the sweep.
        assert!(segment_at(&segs, 5.0, -5.0).is_none());
        assert!(segment_at(&segs, 0.0, 50.0).is_none());
    }

    #[test]
    fn empty_scene_paints_nothing() {
        let raster = BrailleRaster::from_scene(&Scene::default(), 20, 10);
        assert_eq!(lit_dots(&raster), 0);
        assert_eq!(raster.cell(0, 0), ('\u{2800}', None));
    }

    #[test]
    fn zoom_pushes_the_ring_outward() {
        let layer = |scale_factor| Scene {
            layers: vec![LayerDrawing {
                scale_factor,
                intensity: 0.0,
                segments: vec![wedge(-PI, PI, (9, 9, 9))],
            }],
        };
        let plain = BrailleRaster::from_scene(&layer(1.0), 40, 20);
        let zoomed = BrailleRaster::from_scene(&layer(1.5), 40, 20);
        assert!(lit_dots(&plain) > 0);
        assert!(lit_dots(&zoomed) > lit_dots(&plain));
    }

    #[test]
    fn huge_zoom_stays_within_the_grid() {
        let renderer = LayeredRenderer::new(vec![Layer::new(Arc::new(sinebow), 1e18).unwrap()]);
        let scene = renderer.render(&SpectrumFrame::from_bytes(&[255, 255, 255, 255]).unwrap());
        assert_eq!(scene.layers[0].scale_factor, 1e18 + 1.0);

        let raster = BrailleRaster::from_scene(&scene, 40, 20);
        // The ring is magnified far past the view, so the grid shows its empty center.
        assert_eq!(lit_dots(&raster), 0);
        assert_eq!(raster.cell(39, 19), ('\u{2800}', None));
    }

    #[test]
    fn top_layer_owns_shared_cells() {
        let scene = Scene {
            layers: vec![
                LayerDrawing { scale_factor: 1.0, intensity: 0.0, segments: vec![wedge(-PI, PI, (1, 1, 1))] },
                LayerDrawing { scale_factor: 1.0, intensity: 0.0, segments: vec![wedge(-PI, PI, (2, 2, 2))] },
            ],
        };
        let raster = BrailleRaster::from_scene(&scene, 40, 20);
        for row in 0..20 {
            for col in 0..40 {
                let (_, color) = raster.cell(col, row);
                assert_ne!(color, Some((1, 1, 1)));
            }
        }
    }
}
