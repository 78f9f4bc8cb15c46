use crate::geometry::colormap::Rgb;
use crate::geometry::frame::{FrameMetrics, SpectrumFrame, MAX_AMPLITUDE};
use std::f64::consts::PI;
use std::fmt::Write as _;

/// Radius the bands are centered on.
pub const BASE_RADIUS: f64 = 50.0;
/// Half band width at full amplitude.
pub const RADIUS_SPREAD: f64 = 35.0;
/// Keeps silent bins visible as a thin ring.
pub const AMPLITUDE_FLOOR: f64 = 10.0;

/// One wedge of the radial graph.
///
/// Angles are radians measured clockwise from 12 o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub color: Rgb,
}

impl ArcSegment {
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// SVG path of the annular sector in a y-down coordinate system.
    pub fn svg_path(&self) -> String {
        let (r0, r1) = (self.inner_radius.max(0.0), self.outer_radius.max(0.0));
        let (a0, a1) = (self.start_angle, self.end_angle);
        let mut d = String::new();

        if self.span() >= 2.0 * PI - 1e-12 {
            // A single elliptical arc cannot close a circle; split each ring in two.
            let mid = a0 + PI;
            let (x, y) = polar(r1, a0);
            let _ = write!(d, "M{},{}", fmt(x), fmt(y));
            arc_to(&mut d, r1, mid, true);
            arc_to(&mut d, r1, a0, true);
            if r0 > 0.0 {
                let (x, y) = polar(r0, a0);
                let _ = write!(d, "M{},{}", fmt(x), fmt(y));
                arc_to(&mut d, r0, mid, false);
                arc_to(&mut d, r0, a0, false);
            }
            d.push('Z');
            return d;
        }

        let large = self.span().abs() > PI;
        let (x, y) = polar(r1, a0);
        let _ = write!(d, "M{},{}", fmt(x), fmt(y));
        arc_to_flags(&mut d, r1, a1, large, true);
        if r0 > 0.0 {
            let (x, y) = polar(r0, a1);
            let _ = write!(d, "L{},{}", fmt(x), fmt(y));
            arc_to_flags(&mut d, r0, a0, large, false);
        } else {
            d.push_str("L0,0");
        }
        d.push('Z');
        d
    }
}

/// Point on a circle for an angle measured clockwise from 12 o'clock.
pub fn polar(radius: f64, angle: f64) -> (f64, f64) {
    (radius * angle.sin(), -radius * angle.cos())
}

fn arc_to(d: &mut String, r: f64, to: f64, clockwise: bool) {
    arc_to_flags(d, r, to, false, clockwise);
}

fn arc_to_flags(d: &mut String, r: f64, to: f64, large: bool, clockwise: bool) {
    let (x, y) = polar(r, to);
    let _ = write!(
        d,
        "A{},{},0,{},{},{},{}",
        fmt(r),
        fmt(r),
        large as u8,
        clockwise as u8,
        fmt(x),
        fmt(y)
    );
}

fn fmt(v: f64) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    // Avoid printing "-0".
    if rounded == 0.0 {
        "0".to_string()
    } else {
        rounded.to_string()
    }
}

/// Segments for one frame plus the intensity that drove the sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcGeometry {
    pub segments: Vec<ArcSegment>,
    pub intensity: f64,
}

/// Angular range the whole frame is spread over: half a turn when quiet,
/// a full turn when every bin is loud.
pub fn total_sweep(intensity: f64) -> f64 {
    (1.0 + intensity) * PI
}

pub fn band_radii(amplitude: f64) -> (f64, f64) {
    let reach = (amplitude + AMPLITUDE_FLOOR) / MAX_AMPLITUDE * RADIUS_SPREAD;
    (BASE_RADIUS - reach, BASE_RADIUS + reach)
}

/// Turns one spectrum frame into contiguous colored wedges.
///
/// Each bin gets a share of the sweep proportional to its share of the
/// frame's total energy, so louder bins get wider wedges. A frame whose total
/// is not positive, or overflows to infinity, yields no segments; its
/// intensity is still reported.
pub fn build(frame: &SpectrumFrame, color: &dyn Fn(f64) -> Rgb) -> ArcGeometry {
    let metrics = frame.metrics();
    let FrameMetrics { total, intensity, .. } = metrics;
    if metrics.is_degenerate() {
        return ArcGeometry { segments: Vec::new(), intensity };
    }

    let sweep = total_sweep(intensity);
    let mut current = -sweep / 2.0;
    let mut segments = Vec::with_capacity(frame.len());

    for &d in frame.samples() {
        let angle = sweep * (d / total);
        let (inner_radius, outer_radius) = band_radii(d);
        segments.push(ArcSegment {
            inner_radius,
            outer_radius,
            start_angle: current,
            end_angle: current + angle,
            color: color(d / MAX_AMPLITUDE),
        });
        current += angle;
    }

    ArcGeometry { segments, intensity }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::colormap::{inferno, sinebow};
    use approx::assert_relative_eq;

    fn frame(v: &[f64]) -> SpectrumFrame {
        SpectrumFrame::new(v.to_vec()).unwrap()
    }

    fn total_span(geo: &ArcGeometry) -> f64 {
        geo.segments.iter().map(ArcSegment::span).sum()
    }

    fn band_width(seg: &ArcSegment) -> f64 {
        seg.outer_radius - seg.inner_radius
    }

    fn grey(t: f64) -> Rgb {
        let v = (t.clamp(0.0, 1.0) * 255.0) as u8;
        (v, v, v)
    }

    #[test]
    fn spans_add_up_to_the_sweep() {
        let frames = [
            vec![1.0, 2.0, 3.0],
            vec![255.0; 16],
            vec![10.0, 40.0, 200.0, 0.0, 33.0, 32.0, 7.5],
            (0..64).map(|i| (i * 4) as f64).collect::<Vec<_>>(),
        ];
        for f in frames {
            let geo = build(&frame(&f), &sinebow);
            let expected = (1.0 + geo.intensity) * PI;
            assert_relative_eq!(total_span(&geo), expected, max_relative = 1e-9);
            assert_eq!(geo.segments.len(), f.len());
        }
    }

    #[test]
    fn segments_are_contiguous_and_centered() {
        let geo = build(&frame(&[12.0, 90.0, 3.0, 250.0, 0.0, 64.0]), &inferno);
        let sweep = total_sweep(geo.intensity);
        assert_eq!(geo.segments[0].start_angle, -sweep / 2.0);
        for pair in geo.segments.windows(2) {
            assert_eq!(pair[1].start_angle, pair[0].end_angle);
        }
        let last = geo.segments.last().unwrap();
        assert_relative_eq!(last.end_angle, sweep / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn intensity_counts_loud_bins() {
        let geo = build(&frame(&[33.0, 32.0, 100.0, 0.0, 0.0]), &grey);
        assert_eq!(geo.intensity, 2.0 / 5.0);

        let again = build(&frame(&[33.0, 32.0, 100.0, 0.0, 0.0]), &grey);
        assert_eq!(geo, again);
    }

    #[test]
    fn silent_frame_yields_no_segments() {
        let geo = build(&frame(&[0.0, 0.0, 0.0, 0.0]), &grey);
        assert!(geo.segments.is_empty());
        assert_eq!(geo.intensity, 0.0);
    }

    #[test]
    fn overflowing_total_yields_no_segments() {
        let geo = build(&frame(&[1e308, 1e308]), &grey);
        assert!(geo.segments.is_empty());
        assert_eq!(geo.intensity, 1.0);
    }

    #[test]
    fn single_loud_bin_takes_the_whole_sweep() {
        let geo = build(&frame(&[255.0, 0.0, 0.0, 0.0]), &grey);
        assert_eq!(geo.intensity, 0.25);

        let first = geo.segments[0];
        assert_relative_eq!(first.span(), 1.25 * PI, epsilon = 1e-12);
        assert_relative_eq!(first.start_angle, -0.625 * PI, epsilon = 1e-12);
        assert!((first.inner_radius - 13.6).abs() < 0.1);
        assert!((first.outer_radius - 86.4).abs() < 0.1);
        assert_eq!(first.color, (255, 255, 255));

        for seg in &geo.segments[1..] {
            assert_eq!(seg.span(), 0.0);
            assert_relative_eq!(seg.inner_radius, 50.0 - 10.0 / 255.0 * 35.0);
            assert_eq!(seg.color, (0, 0, 0));
        }
    }

    #[test]
    fn louder_bin_never_shrinks() {
        let quiet = [100.0, 40.0, 60.0, 20.0];
        let mut loud = quiet;
        loud[1] = 120.0;

        let a = build(&frame(&quiet), &grey);
        let b = build(&frame(&loud), &grey);

        assert!(band_width(&b.segments[1]) >= band_width(&a.segments[1]));
        assert!(b.segments[1].span() >= a.segments[1].span());
    }

    #[test]
    fn radii_are_symmetric_around_base() {
        for d in [0.0, 17.0, 128.0, 255.0] {
            let (inner, outer) = band_radii(d);
            assert_relative_eq!((inner + outer) / 2.0, BASE_RADIUS, epsilon = 1e-12);
        }
        let (inner, outer) = band_radii(0.0);
        assert!((outer - inner - 2.0 * 1.37).abs() < 0.01);
    }

    #[test]
    fn svg_path_traces_an_annular_sector() {
        let seg = ArcSegment {
            inner_radius: 40.0,
            outer_radius: 60.0,
            start_angle: 0.0,
            end_angle: PI / 2.0,
            color: (0, 0, 0),
        };
        assert_eq!(seg.svg_path(), "M0,-60A60,60,0,0,1,60,0L40,0A40,40,0,0,0,0,-40Z");
    }

    #[test]
    fn svg_path_handles_full_ring() {
        let seg = ArcSegment {
            inner_radius: 10.0,
            outer_radius: 20.0,
            start_angle: -PI,
            end_angle: PI,
            color: (0, 0, 0),
        };
        let d = seg.svg_path();
        assert_eq!(d.matches('A').count(), 4);
        assert!(d.ends_with('Z'));
    }
}
