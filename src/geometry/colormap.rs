use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::sync::Arc;

pub type Rgb = (u8, u8, u8);

/// A pure, total map from a normalized amplitude to a color.
pub type ColorFn = Arc<dyn Fn(f64) -> Rgb + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColormapName {
    Sinebow,
    Inferno,
    /// Linear blend between the theme's two accent colors.
    Gradient,
}

impl ColormapName {
    pub fn build(self, from: Rgb, to: Rgb) -> ColorFn {
        match self {
            ColormapName::Sinebow => Arc::new(sinebow),
            ColormapName::Inferno => Arc::new(inferno),
            ColormapName::Gradient => Arc::new(move |t| mix(from, to, t)),
        }
    }
}

/// Cyclic rainbow built from three phase-shifted squared sines.
pub fn sinebow(t: f64) -> Rgb {
    let t = 0.5 - t.clamp(0.0, 1.0);
    let channel = |phase: f64| {
        let s = (PI * (t + phase)).sin();
        to_byte(s * s)
    };
    (channel(0.0), channel(1.0 / 3.0), channel(2.0 / 3.0))
}

// Evenly spaced stops, black through purple and orange to pale yellow.
const INFERNO_STOPS: [Rgb; 11] = [
    (0, 0, 4),
    (22, 11, 57),
    (66, 10, 104),
    (106, 23, 110),
    (147, 38, 103),
    (188, 55, 84),
    (221, 81, 58),
    (243, 120, 25),
    (252, 165, 10),
    (246, 215, 70),
    (252, 255, 164),
];

pub fn inferno(t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let last = INFERNO_STOPS.len() - 1;
    let pos = t * last as f64;
    let i = (pos.floor() as usize).min(last - 1);
    mix(INFERNO_STOPS[i], INFERNO_STOPS[i + 1], pos - i as f64)
}

pub fn mix(a: Rgb, b: Rgb, t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let lerp = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
    (lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

fn to_byte(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
