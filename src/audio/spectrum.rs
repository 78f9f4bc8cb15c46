use crate::audio::fft::FftEngine;
use crate::audio::smoother::Ema;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyserSettings {
    pub fft_size: usize,
    pub bins: usize,
    pub min_db: f32,
    pub max_db: f32,
    /// Weight of the previous frame, 0.0 (none) ..= 1.0 (frozen).
    pub smoothing: f32,
}

impl Default for AnalyserSettings {
    fn default() -> Self {
        Self {
            fft_size: 2048,
            bins: 64,
            min_db: -100.0,
            max_db: -30.0,
            smoothing: 0.8,
        }
    }
}

/// Turns raw samples into byte-scaled (0..=255) frequency bins.
///
/// Magnitudes are smoothed over time, converted to decibels, mapped from
/// `[min_db, max_db]` onto the byte range and finally averaged down to
/// `bins` output values.
pub struct ByteSpectrumAnalyser {
    settings: AnalyserSettings,
    fft: FftEngine,
    smooth: Ema,
    bytes: Vec<u8>,
}

impl ByteSpectrumAnalyser {
    pub fn new(settings: AnalyserSettings) -> Self {
        Self {
            settings,
            fft: FftEngine::new(settings.fft_size),
            smooth: Ema::new(1.0 - settings.smoothing),
            bytes: Vec::new(),
        }
    }

    pub fn settings(&self) -> AnalyserSettings {
        self.settings
    }

    pub fn process(&mut self, samples: &[f32]) -> Vec<u8> {
        let mags = self.fft.magnitudes(samples);
        let smoothed = self.smooth.apply(mags);

        let AnalyserSettings { min_db, max_db, .. } = self.settings;
        self.bytes.clear();
        self.bytes
            .extend(smoothed.iter().map(|&m| db_to_byte(to_db(m), min_db, max_db)));
        group_linear(&self.bytes, self.settings.bins)
    }

    pub fn reset(&mut self) {
        self.smooth.reset();
    }
}

fn to_db(mag: f32) -> f32 {
    if mag <= 0.0 {
        f32::NEG_INFINITY
    } else {
        20.0 * mag.log10()
    }
}

fn db_to_byte(db: f32, min_db: f32, max_db: f32) -> u8 {
    let range = (max_db - min_db).max(f32::EPSILON);
    let scaled = 255.0 * (db - min_db) / range;
    if scaled.is_nan() {
        return 0;
    }
    scaled.clamp(0.0, 255.0) as u8
}

/// Averages `data` into `bins` evenly sized groups; the last group takes the remainder.
fn group_linear(data: &[u8], bins: usize) -> Vec<u8> {
    let bins = bins.max(1);
    if data.is_empty() {
        return vec![0; bins];
    }
    if data.len() <= bins {
        let mut out = data.to_vec();
        out.resize(bins, 0);
        return out;
    }

    let width = data.len() / bins;
    (0..bins)
        .map(|i| {
            let start = i * width;
            let end = if i + 1 == bins { data.len() } else { start + width };
            let group = &data[start..end];
            let sum: u32 = group.iter().map(|&v| v as u32).sum();
            (sum / group.len() as u32) as u8
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decibel_range_maps_onto_bytes() {
        assert_eq!(db_to_byte(-100.0, -100.0, -30.0), 0);
        assert_eq!(db_to_byte(-30.0, -100.0, -30.0), 255);
        assert_eq!(db_to_byte(-65.0, -100.0, -30.0), 127);
        assert_eq!(db_to_byte(10.0, -100.0, -30.0), 255);
        assert_eq!(db_to_byte(f32::NEG_INFINITY, -100.0, -30.0), 0);
    }

    #[test]
    fn groups_average_and_pad() {
        assert_eq!(group_linear(&[10, 20, 30, 40, 50], 2), vec![15, 40]);
        assert_eq!(group_linear(&[7, 9], 4), vec![7, 9, 0, 0]);
        assert_eq!(group_linear(&[], 3), vec![0, 0, 0]);
    }

    #[test]
    fn silence_is_all_zero() {
        let mut a = ByteSpectrumAnalyser::new(AnalyserSettings { fft_size: 256, bins: 16, ..Default::default() });
        let out = a.process(&vec![0.0; 256]);
        assert_eq!(out, vec![0; 16]);
    }

    #[test]
    fn loud_tone_lights_up_its_region() {
        let settings = AnalyserSettings { fft_size: 1024, bins: 32, smoothing: 0.0, ..Default::default() };
        let mut a = ByteSpectrumAnalyser::new(settings);
        // Bin 40 of 512 falls into output group 2 (16 bins per group).
        let tone: Vec<f32> = (0..1024)
            .map(|i| (std::f32::consts::TAU * 40.0 * i as f32 / 1024.0).sin())
            .collect();
        let out = a.process(&tone);
        assert_eq!(out.len(), 32);
        assert!(out[2] > out[31]);
        assert!(out[2] > 32);
    }
}
