use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

pub struct FftEngine {
    fft_size: usize,
    window: Vec<f32>,
    fft: Arc<dyn Fft<f32>>,
    buf: Vec<Complex<f32>>,
    mags: Vec<f32>,
}

impl FftEngine {
    pub fn new(fft_size: usize) -> Self {
        let fft_size = fft_size.max(2);
        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(fft_size);
        Self {
            fft_size,
            window: blackman_window(fft_size),
            fft,
            buf: vec![Complex::new(0.0, 0.0); fft_size],
            mags: vec![0.0; fft_size / 2],
        }
    }

    /// Windowed magnitudes of the first half of the spectrum, scaled by 1/N.
    ///
    /// Short input is zero-padded at the front so the newest samples stay aligned
    /// with the end of the window.
    pub fn magnitudes(&mut self, input: &[f32]) -> &[f32] {
        let pad = self.fft_size.saturating_sub(input.len());
        let skip = input.len().saturating_sub(self.fft_size);
        for i in 0..self.fft_size {
            let x = if i < pad { 0.0 } else { input[skip + i - pad] };
            self.buf[i] = Complex::new(x * self.window[i], 0.0);
        }

        self.fft.process(&mut self.buf);

        let scale = 1.0 / self.fft_size as f32;
        for (m, c) in self.mags.iter_mut().zip(&self.buf) {
            *m = c.norm() * scale;
        }
        &self.mags
    }
}

fn blackman_window(n: usize) -> Vec<f32> {
    use std::f32::consts::TAU;
    let (a0, a1, a2) = (0.42, 0.5, 0.08);
    (0..n)
        .map(|i| {
            let x = i as f32 / n as f32;
            a0 - a1 * (TAU * x).cos() + a2 * (2.0 * TAU * x).cos()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blackman_is_zero_at_the_edge_and_one_in_the_middle() {
        let w = blackman_window(1024);
        assert!(w[0].abs() < 1e-6);
        assert!((w[512] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn sine_peaks_in_its_bin() {
        let n = 1024;
        let bin = 37;
        let input: Vec<f32> = (0..n)
            .map(|i| (std::f32::consts::TAU * bin as f32 * i as f32 / n as f32).sin())
            .collect();
        let mut fft = FftEngine::new(n);
        let mags = fft.magnitudes(&input);
        let peak = mags
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i);
        assert_eq!(peak, Some(bin));
        assert_eq!(mags.len(), n / 2);
    }

    #[test]
    fn short_input_is_padded() {
        let mut fft = FftEngine::new(64);
        assert!(fft.magnitudes(&[]).iter().all(|&m| m == 0.0));
    }
}
