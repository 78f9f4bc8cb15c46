use thiserror::Error;

/// Amplitudes strictly above this count as a "loud" bin.
pub const HIGH_THRESHOLD: f64 = 32.0;

/// Upper end of the byte amplitude scale.
pub const MAX_AMPLITUDE: f64 = 255.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameError {
    #[error("spectrum frame has no samples")]
    Empty,
    #[error("spectrum sample {index} is not finite")]
    NonFinite { index: usize },
}

/// One snapshot of frequency-bin amplitudes, ordered by bin index.
///
/// Samples are expected on the 0..=255 byte scale. Finite values outside that
/// range are kept as-is; the geometry stays well defined for them.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumFrame {
    samples: Vec<f64>,
}

impl SpectrumFrame {
    pub fn new(samples: Vec<f64>) -> Result<Self, FrameError> {
        if samples.is_empty() {
            return Err(FrameError::Empty);
        }
        if let Some(index) = samples.iter().position(|v| !v.is_finite()) {
            return Err(FrameError::NonFinite { index });
        }
        Ok(Self { samples })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FrameError> {
        Self::new(bytes.iter().map(|&b| b as f64).collect())
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn metrics(&self) -> FrameMetrics {
        FrameMetrics::compute(&self.samples)
    }
}

/// A frame plus the sequence number its source stamped on it.
///
/// Two deliveries with the same `seq` carry the same frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedFrame {
    pub seq: u64,
    pub frame: SpectrumFrame,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMetrics {
    pub total: f64,
    pub high_count: usize,
    pub intensity: f64,
}

impl FrameMetrics {
    pub fn compute(samples: &[f64]) -> Self {
        let total = samples.iter().sum::<f64>();
        let high_count = samples.iter().filter(|&&d| d > HIGH_THRESHOLD).count();
        let intensity = if samples.is_empty() {
            0.0
        } else {
            high_count as f64 / samples.len() as f64
        };
        Self { total, high_count, intensity }
    }

    /// Silent (or net non-positive) frames have no angular shares to hand out,
    /// and neither do frames whose sum overflows.
    pub fn is_degenerate(&self) -> bool {
        self.total <= 0.0 || !self.total.is_finite()
    }
}
