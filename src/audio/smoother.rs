/// Per-bin exponential moving average.
#[derive(Debug, Clone)]
pub struct Ema {
    alpha: f32,
    state: Vec<f32>,
}

impl Ema {
    /// `alpha` is the weight of the newest input; 1.0 disables smoothing.
    pub fn new(alpha: f32) -> Self {
        Self { alpha: alpha.clamp(0.0, 1.0), state: Vec::new() }
    }

    pub fn apply(&mut self, input: &[f32]) -> &[f32] {
        if self.state.len() != input.len() {
            self.state = vec![0.0; input.len()];
        }
        for (s, &x) in self.state.iter_mut().zip(input) {
            *s = self.alpha * x + (1.0 - self.alpha) * *s;
        }
        &self.state
    }

    pub fn reset(&mut self) {
        self.state.iter_mut().for_each(|s| *s = 0.0);
    }
}
