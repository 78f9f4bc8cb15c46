use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

// keep last ~16384 mono samples
const CAP: usize = 16384;

/// Bounded mono sample buffer shared between an audio callback and the UI thread.
#[derive(Debug, Clone, Default)]
pub struct SampleTap {
    buf: Arc<Mutex<Vec<f32>>>,
    pushed: Arc<AtomicU64>,
}

impl SampleTap {
    pub fn new() -> Self {
        Self {
            buf: Arc::new(Mutex::new(Vec::with_capacity(CAP))),
            pushed: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Appends interleaved samples, averaging each frame of `channels` down to mono.
    pub fn push_interleaved<T, F>(&self, data: &[T], channels: usize, to_f32: F)
    where
        T: Copy,
        F: Fn(T) -> f32,
    {
        if data.is_empty() {
            return;
        }
        let channels = channels.max(1);
        let mut guard = self.lock();
        guard.reserve(data.len() / channels);
        for frame in data.chunks(channels) {
            let sum: f32 = frame.iter().map(|&s| to_f32(s)).sum();
            guard.push(sum / frame.len() as f32);
        }
        if guard.len() > CAP {
            let drop = guard.len() - CAP;
            guard.drain(0..drop);
        }
        self.pushed.fetch_add(data.len() as u64, Ordering::Relaxed);
    }

    pub fn latest_samples(&self, n: usize) -> Vec<f32> {
        let guard = self.lock();
        if guard.len() <= n {
            return guard.clone();
        }
        guard[guard.len() - n..].to_vec()
    }

    /// Monotonic count of raw samples ever pushed; changes whenever new audio arrives.
    pub fn pushed(&self) -> u64 {
        self.pushed.load(Ordering::Relaxed)
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<f32>> {
        // A panicking audio callback must not take the visualizer down with it.
        self.buf.lock().unwrap_or_else(|e| e.into_inner())
    }
}
