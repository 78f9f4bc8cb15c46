use crate::audio::spectrum::{AnalyserSettings, ByteSpectrumAnalyser};
use crate::audio::tap::SampleTap;
use crate::geometry::frame::{SpectrumFrame, TaggedFrame};

/// Anything that can hand the visualizer a fresh spectrum frame.
pub trait FrameSource {
    /// Returns a new frame when audio arrived since the last call.
    fn poll_frame(&mut self) -> Option<TaggedFrame>;

    fn describe(&self) -> String;

    /// Returns the new paused state; sources without transport stay live.
    fn toggle_pause(&mut self) -> bool {
        false
    }

    /// True once a finite source has nothing left to play.
    fn is_finished(&self) -> bool {
        false
    }
}

/// Raw mono samples fed by an audio callback.
pub trait SampleFeed {
    fn tap(&self) -> &SampleTap;
    fn describe(&self) -> String;

    fn toggle_pause(&mut self) -> bool {
        false
    }

    fn is_finished(&self) -> bool {
        false
    }
}

/// Runs a [`ByteSpectrumAnalyser`] over whatever a [`SampleFeed`] captured.
pub struct AnalysedSource<F: SampleFeed> {
    feed: F,
    analyser: ByteSpectrumAnalyser,
    last_pushed: u64,
    seq: u64,
}

impl<F: SampleFeed> AnalysedSource<F> {
    pub fn new(feed: F, settings: AnalyserSettings) -> Self {
        Self {
            feed,
            analyser: ByteSpectrumAnalyser::new(settings),
            last_pushed: 0,
            seq: 0,
        }
    }
}

impl<F: SampleFeed> FrameSource for AnalysedSource<F> {
    fn poll_frame(&mut self) -> Option<TaggedFrame> {
        let tap = self.feed.tap();
        let pushed = tap.pushed();
        if pushed == self.last_pushed {
            return None;
        }
        self.last_pushed = pushed;

        let samples = tap.latest_samples(self.analyser.settings().fft_size);
        let bytes = self.analyser.process(&samples);
        match SpectrumFrame::from_bytes(&bytes) {
            Ok(frame) => {
                self.seq += 1;
                Some(TaggedFrame { seq: self.seq, frame })
            }
            Err(e) => {
                log::warn!("dropping spectrum frame: {e}");
                None
            }
        }
    }

    fn describe(&self) -> String {
        self.feed.describe()
    }

    fn toggle_pause(&mut self) -> bool {
        let paused = self.feed.toggle_pause();
        if paused {
            self.analyser.reset();
        }
        paused
    }

    fn is_finished(&self) -> bool {
        self.feed.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeFeed {
        tap: SampleTap,
    }

    impl SampleFeed for FakeFeed {
        fn tap(&self) -> &SampleTap {
            &self.tap
        }

        fn describe(&self) -> String {
            "fake".to_string()
        }
    }

    fn source() -> (SampleTap, AnalysedSource<FakeFeed>) {
        let tap = SampleTap::new();
        let feed = FakeFeed { tap: tap.clone() };
        let settings = AnalyserSettings { fft_size: 256, bins: 16, ..Default::default() };
        (tap, AnalysedSource::new(feed, settings))
    }

    #[test]
    fn no_new_audio_means_no_new_frame() {
        let (tap, mut src) = source();
        assert!(src.poll_frame().is_none());

        tap.push_interleaved(&vec![0.25f32; 256], 1, |s| s);
        let first = src.poll_frame().expect("frame after audio");
        assert_eq!(first.seq, 1);
        assert_eq!(first.frame.len(), 16);
        assert!(src.poll_frame().is_none());

        tap.push_interleaved(&[0.1f32; 32], 1, |s| s);
        assert_eq!(src.poll_frame().map(|t| t.seq), Some(2));
    }

    #[test]
    fn frames_stay_on_the_byte_scale() {
        let (tap, mut src) = source();
        let loud: Vec<f32> = (0..256).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        tap.push_interleaved(&loud, 1, |s| s);
        let frame = src.poll_frame().unwrap().frame;
        assert!(frame.samples().iter().all(|&v| (0.0..=255.0).contains(&v)));
        assert_eq!(src.describe(), "fake");
        assert!(!src.toggle_pause());
    }
}
