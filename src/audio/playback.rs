use crate::audio::source::SampleFeed;
use crate::audio::tap::SampleTap;
use anyhow::{Context, Result};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Plays one audio file and mirrors what reaches the speakers into a [`SampleTap`].
pub struct FilePlayback {
    _stream: OutputStream,
    _handle: OutputStreamHandle,
    sink: Sink,
    path: PathBuf,
    tap: SampleTap,
}

impl FilePlayback {
    pub fn start(path: &Path) -> Result<Self> {
        let (stream, handle) = OutputStream::try_default().context("no audio output device")?;
        let sink = Sink::try_new(&handle).context("create playback sink")?;

        let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
        let decoder = Decoder::new(BufReader::new(file))
            .with_context(|| format!("decode {}", path.display()))?;
        log::info!(
            "playing {} ({} ch @ {} Hz)",
            path.display(),
            decoder.channels(),
            decoder.sample_rate()
        );

        let tap = SampleTap::new();
        sink.append(TapSource::new(decoder.convert_samples::<f32>(), tap.clone()));
        sink.play();

        Ok(Self {
            _stream: stream,
            _handle: handle,
            sink,
            path: path.to_path_buf(),
            tap,
        })
    }
}

impl SampleFeed for FilePlayback {
    fn tap(&self) -> &SampleTap {
        &self.tap
    }

    fn describe(&self) -> String {
        let name = self
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("file");
        format!("file: {name}")
    }

    fn toggle_pause(&mut self) -> bool {
        if self.sink.is_paused() {
            self.sink.play();
            false
        } else {
            self.sink.pause();
            self.tap.clear();
            true
        }
    }

    fn is_finished(&self) -> bool {
        self.sink.empty()
    }
}

// Samples are handed over in chunks so the audio thread is not locking per sample.
const FLUSH_FRAMES: usize = 256;

struct TapSource<S>
where
    S: Source<Item = f32>,
{
    inner: S,
    tap: SampleTap,
    channels: usize,
    pending: Vec<f32>,
}

impl<S> TapSource<S>
where
    S: Source<Item = f32>,
{
    fn new(inner: S, tap: SampleTap) -> Self {
        let channels = inner.channels().max(1) as usize;
        Self {
            inner,
            tap,
            channels,
            pending: Vec::with_capacity(FLUSH_FRAMES * channels),
        }
    }

    fn flush(&mut self) {
        let whole = self.pending.len() - self.pending.len() % self.channels;
        if whole == 0 {
            return;
        }
        self.tap.push_interleaved(&self.pending[..whole], self.channels, |s| s);
        self.pending.drain(..whole);
    }
}

impl<S> Iterator for TapSource<S>
where
    S: Source<Item = f32>,
{
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let Some(s) = self.inner.next() else {
            self.flush();
            return None;
        };
        self.pending.push(s);
        if self.pending.len() >= FLUSH_FRAMES * self.channels {
            self.flush();
        }
        Some(s)
    }
}

impl<S> Source for TapSource<S>
where
    S: Source<Item = f32>,
{
    fn current_frame_len(&self) -> Option<usize> {
        self.inner.current_frame_len()
    }

    fn channels(&self) -> u16 {
        self.inner.channels()
    }

    fn sample_rate(&self) -> u32 {
        self.inner.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        self.inner.total_duration()
    }
}
