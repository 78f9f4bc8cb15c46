pub mod capture;
pub mod fft;
pub mod playback;
pub mod smoother;
pub mod source;
pub mod spectrum;
pub mod tap;

use crate::audio::capture::LiveCapture;
use crate::audio::playback::FilePlayback;
use crate::audio::source::{AnalysedSource, FrameSource};
use crate::audio::spectrum::AnalyserSettings;
use anyhow::Result;
use std::path::Path;

/// Opens file playback when a path is given, live capture otherwise.
pub fn open_source(file: Option<&Path>, settings: AnalyserSettings) -> Result<Box<dyn FrameSource>> {
    match file {
        Some(path) => Ok(Box::new(AnalysedSource::new(FilePlayback::start(path)?, settings))),
        None => Ok(Box::new(AnalysedSource::new(LiveCapture::start()?, settings))),
    }
}
