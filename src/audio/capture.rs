use crate::audio::source::SampleFeed;
use crate::audio::tap::SampleTap;
use anyhow::{anyhow, Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

/// Live input capture; prefers loopback/monitor devices so system playback is visualized.
pub struct LiveCapture {
    tap: SampleTap,
    device_name: String,
    paused: bool,
    stream: cpal::Stream,
}

impl LiveCapture {
    pub fn start() -> Result<Self> {
        let device = pick_best_input_device_any_host()
            .or_else(|| cpal::default_host().default_input_device())
            .ok_or_else(|| anyhow!("no audio input device"))?;
        let device_name = device.name().unwrap_or_else(|_| "unknown".to_string());
        log::info!("cpal input device: {device_name}");

        let config = device
            .default_input_config()
            .context("query default input config")?;
        let channels = config.channels() as usize;
        let tap = SampleTap::new();

        let err_fn = |err| {
            log::warn!("cpal stream error: {err}");
        };

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => {
                let tap = tap.clone();
                device.build_input_stream(
                    &config.into(),
                    move |data: &[f32], _| tap.push_interleaved(data, channels, |s| s),
                    err_fn,
                    None,
                )?
            }
            cpal::SampleFormat::I16 => {
                let tap = tap.clone();
                device.build_input_stream(
                    &config.into(),
                    move |data: &[i16], _| {
                        tap.push_interleaved(data, channels, |s| s as f32 / i16::MAX as f32)
                    },
                    err_fn,
                    None,
                )?
            }
            cpal::SampleFormat::U16 => {
                let tap = tap.clone();
                device.build_input_stream(
                    &config.into(),
                    move |data: &[u16], _| {
                        tap.push_interleaved(data, channels, |s| (s as f32 / u16::MAX as f32) * 2.0 - 1.0)
                    },
                    err_fn,
                    None,
                )?
            }
            other => return Err(anyhow!("unsupported input sample format {other:?}")),
        };

        stream.play().context("start input stream")?;
        Ok(Self { tap, device_name, paused: false, stream })
    }
}

impl SampleFeed for LiveCapture {
    fn tap(&self) -> &SampleTap {
        &self.tap
    }

    fn describe(&self) -> String {
        format!("capture: {}", self.device_name)
    }

    fn toggle_pause(&mut self) -> bool {
        let result = if self.paused {
            self.stream.play().map_err(anyhow::Error::from)
        } else {
            self.stream.pause().map_err(anyhow::Error::from)
        };
        match result {
            Ok(()) => {
                self.paused = !self.paused;
                if self.paused {
                    self.tap.clear();
                }
            }
            Err(e) => log::warn!("cpal pause/resume failed: {e}"),
        }
        self.paused
    }
}

fn pick_best_input_device_any_host() -> Option<cpal::Device> {
    // CPAL may expose several backends (ALSA / JACK / PipeWire ...); score devices across all of them.
    let mut best: Option<(i32, cpal::Device)> = None;

    for host_id in cpal::available_hosts() {
        let Ok(host) = cpal::host_from_id(host_id) else {
            continue;
        };
        let host_bonus = host_score(&format!("{host_id:?}"));

        let Ok(devices) = host.input_devices() else {
            continue;
        };

        for d in devices {
            let name = d.name().unwrap_or_default();
            let score = host_bonus + device_name_score(&name);
            match &best {
                None => best = Some((score, d)),
                Some((best_score, _)) if score > *best_score => best = Some((score, d)),
                _ => {}
            }
        }
    }

    best.map(|(_, d)| d)
}

fn host_score(host: &str) -> i32 {
    let s = host.to_lowercase();
    if s.contains("pipe") {
        50
    } else if s.contains("pulse") {
        40
    } else if s.contains("jack") {
        10
    } else {
        0
    }
}

fn device_name_score(name: &str) -> i32 {
    let lname = name.to_lowercase();
    let mut score = 0;

    if lname.contains("monitor") {
        score += 200;
    }
    if lname.contains("loopback") {
        score += 160;
    }
    if lname.contains("stereo mix") || lname.contains("what u hear") {
        score += 120;
    }
    if lname.contains("output") || lname.contains("sink") {
        score += 30;
    }

    if lname.contains("microphone") || lname.contains("mic") {
        score -= 120;
    }
    if lname.contains("webcam") || lname.contains("camera") {
        score -= 80;
    }
    if lname.contains("input") && !lname.contains("monitor") {
        score -= 40;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monitors_beat_microphones() {
        let monitor = device_name_score("Monitor of Built-in Audio Analog Stereo");
        let mic = device_name_score("Built-in Microphone");
        let plain = device_name_score("default");
        assert!(monitor > plain);
        assert!(plain > mic);
    }

    #[test]
    fn pipewire_is_preferred() {
        assert!(host_score("PipeWire") > host_score("Alsa"));
        assert!(host_score("Jack") > host_score("Alsa"));
    }
}
