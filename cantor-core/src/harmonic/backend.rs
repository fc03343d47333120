//! Harmonic backend: additive synthesis over a per-voice bank.

use crate::audio::{AudioSpec, ByteOrder, SampleType, SpeechStream};
use crate::error::{Result, TtsError};
use crate::harmonic::settings::{HarmonicSettings, Voice};
use crate::settings::TtsSettings;
use std::f64::consts::TAU;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Output format: mono 16-bit little-endian linear PCM at 24 kHz.
pub(crate) const AUDIO_SPEC: AudioSpec = AudioSpec {
    format: "Linear PCM",
    sample_rate: 24_000,
    sample_type: SampleType::SignedInt,
    sample_width: 16,
    byte_order: ByteOrder::LittleEndian,
    num_channels: 1,
};

/// Seconds of audio per input character at speed 1.0.
const SECONDS_PER_CHAR: f64 = 0.06;

/// The derived resource: per-voice synthesis parameters, built on `start`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct VoiceBank {
    /// Fundamental frequency in Hz.
    f0: f64,
    /// Harmonic roll-off factor in (0, 1]; higher is brighter.
    brightness: f64,
}

impl VoiceBank {
    fn builtin(voice: Voice) -> Self {
        match voice {
            Voice::AfAria => Self { f0: 220.0, brightness: 0.70 },
            Voice::AfVela => Self { f0: 200.0, brightness: 0.55 },
            Voice::AmAtlas => Self { f0: 120.0, brightness: 0.60 },
            Voice::BfHolly => Self { f0: 210.0, brightness: 0.65 },
            Voice::BmAlder => Self { f0: 110.0, brightness: 0.50 },
            Voice::FfSylvie => Self { f0: 215.0, brightness: 0.68 },
            Voice::FmRemy => Self { f0: 125.0, brightness: 0.58 },
        }
    }

    /// Load the bank for `voice`, overridden by a tuning file when given.
    ///
    /// The tuning file holds `key=value` lines for `f0` and `brightness`;
    /// unknown keys or unparsable values fail the load.
    fn load(voice: Voice, tuning_path: Option<&Path>) -> Result<Self> {
        let mut bank = Self::builtin(voice);
        let Some(path) = tuning_path else {
            return Ok(bank);
        };
        let contents = fs::read_to_string(path)?;
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = line.split_once('=').ok_or_else(|| {
                TtsError::Engine(format!("malformed tuning line: {line}"))
            })?;
            let value: f64 = value.trim().parse().map_err(|_| {
                TtsError::Engine(format!("malformed tuning value: {line}"))
            })?;
            match key.trim() {
                "f0" => bank.f0 = value,
                "brightness" => bank.brightness = value,
                other => {
                    return Err(TtsError::Engine(format!("unknown tuning key: {other}")));
                }
            }
        }
        Ok(bank)
    }
}

/// Stateful TTS backend bound to one [`HarmonicSettings`] instance.
#[derive(Debug)]
pub struct HarmonicBackend {
    settings: HarmonicSettings,
    bank: Option<VoiceBank>,
}

impl HarmonicBackend {
    /// Bind a backend to the given settings, unstarted.
    ///
    /// Rejects any settings object that is not a [`HarmonicSettings`].
    pub fn new(settings: Box<dyn TtsSettings>) -> Result<Self> {
        let settings = downcast_settings(settings)?;
        Ok(Self {
            settings,
            bank: None,
        })
    }
}

fn downcast_settings(settings: Box<dyn TtsSettings>) -> Result<HarmonicSettings> {
    match settings.as_any().downcast_ref::<HarmonicSettings>() {
        Some(concrete) => Ok(concrete.clone()),
        None => Err(TtsError::SettingsType {
            expected: "HarmonicSettings",
            actual: settings.type_name().to_string(),
        }),
    }
}

impl crate::backend::TtsBackend for HarmonicBackend {
    fn audio_spec(&self) -> &AudioSpec {
        &AUDIO_SPEC
    }

    fn is_started(&self) -> bool {
        self.bank.is_some()
    }

    fn start(&mut self) -> Result<()> {
        if self.is_started() {
            return Ok(());
        }
        let bank = VoiceBank::load(
            self.settings.voice(),
            self.settings.voice_path().map(|p| p.as_path()),
        )?;
        debug!(voice = self.settings.voice().as_str(), "harmonic backend started");
        self.bank = Some(bank);
        Ok(())
    }

    fn stop(&mut self) {
        if self.bank.take().is_some() {
            debug!("harmonic backend stopped");
        }
    }

    fn convert(&mut self, text: &str) -> Result<SpeechStream> {
        let Some(bank) = self.bank else {
            return Err(TtsError::NotStarted);
        };
        let speed = self.settings.speed();
        let segments = segment_text(text);
        Ok(Box::new(
            segments
                .into_iter()
                .map(move |segment| synthesize_segment(&bank, speed, &segment)),
        ))
    }

    fn get_settings(&self) -> &dyn TtsSettings {
        &self.settings
    }

    fn update_settings(&mut self, new_settings: Box<dyn TtsSettings>) -> Result<()> {
        let new_settings = downcast_settings(new_settings)?;
        let was_started = self.is_started();
        if was_started {
            self.stop();
        }
        self.settings = new_settings;
        if was_started {
            self.start()?;
        }
        Ok(())
    }
}

/// Split text into sentence-like segments; one audio chunk per segment.
fn segment_text(text: &str) -> Vec<String> {
    text.split_inclusive(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Render one segment as raw PCM per [`AUDIO_SPEC`]. Deterministic.
fn synthesize_segment(bank: &VoiceBank, speed: f64, segment: &str) -> Vec<u8> {
    let sample_rate = f64::from(AUDIO_SPEC.sample_rate);
    let duration = segment.chars().count() as f64 * SECONDS_PER_CHAR / speed;
    let num_samples = (duration * sample_rate) as usize;
    let mut pcm = Vec::with_capacity(num_samples * 2);
    for i in 0..num_samples {
        let t = i as f64 / sample_rate;
        let envelope = 1.0 - i as f64 / num_samples as f64;
        let mut value = 0.0;
        for harmonic in 1..=4u32 {
            let gain = bank.brightness.powi(harmonic as i32 - 1);
            value += gain * (TAU * bank.f0 * f64::from(harmonic) * t).sin();
        }
        let sample = (value / 4.0 * envelope * 0.3 * f64::from(i16::MAX)) as i16;
        pcm.extend_from_slice(&sample.to_le_bytes());
    }
    pcm
}
