//! Harmonic settings: a validated, immutable value object.

use crate::error::{Result, TtsError};
use crate::i18n::normalize_locale;
use crate::settings::{SettingType, SettingsMap, SettingsSpec, SpecEntry, TtsSettings};
use serde_json::Value;
use std::any::Any;
use std::path::PathBuf;

/// Speech locales supported by this backend family.
pub const SUPPORTED_LOCALES: [&str; 5] = ["en_CA", "en_GB", "en_US", "fr_CA", "fr_FR"];

/// Locales that share another locale's voice bank.
const VOICE_LOCALE_ALIASES: [(&str, &str); 2] = [("en_CA", "en_US"), ("fr_CA", "fr_FR")];

/// Voices supported by this backend.
///
/// The first letter encodes the voice bank language (`a` American English,
/// `b` British English, `f` French), the second the register (f/m).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Voice {
    AfAria,
    AfVela,
    AmAtlas,
    BfHolly,
    BmAlder,
    FfSylvie,
    FmRemy,
}

impl Voice {
    pub const ALL: [Voice; 7] = [
        Voice::AfAria,
        Voice::AfVela,
        Voice::AmAtlas,
        Voice::BfHolly,
        Voice::BmAlder,
        Voice::FfSylvie,
        Voice::FmRemy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Voice::AfAria => "af_aria",
            Voice::AfVela => "af_vela",
            Voice::AmAtlas => "am_atlas",
            Voice::BfHolly => "bf_holly",
            Voice::BmAlder => "bm_alder",
            Voice::FfSylvie => "ff_sylvie",
            Voice::FmRemy => "fm_remy",
        }
    }

    pub fn parse(s: &str) -> Option<Voice> {
        Voice::ALL.iter().copied().find(|v| v.as_str() == s)
    }

    /// The voice bank language letter, e.g. `a` for `af_aria`.
    pub fn lang_prefix(&self) -> char {
        self.as_str().chars().next().unwrap_or('a')
    }
}

/// Compute device used for synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    Cpu,
    Cuda,
}

impl Device {
    pub const ALL: [Device; 2] = [Device::Cpu, Device::Cuda];

    pub fn as_str(&self) -> &'static str {
        match self {
            Device::Cpu => "cpu",
            Device::Cuda => "cuda",
        }
    }

    pub fn parse(s: &str) -> Option<Device> {
        Device::ALL.iter().copied().find(|d| d.as_str() == s)
    }
}

/// Settings for the Harmonic backend.
///
/// Instances are always fully valid: construction validates every field and
/// then the voice/locale combination, and fields are never mutated
/// afterwards. A changed configuration means a new instance.
#[derive(Debug, Clone, PartialEq)]
pub struct HarmonicSettings {
    locale: String,
    voice: Voice,
    speed: f64,
    device: Option<Device>,
    voice_path: Option<PathBuf>,
}

impl Default for HarmonicSettings {
    fn default() -> Self {
        Self {
            locale: "en_CA".to_string(),
            voice: Voice::AfAria,
            speed: 1.0,
            device: None,
            voice_path: None,
        }
    }
}

impl HarmonicSettings {
    /// Build settings from the JSON wire format, starting from defaults.
    ///
    /// Unknown keys are a hard error. Each value is validated per field,
    /// then the voice must be compatible with the locale.
    pub fn from_dict(from_dict: Option<&SettingsMap>) -> Result<Self> {
        let mut settings = Self::default();
        if let Some(dict) = from_dict {
            for (key, value) in dict {
                match key.as_str() {
                    "locale" => settings.locale = parse_locale(value)?,
                    "voice" => settings.voice = parse_voice(value)?,
                    "speed" => settings.speed = parse_speed(value)?,
                    "device" => settings.device = parse_device(value)?,
                    "voice_path" => settings.voice_path = parse_voice_path(value)?,
                    other => return Err(TtsError::UnknownSetting(other.to_string())),
                }
            }
        }
        settings.validate_voice_for_locale()?;
        Ok(settings)
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn voice(&self) -> Voice {
        self.voice
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn device(&self) -> Option<Device> {
        self.device
    }

    pub fn voice_path(&self) -> Option<&PathBuf> {
        self.voice_path.as_ref()
    }

    /// The voice bank language letter for the current locale, resolving
    /// aliases first (e.g. `en_CA` uses the `en_US` bank).
    pub fn lang_code(&self) -> char {
        let resolved = VOICE_LOCALE_ALIASES
            .iter()
            .find(|(alias, _)| *alias == self.locale)
            .map(|(_, target)| *target)
            .unwrap_or(self.locale.as_str());
        match resolved {
            "en_GB" => 'b',
            "fr_FR" => 'f',
            _ => 'a',
        }
    }

    fn validate_voice_for_locale(&self) -> Result<()> {
        let expected = self.lang_code();
        if self.voice.lang_prefix() != expected {
            return Err(TtsError::InvalidSetting {
                name: "voice".to_string(),
                reason: format!(
                    "voice {} is invalid for locale {}; it should start with '{}'",
                    self.voice.as_str(),
                    self.locale,
                    expected,
                ),
            });
        }
        Ok(())
    }

    /// The settings schema for this backend family. One entry per field.
    pub fn spec() -> SettingsSpec {
        let mut spec = SettingsSpec::new();
        spec.insert(
            "locale".to_string(),
            SpecEntry::new(SettingType::Str)
                .with_min(2.0)
                .with_values(SUPPORTED_LOCALES),
        );
        spec.insert(
            "voice".to_string(),
            SpecEntry::new(SettingType::Str).with_values(Voice::ALL.map(|v| v.as_str())),
        );
        spec.insert(
            "speed".to_string(),
            SpecEntry::new(SettingType::Float).with_min(0.1).with_max(1.0),
        );
        spec.insert(
            "device".to_string(),
            SpecEntry::new(SettingType::Str).with_values(Device::ALL.map(|d| d.as_str())),
        );
        spec.insert(
            "voice_path".to_string(),
            SpecEntry::new(SettingType::Str),
        );
        spec
    }
}

impl TtsSettings for HarmonicSettings {
    fn locale(&self) -> &str {
        &self.locale
    }

    fn to_dict(&self) -> SettingsMap {
        let mut map = SettingsMap::new();
        map.insert("locale".to_string(), Value::from(self.locale.as_str()));
        map.insert("voice".to_string(), Value::from(self.voice.as_str()));
        map.insert("speed".to_string(), Value::from(self.speed));
        map.insert(
            "device".to_string(),
            self.device.map(|d| Value::from(d.as_str())).unwrap_or(Value::Null),
        );
        map.insert(
            "voice_path".to_string(),
            self.voice_path
                .as_ref()
                .map(|p| Value::from(p.to_string_lossy().into_owned()))
                .unwrap_or(Value::Null),
        );
        map
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        "HarmonicSettings"
    }

    fn eq_settings(&self, other: &dyn TtsSettings) -> bool {
        other
            .as_any()
            .downcast_ref::<HarmonicSettings>()
            .is_some_and(|other| self == other)
    }
}

fn expect_str<'v>(name: &str, value: &'v Value) -> Result<&'v str> {
    value.as_str().ok_or_else(|| TtsError::InvalidSetting {
        name: name.to_string(),
        reason: format!("expected a string, got {value}"),
    })
}

fn parse_locale(value: &Value) -> Result<String> {
    let raw = expect_str("locale", value)?;
    let normalized = normalize_locale(raw).map_err(|_| TtsError::InvalidSetting {
        name: "locale".to_string(),
        reason: format!("invalid locale: {raw}"),
    })?;
    SUPPORTED_LOCALES
        .iter()
        .find(|l| **l == normalized)
        .map(|l| l.to_string())
        .ok_or_else(|| TtsError::InvalidSetting {
            name: "locale".to_string(),
            reason: format!("unsupported locale: {raw}"),
        })
}

fn parse_voice(value: &Value) -> Result<Voice> {
    let raw = expect_str("voice", value)?;
    Voice::parse(raw).ok_or_else(|| TtsError::InvalidSetting {
        name: "voice".to_string(),
        reason: format!("unknown voice: {raw}"),
    })
}

fn parse_speed(value: &Value) -> Result<f64> {
    let speed = value.as_f64().ok_or_else(|| TtsError::InvalidSetting {
        name: "speed".to_string(),
        reason: format!("expected a number, got {value}"),
    })?;
    if !(speed > 0.1 && speed <= 1.0) {
        return Err(TtsError::InvalidSetting {
            name: "speed".to_string(),
            reason: format!("speed {speed} is out of range (0.1, 1.0]"),
        });
    }
    Ok(speed)
}

fn parse_device(value: &Value) -> Result<Option<Device>> {
    if value.is_null() {
        return Ok(None);
    }
    let raw = expect_str("device", value)?;
    Device::parse(raw)
        .map(Some)
        .ok_or_else(|| TtsError::InvalidSetting {
            name: "device".to_string(),
            reason: format!("unknown device: {raw}"),
        })
}

fn parse_voice_path(value: &Value) -> Result<Option<PathBuf>> {
    if value.is_null() {
        return Ok(None);
    }
    let raw = expect_str("voice_path", value)?;
    let path = PathBuf::from(raw);
    if !path.is_file() {
        return Err(TtsError::InvalidSetting {
            name: "voice_path".to_string(),
            reason: format!("file does not exist: {raw}"),
        });
    }
    Ok(Some(path))
}
