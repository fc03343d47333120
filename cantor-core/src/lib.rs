//! Cantor-TTS core: plugin contracts, settings schema, and the plugin
//! registry for interchangeable text-to-speech backends.

pub mod audio;
pub mod backend;
pub mod error;
pub mod harmonic;
pub mod i18n;
pub mod plugin;
pub mod registry;
pub mod settings;
pub mod wav;

pub use audio::{AudioSpec, ByteOrder, SampleType, SpeechStream};
pub use backend::TtsBackend;
pub use error::{Result, TtsError};
pub use i18n::{normalize_locale, LanguageCatalog, LocaleTag};
pub use plugin::{builtin_hooks, PluginHook, RegistrationFn, TtsPlugin, HOOK_NAME};
pub use registry::PluginRegistry;
pub use settings::{SettingType, SettingsMap, SettingsSpec, SpecEntry, TtsSettings};
pub use wav::collect_wav;
