//! Backend contract: a stateful TTS engine bound to one settings instance.

use crate::audio::{AudioSpec, SpeechStream};
use crate::error::Result;
use crate::settings::TtsSettings;

/// Common interface for all TTS backends.
///
/// A backend converts text into a stream of speech audio chunks. Start it
/// first, call [`convert`](TtsBackend::convert) any number of times, and
/// stop it when no longer needed. There is no implicit cleanup; the host
/// must call `stop`.
///
/// Every backend also holds a current settings instance. Settings are
/// replaced wholesale via [`update_settings`](TtsBackend::update_settings),
/// never field by field.
pub trait TtsBackend: Send {
    /// Metadata describing the audio format that `convert` emits.
    fn audio_spec(&self) -> &AudioSpec;

    /// Whether the derived resource is currently allocated. Read-only.
    fn is_started(&self) -> bool;

    /// Allocate the derived resource (e.g. load a voice bank or model) using
    /// the current settings.
    ///
    /// Idempotent: a no-op when already started. Allocation may be expensive
    /// and is not retried; a failure propagates and leaves the backend
    /// stopped.
    fn start(&mut self) -> Result<()>;

    /// Release the derived resource. Idempotent: a no-op when already
    /// stopped.
    fn stop(&mut self);

    /// Convert text to a lazy sequence of audio chunks in the format given
    /// by [`audio_spec`](TtsBackend::audio_spec).
    ///
    /// Fails with [`TtsError::NotStarted`](crate::TtsError::NotStarted) if
    /// the backend is not started. Must not mutate settings.
    fn convert(&mut self, text: &str) -> Result<SpeechStream>;

    /// The current settings in use.
    fn get_settings(&self) -> &dyn TtsSettings;

    /// Replace the settings wholesale.
    ///
    /// Fails with [`TtsError::SettingsType`](crate::TtsError::SettingsType)
    /// if `new_settings` is not this backend's concrete settings type. If
    /// the backend is started, it is stopped, the settings are swapped, and
    /// it is restarted; `is_started` observed before the call equals its
    /// value after.
    fn update_settings(&mut self, new_settings: Box<dyn TtsSettings>) -> Result<()>;
}
