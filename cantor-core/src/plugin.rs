//! Plugin contract: the factory façade for one TTS backend family, plus the
//! registration hook mechanism used for discovery.

use crate::backend::TtsBackend;
use crate::error::Result;
use crate::settings::{SettingsMap, SettingsSpec, TtsSettings};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Common interface for all TTS plugins.
///
/// A plugin bundles a unique id, a settings factory, a backend factory,
/// locale-aware display metadata, and the settings schema for one backend
/// family. Plugins are immutable descriptors, typically one singleton per
/// installed backend family.
pub trait TtsPlugin: Send + Sync {
    /// Unique identifier across all installed plugins.
    ///
    /// Include at least a major version suffix (e.g. `harmonic_v1`) so that
    /// multiple generations of a backend can coexist.
    fn id(&self) -> &str;

    /// Human-friendly plugin name appropriate for the given locale.
    ///
    /// Best-effort: falls back to progressively more general locale forms,
    /// then to the plugin's default language. Never fails on an
    /// unrecognized locale.
    fn get_display_name(&self, locale: &str) -> String;

    /// Build a settings instance, from defaults when `from_dict` is `None`.
    ///
    /// Every key in `from_dict` must be a known setting and every value must
    /// pass that setting's validation rule; cross-field validation applies
    /// after the per-field checks. Fails with
    /// [`TtsError::UnknownSetting`](crate::TtsError::UnknownSetting) or
    /// [`TtsError::InvalidSetting`](crate::TtsError::InvalidSetting).
    fn make_settings(&self, from_dict: Option<&SettingsMap>) -> Result<Box<dyn TtsSettings>>;

    /// Construct a backend bound to the given settings, unstarted.
    ///
    /// Fails with [`TtsError::SettingsType`](crate::TtsError::SettingsType)
    /// if `settings` is not this plugin's concrete settings type.
    fn make_backend(&self, settings: Box<dyn TtsSettings>) -> Result<Box<dyn TtsBackend>>;

    /// The schema describing every settings field of this backend family.
    fn get_settings_spec(&self) -> SettingsSpec;

    /// Localized display name for one setting. Fails with
    /// [`TtsError::SettingNotFound`](crate::TtsError::SettingNotFound) if
    /// the setting name is unrecognized.
    fn get_setting_display_name(&self, setting_name: &str, locale: &str) -> Result<String>;

    /// Localized description for one setting. Fails with
    /// [`TtsError::SettingNotFound`](crate::TtsError::SettingNotFound) if
    /// the setting name is unrecognized.
    fn get_setting_description(&self, setting_name: &str, locale: &str) -> Result<String>;

    /// The most-specific locales this backend directly supports for speech
    /// and UI text. No broader catch-all forms unless nothing more specific
    /// is supported.
    fn get_supported_locales(&self) -> BTreeSet<String>;
}

/// Function name every registration hook must use.
pub const HOOK_NAME: &str = "register_tts_plugin";

/// Zero-argument registration callable.
///
/// Returns `None` to skip registration, e.g. when an optional native
/// dependency is absent. This is how optional or heavyweight backends
/// degrade gracefully when their dependencies are not installed.
pub type RegistrationFn = fn() -> Option<Arc<dyn TtsPlugin>>;

/// One discoverable registration hook: a named registration callable.
///
/// The host supplies these statically (see [`builtin_hooks`]) or builds the
/// list from its own configuration or platform plugin mechanism; the
/// registry does not care how the list was obtained. The `name` carries a
/// `module::function` path used for hook validation.
#[derive(Clone, Copy)]
pub struct PluginHook {
    pub name: &'static str,
    pub register: RegistrationFn,
}

impl PluginHook {
    pub fn new(name: &'static str, register: RegistrationFn) -> Self {
        Self { name, register }
    }

    /// Whether the hook conforms to the naming contract: the function part
    /// of `name` must be [`HOOK_NAME`].
    pub fn is_well_formed(&self) -> bool {
        self.name.rsplit("::").next() == Some(HOOK_NAME)
    }
}

impl std::fmt::Debug for PluginHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginHook").field("name", &self.name).finish()
    }
}

/// The registration hooks bundled with this library.
pub fn builtin_hooks() -> Vec<PluginHook> {
    vec![PluginHook::new(
        "harmonic::register_tts_plugin",
        crate::harmonic::register_tts_plugin,
    )]
}
