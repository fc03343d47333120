//! Error taxonomy shared by all Cantor-TTS components.

use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, TtsError>;

/// All failures surfaced by the settings, backend, plugin and registry layers.
///
/// Nothing here is retried or swallowed internally; every failure is reported
/// synchronously to the immediate caller with the offending field, id or type
/// in the message.
#[derive(Debug, Error)]
pub enum TtsError {
    /// A settings mapping contained a key that is not a known setting.
    #[error("unknown setting: [{0}]")]
    UnknownSetting(String),

    /// A setting value failed its per-field or cross-field validation rule.
    #[error("invalid setting {name}: {reason}")]
    InvalidSetting { name: String, reason: String },

    /// A locale string could not be parsed.
    #[error("invalid locale: [{0}]")]
    InvalidLocale(String),

    /// A settings object of the wrong concrete type was handed to a backend
    /// or plugin expecting its own settings family.
    #[error("incorrect settings type: expected {expected}, got {actual}")]
    SettingsType {
        expected: &'static str,
        actual: String,
    },

    /// Lookup of a plugin id that is not in the registry.
    #[error("TTS plugin not found: [{0}]")]
    PluginNotFound(String),

    /// Lookup of a setting name that the plugin does not define.
    #[error("setting not found: [{0}]")]
    SettingNotFound(String),

    /// A caller contract violation, e.g. mutually exclusive listing flags.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// `convert` was called on a backend that was never started.
    #[error("backend is not started")]
    NotStarted,

    /// Discovery ran but produced zero plugins. Treated as a host
    /// misconfiguration since at least one plugin ships bundled.
    #[error("no TTS plugins were found; check the host's hook list")]
    NoPluginsFound,

    /// A registration hook does not conform to the hook naming contract.
    #[error("malformed plugin hook: [{0}]")]
    MalformedHook(String),

    /// Two distinct plugins claimed the same id during registration.
    #[error("plugin id already in use by another plugin: [{0}]")]
    DuplicateId(String),

    /// The backend's derived resource failed to allocate or synthesize.
    #[error("engine error: {0}")]
    Engine(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Audio container encoding failure.
    #[error("audio encoding error: {0}")]
    Audio(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let e = TtsError::UnknownSetting("attr2".into());
        assert!(e.to_string().contains("attr2"));
        let e = TtsError::InvalidSetting {
            name: "speed".into(),
            reason: "must be in (0.1, 1.0]".into(),
        };
        assert!(e.to_string().contains("speed"));
        let e = TtsError::PluginNotFound("nope_v1".into());
        assert!(e.to_string().contains("nope_v1"));
    }

    #[test]
    fn not_started_message() {
        assert!(TtsError::NotStarted.to_string().contains("not started"));
    }
}
