//! Harmonic plugin: the factory façade for the Harmonic backend family.

use crate::backend::TtsBackend;
use crate::error::{Result, TtsError};
use crate::harmonic::backend::HarmonicBackend;
use crate::harmonic::settings::{HarmonicSettings, SUPPORTED_LOCALES};
use crate::i18n::LanguageCatalog;
use crate::plugin::TtsPlugin;
use crate::settings::{SettingsMap, SettingsSpec, TtsSettings};
use std::collections::BTreeSet;
use tracing::debug;

/// Plugin id. The `_v1` suffix lets later generations coexist.
pub const PLUGIN_ID: &str = "harmonic_v1";

/// Plugin descriptor for the Harmonic backend family. Immutable; one
/// instance per process is plenty.
pub struct HarmonicPlugin {
    catalog: LanguageCatalog,
}

impl Default for HarmonicPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl HarmonicPlugin {
    pub fn new() -> Self {
        Self {
            catalog: build_catalog(),
        }
    }
}

impl TtsPlugin for HarmonicPlugin {
    fn id(&self) -> &str {
        PLUGIN_ID
    }

    fn get_display_name(&self, locale: &str) -> String {
        self.catalog
            .lookup(locale, "plugin.name")
            .unwrap_or("Harmonic")
            .to_string()
    }

    fn make_settings(&self, from_dict: Option<&SettingsMap>) -> Result<Box<dyn TtsSettings>> {
        let settings = HarmonicSettings::from_dict(from_dict)?;
        debug!(?settings, "created new HarmonicSettings");
        Ok(Box::new(settings))
    }

    fn make_backend(&self, settings: Box<dyn TtsSettings>) -> Result<Box<dyn TtsBackend>> {
        let backend = HarmonicBackend::new(settings)?;
        debug!("created new HarmonicBackend");
        Ok(Box::new(backend))
    }

    fn get_settings_spec(&self) -> SettingsSpec {
        HarmonicSettings::spec()
    }

    fn get_setting_display_name(&self, setting_name: &str, locale: &str) -> Result<String> {
        self.lookup_setting(setting_name, locale, "name")
    }

    fn get_setting_description(&self, setting_name: &str, locale: &str) -> Result<String> {
        self.lookup_setting(setting_name, locale, "desc")
    }

    fn get_supported_locales(&self) -> BTreeSet<String> {
        SUPPORTED_LOCALES.iter().map(|l| l.to_string()).collect()
    }
}

impl HarmonicPlugin {
    fn lookup_setting(&self, setting_name: &str, locale: &str, kind: &str) -> Result<String> {
        if !HarmonicSettings::spec().contains_key(setting_name) {
            return Err(TtsError::SettingNotFound(setting_name.to_string()));
        }
        let key = format!("setting.{setting_name}.{kind}");
        self.catalog
            .lookup(locale, &key)
            .map(str::to_string)
            .ok_or_else(|| TtsError::SettingNotFound(setting_name.to_string()))
    }
}

fn build_catalog() -> LanguageCatalog {
    LanguageCatalog::new("en")
        .with("en", "plugin.name", "Harmonic")
        .with("fr", "plugin.name", "Harmonique")
        .with("en", "setting.locale.name", "Locale")
        .with("fr", "setting.locale.name", "Paramètres régionaux")
        .with(
            "en",
            "setting.locale.desc",
            "The regional or international locale setting.",
        )
        .with(
            "fr",
            "setting.locale.desc",
            "Le paramètre régional ou international.",
        )
        .with("en", "setting.voice.name", "Voice")
        .with("fr", "setting.voice.name", "Voix")
        .with(
            "en",
            "setting.voice.desc",
            "The voice used by the text-to-speech system.",
        )
        .with(
            "fr",
            "setting.voice.desc",
            "La voix utilisée par le système de synthèse vocale.",
        )
        .with("en", "setting.speed.name", "Speed")
        .with("fr", "setting.speed.name", "Vitesse")
        .with(
            "en",
            "setting.speed.desc",
            "The speaking speed of the text-to-speech system.",
        )
        .with(
            "fr",
            "setting.speed.desc",
            "La vitesse de parole du système de synthèse vocale.",
        )
        .with("en", "setting.device.name", "Compute Device")
        .with("fr", "setting.device.name", "Périphérique de calcul")
        .with(
            "en",
            "setting.device.desc",
            "The device used for running the synthesizer (e.g. cpu or cuda).",
        )
        .with(
            "fr",
            "setting.device.desc",
            "Le périphérique utilisé pour exécuter le synthétiseur (p. ex. cpu ou cuda).",
        )
        .with("en", "setting.voice_path.name", "Voice Tuning File Path")
        .with("fr", "setting.voice_path.name", "Chemin du fichier de réglage de la voix")
        .with(
            "en",
            "setting.voice_path.desc",
            "Optional tuning file overriding the built-in voice parameters.",
        )
        .with(
            "fr",
            "setting.voice_path.desc",
            "Fichier de réglage facultatif remplaçant les paramètres de voix intégrés.",
        )
}
