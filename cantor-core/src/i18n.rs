//! Locale handling: normalization, progressive fallback, and in-code
//! language catalogs for locale-aware display strings.

use crate::error::{Result, TtsError};
use std::collections::BTreeMap;

/// A parsed locale: language, optional script, optional territory.
///
/// Variants, encodings (`.UTF-8`) and modifiers (`@euro`) are accepted on
/// input but stripped. Both underscore (`en_US`) and hyphen (`en-US`)
/// separated forms parse to the same tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleTag {
    pub language: String,
    pub script: Option<String>,
    pub territory: Option<String>,
}

impl LocaleTag {
    /// Parse a POSIX-style (`fr_CA.UTF-8@euro`) or CLDR-style (`zh-Hant-TW`)
    /// locale string.
    pub fn parse(locale: &str) -> Result<Self> {
        let invalid = || TtsError::InvalidLocale(locale.to_string());
        // Strip encoding and modifier suffixes.
        let base = locale
            .split('.')
            .next()
            .and_then(|s| s.split('@').next())
            .ok_or_else(invalid)?;
        if base.is_empty() {
            return Err(invalid());
        }
        let mut parts = base.split(['_', '-']);
        let language = parts.next().ok_or_else(invalid)?;
        if !(2..=8).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(invalid());
        }
        let mut script = None;
        let mut territory = None;
        for part in parts {
            if part.len() == 4 && part.chars().all(|c| c.is_ascii_alphabetic()) {
                if script.is_none() && territory.is_none() {
                    let mut chars = part.chars();
                    let head = chars.next().ok_or_else(invalid)?;
                    script = Some(
                        head.to_ascii_uppercase().to_string() + &chars.as_str().to_lowercase(),
                    );
                }
            } else if (part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic()))
                || (part.len() == 3 && part.chars().all(|c| c.is_ascii_digit()))
            {
                if territory.is_none() {
                    territory = Some(part.to_uppercase());
                }
            }
            // Anything else is a variant; stripped.
        }
        Ok(Self {
            language: language.to_lowercase(),
            script,
            territory,
        })
    }

    /// Canonical underscore-separated form, e.g. `zh_Hant_TW`.
    pub fn canonical(&self) -> String {
        let mut out = self.language.clone();
        if let Some(ref script) = self.script {
            out.push('_');
            out.push_str(script);
        }
        if let Some(ref territory) = self.territory {
            out.push('_');
            out.push_str(territory);
        }
        out
    }

    /// Progressively more general locale forms, most specific first.
    ///
    /// E.g. `zh_Hant_TW` yields `["zh_Hant_TW", "zh_Hant", "zh"]` and
    /// `en_CA` yields `["en_CA", "en"]`.
    pub fn fallback_chain(&self) -> Vec<String> {
        let mut chain = vec![self.canonical()];
        if self.script.is_some() && self.territory.is_some() {
            let general = Self {
                language: self.language.clone(),
                script: self.script.clone(),
                territory: None,
            };
            chain.push(general.canonical());
        }
        if self.script.is_some() || self.territory.is_some() {
            chain.push(self.language.clone());
        }
        chain
    }
}

/// Normalize a locale string to its canonical underscore form.
pub fn normalize_locale(locale: &str) -> Result<String> {
    Ok(LocaleTag::parse(locale)?.canonical())
}

/// A small in-code catalog of localized strings, keyed by normalized locale
/// and message key.
///
/// Lookups walk the caller's fallback chain before falling back to the
/// catalog's default locale, so a lookup never fails on an unrecognized
/// locale.
#[derive(Debug, Clone)]
pub struct LanguageCatalog {
    default_locale: String,
    strings: BTreeMap<String, BTreeMap<String, String>>,
}

impl LanguageCatalog {
    pub fn new(default_locale: impl Into<String>) -> Self {
        Self {
            default_locale: default_locale.into(),
            strings: BTreeMap::new(),
        }
    }

    /// Add one localized string under the given locale.
    pub fn with(mut self, locale: &str, key: &str, text: &str) -> Self {
        self.strings
            .entry(locale.to_string())
            .or_default()
            .insert(key.to_string(), text.to_string());
        self
    }

    /// Look up `key` for the given locale, walking the fallback chain and
    /// then the default locale. Returns `None` only if the key is unknown
    /// in the default locale too.
    pub fn lookup(&self, locale: &str, key: &str) -> Option<&str> {
        if let Ok(tag) = LocaleTag::parse(locale) {
            for candidate in tag.fallback_chain() {
                if let Some(text) = self.strings.get(&candidate).and_then(|m| m.get(key)) {
                    return Some(text);
                }
            }
        }
        self.strings
            .get(&self.default_locale)
            .and_then(|m| m.get(key))
            .map(String::as_str)
    }
}
