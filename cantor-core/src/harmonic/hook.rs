//! Registration hook for the Harmonic plugin.

use crate::harmonic::plugin::HarmonicPlugin;
use crate::plugin::TtsPlugin;
use std::sync::Arc;

/// Register the Harmonic plugin.
///
/// Harmonic has no optional native dependencies, so this always returns a
/// plugin. Hooks for heavyweight backends should return `None` when their
/// dependencies are missing instead of failing.
pub fn register_tts_plugin() -> Option<Arc<dyn TtsPlugin>> {
    Some(Arc::new(HarmonicPlugin::new()))
}
