//! Harmonic: the bundled additive-synthesis TTS backend family.
//!
//! A small deterministic voice renderer used as the always-available
//! reference backend. It exercises every contract in this library without
//! pulling in a neural inference stack.

mod backend;
mod hook;
mod plugin;
mod settings;

pub use backend::HarmonicBackend;
pub use hook::register_tts_plugin;
pub use plugin::HarmonicPlugin;
pub use settings::{Device, HarmonicSettings, Voice};
