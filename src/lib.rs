//! Morse engine: converts text to Morse code with configurable symbols and
//! separators.
//!
//! [`MorseEngine`] owns its settings and conversion cache, so independent
//! configurations can coexist in one process.

mod api;
pub mod trace_init;

pub use api::{engine_version, EngineError, MorseEngine};
pub use morse_core::charset::CharsetDescriptor;
pub use morse_core::settings::{FinalWord, MergePolicy, Overrides, Settings, SettingsError};
