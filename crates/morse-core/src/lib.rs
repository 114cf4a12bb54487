//! Text-to-Morse conversion core: character tables, settings, the converter
//! and a single-entry conversion cache.

pub mod cache;
pub mod charset;
pub mod converter;
pub mod settings;
