//! Public entry points of the engine.

mod engine;
mod types;

pub use engine::MorseEngine;
pub use types::EngineError;

pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
