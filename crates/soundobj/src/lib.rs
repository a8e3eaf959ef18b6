pub mod config;
pub mod engine;
pub mod error;
mod native;
pub mod sound;
#[cfg(test)]
mod testing;
pub mod types;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{MaResult, SoundError, SoundResult};
pub use sound::{LoadedSound, Sound, SoundSource, UnloadedSound};
pub use types::*;
