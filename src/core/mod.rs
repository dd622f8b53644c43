//! Core building blocks: shuffle randomness and configuration.

pub mod config;
pub mod rng;

pub use config::{ConfigError, FlowConfig};
pub use rng::ShuffleRng;
