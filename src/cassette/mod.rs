//! YAML cassettes of generative client calls, for offline replay.

pub mod config;
pub mod format;
pub mod recorder;
pub mod replayer;
