//! Configuration system for Holoscope.
//!
//! Provides runtime-configurable settings that persist to disk as RON files.
//! Supports CLI overrides via clap, hot-reload detection, and forward/backward
//! compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, Config, DebugConfig, FeedConfig, GlobeConfig, HubConfig, InputConfig,
    InterfaceConfig, MotorConfig, ViewerConfig,
};
pub use error::ConfigError;
