//! Configuration system for the Orrery viewer.
//!
//! Settings persist to disk as a RON file, tolerate missing and unknown
//! fields, and can be overridden from the command line via clap.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, Config, DebugConfig, FlightConfig, JournalConfig, SceneConfig, WindowConfig,
};
pub use error::ConfigError;
