//! Command-line argument parsing for the Orrery viewer.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Orrery command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "orrery", about = "Interactive solar system journal viewer")]
pub struct CliArgs {
    /// Viewport width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Viewport height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Scene manifest to load.
    #[arg(long)]
    pub model: Option<String>,

    /// Journal data fixture to load.
    #[arg(long)]
    pub journal: Option<String>,

    /// Journal query timeout in milliseconds.
    #[arg(long)]
    pub query_timeout_ms: Option<u64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Input script to replay against the viewer.
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(ref model) = args.model {
            self.scene.model_path = model.clone();
        }
        if let Some(ref journal) = args.journal {
            self.journal.data_path = journal.clone();
        }
        if let Some(ms) = args.query_timeout_ms {
            self.journal.query_timeout_ms = ms;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_args() -> CliArgs {
        CliArgs {
            width: None,
            height: None,
            model: None,
            journal: None,
            query_timeout_ms: None,
            log_level: None,
            script: None,
            config: None,
        }
    }

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            width: Some(1920),
            model: Some("custom.ron".to_string()),
            query_timeout_ms: Some(100),
            ..empty_args()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.window.width, 1920);
        assert_eq!(config.scene.model_path, "custom.ron");
        assert_eq!(config.journal.query_timeout_ms, 100);
        // Non-overridden fields retain defaults
        assert_eq!(config.window.height, 720);
        assert_eq!(config.journal.data_path, "assets/journal.ron");
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&empty_args());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from([
            "orrery",
            "--width",
            "800",
            "--script",
            "demos/tour.ron",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.width, Some(800));
        assert_eq!(args.script, Some(PathBuf::from("demos/tour.ron")));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }
}
