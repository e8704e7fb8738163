//! CLI argument parsing and configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::error::ConfigError;
use crate::orchestrator::StaleResultPolicy;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Peer feedback review generator
#[derive(Debug, Parser)]
#[command(name = "peer-review-tui", version = VERSION)]
#[command(about = "Turn informal peer feedback into professionally written reviews")]
pub struct Cli {
    /// Config file (default: ~/.config/peer-review/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Gemini model to use
    #[arg(long, value_name = "NAME")]
    pub model: Option<String>,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Echo the initial feedback instead of calling the API
    #[arg(long)]
    pub offline: bool,

    /// Drop results for questions edited while their generation was running
    #[arg(long)]
    pub discard_stale: bool,

    /// Log file (default: platform data dir)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Configuration from CLI arguments layered over the config file
pub struct CliConfig {
    pub config: Config,
    pub offline: bool,
}

impl Cli {
    /// Load the config file and apply flag overrides
    pub fn resolve(self) -> Result<CliConfig, ConfigError> {
        let mut config = Config::load_or_default(self.config.as_deref())?;
        self.apply(&mut config);
        Ok(CliConfig {
            config,
            offline: self.offline,
        })
    }

    fn apply(&self, config: &mut Config) {
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(key) = self.api_key.as_ref().filter(|k| !k.trim().is_empty()) {
            config.api_key = Some(key.clone());
        }
        if self.discard_stale {
            config.stale_results = StaleResultPolicy::Discard;
        }
        if let Some(path) = &self.log_file {
            config.log_file = Some(path.clone());
        }
    }
}

/// Parse CLI arguments and return configuration
pub fn parse_args() -> Result<CliConfig, ConfigError> {
    Cli::parse().resolve()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("peer-review-tui").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = Config {
            api_key: Some("from-file".to_string()),
            ..Default::default()
        };
        cli(&["--model", "gemini-2.0-flash", "--api-key", "from-cli", "--discard-stale"])
            .apply(&mut config);
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.api_key.as_deref(), Some("from-cli"));
        assert_eq!(config.stale_results, StaleResultPolicy::Discard);
    }

    #[test]
    fn test_blank_api_key_does_not_override() {
        let mut config = Config {
            api_key: Some("from-file".to_string()),
            ..Default::default()
        };
        cli(&["--api-key", "  "]).apply(&mut config);
        assert_eq!(config.api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_offline_flag() {
        assert!(cli(&["--offline"]).offline);
        assert!(!cli(&[]).offline);
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Cli::try_parse_from(["peer-review-tui", "--bogus"]).is_err());
    }
}
