//! Global CLI options shared across all commands
//!
//! This module provides a centralized struct for global CLI options, so
//! handlers take one argument instead of every flag separately.

use std::path::PathBuf;

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// For most options, the precedence is: CLI flag > environment variable > config file > default.
/// This struct captures the CLI/env layer; config file defaults are resolved later in
/// `CommandContext`.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format override (table, json)
    pub format: Option<OutputFormat>,

    /// Custom config file path (defaults to ~/.smersh/config.yaml)
    pub config: Option<String>,

    /// SMERSH server URL override
    pub url: Option<String>,

    /// Login name override
    pub username: Option<String>,

    /// PEM certificate used to verify the server
    pub certificate: Option<PathBuf>,

    /// Skip server certificate verification
    pub insecure: bool,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            url: cli.url.clone(),
            username: cli.username.clone(),
            certificate: cli.certificate.clone(),
            insecure: cli.insecure,
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Get URL override as `Option<&str>`.
    pub fn url_ref(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_from_cli() {
        let cli = Cli::try_parse_from([
            "smersh",
            "--url",
            "https://smersh.test",
            "-k",
            "--config",
            "/custom/path",
            "--format",
            "json",
            "status",
        ])
        .unwrap();

        let opts = GlobalOptions::from_cli(&cli);

        assert_eq!(opts.url_ref(), Some("https://smersh.test"));
        assert_eq!(opts.config_ref(), Some("/custom/path"));
        assert_eq!(opts.format, Some(OutputFormat::Json));
        assert!(opts.insecure);
        assert!(opts.certificate.is_none());
    }

    #[test]
    fn test_none_accessors() {
        let opts = GlobalOptions::default();

        assert_eq!(opts.config_ref(), None);
        assert_eq!(opts.url_ref(), None);
        assert!(!opts.insecure);
    }
}
