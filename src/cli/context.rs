//! Command execution context
//!
//! Resolves configuration (file, then CLI/env overrides) and builds the API
//! client once, so handlers do not repeat that boilerplate.

use std::path::PathBuf;

use colored::Colorize;

use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::SmershClient;
use crate::config::Config;
use crate::error::Result;

/// Context for command execution containing config, client, and runtime options.
pub struct CommandContext {
    /// Configuration with CLI overrides applied
    pub config: Config,
    /// Where the configuration was read from
    pub config_path: PathBuf,
    /// API client, not yet authenticated
    pub client: SmershClient,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Load the configuration, apply overrides, and create the API client.
    ///
    /// A missing config file is fine as long as the URL comes from `--url`
    /// or `SMERSH_URL`.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config_path = Config::resolve_path(opts.config_ref())?;
        let mut config = Config::load_or_default(&config_path)?;
        apply_overrides(&mut config, opts);

        let format = resolve_format(opts, &config);
        let options = config.client_options()?;

        if options.insecure {
            println!(
                "{} {}",
                "WARNING:".yellow().bold(),
                "The program is running in INSECURE mode. Server authenticity will not be checked."
                    .yellow()
            );
        }

        let client = SmershClient::new(&options)?;

        Ok(Self {
            config,
            config_path,
            client,
            format,
        })
    }
}

/// Layer CLI flags and environment variables over the file configuration.
pub fn apply_overrides(config: &mut Config, opts: &GlobalOptions) {
    if let Some(url) = &opts.url {
        config.url = Some(url.clone());
    }
    if let Some(username) = &opts.username {
        config.username = Some(username.clone());
    }
    if let Some(certificate) = &opts.certificate {
        config.certificate = Some(certificate.clone());
    }
    if opts.insecure {
        config.insecure = true;
    }
}

/// Output format: flag, then `preferences.format`, then table.
pub fn resolve_format(opts: &GlobalOptions, config: &Config) -> OutputFormat {
    opts.format
        .or_else(|| {
            config
                .preferences
                .format
                .as_deref()
                .and_then(OutputFormat::from_preference)
        })
        .unwrap_or_default()
}
