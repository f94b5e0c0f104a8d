//! Status command implementation

use colored::Colorize;

use crate::cli::GlobalOptions;
use crate::cli::context::{apply_overrides, resolve_format};
use crate::config::Config;
use crate::error::{ConfigError, Error, Result};

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "SMERSH Configuration Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;

    match Config::load_from(&config_path) {
        Ok(mut config) => {
            println!("Config file: {}", config_path.display().to_string().cyan());
            println!();

            apply_overrides(&mut config, opts);

            match &config.url {
                Some(url) => println!("{} Server: {}", "✓".green(), url),
                None => {
                    println!("{} Server URL not configured", "✗".red());
                    println!("  → Run 'smersh init' or pass --url");
                }
            }

            match &config.username {
                Some(username) => println!("{} Username: {}", "✓".green(), username),
                None => println!("{} No username set (asked at login)", "○".dimmed()),
            }

            if let Some(certificate) = &config.certificate {
                if certificate.exists() {
                    println!("{} Certificate: {}", "✓".green(), certificate.display());
                } else {
                    println!(
                        "{} Certificate {} does not exist",
                        "✗".red(),
                        certificate.display()
                    );
                }
            }

            if config.insecure {
                println!(
                    "{} Insecure mode: server certificates are not verified",
                    "⚠".yellow()
                );
            }

            println!("{} User agent: {}", "○".dimmed(), config.user_agent());
            println!(
                "{} Output format: {:?}",
                "○".dimmed(),
                resolve_format(opts, &config)
            );
            println!();
        }
        Err(Error::Config(ConfigError::NotFound)) => {
            println!("{} Configuration not found", "✗".red());
            println!();
            println!(
                "Run {} to create a configuration file.",
                "smersh init".cyan()
            );
            println!();
        }
        Err(e) => return Err(e),
    }

    Ok(())
}
