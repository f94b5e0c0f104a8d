//! Init command implementation

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::cli::GlobalOptions;
use crate::cli::context::apply_overrides;
use crate::cli::login::PASSWORD_ENV;
use crate::client::SmershClient;
use crate::config::Config;
use crate::error::Result;

/// Run the init command
///
/// Asks for the server URL and login name, checks them by logging in, then
/// saves the configuration. The password is only used for that check.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let theme = ColorfulTheme::default();
    let config_path = Config::resolve_path(opts.config_ref())?;
    let mut config = Config::load_or_default(&config_path)?;
    apply_overrides(&mut config, opts);

    println!("{}", "Welcome to SMERSH!".bold().green());
    println!("Let's set up your SMERSH configuration.\n");

    let mut url_input = Input::<String>::with_theme(&theme).with_prompt("SMERSH server URL");
    if let Some(url) = &config.url {
        url_input = url_input.default(url.clone());
    }
    let url = url_input.interact_text()?;
    config.url = Some(url.trim().trim_end_matches('/').to_string());

    let mut username_input = Input::<String>::with_theme(&theme).with_prompt("Username");
    if let Some(username) = &config.username {
        username_input = username_input.default(username.clone());
    }
    let username = username_input.interact_text()?;

    let password = match std::env::var(PASSWORD_ENV).ok().filter(|p| !p.is_empty()) {
        Some(password) => password,
        None => Password::with_theme(&theme)
            .with_prompt("Password (used once to verify the settings)")
            .interact()?,
    };

    println!("\n{}", "Authenticating...".cyan());
    let client = SmershClient::new(&config.client_options()?)?;
    client.authenticate(&username, &password).await?;
    println!("{}", "✓ Authentication successful!".green());

    config.username = Some(username);
    config.save_to(&config_path)?;

    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Start the interactive shell", "smersh".cyan());
    println!("  {} - Show configuration status", "smersh status".cyan());

    Ok(())
}
