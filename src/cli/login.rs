//! Interactive login

use std::io;

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::client::SmershClient;
use crate::client::models::{Resource, User};
use crate::error::{ApiError, Error, Result};
use crate::output::progress::spinner;

/// Environment variable holding the password, for scripted sessions
pub const PASSWORD_ENV: &str = "SMERSH_PASSWORD";

/// Map an interrupted prompt (end of input) to `None`.
fn answered<T>(result: std::result::Result<T, dialoguer::Error>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn prompt_username() -> Result<Option<String>> {
    answered(
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Enter your username")
            .interact_text(),
    )
}

fn prompt_password() -> Result<Option<String>> {
    answered(
        Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Enter your password (will not be echoed)")
            .interact(),
    )
}

/// Log in, asking for whatever is missing, and return the logged-in user.
///
/// Invalid credentials or an unreachable server are reported and asked again
/// while prompts are involved; with both `username` and `SMERSH_PASSWORD`
/// set, the first failure is returned. `Ok(None)` means the operator closed
/// the input.
pub async fn login(client: &SmershClient, username: Option<&str>) -> Result<Option<User>> {
    let env_password = std::env::var(PASSWORD_ENV).ok().filter(|p| !p.is_empty());
    let interactive = username.is_none() || env_password.is_none();

    loop {
        let name = match username {
            Some(name) => name.to_string(),
            None => match prompt_username()? {
                Some(name) => name,
                None => return Ok(None),
            },
        };

        let password = match &env_password {
            Some(password) => password.clone(),
            None => match prompt_password()? {
                Some(password) => password,
                None => return Ok(None),
            },
        };

        let progress = spinner("Logging in...");
        let attempt = client.authenticate(&name, &password).await;
        progress.finish_and_clear();

        match attempt {
            Ok(_) => {
                let id = client.authenticated_user_id().await?;
                let user = User::get(client, &id).await?;

                println!(
                    "{} Hello, {}. You are successfully logged in",
                    "✓".green(),
                    user.username.as_deref().unwrap_or(&name).bold()
                );
                return Ok(Some(user));
            }
            Err(Error::Api(ApiError::InvalidCredentials)) if interactive => {
                println!(
                    "{} Unable to log you in. Your credentials seem invalid",
                    "✗".red()
                );
            }
            Err(Error::Api(ApiError::Network(reason))) if interactive => {
                println!(
                    "{} Unable to reach {} ({}). Check the URL and try again.",
                    "✗".red(),
                    client.base_url(),
                    reason
                );
            }
            Err(e) => return Err(e),
        }
    }
}
