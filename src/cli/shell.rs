//! Interactive shell
//!
//! Reads one command per line, parses it with [`ShellLine`], and runs it
//! against the explicit [`Session`] state.

use std::io::{self, Write};
use std::path::Path;

use chrono::Utc;
use clap::Parser;
use colored::Colorize;
use log::debug;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::assign;
use crate::cli::login::login;
use crate::cli::render::{render, render_raw};
use crate::cli::{CommandContext, GlobalOptions, OutputFormat, ShellCommand, ShellLine};
use crate::client::SmershClient;
use crate::client::models::{Record, ResourceKind};
use crate::error::{Error, Result};
use crate::output::progress::spinner;
use crate::output::table::NO_RESULTS;

/// What the loop does after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Shell state: the logged-in client and the object being edited, if any
pub struct Session {
    pub client: SmershClient,
    pub context: Option<Record>,
    pub format: OutputFormat,
}

/// Split a command line into words. Quotes group words, backslash escapes.
pub fn split_line(line: &str) -> std::result::Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) if c == q => quote = None,
            Some('"') if c == '\\' => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            Some(_) => current.push(c),
            None => match c {
                '"' | '\'' => {
                    quote = Some(c);
                    in_word = true;
                }
                '\\' => {
                    if let Some(next) = chars.next() {
                        current.push(next);
                        in_word = true;
                    }
                }
                c if c.is_whitespace() => {
                    if in_word {
                        words.push(std::mem::take(&mut current));
                        in_word = false;
                    }
                }
                c => {
                    current.push(c);
                    in_word = true;
                }
            },
        }
    }

    if quote.is_some() {
        return Err("Unterminated quote".to_string());
    }
    if in_word {
        words.push(current);
    }

    Ok(words)
}

fn not_found(id: impl std::fmt::Display) {
    println!(
        "{}",
        format!("Unable to find an object with id: {}", id).yellow()
    );
}

fn failure(message: impl std::fmt::Display) {
    println!("{}", message.to_string().red());
}

impl Session {
    pub fn new(client: SmershClient, format: OutputFormat) -> Self {
        Self {
            client,
            context: None,
            format,
        }
    }

    /// Prompt text, e.g. `SMERSH - Mission[42] >> `
    pub fn prompt_text(&self) -> String {
        match &self.context {
            None => "SMERSH >> ".to_string(),
            Some(record) => format!(
                "SMERSH - {}[{}] >> ",
                record.kind().title(),
                record.id().unwrap_or("NEW")
            ),
        }
    }

    /// Run one parsed command
    pub async fn execute(&mut self, command: ShellCommand) -> Result<Flow> {
        debug!("Shell command: {:?}", command);

        match command {
            ShellCommand::Show { kind, ids, raw } => self.show(kind, &ids, raw).await?,
            ShellCommand::Use { kind, id } => self.use_kind(kind, id).await?,
            ShellCommand::Assign { field, values } => self.assign(&field, &values)?,
            ShellCommand::Save => self.save().await,
            ShellCommand::Delete => self.delete().await,
            ShellCommand::Exit => self.exit(),
            ShellCommand::Upload { file } => self.upload(&file).await?,
            ShellCommand::Quit => {
                println!("Bye");
                return Ok(Flow::Quit);
            }
        }

        Ok(Flow::Continue)
    }

    async fn show(&self, kind: Option<ResourceKind>, ids: &[u64], raw: bool) -> Result<()> {
        let Some(kind) = kind else {
            match &self.context {
                None => failure("There is no context"),
                Some(record) => {
                    let records = std::slice::from_ref(record);
                    let output = if raw {
                        render_raw(records)?
                    } else {
                        render(record.kind(), records, self.format, Utc::now())?
                    };
                    println!("{}", output);
                }
            }
            return Ok(());
        };

        let records = if ids.is_empty() {
            kind.all(&self.client).await?
        } else {
            let mut found = Vec::new();
            for id in ids {
                match kind.get(&self.client, &id.to_string()).await {
                    Ok(record) => found.push(record),
                    Err(e) if e.is_not_found() => not_found(id),
                    Err(e) => failure(format!("An HTTP error occurred: {}", e)),
                }
            }

            if found.is_empty() {
                println!("{}", NO_RESULTS);
                return Ok(());
            }
            found
        };

        let output = if raw {
            render_raw(&records)?
        } else {
            render(kind, &records, self.format, Utc::now())?
        };
        println!("{}", output);

        Ok(())
    }

    async fn use_kind(&mut self, kind: ResourceKind, id: Option<u64>) -> Result<()> {
        match id {
            None => self.context = Some(kind.draft()),
            Some(id) => match kind.get(&self.client, &id.to_string()).await {
                Ok(record) => self.context = Some(record),
                Err(e) if e.is_not_found() => not_found(id),
                Err(e) => failure(format!("An HTTP error occurred: {}", e)),
            },
        }

        Ok(())
    }

    fn assign(&mut self, field: &str, values: &[String]) -> Result<()> {
        let Some(record) = self.context.as_mut() else {
            failure("You must enter into a context before setting a field");
            return Ok(());
        };

        let applied = assign::apply(record, field, values, Utc::now())?;
        for item in applied.skipped {
            let item = item.as_str().map(str::to_string).unwrap_or_else(|| item.to_string());
            println!(
                "{}",
                format!(
                    "The item \"{}\" was already added into the field named \"{}\"",
                    item, field
                )
                .yellow()
            );
        }

        Ok(())
    }

    async fn save(&mut self) {
        let Some(record) = self.context.as_mut() else {
            failure("You need to be in a context to save something");
            return;
        };

        if let Err(e) = record.save(&self.client).await {
            failure(format!("Unable to save the object: {}", e));
            return;
        }

        match record.fetch(&self.client).await {
            Ok(fresh) => *record = fresh,
            Err(e) => debug!("Reload after save failed: {}", e),
        }

        println!("{}", "The object was saved successfully".green());
    }

    async fn delete(&mut self) {
        let Some(record) = &self.context else {
            failure("You must be in a context to delete something");
            return;
        };

        if record.is_new() {
            failure("You can't delete a NEW object");
            return;
        }

        match record.delete(&self.client).await {
            Ok(()) => {
                println!("{}", "The object was deleted successfully".green());
                self.context = None;
            }
            Err(e) => failure(format!("Unable to delete the object: {}", e)),
        }
    }

    fn exit(&mut self) {
        if self.context.take().is_none() {
            failure("You have no context to exit");
        }
    }

    async fn upload(&mut self, file: &Path) -> Result<()> {
        if !file.is_file() {
            failure(format!(
                "The file {} does not exist or is not a regular file",
                file.display()
            ));
            return Ok(());
        }

        let Some(Record::Mission(mission)) = &self.context else {
            failure("You must be in a mission context to use this command");
            return Ok(());
        };

        let Some(name) = mission.name.as_deref() else {
            failure("The mission has no name yet");
            return Ok(());
        };

        let progress = spinner(format!("Uploading {}...", file.display()));
        let report = self.client.upload_hosts(file, name).await;
        progress.finish_and_clear();
        let report = report?;

        if !report.rejected_domains.is_empty() {
            println!(
                "{}",
                format!(
                    "{} domains have been rejected:",
                    report.rejected_domains.len()
                )
                .yellow()
            );
            for domain in &report.rejected_domains {
                println!("\t{}", domain.yellow());
            }
        }
        println!("{}", "The hosts file has been successfully uploaded".green());

        if let Some(record) = self.context.as_mut() {
            *record = record.fetch(&self.client).await?;
        }

        Ok(())
    }

    /// Read commands from stdin until `quit` or end of input.
    pub async fn run_loop(&mut self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            print!("{}", self.prompt_text().red().bold());
            io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                println!("\nBye");
                return Ok(());
            };

            let words = match split_line(&line) {
                Ok(words) if words.is_empty() => continue,
                Ok(words) => words,
                Err(e) => {
                    failure(e);
                    continue;
                }
            };

            let command = match ShellLine::try_parse_from(&words) {
                Ok(parsed) => parsed.command,
                Err(e) => {
                    e.print()?;
                    continue;
                }
            };

            match self.execute(command).await {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => return Ok(()),
                Err(Error::Io(e)) => return Err(Error::Io(e)),
                Err(e) => failure(e),
            }
        }
    }
}

/// Log in, then run the shell until the operator leaves.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    println!(
        "{}\n",
        "Welcome to the SMERSH command-line client".bold()
    );

    let Some(_user) = login(&ctx.client, ctx.config.username.as_deref()).await? else {
        println!("\nBye");
        return Ok(());
    };

    println!("Type 'help' for available commands, 'quit' to leave\n");

    let mut session = Session::new(ctx.client, ctx.format);
    session.run_loop().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::Mission;
    use crate::client::smersh::ClientOptions;

    fn session() -> Session {
        let client = SmershClient::new(&ClientOptions::new("http://127.0.0.1:9")).unwrap();
        Session::new(client, OutputFormat::Table)
    }

    #[test]
    fn test_split_line() {
        assert_eq!(
            split_line("assign name \"Acme external\"").unwrap(),
            vec!["assign", "name", "Acme external"]
        );
        assert_eq!(
            split_line("  show   host 1 2 ").unwrap(),
            vec!["show", "host", "1", "2"]
        );
        assert_eq!(
            split_line("assign credentials 'a \"b\"' c\\ d").unwrap(),
            vec!["assign", "credentials", "a \"b\"", "c d"]
        );
        assert_eq!(split_line("assign name \"\"").unwrap(), vec!["assign", "name", ""]);
        assert!(split_line("assign name \"open").is_err());
        assert!(split_line("   ").unwrap().is_empty());
    }

    #[test]
    fn test_prompt_text() {
        let mut session = session();
        assert_eq!(session.prompt_text(), "SMERSH >> ");

        session.context = Some(ResourceKind::Mission.draft());
        assert_eq!(session.prompt_text(), "SMERSH - Mission[NEW] >> ");

        session.context = Some(Record::from(Mission {
            id: Some("42".to_string()),
            ..Default::default()
        }));
        assert_eq!(session.prompt_text(), "SMERSH - Mission[42] >> ");
    }

    #[tokio::test]
    async fn test_local_commands() {
        let mut session = session();

        let flow = session
            .execute(ShellCommand::Use {
                kind: ResourceKind::Host,
                id: None,
            })
            .await
            .unwrap();
        assert_eq!(flow, Flow::Continue);
        assert!(session.context.as_ref().is_some_and(Record::is_new));

        session
            .execute(ShellCommand::Assign {
                field: "name".to_string(),
                values: vec!["www.acme.test".to_string()],
            })
            .await
            .unwrap();

        // Deleting a draft is refused locally
        session.execute(ShellCommand::Delete).await.unwrap();
        assert!(session.context.is_some());

        session.execute(ShellCommand::Exit).await.unwrap();
        assert!(session.context.is_none());

        assert_eq!(
            session.execute(ShellCommand::Quit).await.unwrap(),
            Flow::Quit
        );
    }

    #[tokio::test]
    async fn test_assign_unknown_field_is_an_error() {
        let mut session = session();
        session.context = Some(ResourceKind::Vuln.draft());

        let result = session
            .execute(ShellCommand::Assign {
                field: "colour".to_string(),
                values: vec!["red".to_string()],
            })
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_upload_requires_existing_file() {
        let mut session = session();
        session.context = Some(ResourceKind::Mission.draft());

        let flow = session
            .execute(ShellCommand::Upload {
                file: "/nonexistent/hosts.txt".into(),
            })
            .await
            .unwrap();
        assert_eq!(flow, Flow::Continue);
    }
}
