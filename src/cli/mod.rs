//! CLI command definitions and handlers

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
pub use clap_complete::Shell;

use crate::client::models::ResourceKind;

pub mod args;
pub mod assign;
pub mod context;
pub mod init;
pub mod login;
pub mod render;
pub mod shell;
pub mod status;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

/// SMERSH CLI - command-line client for the SMERSH collaborative pentest platform
#[derive(Parser, Debug)]
#[command(name = "smersh")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute (defaults to the interactive shell)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// URL of the SMERSH backend server
    #[arg(long, global = true, env = "SMERSH_URL", hide_env = true)]
    pub url: Option<String>,

    /// PEM certificate used to verify the server
    #[arg(short = 'c', long, global = true, env = "SMERSH_CERTIFICATE", hide_env = true)]
    pub certificate: Option<PathBuf>,

    /// Do not verify the server certificate
    #[arg(short = 'k', long, global = true)]
    pub insecure: bool,

    /// Login name (prompted when missing)
    #[arg(short = 'u', long, global = true, env = "SMERSH_USERNAME", hide_env = true)]
    pub username: Option<String>,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "SMERSH_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "SMERSH_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "SMERSH_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and start the interactive shell
    Shell,

    /// Initialize SMERSH configuration
    Init,

    /// Show configuration status
    Status,

    /// Display version information
    Version,

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   smersh completion bash > /etc/bash_completion.d/smersh
  zsh:    smersh completion zsh > \"${fpath[1]}/_smersh\"
  fish:   smersh completion fish > ~/.config/fish/completions/smersh.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Print static completions for `shell` on stdout
pub fn print_completions(shell: Shell) {
    let mut command = Cli::command();
    clap_complete::generate(shell, &mut command, "smersh", &mut std::io::stdout());
}

/// One line typed at the shell prompt
#[derive(Parser, Debug)]
#[command(
    name = "smersh",
    no_binary_name = true,
    disable_version_flag = true,
    subcommand_required = true
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

/// Interactive shell commands
#[derive(Subcommand, Debug, PartialEq)]
pub enum ShellCommand {
    /// Print objects, or the current context when no type is given
    #[command(after_help = "EXAMPLES:\n  \
            show mission           # Every mission\n  \
            show host 3 4          # Hosts 3 and 4\n  \
            show -r                # Current context as raw JSON")]
    Show {
        /// Object type to query
        #[arg(value_enum, hide_possible_values = true)]
        kind: Option<ResourceKind>,

        /// Identifiers of specific objects (every object when empty)
        ids: Vec<u64>,

        /// Print raw JSON instead of a table
        #[arg(short, long)]
        raw: bool,
    },

    /// Change the current context. Unsaved changes are lost
    Use {
        /// Object type
        #[arg(value_enum, hide_possible_values = true)]
        kind: ResourceKind,

        /// Identifier of the object (a new object is drafted when omitted)
        id: Option<u64>,
    },

    /// Set a field of the current context
    #[command(after_help = "EXAMPLES:\n  \
            assign name \"Acme external\"\n  \
            assign nmap yes\n  \
            assign end_date now\n  \
            assign users add 3 4\n  \
            assign hosts remove 12")]
    Assign {
        /// Field name
        field: String,

        /// New value, or `add`/`remove` followed by items for list fields
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        values: Vec<String>,
    },

    /// Create or update the current context
    Save,

    /// Delete the current context
    Delete,

    /// Leave the current context. Unsaved changes are lost
    Exit,

    /// Upload a hosts file into the current mission
    Upload {
        /// Path of the file to upload
        file: PathBuf,
    },

    /// Leave the shell
    #[command(visible_alias = "q")]
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &[&str]) -> ShellCommand {
        ShellLine::try_parse_from(line).unwrap().command
    }

    #[test]
    fn test_cli_defaults_to_shell() {
        let cli = Cli::try_parse_from(["smersh", "--url", "https://smersh.test"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_show() {
        assert_eq!(
            parse(&["show", "host_vuln", "3", "4", "-r"]),
            ShellCommand::Show {
                kind: Some(ResourceKind::HostVuln),
                ids: vec![3, 4],
                raw: true,
            }
        );
        assert_eq!(
            parse(&["show"]),
            ShellCommand::Show {
                kind: None,
                ids: vec![],
                raw: false,
            }
        );
    }

    #[test]
    fn test_parse_use() {
        assert_eq!(
            parse(&["use", "mission"]),
            ShellCommand::Use {
                kind: ResourceKind::Mission,
                id: None,
            }
        );
        assert_eq!(
            parse(&["use", "positive_point", "8"]),
            ShellCommand::Use {
                kind: ResourceKind::PositivePoint,
                id: Some(8),
            }
        );
    }

    #[test]
    fn test_parse_rejects_bad_ids_and_types() {
        assert!(ShellLine::try_parse_from(["use", "mission", "abc"]).is_err());
        assert!(ShellLine::try_parse_from(["use", "mission", "-3"]).is_err());
        assert!(ShellLine::try_parse_from(["use", "spaceship"]).is_err());
        assert!(ShellLine::try_parse_from(["assign", "name"]).is_err());
    }

    #[test]
    fn test_parse_assign() {
        assert_eq!(
            parse(&["assign", "users", "add", "3", "4"]),
            ShellCommand::Assign {
                field: "users".to_string(),
                values: vec!["add".to_string(), "3".to_string(), "4".to_string()],
            }
        );
    }

    #[test]
    fn test_cli_debug_asserts() {
        Cli::command().debug_assert();
        ShellLine::command().debug_assert();
    }
}
