//! CLI module — Clap argument parser, password prompts, output helpers
//! and the driver that runs one command against the vault file.

pub mod completions;
pub mod driver;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use zeroize::Zeroizing;

use crate::commands::{AddEntry, Command, ListEntries, RemoveEntry, ShowEntry, UpdateEntry};
use crate::errors::{Result, VaultError};

/// pwdvault CLI: local encrypted credential vault.
#[derive(Parser)]
#[command(
    name = "pwdvault",
    about = "Local encrypted credential vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault file (default: ~/.pwdvault)
    #[arg(short = 'd', long = "vault", env = "PWDVAULT_PATH", global = true)]
    pub vault: Option<PathBuf>,

    /// Master password used to encrypt and decrypt the vault
    #[arg(
        short = 'm',
        long,
        env = "PWDVAULT_PASSWORD",
        hide_env_values = true,
        global = true
    )]
    pub master_password: Option<String>,

    /// Store the vault as plain, unencrypted JSON
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    /// Directory holding config.toml (default: <config dir>/pwdvault)
    #[arg(long, env = "PWDVAULT_CONFIG_DIR", global = true)]
    pub config_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Add a new entry
    Add {
        /// Entry name, must be unique
        name: String,
        /// Account login
        login: String,
        /// Account password
        password: String,
        /// Alternative names for the entry, must be unique
        #[arg(short, long = "alias", num_args = 1..)]
        aliases: Vec<String>,
        /// Tags to categorize the entry
        #[arg(short, long, num_args = 1..)]
        tags: Vec<String>,
        /// Optional login alias for the account
        #[arg(long)]
        login_alias: Option<String>,
    },

    /// Show every field of an entry
    Show {
        /// Full name or alias of an entry
        name: String,
    },

    /// List entries, optionally filtered
    List {
        /// Text to look for in names and aliases
        search: Option<String>,
        /// Text to look for in tags
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Remove an entry
    Rm {
        /// Full name or alias of the entry to remove
        name: String,
    },

    /// Update an existing entry
    Update {
        /// Full name or alias of the entry to update
        name: String,
        /// New login
        #[arg(short, long)]
        login: Option<String>,
        /// New login alias (pass "" to clear it)
        #[arg(long)]
        login_alias: Option<String>,
        /// New password
        #[arg(short, long)]
        password: Option<String>,
        /// Aliases to add
        #[arg(long, num_args = 1..)]
        add_aliases: Vec<String>,
        /// Aliases to remove
        #[arg(long, num_args = 1..)]
        remove_aliases: Vec<String>,
        /// Tags to add
        #[arg(long, num_args = 1..)]
        add_tags: Vec<String>,
        /// Tags to remove
        #[arg(long, num_args = 1..)]
        remove_tags: Vec<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Commands {
    /// Build the vault command for this subcommand.
    ///
    /// Returns `None` for subcommands that never touch the vault.
    pub fn to_command(&self) -> Option<Command> {
        let command = match self {
            Self::Add {
                name,
                login,
                password,
                aliases,
                tags,
                login_alias,
            } => {
                let mut add = AddEntry::new(name, login, password)
                    .aliases(aliases.iter().cloned())
                    .tags(tags.iter().cloned());
                add.login_alias = login_alias.clone();
                add.into()
            }
            Self::Show { name } => ShowEntry::new(name).into(),
            Self::List { search, tag } => ListEntries::new(search.clone(), tag.clone()).into(),
            Self::Rm { name } => RemoveEntry::new(name).into(),
            Self::Update {
                name,
                login,
                login_alias,
                password,
                add_aliases,
                remove_aliases,
                add_tags,
                remove_tags,
            } => UpdateEntry {
                key: name.clone(),
                login: login.clone(),
                password: password.clone(),
                login_alias: login_alias.clone().map(Some),
                add_aliases: add_aliases.iter().cloned().collect(),
                remove_aliases: remove_aliases.iter().cloned().collect(),
                add_tags: add_tags.iter().cloned().collect(),
                remove_tags: remove_tags.iter().cloned().collect(),
            }
            .into(),
            Self::Completions { .. } => return None,
        };
        Some(command)
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` picks debug over warn.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        output::warning("logging was already initialized");
    }
}

/// Get the master password for an existing vault.
///
/// Uses `--master-password` / `PWDVAULT_PASSWORD` when given, otherwise
/// prompts without echo.
pub fn prompt_password(given: Option<&str>) -> Result<Zeroizing<String>> {
    if let Some(pw) = given.filter(|pw| !pw.is_empty()) {
        return Ok(Zeroizing::new(pw.to_string()));
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Master password")
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Get the master password for a vault that does not exist yet.
///
/// The interactive prompt asks twice so a typo cannot lock the user out
/// of a freshly created vault.
pub fn prompt_new_password(given: Option<&str>) -> Result<Zeroizing<String>> {
    if let Some(pw) = given.filter(|pw| !pw.is_empty()) {
        return Ok(Zeroizing::new(pw.to_string()));
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Choose master password")
        .with_confirmation(
            "Confirm master password",
            "Passwords do not match, try again",
        )
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}
