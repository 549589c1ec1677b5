//! Wire one CLI invocation to the vault:
//! load (or init) → validate → apply → render → save if changed.

use std::path::PathBuf;

use tracing::debug;

use crate::cli::{output, prompt_new_password, prompt_password, Cli};
use crate::commands::Command;
use crate::config::Settings;
use crate::crypto::{Passthrough, PassphraseSymmetric, Transform};
use crate::errors::Result;
use crate::vault::VaultFile;

/// Load settings from `--config-dir` or the user config directory.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    match &cli.config_dir {
        Some(dir) => Settings::load(dir),
        None => Settings::load_default(),
    }
}

/// Resolve the vault file: `--vault` / `PWDVAULT_PATH`, then settings.
pub fn resolve_vault_path(cli: &Cli, settings: &Settings) -> Result<PathBuf> {
    match &cli.vault {
        Some(path) => Ok(path.clone()),
        None => settings.vault_path(),
    }
}

/// Pick the transform for this run.  Prompts for the master password
/// when the vault is encrypted and none was given.
pub fn build_transform(
    cli: &Cli,
    settings: &Settings,
    vault_exists: bool,
) -> Result<Box<dyn Transform>> {
    if cli.no_encrypt || !settings.encrypt {
        debug!("using passthrough transform");
        return Ok(Box::new(Passthrough));
    }

    let given = cli.master_password.as_deref();
    let password = if vault_exists {
        prompt_password(given)?
    } else {
        prompt_new_password(given)?
    };

    Ok(Box::new(PassphraseSymmetric::with_params(
        password,
        settings.argon2_params(),
    )))
}

/// Run `command` against the vault file described by `cli`.
///
/// Returns the rendered result.  The vault is written only if the
/// command changed the store.
pub fn run(cli: &Cli, command: &Command) -> Result<String> {
    let settings = load_settings(cli)?;
    let path = resolve_vault_path(cli, &settings)?;
    let exists = path.exists();

    let transform = build_transform(cli, &settings, exists)?;
    let vault = VaultFile::new(path, transform);

    let mut store = vault.load()?;
    debug!(command = command.name(), entries = store.len(), "executing command");

    let rendered = command.execute(&mut store)?;

    if vault.save_if_needed(&mut store)? && !exists {
        output::info(&format!("Created vault at {}", vault.path().display()));
    }

    Ok(rendered)
}
