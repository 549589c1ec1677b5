use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::Argon2Params;
use crate::errors::{Result, VaultError};

/// Default vault file name in the user's home directory.
pub const DEFAULT_VAULT_FILE: &str = ".pwdvault";

/// User-level configuration, loaded from `<config_dir>/pwdvault/config.toml`.
///
/// Every field has a sensible default so pwdvault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Vault file to use when no `--vault` flag or env var is given.
    #[serde(default)]
    pub vault_path: Option<PathBuf>,

    /// `false` stores the vault as plain JSON.
    #[serde(default = "default_encrypt")]
    pub encrypt: bool,

    /// Argon2 memory cost in KiB (default: 64 MB).
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,

    /// Argon2 iteration count (default: 3).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2 parallelism degree (default: 4).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_encrypt() -> bool {
    true
}

fn default_argon2_memory_kib() -> u32 {
    65_536 // 64 MB
}

fn default_argon2_iterations() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_path: None,
            encrypt: default_encrypt(),
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
        }
    }
}

impl Settings {
    /// Name of the config file inside the config directory.
    const FILE_NAME: &'static str = "config.toml";

    /// `<config_dir>/pwdvault`, if the platform has a config directory.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("pwdvault"))
    }

    /// Load settings from the user config directory.
    pub fn load_default() -> Result<Self> {
        match Self::config_dir() {
            Some(dir) => Self::load(&dir),
            None => Ok(Self::default()),
        }
    }

    /// Load settings from `<dir>/config.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            VaultError::Config(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// The configured vault path, or `~/.pwdvault`.
    pub fn vault_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.vault_path {
            return Ok(path.clone());
        }
        dirs::home_dir()
            .map(|home| home.join(DEFAULT_VAULT_FILE))
            .ok_or_else(|| {
                VaultError::Config("cannot find home directory — pass --vault <path>".into())
            })
    }

    /// Convert the Argon2 settings into crypto-layer params.
    pub fn argon2_params(&self) -> Argon2Params {
        Argon2Params {
            memory_kib: self.argon2_memory_kib,
            iterations: self.argon2_iterations,
            parallelism: self.argon2_parallelism,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
