use thiserror::Error;

/// All errors that can occur in pwdvault.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Command errors ---
    #[error("{0}")]
    Validation(String),

    // --- Crypto errors ---
    #[error("Vault cannot be decrypted: {0}")]
    Crypto(String),

    #[error("Decryption failed — wrong master password or corrupted vault")]
    DecryptionFailed,

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Vault errors ---
    #[error("Invalid vault format: {0}")]
    InvalidVaultFormat(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    Config(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    Serialization(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

impl VaultError {
    /// Shorthand for building a validation error from any message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Returns `true` for errors that mean the vault could not be opened.
    pub fn is_crypto(&self) -> bool {
        matches!(
            self,
            Self::Crypto(_) | Self::DecryptionFailed | Self::KeyDerivationFailed(_)
        )
    }

    /// Returns `true` for rejected user input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Process exit code the CLI uses for this error.
    pub fn exit_code(&self) -> i32 {
        if self.is_crypto() {
            2
        } else {
            1
        }
    }
}

/// Convenience type alias for pwdvault results.
pub type Result<T> = std::result::Result<T, VaultError>;
