//! The seal/open transform applied to serialized vault bytes.
//!
//! `VaultFile` holds one `Box<dyn Transform>` chosen at startup and never
//! inspects which implementation it got.

use tracing::debug;
use zeroize::{Zeroize, Zeroizing};

use super::encryption::{decrypt, encrypt};
use super::envelope;
use super::kdf::{derive_master_key, generate_salt, Argon2Params, KEY_LEN};
use super::keys::MasterKey;
use crate::errors::{Result, VaultError};

/// A reversible byte transform for the persisted vault.
pub trait Transform {
    /// Turn plaintext vault bytes into their stored form.
    fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>>;

    /// Recover plaintext vault bytes from their stored form.
    ///
    /// Fails with a crypto error when the input cannot yield valid plaintext.
    fn open(&self, stored: &[u8]) -> Result<Vec<u8>>;
}

/// Stores the vault as plain UTF-8 text.  No confidentiality at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct Passthrough;

impl Transform for Passthrough {
    fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        std::str::from_utf8(plaintext)
            .map_err(|e| VaultError::EncryptionFailed(format!("vault text is not UTF-8: {e}")))?;
        Ok(plaintext.to_vec())
    }

    fn open(&self, stored: &[u8]) -> Result<Vec<u8>> {
        let text = std::str::from_utf8(stored).map_err(|_| {
            VaultError::Crypto("vault is not plain text — is it encrypted?".into())
        })?;
        Ok(text.as_bytes().to_vec())
    }
}

/// AES-256-GCM keyed from a passphrase through Argon2id and HKDF.
///
/// Every `seal` draws a new salt and nonce and writes them into the
/// envelope, so `open` needs nothing but the passphrase.  A lost
/// passphrase cannot be recovered.
pub struct PassphraseSymmetric {
    passphrase: Zeroizing<String>,
    params: Argon2Params,
}

impl PassphraseSymmetric {
    /// Use the default Argon2id cost for sealing.
    pub fn new(passphrase: Zeroizing<String>) -> Self {
        Self::with_params(passphrase, Argon2Params::default())
    }

    /// Use an explicit Argon2id cost for sealing.
    ///
    /// `open` always uses the cost recorded in the envelope instead.
    pub fn with_params(passphrase: Zeroizing<String>, params: Argon2Params) -> Self {
        Self { passphrase, params }
    }

    fn vault_key(&self, salt: &[u8], params: &Argon2Params) -> Result<[u8; KEY_LEN]> {
        let mut master_bytes = derive_master_key(self.passphrase.as_bytes(), salt, params)?;
        let master_key = MasterKey::new(master_bytes);
        master_bytes.zeroize();
        master_key.derive_vault_key()
    }
}

impl Transform for PassphraseSymmetric {
    fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        self.params.validate()?;
        let salt = generate_salt();
        let header = envelope::write_header(&self.params, &salt);

        let mut key = self.vault_key(&salt, &self.params)?;
        let payload = encrypt(&key, plaintext, &header);
        key.zeroize();
        let payload = payload?;

        debug!(
            memory_kib = self.params.memory_kib,
            iterations = self.params.iterations,
            "sealed vault with passphrase"
        );

        let mut out = header;
        out.extend_from_slice(&payload);
        Ok(out)
    }

    fn open(&self, stored: &[u8]) -> Result<Vec<u8>> {
        let parsed = envelope::parse(stored)?;

        let mut key = self.vault_key(parsed.salt, &parsed.params)?;
        let plaintext = decrypt(&key, parsed.payload, parsed.header);
        key.zeroize();

        plaintext
    }
}
