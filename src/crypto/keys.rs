//! Master key handling and HKDF-SHA256 sub-key derivation.
//!
//! The Argon2id output is never used as a cipher key directly.  The
//! vault encryption key is expanded from it with a fixed context label,
//! so the master key could later feed other purposes without key reuse.

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::Zeroize;

use super::kdf::KEY_LEN;
use crate::errors::{Result, VaultError};

/// HKDF context label for the vault encryption key.
const VAULT_KEY_INFO: &[u8] = b"pwdvault-vault-key";

/// Run HKDF-SHA256 expand with the given `info`.
///
/// The extract step gets no salt: the input already carries the
/// Argon2id salt and has full entropy.
fn hkdf_derive(ikm: &[u8], info: &[u8]) -> Result<[u8; KEY_LEN]> {
    let hk = Hkdf::<Sha256>::new(None, ikm);

    let mut okm = [0u8; KEY_LEN];
    hk.expand(info, &mut okm)
        .map_err(|e| VaultError::KeyDerivationFailed(format!("HKDF expand failed: {e}")))?;

    Ok(okm)
}

/// A 32-byte master key that zeroes its memory when dropped.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct MasterKey {
    bytes: [u8; KEY_LEN],
}

impl MasterKey {
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    /// Derive the AES-256-GCM key that encrypts the vault document.
    ///
    /// Callers must zeroize the returned array after use.
    pub fn derive_vault_key(&self) -> Result<[u8; KEY_LEN]> {
        hkdf_derive(&self.bytes, VAULT_KEY_INFO)
    }
}
