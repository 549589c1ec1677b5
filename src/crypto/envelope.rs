//! Binary envelope of a passphrase-sealed vault.
//!
//! ```text
//! [PWDV: 4 bytes][version: 1 byte][memory_kib: u32 LE][iterations: u32 LE]
//! [parallelism: u32 LE][salt: 32 bytes][nonce: 12 bytes][ciphertext + tag]
//! ```
//!
//! Everything up to and including the salt is the *header*.  It is fed
//! to AES-GCM as associated data, so editing the stored KDF parameters
//! or the salt makes `open` fail authentication instead of silently
//! deriving a different key.

use super::encryption::{NONCE_LEN, TAG_LEN};
use super::kdf::{Argon2Params, SALT_LEN};
use crate::errors::{Result, VaultError};

/// Magic bytes at the start of every sealed vault.
pub const MAGIC: &[u8; 4] = b"PWDV";

/// Current envelope version.
pub const CURRENT_VERSION: u8 = 1;

/// 4 (magic) + 1 (version) + 3 * 4 (Argon2 params).
const PREFIX_LEN: usize = 17;

/// Prefix plus salt: the authenticated header.
pub const HEADER_LEN: usize = PREFIX_LEN + SALT_LEN;

/// Parsed view over a sealed vault.
#[derive(Debug)]
pub struct Envelope<'a> {
    pub params: Argon2Params,
    pub salt: &'a [u8],
    /// Raw header bytes exactly as stored, used as AEAD associated data.
    pub header: &'a [u8],
    /// Nonce followed by ciphertext and tag.
    pub payload: &'a [u8],
}

/// Serialize the authenticated header for `params` and `salt`.
pub fn write_header(params: &Argon2Params, salt: &[u8; SALT_LEN]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_LEN);
    buf.extend_from_slice(MAGIC);
    buf.push(CURRENT_VERSION);
    buf.extend_from_slice(&params.memory_kib.to_le_bytes());
    buf.extend_from_slice(&params.iterations.to_le_bytes());
    buf.extend_from_slice(&params.parallelism.to_le_bytes());
    buf.extend_from_slice(salt);
    buf
}

/// Split a sealed vault into its parts, rejecting anything malformed.
pub fn parse(data: &[u8]) -> Result<Envelope<'_>> {
    if data.len() < HEADER_LEN + NONCE_LEN + TAG_LEN {
        return Err(VaultError::Crypto(
            "file too small to be an encrypted vault".into(),
        ));
    }

    if &data[0..4] != MAGIC {
        return Err(VaultError::Crypto(
            "missing PWDV magic bytes — not an encrypted vault".into(),
        ));
    }

    let version = data[4];
    if version != CURRENT_VERSION {
        return Err(VaultError::Crypto(format!(
            "unsupported envelope version {version}, expected {CURRENT_VERSION}"
        )));
    }

    let params = Argon2Params {
        memory_kib: read_u32(data, 5)?,
        iterations: read_u32(data, 9)?,
        parallelism: read_u32(data, 13)?,
    };
    params
        .validate()
        .map_err(|e| VaultError::Crypto(format!("bad key derivation header: {e}")))?;

    Ok(Envelope {
        params,
        salt: &data[PREFIX_LEN..HEADER_LEN],
        header: &data[..HEADER_LEN],
        payload: &data[HEADER_LEN..],
    })
}

fn read_u32(data: &[u8], offset: usize) -> Result<u32> {
    let bytes: [u8; 4] = data[offset..offset + 4]
        .try_into()
        .map_err(|_| VaultError::Crypto("truncated envelope header".into()))?;
    Ok(u32::from_le_bytes(bytes))
}
