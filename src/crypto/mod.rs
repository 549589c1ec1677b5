//! Cryptographic primitives for pwdvault.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption (`encryption`)
//! - Argon2id passphrase-based key derivation (`kdf`)
//! - Zeroizing master key and HKDF sub-key derivation (`keys`)
//! - The binary layout of a sealed vault (`envelope`)
//! - The `Transform` capability and its two implementations (`transform`)

pub mod encryption;
pub mod envelope;
pub mod kdf;
pub mod keys;
pub mod transform;

pub use encryption::{decrypt, encrypt};
pub use kdf::{derive_master_key, generate_salt, Argon2Params};
pub use keys::MasterKey;
pub use transform::{Passthrough, PassphraseSymmetric, Transform};
