//! Vault module — the encrypted record store.
//!
//! This module provides:
//! - The `Entry` credential record (`entry`)
//! - The in-memory `Store` with alias lookup and search (`store`)
//! - JSON document encoding of a store (`codec`)
//! - `VaultFile`, which loads and saves a store through a transform (`file`)

pub mod codec;
pub mod entry;
pub mod file;
pub mod store;

pub use entry::Entry;
pub use file::VaultFile;
pub use store::Store;
