//! Reading and writing the vault file.
//!
//! `VaultFile` composes the codec with one `Transform`:
//!
//! ```text
//! load: bytes on disk --open--> JSON --decode--> Store
//! save: Store --encode--> JSON --seal--> bytes on disk
//! ```

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::codec;
use super::store::Store;
use crate::crypto::Transform;
use crate::errors::Result;

pub struct VaultFile {
    path: PathBuf,
    transform: Box<dyn Transform>,
}

impl VaultFile {
    pub fn new(path: impl Into<PathBuf>, transform: Box<dyn Transform>) -> Self {
        Self {
            path: path.into(),
            transform,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the store, or start an empty one when no vault file exists yet.
    ///
    /// A vault that cannot be opened fails here, before any command runs.
    pub fn load(&self) -> Result<Store> {
        if !self.exists() {
            debug!(path = %self.path.display(), "no vault file, starting empty");
            return Ok(Store::new());
        }

        let stored = fs::read(&self.path)?;
        let plaintext = self.transform.open(&stored)?;
        let store = codec::from_bytes(&plaintext)?;

        debug!(path = %self.path.display(), entries = store.len(), "vault loaded");
        Ok(store)
    }

    /// Seal and write the store, then clear its dirty flag.
    pub fn save(&self, store: &mut Store) -> Result<()> {
        let plaintext = codec::to_bytes(store)?;
        let sealed = self.transform.seal(&plaintext)?;
        write_atomic(&self.path, &sealed)?;
        store.mark_clean();

        debug!(path = %self.path.display(), entries = store.len(), "vault saved");
        Ok(())
    }

    /// Save only when the store holds unsaved changes.
    ///
    /// Returns whether a write happened.
    pub fn save_if_needed(&self, store: &mut Store) -> Result<bool> {
        if !store.is_dirty() {
            debug!("vault unchanged, not saving");
            return Ok(false);
        }
        self.save(store)?;
        Ok(true)
    }
}

/// Write `data` to a temp file next to `path`, then rename it over `path`.
///
/// Readers never see a half-written vault.  The parent directory is
/// created if needed, and the temp file is removed if anything fails.
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    let written = write_private(&tmp_path, data).and_then(|()| {
        fs::rename(&tmp_path, path)?;
        Ok(())
    });
    if written.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    written
}

/// Create (or truncate) `path` readable by the owner only, and fill it.
fn write_private(path: &Path, data: &[u8]) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    // `mode` only applies on creation; a stale temp file keeps its bits.
    restrict_permissions(path)?;
    file.write_all(data)?;
    file.sync_all()?;
    Ok(())
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
