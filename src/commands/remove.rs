//! `pwdvault rm` — delete an entry by name or alias.

use super::{require_non_empty, Operation};
use crate::errors::Result;
use crate::vault::Store;

#[derive(Debug, Clone)]
pub struct RemoveEntry {
    pub key: String,
}

impl RemoveEntry {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Operation for RemoveEntry {
    type Output = bool;

    fn validate(&self, _store: &Store) -> Result<()> {
        require_non_empty(&self.key, "name")
    }

    fn apply(&self, store: &mut Store) -> bool {
        store.remove(&self.key)
    }

    fn render(&self, removed: bool) -> String {
        if removed {
            format!("entry '{}' removed", self.key)
        } else {
            format!("no entry matches '{}', nothing removed", self.key)
        }
    }
}
