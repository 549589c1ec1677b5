//! `pwdvault list` — search entries by name/alias and tag.

use super::{require_non_empty, Operation};
use crate::errors::Result;
use crate::vault::{Entry, Store};

/// Message rendered when no entry matches.
pub const NO_MATCH: &str = "no entry matches the search";

#[derive(Debug, Clone, Default)]
pub struct ListEntries {
    /// Substring of a name or alias.
    pub search: Option<String>,
    /// Substring of a tag.
    pub tag: Option<String>,
}

impl ListEntries {
    pub fn new(search: Option<String>, tag: Option<String>) -> Self {
        Self { search, tag }
    }

    pub fn all() -> Self {
        Self::default()
    }
}

fn summary(entry: &Entry) -> String {
    format!(
        "name: {}\nlogin: {}\npassword: {}",
        entry.name, entry.login, entry.password
    )
}

impl Operation for ListEntries {
    type Output = Vec<Entry>;

    /// An empty filter is an error, not "no filter".
    fn validate(&self, _store: &Store) -> Result<()> {
        if let Some(search) = &self.search {
            require_non_empty(search, "search filter")?;
        }
        if let Some(tag) = &self.tag {
            require_non_empty(tag, "tag filter")?;
        }
        Ok(())
    }

    fn apply(&self, store: &mut Store) -> Vec<Entry> {
        store
            .search(self.search.as_deref(), self.tag.as_deref())
            .into_iter()
            .cloned()
            .collect()
    }

    fn render(&self, entries: Vec<Entry>) -> String {
        if entries.is_empty() {
            return NO_MATCH.to_string();
        }
        entries.iter().map(summary).collect::<Vec<_>>().join("\n\n")
    }
}
