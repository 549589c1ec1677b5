//! `pwdvault show` — print every field of one entry.

use std::collections::BTreeSet;

use comfy_table::presets::NOTHING;
use comfy_table::Table;

use super::{require_non_empty, Operation};
use crate::errors::Result;
use crate::vault::{Entry, Store};

/// Timestamp layout used in rendered output.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct ShowEntry {
    /// Name or alias to look up.
    pub key: String,
}

impl ShowEntry {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

fn join(set: &BTreeSet<String>) -> String {
    set.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// Render an entry as a borderless two-column table.
pub fn render_entry(entry: &Entry) -> String {
    let mut table = Table::new();
    table.load_preset(NOTHING);

    table.add_row(vec!["name".to_string(), entry.name.clone()]);
    table.add_row(vec!["login".to_string(), entry.login.clone()]);
    if let Some(login_alias) = &entry.login_alias {
        table.add_row(vec!["login alias".to_string(), login_alias.clone()]);
    }
    table.add_row(vec!["password".to_string(), entry.password.clone()]);
    if !entry.aliases.is_empty() {
        table.add_row(vec!["aliases".to_string(), join(&entry.aliases)]);
    }
    if !entry.tags.is_empty() {
        table.add_row(vec!["tags".to_string(), join(&entry.tags)]);
    }
    table.add_row(vec![
        "created".to_string(),
        entry.created_at.format(TIME_FORMAT).to_string(),
    ]);
    table.add_row(vec![
        "updated".to_string(),
        entry.updated_at.format(TIME_FORMAT).to_string(),
    ]);

    table
        .lines()
        .map(|line| line.trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

impl Operation for ShowEntry {
    type Output = Option<Entry>;

    fn validate(&self, _store: &Store) -> Result<()> {
        require_non_empty(&self.key, "search key")
    }

    fn apply(&self, store: &mut Store) -> Option<Entry> {
        store.lookup(&self.key).cloned()
    }

    /// Empty string when nothing matched.
    fn render(&self, output: Option<Entry>) -> String {
        output.as_ref().map(render_entry).unwrap_or_default()
    }
}
