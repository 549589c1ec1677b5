//! User operations on a `Store`.
//!
//! Every command runs in three fixed phases: `validate` against the
//! current store, `apply` the change, `render` the result as text.
//! `apply` never runs when `validate` fails, so a rejected command
//! leaves the store untouched and clean.

pub mod add;
pub mod list;
pub mod remove;
pub mod show;
pub mod update;

pub use add::AddEntry;
pub use list::ListEntries;
pub use remove::RemoveEntry;
pub use show::ShowEntry;
pub use update::UpdateEntry;

use crate::errors::{Result, VaultError};
use crate::vault::Store;

/// The three-phase contract shared by all commands.
pub trait Operation {
    /// What `apply` hands to `render`.
    type Output;

    /// Check the command's preconditions against `store`.
    fn validate(&self, store: &Store) -> Result<()>;

    /// Perform the command.  Only called after `validate` succeeded.
    fn apply(&self, store: &mut Store) -> Self::Output;

    /// Turn the outcome into the text shown to the user.
    fn render(&self, output: Self::Output) -> String;

    /// Run validate, apply and render in order.
    fn execute(&self, store: &mut Store) -> Result<String> {
        self.validate(store)?;
        let output = self.apply(store);
        Ok(self.render(output))
    }
}

/// One variant per user operation.
#[derive(Debug, Clone)]
pub enum Command {
    Add(AddEntry),
    Show(ShowEntry),
    List(ListEntries),
    Remove(RemoveEntry),
    Update(UpdateEntry),
}

impl Command {
    /// Validate, apply and render the wrapped command.
    pub fn execute(&self, store: &mut Store) -> Result<String> {
        match self {
            Self::Add(c) => c.execute(store),
            Self::Show(c) => c.execute(store),
            Self::List(c) => c.execute(store),
            Self::Remove(c) => c.execute(store),
            Self::Update(c) => c.execute(store),
        }
    }

    /// Short command name, used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Show(_) => "show",
            Self::List(_) => "list",
            Self::Remove(_) => "rm",
            Self::Update(_) => "update",
        }
    }
}

impl From<AddEntry> for Command {
    fn from(c: AddEntry) -> Self {
        Self::Add(c)
    }
}

impl From<ShowEntry> for Command {
    fn from(c: ShowEntry) -> Self {
        Self::Show(c)
    }
}

impl From<ListEntries> for Command {
    fn from(c: ListEntries) -> Self {
        Self::List(c)
    }
}

impl From<RemoveEntry> for Command {
    fn from(c: RemoveEntry) -> Self {
        Self::Remove(c)
    }
}

impl From<UpdateEntry> for Command {
    fn from(c: UpdateEntry) -> Self {
        Self::Update(c)
    }
}

/// Fail with a validation error when `value` is empty.
pub(crate) fn require_non_empty(value: &str, what: &str) -> Result<()> {
    if value.is_empty() {
        return Err(VaultError::validation(format!("{what} cannot be empty")));
    }
    Ok(())
}

/// Fail when `alias` repeats the name of the entry that would carry it.
pub(crate) fn require_not_own_name(alias: &str, name: &str) -> Result<()> {
    if alias == name {
        return Err(VaultError::validation(format!(
            "alias '{alias}' is the entry's own name"
        )));
    }
    Ok(())
}

/// Fail when `key` already names or aliases an entry other than `owner`.
pub(crate) fn require_free_alias(store: &Store, key: &str, owner: Option<&str>) -> Result<()> {
    match store.resolve(key) {
        Some(existing) if Some(existing) != owner => Err(VaultError::validation(format!(
            "alias '{key}' already exists in vault"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::Entry;

    struct Probe {
        valid: bool,
    }

    impl Operation for Probe {
        type Output = usize;

        fn validate(&self, _store: &Store) -> Result<()> {
            if self.valid {
                Ok(())
            } else {
                Err(VaultError::validation("rejected"))
            }
        }

        fn apply(&self, store: &mut Store) -> usize {
            store.add(Entry::new("probe", "l", "p"));
            store.len()
        }

        fn render(&self, output: usize) -> String {
            format!("{output} entries")
        }
    }

    #[test]
    fn execute_runs_phases_in_order() {
        let mut store = Store::new();
        let out = Probe { valid: true }.execute(&mut store).unwrap();
        assert_eq!(out, "1 entries");
        assert!(store.is_dirty());
    }

    #[test]
    fn failed_validation_skips_apply() {
        let mut store = Store::new();
        let err = Probe { valid: false }.execute(&mut store).unwrap_err();
        assert!(err.is_validation());
        assert!(store.is_empty());
        assert!(!store.is_dirty());
    }

    #[test]
    fn alias_must_differ_from_owner_name() {
        assert!(require_not_own_name("github", "github").is_err());
        assert!(require_not_own_name("gh", "github").is_ok());
    }

    #[test]
    fn free_alias_allows_own_entry() {
        let mut store = Store::new();
        store.add(Entry::new("github", "l", "p").with_aliases(["gh"]));
        assert!(require_free_alias(&store, "gh", Some("github")).is_ok());
        assert!(require_free_alias(&store, "gh", None).is_err());
        assert!(require_free_alias(&store, "github", Some("other")).is_err());
        assert!(require_free_alias(&store, "new", None).is_ok());
    }
}
