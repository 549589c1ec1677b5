//! `pwdvault update` — change fields, aliases and tags of an entry.

use std::collections::BTreeSet;

use super::{require_free_alias, require_non_empty, require_not_own_name, Operation};
use crate::errors::{Result, VaultError};
use crate::vault::{Entry, Store};

#[derive(Debug, Clone, Default)]
pub struct UpdateEntry {
    /// Name or alias of the entry to change.
    pub key: String,

    pub login: Option<String>,
    pub password: Option<String>,

    /// `Some(None)` clears the login alias; `None` leaves it alone.
    pub login_alias: Option<Option<String>>,

    pub add_aliases: BTreeSet<String>,
    pub remove_aliases: BTreeSet<String>,
    pub add_tags: BTreeSet<String>,
    pub remove_tags: BTreeSet<String>,
}

impl UpdateEntry {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Aliases that end up added once removals have been taken out.
    fn net_added_aliases(&self) -> impl Iterator<Item = &String> {
        self.add_aliases.difference(&self.remove_aliases)
    }

    fn edit(&self, entry: &mut Entry) {
        if let Some(login) = &self.login {
            entry.login = login.clone();
        }
        if let Some(password) = &self.password {
            entry.password = password.clone();
        }
        if let Some(login_alias) = &self.login_alias {
            entry.login_alias = login_alias.clone().filter(|s| !s.is_empty());
        }

        // Removal wins when a value is both added and removed.
        entry.aliases.extend(self.add_aliases.iter().cloned());
        entry.aliases.retain(|a| !self.remove_aliases.contains(a));
        entry.tags.extend(self.add_tags.iter().cloned());
        entry.tags.retain(|t| !self.remove_tags.contains(t));
    }
}

impl Operation for UpdateEntry {
    /// Name of the updated entry, if the key resolved.
    type Output = Option<String>;

    fn validate(&self, store: &Store) -> Result<()> {
        require_non_empty(&self.key, "name")?;

        if self.login.as_deref() == Some("") {
            return Err(VaultError::validation("login cannot be set to empty"));
        }
        if self.password.as_deref() == Some("") {
            return Err(VaultError::validation("password cannot be set to empty"));
        }
        for alias in &self.add_aliases {
            require_non_empty(alias, "alias")?;
        }
        for tag in &self.add_tags {
            require_non_empty(tag, "tag")?;
        }

        // An unknown key is reported by `render`, not rejected here.
        if let Some(target) = store.resolve(&self.key) {
            for alias in self.net_added_aliases() {
                require_not_own_name(alias, target)?;
                require_free_alias(store, alias, Some(target))?;
            }
        }

        Ok(())
    }

    fn apply(&self, store: &mut Store) -> Option<String> {
        store.modify(&self.key, |entry| self.edit(entry))
    }

    fn render(&self, output: Option<String>) -> String {
        match output {
            Some(name) => format!("entry '{name}' updated"),
            None => format!("no entry found for '{}'", self.key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn two_entries() -> Store {
        let mut store = Store::new();
        store.add(Entry::new("entry1", "l", "p"));
        store.add(Entry::new("entry2", "l", "p").with_aliases(["alias2"]));
        store
    }

    #[test]
    fn validate_checks_alias_collisions() {
        let store = two_entries();

        let mut com = UpdateEntry::new("");
        assert!(com.validate(&store).is_err());

        com.key = "not existing entry".into();
        com.add_aliases = set(&["entry2"]);
        assert!(com.validate(&store).is_ok());

        com.key = "entry1".into();
        assert!(com.validate(&store).is_err());

        com.remove_aliases = set(&["entry2"]);
        assert!(com.validate(&store).is_ok());

        com.add_aliases = set(&["alias2"]);
        assert!(com.validate(&store).is_err());
    }

    #[test]
    fn own_alias_is_not_a_collision() {
        let store = two_entries();
        let mut com = UpdateEntry::new("entry2");
        com.add_aliases = set(&["alias2"]);
        assert!(com.validate(&store).is_ok());
    }

    #[test]
    fn rejects_own_name_as_alias() {
        let store = two_entries();
        let mut com = UpdateEntry::new("alias2");
        com.add_aliases = set(&["entry2"]);
        assert!(com.validate(&store).unwrap_err().is_validation());

        com.remove_aliases = set(&["entry2"]);
        assert!(com.validate(&store).is_ok());
    }

    #[test]
    fn rejects_empty_new_values() {
        let store = two_entries();
        let mut com = UpdateEntry::new("entry1");
        com.password = Some(String::new());
        assert!(com.validate(&store).is_err());

        let mut com = UpdateEntry::new("entry1");
        com.login = Some(String::new());
        assert!(com.validate(&store).is_err());
    }

    #[test]
    fn unknown_key_renders_not_found_and_keeps_store_clean() {
        let mut store = Store::new();
        let mut com = UpdateEntry::new("name");
        com.password = Some("new_pwd".into());
        let out = com.execute(&mut store).unwrap();
        assert_eq!(out, "no entry found for 'name'");
        assert!(!store.is_dirty());
    }

    #[test]
    fn apply_changes_fields_and_sets() {
        let mut store = Store::new();
        let mut entry = Entry::new("name", "login", "old_pwd");
        entry.created_at -= chrono::Duration::days(1);
        entry.updated_at = entry.created_at;
        let before = entry.updated_at;
        store.add(entry);

        let mut com = UpdateEntry::new("name");
        com.password = Some("new_pwd".into());
        com.add_aliases = set(&["alias_to_keep", "alias_to_rm"]);
        com.remove_aliases = set(&["alias_to_rm"]);
        com.add_tags = set(&["tag_to_keep", "tag_to_rm"]);
        com.remove_tags = set(&["tag_to_rm", "never_there"]);

        assert_eq!(com.apply(&mut store).as_deref(), Some("name"));
        assert!(store.is_dirty());

        let e = store.lookup("name").unwrap();
        assert_eq!(e.password, "new_pwd");
        assert_eq!(e.aliases, set(&["alias_to_keep"]));
        assert_eq!(e.tags, set(&["tag_to_keep"]));
        assert!(e.updated_at > before);

        let mut com = UpdateEntry::new("alias_to_keep");
        com.login = Some("new_login".into());
        com.login_alias = Some(Some("new_login_alias".into()));
        assert_eq!(com.execute(&mut store).unwrap(), "entry 'name' updated");
        let e = store.lookup("name").unwrap();
        assert_eq!(e.login, "new_login");
        assert_eq!(e.login_alias.as_deref(), Some("new_login_alias"));

        let mut com = UpdateEntry::new("name");
        com.login_alias = Some(None);
        com.execute(&mut store).unwrap();
        assert!(store.lookup("name").unwrap().login_alias.is_none());
    }

    #[test]
    fn add_and_remove_same_alias_leaves_set_unchanged() {
        let mut store = two_entries();
        store.modify("entry1", |e| {
            e.aliases.insert("keep".into());
        });

        // "alias2" already belongs to entry2, but add+remove cancels out.
        let mut com = UpdateEntry::new("entry1");
        com.add_aliases = set(&["alias2"]);
        com.remove_aliases = set(&["alias2"]);
        com.execute(&mut store).unwrap();

        assert_eq!(store.lookup("entry1").unwrap().aliases, set(&["keep"]));
        assert_eq!(store.lookup("alias2").unwrap().name, "entry2");
    }
}
