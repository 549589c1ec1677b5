//! `pwdvault add` — create a new entry.

use std::collections::BTreeSet;

use super::{require_free_alias, require_non_empty, require_not_own_name, Operation};
use crate::errors::{Result, VaultError};
use crate::vault::{Entry, Store};

#[derive(Debug, Clone, Default)]
pub struct AddEntry {
    pub name: String,
    pub login: String,
    pub password: String,
    pub login_alias: Option<String>,
    pub aliases: BTreeSet<String>,
    pub tags: BTreeSet<String>,
}

impl AddEntry {
    pub fn new(
        name: impl Into<String>,
        login: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            login: login.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn login_alias(mut self, login_alias: impl Into<String>) -> Self {
        self.login_alias = Some(login_alias.into());
        self
    }

    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

impl Operation for AddEntry {
    type Output = String;

    fn validate(&self, store: &Store) -> Result<()> {
        if self.name.is_empty() || self.login.is_empty() || self.password.is_empty() {
            return Err(VaultError::validation(
                "cannot have a name, login or password empty",
            ));
        }

        if store.contains(&self.name) {
            return Err(VaultError::validation(format!(
                "name '{}' already exists in vault",
                self.name
            )));
        }

        for alias in &self.aliases {
            require_non_empty(alias, "alias")?;
            require_not_own_name(alias, &self.name)?;
            require_free_alias(store, alias, None)?;
        }
        for tag in &self.tags {
            require_non_empty(tag, "tag")?;
        }

        Ok(())
    }

    fn apply(&self, store: &mut Store) -> String {
        let entry = Entry::new(&self.name, &self.login, &self.password)
            .with_login_alias(self.login_alias.clone().filter(|s| !s.is_empty()))
            .with_aliases(self.aliases.iter().cloned())
            .with_tags(self.tags.iter().cloned());
        store.add(entry);
        self.name.clone()
    }

    fn render(&self, name: String) -> String {
        format!("entry '{name}' added")
    }
}
