//! The credential record stored in a vault.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

/// A single login/password record.
///
/// `name` is the primary key inside a `Store`.  `aliases` are secondary
/// lookup keys and must be unique across the whole store; `tags` are free
/// labels with no uniqueness rule.  Both are true sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub login: String,
    pub password: String,

    /// Display-only alternate login label.
    pub login_alias: Option<String>,

    pub aliases: BTreeSet<String>,
    pub tags: BTreeSet<String>,

    /// Set once, when the entry is created.
    pub created_at: DateTime<Utc>,

    /// Refreshed on every mutation; never earlier than `created_at`.
    pub updated_at: DateTime<Utc>,
}

impl Entry {
    /// Build a fresh entry stamped with the current time.
    pub fn new(
        name: impl Into<String>,
        login: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            login: login.into(),
            password: password.into(),
            login_alias: None,
            aliases: BTreeSet::new(),
            tags: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_login_alias(mut self, login_alias: Option<String>) -> Self {
        self.login_alias = login_alias;
        self
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Refresh `updated_at`, keeping it at or after `created_at`.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.created_at);
    }
}
