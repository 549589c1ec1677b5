//! Conversion between a `Store` and its JSON document form.
//!
//! The document is an object mapping entry name to entry object:
//!
//! ```json
//! {
//!   "github": {
//!     "__type__": "pwdvault.entry",
//!     "name": "github", "login": "alice", "pwd": "s3cr3t",
//!     "aliases": ["gh"], "tags": ["work"],
//!     "creation_date": "2026-01-02T03:04:05Z",
//!     "last_update_date": "2026-01-02T03:04:05Z"
//!   }
//! }
//! ```
//!
//! `login_alias`, `aliases` and `tags` are left out when empty.  Only
//! objects carrying the `__type__` marker are read as entries; anything
//! else is passed through untouched.  A top-level entry must be stored
//! under its own name.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use super::entry::Entry;
use super::store::Store;
use crate::errors::{Result, VaultError};

/// Field that marks an object as an entry.
pub const TYPE_FIELD: &str = "__type__";

/// Marker value for entry objects.
pub const ENTRY_MARKER: &str = "pwdvault.entry";

/// On-disk shape of an entry.
#[derive(Debug, Serialize, Deserialize)]
struct EntryRecord {
    #[serde(rename = "__type__")]
    kind: String,

    name: String,
    login: String,
    pwd: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    login_alias: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    aliases: BTreeSet<String>,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    tags: BTreeSet<String>,

    creation_date: DateTime<Utc>,
    last_update_date: DateTime<Utc>,
}

impl From<&Entry> for EntryRecord {
    fn from(e: &Entry) -> Self {
        Self {
            kind: ENTRY_MARKER.to_string(),
            name: e.name.clone(),
            login: e.login.clone(),
            pwd: e.password.clone(),
            login_alias: e.login_alias.clone(),
            aliases: e.aliases.clone(),
            tags: e.tags.clone(),
            creation_date: e.created_at,
            last_update_date: e.updated_at,
        }
    }
}

impl From<EntryRecord> for Entry {
    fn from(r: EntryRecord) -> Self {
        Self {
            name: r.name,
            login: r.login,
            password: r.pwd,
            login_alias: r.login_alias,
            aliases: r.aliases,
            tags: r.tags,
            created_at: r.creation_date,
            updated_at: r.last_update_date,
        }
    }
}

/// Result of decoding one JSON value.
#[derive(Debug)]
pub enum Decoded {
    Entry(Entry),
    Other(Value),
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Encode a single entry as a tagged JSON object.
pub fn encode_entry(entry: &Entry) -> Result<Value> {
    serde_json::to_value(EntryRecord::from(entry))
        .map_err(|e| VaultError::Serialization(format!("entry '{}': {e}", entry.name)))
}

/// Encode the whole store as a document object.
pub fn encode(store: &Store) -> Result<Value> {
    let mut doc = Map::new();
    for (key, value) in store.auxiliary() {
        doc.insert(key.clone(), value.clone());
    }
    for entry in store.entries() {
        doc.insert(entry.name.clone(), encode_entry(entry)?);
    }
    Ok(Value::Object(doc))
}

/// Encode the store as pretty-printed UTF-8 JSON bytes.
pub fn to_bytes(store: &Store) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(&encode(store)?)
        .map_err(|e| VaultError::Serialization(format!("vault document: {e}")))
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

fn is_entry_object(obj: &Map<String, Value>) -> bool {
    obj.get(TYPE_FIELD).and_then(Value::as_str) == Some(ENTRY_MARKER)
}

/// Decode any JSON value, turning tagged objects into entries.
///
/// Untagged objects and arrays are walked so nested entries come out
/// normalized; every other value is returned as-is.
pub fn decode_value(value: Value) -> Result<Decoded> {
    match value {
        Value::Object(obj) if is_entry_object(&obj) => {
            let record: EntryRecord = serde_json::from_value(Value::Object(obj))
                .map_err(|e| VaultError::InvalidVaultFormat(format!("entry object: {e}")))?;
            Ok(Decoded::Entry(record.into()))
        }
        Value::Object(obj) => {
            let mut out = Map::with_capacity(obj.len());
            for (key, child) in obj {
                out.insert(key, passthrough(child)?);
            }
            Ok(Decoded::Other(Value::Object(out)))
        }
        Value::Array(items) => {
            let items = items
                .into_iter()
                .map(passthrough)
                .collect::<Result<Vec<_>>>()?;
            Ok(Decoded::Other(Value::Array(items)))
        }
        other => Ok(Decoded::Other(other)),
    }
}

/// Decode a nested value and fold it back into JSON.
fn passthrough(value: Value) -> Result<Value> {
    match decode_value(value)? {
        Decoded::Entry(entry) => encode_entry(&entry),
        Decoded::Other(v) => Ok(v),
    }
}

/// Decode a document object into a clean `Store`.
pub fn decode(doc: Value) -> Result<Store> {
    let Value::Object(obj) = doc else {
        return Err(VaultError::InvalidVaultFormat(
            "vault document must be a JSON object".into(),
        ));
    };

    let mut entries = BTreeMap::new();
    let mut auxiliary = BTreeMap::new();

    for (key, value) in obj {
        match decode_value(value)? {
            Decoded::Entry(entry) => {
                if entry.name != key {
                    return Err(VaultError::InvalidVaultFormat(format!(
                        "entry stored under '{key}' is named '{}'",
                        entry.name
                    )));
                }
                if entry.updated_at < entry.created_at {
                    warn!(name = %entry.name, "entry was updated before it was created");
                }
                entries.insert(key, entry);
            }
            Decoded::Other(value) => {
                auxiliary.insert(key, value);
            }
        }
    }

    Ok(Store::from_parts(entries, auxiliary))
}

/// Parse UTF-8 JSON bytes into a clean `Store`.
pub fn from_bytes(bytes: &[u8]) -> Result<Store> {
    let doc: Value = serde_json::from_slice(bytes)
        .map_err(|e| VaultError::InvalidVaultFormat(format!("vault JSON: {e}")))?;
    decode(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_entry(name: &str) -> Entry {
        Entry::new(name, "test_login", "test_pwd")
            .with_login_alias(Some("test_login_alias".into()))
            .with_aliases([format!("{name}-alias1"), format!("{name}-alias2")])
            .with_tags(["tag1", "tag2"])
    }

    fn roundtrip(store: &Store) -> Store {
        from_bytes(&to_bytes(store).unwrap()).unwrap()
    }

    #[test]
    fn roundtrip_preserves_every_field() {
        let mut store = Store::new();
        store.add(full_entry("full"));
        store.add(Entry::new("min", "l", "p"));

        let back = roundtrip(&store);
        assert_eq!(back.len(), 2);
        assert!(!back.is_dirty());
        for original in store.entries() {
            assert_eq!(back.lookup(&original.name), Some(original));
        }
    }

    #[test]
    fn empty_optionals_are_omitted() {
        let mut store = Store::new();
        store.add(Entry::new("min", "l", "p"));
        let doc = encode(&store).unwrap();
        let obj = doc["min"].as_object().unwrap();
        assert!(!obj.contains_key("aliases"));
        assert!(!obj.contains_key("tags"));
        assert!(!obj.contains_key("login_alias"));
        assert_eq!(obj["pwd"], "p");
        assert_eq!(obj[TYPE_FIELD], ENTRY_MARKER);
    }

    #[test]
    fn decode_minimal_object_restores_empty_sets() {
        let doc = json!({
            "min": {
                "__type__": ENTRY_MARKER,
                "name": "min",
                "login": "l",
                "pwd": "p",
                "creation_date": "2024-05-01T10:00:00Z",
                "last_update_date": "2024-05-02T10:00:00Z"
            }
        });
        let store = decode(doc).unwrap();
        let e = store.lookup("min").unwrap();
        assert!(e.aliases.is_empty());
        assert!(e.tags.is_empty());
        assert!(e.login_alias.is_none());
        assert!(e.updated_at > e.created_at);
    }

    #[test]
    fn untagged_data_passes_through() {
        let doc = json!({
            "settings": { "theme": "dark", "nested": [1, 2, { "x": null }] },
            "version": 3
        });
        let store = decode(doc.clone()).unwrap();
        assert!(store.is_empty());
        assert_eq!(encode(&store).unwrap(), doc);
    }

    #[test]
    fn nested_tagged_object_decodes_as_entry() {
        let mut store = Store::new();
        store.add(Entry::new("inner", "l", "p"));
        let inner = encode_entry(store.lookup("inner").unwrap()).unwrap();

        match decode_value(inner).unwrap() {
            Decoded::Entry(e) => assert_eq!(e.name, "inner"),
            Decoded::Other(v) => panic!("expected entry, got {v}"),
        }
    }

    #[test]
    fn tagged_object_with_missing_fields_is_rejected() {
        let doc = json!({ "bad": { "__type__": ENTRY_MARKER, "name": "bad" } });
        assert!(matches!(decode(doc), Err(VaultError::InvalidVaultFormat(_))));
    }

    fn tagged(name: &str) -> Value {
        json!({
            "__type__": ENTRY_MARKER,
            "name": name,
            "login": "l",
            "pwd": "p",
            "creation_date": "2024-05-01T10:00:00Z",
            "last_update_date": "2024-05-01T10:00:00Z"
        })
    }

    #[test]
    fn entry_under_foreign_key_is_rejected() {
        let doc = json!({ "github": tagged("gitlab") });
        assert!(matches!(decode(doc), Err(VaultError::InvalidVaultFormat(_))));
    }

    #[test]
    fn entry_cannot_shadow_untagged_data() {
        let doc = json!({
            "github": tagged("gitlab"),
            "gitlab": { "note": "aux" }
        });
        assert!(matches!(decode(doc), Err(VaultError::InvalidVaultFormat(_))));
    }

    #[test]
    fn untagged_data_survives_next_to_entries() {
        let doc = json!({
            "github": tagged("github"),
            "gitlab": { "note": "aux" }
        });
        let store = decode(doc).unwrap();
        assert_eq!(store.len(), 1);
        let out = encode(&store).unwrap();
        assert_eq!(out["gitlab"], json!({ "note": "aux" }));
        assert_eq!(out["github"]["name"], "github");
    }

    #[test]
    fn non_object_document_is_rejected() {
        assert!(decode(json!([1, 2])).is_err());
        assert!(from_bytes(b"not json").is_err());
    }
}
