//! Storage key scheme for owner-scoped records.
//!
//! Keys are `url:<owner>:<slug>`; enumeration of one owner's records uses the
//! `url:<owner>:` prefix. Injectivity holds because owner ids never contain
//! the `:` separator (rejected upstream by the identity verifier) and slugs
//! are restricted to `[A-Za-z0-9_-]`.

/// Namespace prefix shared by all record keys.
const KEY_NAMESPACE: &str = "url:";

/// Builds the storage key for one record.
pub fn record_key(owner_id: &str, slug: &str) -> String {
    format!("{KEY_NAMESPACE}{owner_id}:{slug}")
}

/// Builds the enumeration prefix covering every record of one owner.
pub fn owner_prefix(owner_id: &str) -> String {
    format!("{KEY_NAMESPACE}{owner_id}:")
}
