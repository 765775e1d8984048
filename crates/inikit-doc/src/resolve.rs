//! Dotted-key resolution under an ambient group cursor.
//!
//! Every lookup and mutation on a [`Document`](crate::Document) routes its
//! key through [`resolve_key`], so the scoping rules live in exactly one
//! place:
//!
//! - with an active cursor, the key is a bare name inside that group and
//!   dots in it mean nothing,
//! - under global scope, the key is read as `group.name`, split at the
//!   *first* dot; a dotless key names a whole group (empty name), which is
//!   how group-level existence checks are phrased.

/// Resolve `key` to a `(group, name)` pair given the current group cursor
/// (empty cursor = global scope).
pub fn resolve_key<'a>(current_group: &'a str, key: &'a str) -> (&'a str, &'a str) {
    if !current_group.is_empty() {
        return (current_group, key);
    }
    match key.split_once('.') {
        Some((group, name)) => (group, name),
        None => (key, ""),
    }
}
