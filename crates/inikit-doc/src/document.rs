//! The mutable group/value store and its read/write orchestration.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

use thiserror::Error;

use crate::io::LineIo;
use crate::line::{classify_line, ParsedLine};
use crate::resolve::resolve_key;

/// The key/value entries of one group, ordered by key comparison.
pub type Values = BTreeMap<String, String>;

/// Failures a document read or write can report.
///
/// Malformed input is never an error: unrecognized and comment lines are
/// skipped, missing keys resolve to `None` on read-only lookups.
#[derive(Debug, Error)]
pub enum DocError {
    #[error("no line source bound to the document")]
    NoSource,
    #[error("no line sink bound to the document")]
    NoSink,
    #[error("line sink rejected output line {line:?}")]
    SinkRejected { line: String },
}

/// An INI document: an ordered mapping from group name to [`Values`], plus a
/// group cursor that scopes unqualified key lookups.
///
/// Group names order the write-out; within a group, keys do. The cursor
/// ([`begin_group`](Document::begin_group) /
/// [`end_group`](Document::end_group)) is a single field, not a stack:
/// nested `begin_group` calls overwrite it.
///
/// A document may be bound to a [`LineIo`] backend. When it is, and
/// write-on-close is left enabled, dropping the document flushes it through
/// that backend one last time.
pub struct Document {
    groups: BTreeMap<String, Values>,
    current_group: String,
    handler: Option<Box<dyn LineIo>>,
    write_on_close: bool,
}

impl Document {
    /// An empty document with no bound backend.
    pub fn new() -> Self {
        Self {
            groups: BTreeMap::new(),
            current_group: String::new(),
            handler: None,
            write_on_close: true,
        }
    }

    /// An empty document bound to `handler`.
    pub fn with_handler(handler: Box<dyn LineIo>) -> Self {
        let mut doc = Self::new();
        doc.handler = Some(handler);
        doc
    }

    /// Bind (or rebind) the backend used by [`read`](Document::read),
    /// [`write`](Document::write) and the write-on-close flush.
    pub fn set_handler(&mut self, handler: Box<dyn LineIo>) {
        self.handler = Some(handler);
    }

    /// Unbind and return the backend, if any. With no handler left, the
    /// write-on-close flush has nothing to write through and is skipped.
    pub fn take_handler(&mut self) -> Option<Box<dyn LineIo>> {
        self.handler.take()
    }

    /// Enable or disable the flush performed when the document is dropped.
    pub fn set_write_on_close(&mut self, enabled: bool) {
        self.write_on_close = enabled;
    }

    // ------------------------------------------------------------------
    // Group and value accessors
    // ------------------------------------------------------------------

    pub fn groups(&self) -> &BTreeMap<String, Values> {
        &self.groups
    }

    pub fn groups_mut(&mut self) -> &mut BTreeMap<String, Values> {
        &mut self.groups
    }

    /// The values of `name`, or `None` when the group is absent or `name`
    /// is empty. Never creates.
    pub fn group(&self, name: &str) -> Option<&Values> {
        if name.is_empty() {
            return None;
        }
        self.groups.get(name)
    }

    /// The values of `name`, created empty if absent.
    pub fn group_mut(&mut self, name: &str) -> &mut Values {
        self.groups.entry(name.to_owned()).or_default()
    }

    /// Remove a group and return its values.
    pub fn remove_group(&mut self, name: &str) -> Option<Values> {
        self.groups.remove(name)
    }

    pub fn group_names(&self) -> Vec<String> {
        self.groups.keys().cloned().collect()
    }

    /// Whether the resolved `(group, name)` exists.
    ///
    /// A dotless key under global scope is a group-existence query. A cursor
    /// naming a removed group makes every lookup through it report absent.
    pub fn contains(&self, key: &str) -> bool {
        if !self.current_group.is_empty() && !self.groups.contains_key(&self.current_group) {
            return false;
        }
        let (group, name) = resolve_key(&self.current_group, key);
        if group.is_empty() {
            return false;
        }
        let Some(values) = self.groups.get(group) else {
            return false;
        };
        name.is_empty() || values.contains_key(name)
    }

    /// Read-only lookup of the resolved key. Never creates.
    pub fn value(&self, key: &str) -> Option<&str> {
        let (group, name) = resolve_key(&self.current_group, key);
        if group.is_empty() || name.is_empty() {
            return None;
        }
        self.groups.get(group)?.get(name).map(String::as_str)
    }

    /// Mutable handle to the resolved key, creating the group and the entry
    /// (with an empty value) as needed.
    pub fn value_mut(&mut self, key: &str) -> &mut String {
        let (group, name) = resolve_key(&self.current_group, key);
        let (group, name) = (group.to_owned(), name.to_owned());
        self.groups.entry(group).or_default().entry(name).or_default()
    }

    /// Assignment sugar over [`value_mut`](Document::value_mut).
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        *self.value_mut(key) = value.into();
    }

    /// Seed several entries at once. Keys are always taken as dotted
    /// (`group.name`) addresses, regardless of the group cursor.
    pub fn add<I, K, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, value) in values {
            let (group, name) = resolve_key("", key.as_ref());
            self.groups
                .entry(group.to_owned())
                .or_default()
                .insert(name.to_owned(), value.into());
        }
    }

    // ------------------------------------------------------------------
    // Group cursor
    // ------------------------------------------------------------------

    /// Scope subsequent unqualified lookups to `name`. The group is not
    /// required to exist; a second call overwrites the cursor.
    pub fn begin_group(&mut self, name: &str) {
        self.current_group.clear();
        self.current_group.push_str(name);
    }

    /// Return to global scope.
    pub fn end_group(&mut self) {
        self.current_group.clear();
    }

    pub fn current_group(&self) -> &str {
        &self.current_group
    }

    /// The values of the cursor's group, or `None` under global scope or a
    /// stale cursor.
    pub fn values(&self) -> Option<&Values> {
        if self.current_group.is_empty() {
            return None;
        }
        self.groups.get(&self.current_group)
    }

    /// The values of the cursor's group, created if absent. Under global
    /// scope this is the implicit empty-named group.
    pub fn values_mut(&mut self) -> &mut Values {
        self.groups.entry(self.current_group.clone()).or_default()
    }

    // ------------------------------------------------------------------
    // Read / write
    // ------------------------------------------------------------------

    /// Replace this document's contents with what the bound backend yields.
    pub fn read(&mut self) -> Result<(), DocError> {
        let mut handler = self.handler.take().ok_or(DocError::NoSource)?;
        let result = self.read_from(handler.as_mut());
        self.handler = Some(handler);
        result
    }

    /// Replace this document's contents with what `source` yields.
    ///
    /// Comment and unrecognized lines are skipped. Value lines seen before
    /// the first group header have no group to land in and are dropped.
    /// Succeeds even when no line is recognizable (the document ends up
    /// empty).
    pub fn read_from(&mut self, source: &mut dyn LineIo) -> Result<(), DocError> {
        self.groups.clear();
        self.current_group.clear();

        let mut target: Option<String> = None;
        while let Some(line) = source.read_line() {
            match classify_line(&line) {
                ParsedLine::Comment | ParsedLine::Unrecognized => {}
                ParsedLine::Group { name } => {
                    self.groups.entry(name.to_owned()).or_default();
                    target = Some(name.to_owned());
                }
                ParsedLine::Value { key, value } => match target.as_deref() {
                    Some(group) => {
                        if let Some(values) = self.groups.get_mut(group) {
                            values.insert(key.to_owned(), value.to_owned());
                        }
                    }
                    None => {
                        tracing::debug!(%line, "dropping value line before first group header");
                    }
                },
            }
        }
        Ok(())
    }

    /// Write the document through the bound backend.
    pub fn write(&mut self) -> Result<(), DocError> {
        let mut handler = self.handler.take().ok_or(DocError::NoSink)?;
        let result = self.write_to(handler.as_mut());
        self.handler = Some(handler);
        result
    }

    /// Write the document to `sink`: each group as `[name]` followed by its
    /// `key=value` entries, groups and keys in their map order. Groups with
    /// no entries still emit their header.
    ///
    /// Resets the group cursor, then stops at the first rejected line;
    /// output already accepted is not rolled back.
    pub fn write_to(&mut self, sink: &mut dyn LineIo) -> Result<(), DocError> {
        self.current_group.clear();

        for (group, values) in &self.groups {
            let header = format!("[{group}]");
            if !sink.write_line(&header) {
                return Err(DocError::SinkRejected { line: header });
            }
            for (key, value) in values {
                let line = format!("{key}={value}");
                if !sink.write_line(&line) {
                    return Err(DocError::SinkRejected { line });
                }
            }
        }
        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Document {
    fn drop(&mut self) {
        if !self.write_on_close {
            return;
        }
        if let Some(mut handler) = self.handler.take() {
            if let Err(err) = self.write_to(handler.as_mut()) {
                tracing::warn!(%err, "write-on-close flush failed");
            }
        }
    }
}

/// Read-only indexing by group name; panics when the group is absent.
/// Mutation goes through [`Document::group_mut`].
impl Index<&str> for Document {
    type Output = Values;

    fn index(&self, name: &str) -> &Values {
        match self.groups.get(name) {
            Some(values) => values,
            None => panic!("no group named {name:?}"),
        }
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("groups", &self.groups)
            .field("current_group", &self.current_group)
            .field("handler", &self.handler.as_ref().map(|_| "<line io>"))
            .field("write_on_close", &self.write_on_close)
            .finish()
    }
}
