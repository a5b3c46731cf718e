//! Object entries wrapping a nested instance.

use super::{Entry, EntryData, EntryMap, ObjectEntry};
use crate::kind::EntryKind;

/// Entry grouping the members of a nested [`ConfigObject`](crate::ConfigObject).
#[derive(Debug)]
pub struct NestedObjectEntry {
    data: EntryData,
    entries: EntryMap,
}

impl NestedObjectEntry {
    pub(crate) const fn new(data: EntryData, entries: EntryMap) -> Self {
        Self { data, entries }
    }
}

impl Entry for NestedObjectEntry {
    fn kind(&self) -> EntryKind {
        EntryKind::Object
    }

    fn data(&self) -> &EntryData {
        &self.data
    }

    fn reset(&self) {
        self.entries.values().for_each(|entry| entry.reset());
    }

    fn as_object(&self) -> Option<&dyn ObjectEntry> {
        Some(self)
    }
}

impl ObjectEntry for NestedObjectEntry {
    fn entries(&self) -> &EntryMap {
        &self.entries
    }
}
