use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};
use tracing::debug;

use crate::domain::HospitalRecord;

/// Accumulates accepted records and the derived district/state sets.
///
/// Nothing here is visible to readers until [`DirectoryBuilder::finish`]
/// hands back an immutable [`Directory`].
#[derive(Debug, Default)]
pub struct DirectoryBuilder {
    records: Vec<HospitalRecord>,
    districts: BTreeSet<String>,
    states: BTreeSet<String>,
}

impl DirectoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an accepted record and indexes its district and state.
    pub fn push(&mut self, record: HospitalRecord) {
        insert_trimmed(&mut self.districts, &record.district);
        insert_trimmed(&mut self.states, &record.state);
        debug!("Accepted hospital: {} ({})", record.name, record.id);
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn finish(self) -> Directory {
        Directory {
            records: self.records.into(),
            districts: self.districts,
            states: self.states,
            loaded_at: Some(Utc::now()),
        }
    }
}

fn insert_trimmed(set: &mut BTreeSet<String>, value: &str) {
    let value = value.trim();
    if !value.is_empty() && !set.contains(value) {
        set.insert(value.to_string());
    }
}

/// The read-only set of qualifying hospitals.
///
/// Records keep source row order. Query operations live in [`crate::query`].
#[derive(Debug, Clone)]
pub struct Directory {
    pub(crate) records: Arc<[HospitalRecord]>,
    pub(crate) districts: BTreeSet<String>,
    pub(crate) states: BTreeSet<String>,
    loaded_at: Option<DateTime<Utc>>,
}

/// Counts describing a published directory.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DirectorySummary {
    pub records: usize,
    pub districts: usize,
    pub states: usize,
    pub loaded_at: Option<DateTime<Utc>>,
}

impl Default for Directory {
    fn default() -> Self {
        Self::empty()
    }
}

impl Directory {
    /// An empty directory, as served before (or instead of) a successful load.
    pub fn empty() -> Self {
        Self {
            records: Arc::from(Vec::new()),
            districts: BTreeSet::new(),
            states: BTreeSet::new(),
            loaded_at: None,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[HospitalRecord] {
        &self.records
    }

    pub fn summary(&self) -> DirectorySummary {
        DirectorySummary {
            records: self.records.len(),
            districts: self.districts.len(),
            states: self.states.len(),
            loaded_at: self.loaded_at,
        }
    }
}

/// The single commit point between ingestion and readers.
///
/// Readers take an `Arc<Directory>` snapshot and never hold the lock while
/// querying; `publish` swaps the whole directory in one step.
#[derive(Debug, Clone)]
pub struct SharedDirectory {
    inner: Arc<RwLock<Arc<Directory>>>,
}

impl Default for SharedDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedDirectory {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(Directory::empty()))),
        }
    }

    pub fn publish(&self, directory: Directory) {
        let directory = Arc::new(directory);
        // A poisoned lock still holds a complete Arc, so recover it
        let mut slot = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *slot = directory;
    }

    pub fn current(&self) -> Arc<Directory> {
        let slot = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, state: &str, district: &str) -> HospitalRecord {
        HospitalRecord {
            id: id.to_string(),
            name: format!("Hospital {id}"),
            state: state.to_string(),
            district: district.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_builder_indexes_distinct_values() {
        let mut builder = DirectoryBuilder::new();
        builder.push(record("1", "Maharashtra", "Pune"));
        builder.push(record("2", "Maharashtra", " Pune "));
        builder.push(record("3", "Kerala", ""));

        let directory = builder.finish();
        assert_eq!(directory.len(), 3);
        assert_eq!(
            directory.districts.iter().collect::<Vec<_>>(),
            vec!["Pune"]
        );
        assert_eq!(
            directory.states.iter().collect::<Vec<_>>(),
            vec!["Kerala", "Maharashtra"]
        );
    }

    #[test]
    fn test_builder_preserves_insertion_order() {
        let mut builder = DirectoryBuilder::new();
        for id in ["3", "1", "2"] {
            builder.push(record(id, "Goa", "North Goa"));
        }
        let ids: Vec<_> = builder.finish().records().iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_shared_directory_starts_empty() {
        let shared = SharedDirectory::new();
        let snapshot = shared.current();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.summary().loaded_at, None);
    }

    #[test]
    fn test_publish_does_not_disturb_existing_snapshots() {
        let shared = SharedDirectory::new();
        let before = shared.current();

        let mut builder = DirectoryBuilder::new();
        builder.push(record("1", "Goa", "North Goa"));
        shared.publish(builder.finish());

        assert!(before.is_empty());
        let after = shared.current();
        assert_eq!(after.len(), 1);
        assert!(after.summary().loaded_at.is_some());
    }
}
