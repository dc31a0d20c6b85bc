//! The in-memory catalog every filter runs against.

use crate::data::{Card, CardRecord, DataSource};
use crate::error::{Error, Result};

use serde::Serialize;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

/// All records loaded at startup, in source order.
///
/// Entries are shared, so views and selections point at the record itself
/// rather than at a position in some list.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Arc<CardRecord>>,
}

/// Summary of the values present in a store, used to offer filter options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Facets {
    pub attributes: BTreeSet<String>,
    pub expansions: BTreeSet<String>,
    #[serde(rename = "maxHP")]
    pub max_hp: i64,
    pub card_count: usize,
}

impl RecordStore {
    pub fn new(records: impl IntoIterator<Item = CardRecord>) -> Self {
        Self {
            records: records.into_iter().map(Arc::new).collect(),
        }
    }

    /// Drains a data source. The first failing record aborts the whole load.
    pub fn load(source: &mut dyn DataSource<CardRecord>) -> Result<Self> {
        let records = source.read()?.collect::<Result<Vec<CardRecord>>>()?;
        Ok(Self::new(records))
    }

    pub fn records(&self) -> &[Arc<CardRecord>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether this exact record (not an equal copy) belongs to the store.
    pub fn contains(&self, record: &Arc<CardRecord>) -> bool {
        self.records.iter().any(|r| Arc::ptr_eq(r, record))
    }

    /// First record with the given identifier.
    pub fn find(&self, identifier: &str) -> Option<&Arc<CardRecord>> {
        self.records.iter().find(|r| r.id() == identifier)
    }

    /// Sorted distinct non-blank values of a field.
    pub fn unique_values(&self, field: &str) -> BTreeSet<String> {
        self.records
            .iter()
            .map(|r| r.get(field))
            .filter(|v| !v.is_blank())
            .map(|v| v.to_string())
            .collect()
    }

    pub fn facets(&self) -> Facets {
        Facets {
            attributes: self.unique_values("attribute"),
            expansions: self.unique_values("expansion"),
            max_hp: self.records.iter().map(|r| r.hp()).max().unwrap_or(0),
            card_count: self.records.len(),
        }
    }
}

/// Writes records out as a pretty-printed JSON array.
pub fn export(records: &[Arc<CardRecord>], path: &impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| Error::export(path, e))?;
    let mut writer = BufWriter::new(file);
    let records: Vec<&CardRecord> = records.iter().map(Arc::as_ref).collect();
    serde_json::to_writer_pretty(&mut writer, &records).map_err(|e| Error::export(path, e))?;
    writer.flush().map_err(|e| Error::export(path, e))?;
    Ok(())
}
