use crate::constants::{ENTITY_ROLLUP_INDEX, ENTITY_ROLLUP_LABEL, ORIGIN_ROLLUP_INDEX, ORIGIN_ROLLUP_LABEL};
use crate::matrix::IncidenceTable;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollupRow {
    pub key: String,
    pub value: u64,
}

/// Key → count summary of the incidence table, sorted by count descending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rollup {
    /// Name of the counted quantity, e.g. `Universes`
    pub label: String,
    /// Name of the key column, e.g. `Character`
    pub index_label: String,
    rows: Vec<RollupRow>,
}

impl Rollup {
    /// Sort `rows` descending by value. Equal values keep their input order.
    pub fn new(label: impl Into<String>, index_label: impl Into<String>, mut rows: Vec<RollupRow>) -> Self {
        rows.sort_by(|a, b| b.value.cmp(&a.value));
        Self { label: label.into(), index_label: index_label.into(), rows }
    }

    /// Number of universes each character appears in.
    pub fn by_entity(table: &IncidenceTable) -> Self {
        let rows = table
            .rows()
            .map(|(name, cells)| RollupRow {
                key: name.to_string(),
                value: cells.iter().filter(|&&c| c).count() as u64,
            })
            .collect();
        Self::new(ENTITY_ROLLUP_LABEL, ENTITY_ROLLUP_INDEX, rows)
    }

    /// Number of characters appearing in each universe.
    pub fn by_origin(table: &IncidenceTable) -> Self {
        let mut counts = vec![0u64; table.column_count()];
        for (_, cells) in table.rows() {
            for (count, &present) in counts.iter_mut().zip(cells) {
                if present {
                    *count += 1;
                }
            }
        }
        let rows = table
            .origins()
            .iter()
            .zip(counts)
            .map(|(origin, value)| RollupRow { key: origin.clone(), value })
            .collect();
        Self::new(ORIGIN_ROLLUP_LABEL, ORIGIN_ROLLUP_INDEX, rows)
    }

    pub fn rows(&self) -> &[RollupRow] {
        &self.rows
    }

    pub fn values(&self) -> Vec<u64> {
        self.rows.iter().map(|r| r.value).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.rows.iter().map(|r| r.value).sum()
    }
}
