use crate::error::{CensusError, Result};
use crate::types::ParsedEntry;
use std::collections::{BTreeMap, BTreeSet};

/// Characters seen during a fetch, each with the distinct universes it appears in,
/// plus the set of every universe seen.
///
/// Ordered collections keep the materialized table independent of feed order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CatalogIndex {
    entities: BTreeMap<String, BTreeSet<String>>,
    origins: BTreeSet<String>,
}

impl CatalogIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: ParsedEntry) {
        self.origins.insert(entry.origin.clone());
        self.entities.entry(entry.name).or_default().insert(entry.origin);
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn origin_count(&self) -> usize {
        self.origins.len()
    }

    pub fn origins_of(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.entities.get(name)
    }

    /// Materialize the dense table: rows and columns both in ascending order.
    pub fn into_table(self) -> IncidenceTable {
        let origins: Vec<String> = self.origins.into_iter().collect();
        let mut entities = Vec::with_capacity(self.entities.len());
        let mut cells: Vec<Vec<bool>> = Vec::with_capacity(self.entities.len());
        for (name, seen) in self.entities {
            cells.push(origins.iter().map(|o| seen.contains(o)).collect());
            entities.push(name);
        }
        IncidenceTable { entities, origins, cells }
    }
}

impl FromIterator<ParsedEntry> for CatalogIndex {
    fn from_iter<I: IntoIterator<Item = ParsedEntry>>(iter: I) -> Self {
        let mut index = CatalogIndex::new();
        for entry in iter {
            index.record(entry);
        }
        index
    }
}

/// Dense character × universe appearance table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidenceTable {
    entities: Vec<String>,
    origins: Vec<String>,
    cells: Vec<Vec<bool>>,
}

impl IncidenceTable {
    /// Assemble a table from already-ordered parts, checking the shape.
    pub fn from_parts(entities: Vec<String>, origins: Vec<String>, cells: Vec<Vec<bool>>) -> Result<Self> {
        if cells.len() != entities.len() {
            return Err(CensusError::Table {
                line: 0,
                message: format!("{} rows for {} characters", cells.len(), entities.len()),
            });
        }
        if let Some((i, row)) = cells.iter().enumerate().find(|(_, r)| r.len() != origins.len()) {
            return Err(CensusError::Table {
                line: i + 2,
                message: format!("row has {} cells, expected {}", row.len(), origins.len()),
            });
        }
        Ok(Self { entities, origins, cells })
    }

    pub fn entities(&self) -> &[String] {
        &self.entities
    }

    pub fn origins(&self) -> &[String] {
        &self.origins
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &[bool])> {
        self.entities.iter().map(String::as_str).zip(self.cells.iter().map(Vec::as_slice))
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<bool> {
        self.cells.get(row)?.get(column).copied()
    }

    pub fn row_count(&self) -> usize {
        self.entities.len()
    }

    pub fn column_count(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn true_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&c| c).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn e(name: &str, origin: &str) -> ParsedEntry {
        ParsedEntry { name: name.to_string(), origin: origin.to_string() }
    }

    fn scenario() -> Vec<ParsedEntry> {
        vec![e("A", "X"), e("A", "Y"), e("B", "X"), e("C", "X"), e("C", "Y"), e("C", "Z")]
    }

    #[test]
    fn builds_sorted_dense_table() {
        let table: IncidenceTable = scenario().into_iter().collect::<CatalogIndex>().into_table();
        assert_eq!(table.entities(), ["A", "B", "C"]);
        assert_eq!(table.origins(), ["X", "Y", "Z"]);
        let rows: Vec<_> = table.rows().map(|(n, r)| (n.to_string(), r.to_vec())).collect();
        assert_eq!(
            rows,
            vec![
                ("A".to_string(), vec![true, true, false]),
                ("B".to_string(), vec![true, false, false]),
                ("C".to_string(), vec![true, true, true]),
            ]
        );
        assert_eq!(table.true_count(), 6);
    }

    #[test]
    fn feed_order_does_not_matter() {
        let expected = scenario().into_iter().collect::<CatalogIndex>().into_table();
        let entries = scenario();
        // Every rotation and its reverse
        for shift in 0..entries.len() {
            let mut rotated = entries.clone();
            rotated.rotate_left(shift);
            let table = rotated.iter().cloned().collect::<CatalogIndex>().into_table();
            assert_eq!(table, expected);
            rotated.reverse();
            let table = rotated.into_iter().collect::<CatalogIndex>().into_table();
            assert_eq!(table, expected);
        }
    }

    #[test]
    fn duplicate_entries_are_deduplicated() {
        let index: CatalogIndex = vec![e("A", "X"), e("A", "X"), e("A", "X")].into_iter().collect();
        assert_eq!(index.entity_count(), 1);
        assert_eq!(index.origin_count(), 1);
        assert_eq!(index.origins_of("A").map(|s| s.len()), Some(1));
    }

    #[test]
    fn every_entity_origin_is_in_origin_set() {
        let index: CatalogIndex = scenario().into_iter().collect();
        let table = index.clone().into_table();
        for name in table.entities() {
            for origin in index.origins_of(name).unwrap() {
                assert!(table.origins().contains(origin));
            }
        }
    }

    #[test]
    fn from_parts_rejects_ragged_rows() {
        let err = IncidenceTable::from_parts(
            vec!["A".into()],
            vec!["X".into(), "Y".into()],
            vec![vec![true]],
        )
        .unwrap_err();
        assert!(matches!(err, CensusError::Table { line: 2, .. }));
    }

    #[test]
    fn empty_index_gives_empty_table() {
        let table = CatalogIndex::new().into_table();
        assert!(table.is_empty());
        assert_eq!(table.column_count(), 0);
        assert_eq!(table.cell(0, 0), None);
    }
}
