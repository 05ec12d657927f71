//! A single decoded row.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::types::{CellValue, RowSchema};

/// A decoded row: a schema reference plus its cells.
///
/// `Row` owns its schema via `Arc`, so cloning a row is cheap (shared
/// schema, cloned cell vector) and it carries no borrowed lifetime — every
/// materialization strategy (materialized or streaming) can hand rows to
/// callers without tying them to the `Result`'s lifetime.
#[derive(Debug, Clone)]
pub struct Row {
    schema: Arc<RowSchema>,
    cells: Vec<CellValue>,
}

impl Row {
    /// Construct a row from its already-decoded cells.
    ///
    /// Panics are deliberately avoided here: a `cells` vector shorter than
    /// the schema is tolerated (missing trailing cells read as out of
    /// range, same as a short array from the wire) rather than asserted
    /// against, since the Service — not this client — owns that invariant.
    pub fn new(schema: Arc<RowSchema>, cells: Vec<CellValue>) -> Self {
        Self { schema, cells }
    }

    /// The row's schema.
    pub fn schema(&self) -> &RowSchema {
        &self.schema
    }

    /// Cell access by positional index.
    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index)
    }

    /// Cell access by column name, case-insensitive.
    pub fn get_by_name(&self, name: &str) -> Option<&CellValue> {
        self.schema.index_of(name).and_then(|i| self.cells.get(i))
    }

    /// All cells, in column order.
    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    /// A case-insensitive name→value map, keyed by the lowercased column
    /// name, with iteration order matching column order in the schema.
    pub fn to_map(&self) -> IndexMap<String, CellValue> {
        self.schema
            .names()
            .zip(self.cells.iter())
            .map(|(name, value)| (name.to_lowercase(), value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RowType;

    fn sample_row() -> Row {
        let schema = Arc::new(RowSchema::new(vec![
            RowType::new("ID", "fixed", Some(0)),
            RowType::new("FLAG", "boolean", None),
        ]));
        Row::new(schema, vec![CellValue::Integer(1.into()), CellValue::Boolean(true)])
    }

    #[test]
    fn lookup_by_name_matches_lookup_by_index() {
        let row = sample_row();
        assert_eq!(row.get_by_name("flag"), row.get(1));
        assert_eq!(row.get_by_name("FLAG"), row.get(1));
    }

    #[test]
    fn to_map_contains_every_column() {
        let row = sample_row();
        let map = row.to_map();
        assert_eq!(map.get("id"), Some(&CellValue::Integer(1.into())));
        assert_eq!(map.get("flag"), Some(&CellValue::Boolean(true)));
    }

    #[test]
    fn to_map_lookup_is_case_insensitive() {
        let row = sample_row();
        let map = row.to_map();
        assert_eq!(map.get("ID"), Some(&CellValue::Integer(1.into())));
        assert_eq!(map.get("Flag"), Some(&CellValue::Boolean(true)));
    }

    #[test]
    fn to_map_iteration_order_matches_column_order() {
        let row = sample_row();
        let map = row.to_map();
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["id", "flag"]);
    }
}
