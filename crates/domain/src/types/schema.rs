//! Row metadata: per-column types and the case-insensitive column index.

use std::collections::HashMap;

/// The Service's column type tags, collapsed to the buckets the decoder
/// actually distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeTag {
    /// `"true"`/anything-else string.
    Boolean,
    /// Integer days since the Unix epoch.
    Date,
    /// Arbitrary-precision integer or decimal, per `scale`.
    Fixed,
    /// IEEE-754 double (`float`, `double`, `real`, `double precision`).
    Float,
    /// Decimal fractional seconds since the Unix epoch, UTC.
    Time,
    /// Decimal fractional seconds since the Unix epoch, UTC.
    DateTime,
    /// Decimal fractional seconds since the Unix epoch, UTC.
    Timestamp,
    /// Decimal fractional seconds since the Unix epoch, UTC.
    TimestampLtz,
    /// Decimal fractional seconds since the Unix epoch, UTC.
    TimestampNtz,
    /// `"<seconds> <offset_minutes>"`, UTC with the source's sign
    /// convention preserved as-is rather than corrected.
    TimestampTz,
    /// Unrecognized tag; the raw cell is passed through unchanged. Carries
    /// the original tag string for diagnostics.
    Other(String),
}

impl TypeTag {
    /// Parse a wire type tag string into a [`TypeTag`].
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "boolean" => Self::Boolean,
            "date" => Self::Date,
            "fixed" => Self::Fixed,
            "float" | "double" | "real" | "double precision" => Self::Float,
            "time" => Self::Time,
            "datetime" => Self::DateTime,
            "timestamp" => Self::Timestamp,
            "timestamp_ltz" => Self::TimestampLtz,
            "timestamp_ntz" => Self::TimestampNtz,
            "timestamp_tz" => Self::TimestampTz,
            _ => Self::Other(raw.to_string()),
        }
    }
}

/// A single result column's metadata.
#[derive(Debug, Clone)]
pub struct RowType {
    /// Column name, as returned by the Service (original case preserved).
    pub name: String,
    /// Decoding strategy for this column.
    pub type_tag: TypeTag,
    /// Declared scale for `fixed` columns; `0` when absent or irrelevant.
    pub scale: i32,
}

impl RowType {
    /// Construct a [`RowType`], parsing `type_tag` from the wire string.
    pub fn new(name: impl Into<String>, type_tag: &str, scale: Option<i32>) -> Self {
        Self { name: name.into(), type_tag: TypeTag::parse(type_tag), scale: scale.unwrap_or(0) }
    }
}

/// Column metadata for a result set, plus a case-insensitive name index.
///
/// Built once per query and shared (via `Arc`) by every row and partition,
/// since it never changes after the submission response is parsed.
#[derive(Debug, Clone)]
pub struct RowSchema {
    row_types: Vec<RowType>,
    column_index: HashMap<String, usize>,
}

impl RowSchema {
    /// Build a schema from the ordered column metadata.
    ///
    /// Column lookup by name is case-insensitive; if two columns share a
    /// lowercased name, the earlier column wins (matches the order the
    /// Service lists them in).
    pub fn new(row_types: Vec<RowType>) -> Self {
        let mut column_index = HashMap::with_capacity(row_types.len());
        for (i, row_type) in row_types.iter().enumerate() {
            column_index.entry(row_type.name.to_ascii_lowercase()).or_insert(i);
        }
        Self { row_types, column_index }
    }

    /// An empty schema, used when the Service omits `resultSetMetaData`
    /// (e.g. for DDL statements).
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.row_types.len()
    }

    /// Whether this schema has no columns.
    pub fn is_empty(&self) -> bool {
        self.row_types.is_empty()
    }

    /// The column metadata, in declared order.
    pub fn row_types(&self) -> &[RowType] {
        &self.row_types
    }

    /// Column names, in declared order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.row_types.iter().map(|rt| rt.name.as_str())
    }

    /// Resolve a column name to its index, case-insensitively.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.column_index.get(&name.to_ascii_lowercase()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_tag_covers_float_aliases() {
        for alias in ["float", "double", "real", "double precision", "FLOAT"] {
            assert_eq!(TypeTag::parse(alias), TypeTag::Float);
        }
    }

    #[test]
    fn unknown_tag_passes_through_as_other() {
        assert_eq!(TypeTag::parse("variant"), TypeTag::Other("variant".to_string()));
    }

    #[test]
    fn column_lookup_is_case_insensitive_and_matches_index() {
        let schema = RowSchema::new(vec![
            RowType::new("Id", "fixed", Some(0)),
            RowType::new("Name", "text", None),
        ]);
        assert_eq!(schema.index_of("id"), Some(0));
        assert_eq!(schema.index_of("ID"), Some(0));
        assert_eq!(schema.index_of("name"), Some(1));
        assert_eq!(schema.index_of("missing"), None);
    }
}
