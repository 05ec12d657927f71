//! Wire-format DTOs for the Service's JSON responses.
//!
//! These mirror the response bodies exactly (field names, optionality) so
//! `serde_json` can deserialize them directly; translation into domain
//! types ([`RowSchema`], [`Row`]) happens one layer up, in `coldline-core`,
//! which also owns fetching subsequent partitions.

use serde::Deserialize;

use crate::types::{RowSchema, RowType};

/// One column's metadata, as the Service reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct WireRowType {
    pub name: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(default)]
    pub scale: Option<i32>,
}

impl From<&WireRowType> for RowType {
    fn from(wire: &WireRowType) -> Self {
        RowType::new(wire.name.clone(), &wire.type_tag, wire.scale)
    }
}

/// `resultSetMetaData`, absent for statements that return no rows.
#[derive(Debug, Clone, Deserialize)]
pub struct WireResultSetMetadata {
    #[serde(default, rename = "numRows")]
    pub num_rows: Option<u64>,
    #[serde(default, rename = "partitionInfo")]
    pub partition_info: Vec<WirePartitionInfo>,
    #[serde(default, rename = "rowType")]
    pub row_type: Vec<WireRowType>,
}

impl WireResultSetMetadata {
    /// Build the domain [`RowSchema`] this metadata describes.
    pub fn to_schema(&self) -> RowSchema {
        RowSchema::new(self.row_type.iter().map(RowType::from).collect())
    }
}

/// One partition's row count, as advertised up front in the submission
/// response (actual row fetches happen later, per partition index).
#[derive(Debug, Clone, Deserialize)]
pub struct WirePartitionInfo {
    #[serde(default, rename = "rowCount")]
    pub row_count: Option<u64>,
}

/// The response to a statement submission: first partition inline, plus
/// enough metadata to fetch the rest.
#[derive(Debug, Clone, Deserialize)]
pub struct WireStatementResponse {
    #[serde(rename = "statementHandle")]
    pub statement_handle: String,
    #[serde(default, rename = "resultSetMetaData")]
    pub result_set_meta_data: Option<WireResultSetMetadata>,
    #[serde(default)]
    pub data: Vec<Vec<serde_json::Value>>,
}

/// The response to a subsequent-partition fetch: rows only, no metadata
/// (the schema was already established by the submission response).
#[derive(Debug, Clone, Deserialize)]
pub struct WirePartitionResponse {
    #[serde(default)]
    pub data: Vec<Vec<serde_json::Value>>,
}

/// Convert one wire cell into the `Option<&str>` shape [`decode_cell`] takes:
/// `serde_json::Value::Null` and missing cells both mean "absent"; anything
/// else is read as its string form (the Service sends every cell as either
/// a JSON string or `null`, never a bare number or bool).
///
/// [`decode_cell`]: crate::decode::decode_cell
pub fn wire_cell_as_str(value: &serde_json::Value) -> Option<&str> {
    value.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_builds_a_matching_schema() {
        let metadata = WireResultSetMetadata {
            num_rows: Some(1),
            partition_info: vec![],
            row_type: vec![WireRowType { name: "ID".to_string(), type_tag: "fixed".to_string(), scale: Some(0) }],
        };
        let schema = metadata.to_schema();
        assert_eq!(schema.len(), 1);
        assert_eq!(schema.index_of("id"), Some(0));
    }

    #[test]
    fn wire_cell_as_str_treats_null_as_absent() {
        assert_eq!(wire_cell_as_str(&serde_json::Value::Null), None);
        assert_eq!(wire_cell_as_str(&serde_json::json!("42")), Some("42"));
    }
}
