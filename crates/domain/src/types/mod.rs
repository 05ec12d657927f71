//! Typed row/value models shared by every materialization strategy.

mod fingerprint;
mod row;
mod schema;
mod value;

pub use fingerprint::Fingerprint;
pub use row::Row;
pub use schema::{RowSchema, RowType, TypeTag};
pub use value::CellValue;
