//! Column, value, and record types for decoded results.

mod column;
mod lob;
mod record;
mod sql_type;
mod value;

pub use column::{describe, ColumnDescriptor, ColumnInfo};
pub use lob::{LargeObject, LobStream, MemoryLob, MemoryLobStream};
pub use record::{AttributeRecord, Record, RecordVariant};
pub use sql_type::{FetchKind, SqlType};
pub use value::{RawValue, Value};
