//! Value decoders applied to each fetched column.
//!
//! | Declared type | Module |
//! |---------------|--------|
//! | CLOB, NCLOB, BLOB | `lob` |
//! | everything else | `coerce` |
//!
//! `coerce` also delegates LOB cells to `lob`, so it is the single entry
//! point used by the row decoder.

mod coerce;
mod lob;

pub use coerce::{coerce, coerce_with, RawCell};
pub use lob::{read_binary_lob, read_character_lob};
