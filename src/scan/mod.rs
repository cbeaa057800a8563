//! Chunked scanning of a byte range and record extraction.
//!
//! One pass of the combined field pattern over each chunk produces a tagged
//! sequence of field matches ([`pattern::FieldMatch`]); a look-back over the
//! last four tags assembles a [`Record`] whenever a bounding box is seen.

pub mod pattern;
mod record;
mod scanner;

pub use pattern::{assemble_records, field_matches, FieldMatch};
pub use record::Record;
pub use scanner::{RangeScanner, DEFAULT_BATCH_SIZE};
