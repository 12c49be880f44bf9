//! Entry parsing.
//!
//! A chunk from the chunker becomes at most one [`Entry`]:
//!
//! chunk
//! header match + timestamp
//! range check
//! grep (whole-entry keep or drop)
//! highlight
//! Entry

mod error;
mod filters;
mod parser;
mod types;


pub use error::ParseError;
pub use filters::{EntryFilters, TimeRange};
pub use parser::EntryParser;
pub use types::{Entry, Line, MarkKind, Span};
