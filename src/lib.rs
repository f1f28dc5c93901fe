//! # woo-export
//!
//! Export writers for web-store data (orders, customers). A data-retrieval
//! collaborator supplies an ordered sequence of records, some of which may be
//! null placeholders, and a writer renders them as text for a download.
//!
//! ## Quick Start
//!
//! ```
//! use woo_export::*;
//! # fn main() -> anyhow::Result<()> {
//! let records = vec![
//!     Some(Record::new().with("Email", "hello@example.com")),
//!     None,
//! ];
//!
//! let mut out = Vec::new();
//! let rows = CsvWriter::new().render(&mut out, &records)?;
//!
//! assert_eq!(rows, 1);
//! assert_eq!(String::from_utf8(out)?, "Email\n\"hello@example.com\";\n");
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Record
//!
//! A [`Record`] is an ordered mapping from column name to text value. The
//! first non-null record of a sequence decides the columns and their order.
//! Records can be built by hand or from any `Serialize` value with
//! [`Record::from_serialize`].
//!
//! ### Writers
//!
//! [`CsvWriter`] renders to any [`std::io::Write`] sink; the caller owns the
//! sink. The [`ExportWriter`] trait adds what an HTTP layer needs to serve the
//! result (content type, file name).
//!
//! ### Sources
//!
//! A [`RecordSource`] supplies the sequence: an in-memory `Vec`, or a JSON
//! Lines file via [`JsonlSource`]. [`export`] connects a source to a writer.
//!
//! ## Feature Flags
//!
//! - `compression-gzip` - gzip output for `.gz` file exports
//! - `compression-zstd` - zstd output for `.zst` file exports
//!
//! ## Module Overview
//!
//! - [`record`] - the `Record` type
//! - [`io`] - CSV writer, JSON Lines source, output compression
//! - [`writer`] - the `ExportWriter` trait
//! - [`source`] - the `RecordSource` trait and [`export`]
//! - [`testing`] - fixtures and temporary files for tests

pub mod io;
pub mod record;
pub mod source;
pub mod testing;
pub mod writer;

pub use io::csv::{write_csv_file, CsvWriter};
pub use io::jsonl::{read_jsonl_records, JsonlSource};
pub use record::Record;
pub use source::{export, RecordSource};
pub use writer::ExportWriter;
