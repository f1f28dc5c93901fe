//! The export writer seam.
//!
//! An [`ExportWriter`] turns a record sequence into bytes and describes the
//! result (content type, file extension) so that whatever serves the download
//! can set its headers without knowing the format.

use crate::record::Record;
use anyhow::Result;
use std::io::Write;

/// A format that export records can be rendered to.
///
/// Implementations must not keep state between calls: rendering the same
/// sequence twice produces the same bytes twice.
pub trait ExportWriter {
    /// Render `records` into `sink`. `None` entries are skipped.
    ///
    /// Returns the number of data rows written.
    ///
    /// # Errors
    /// Returns an error if writing to `sink` fails.
    fn render(&self, sink: &mut dyn Write, records: &[Option<Record>]) -> Result<usize>;

    /// MIME type of the rendered output (e.g. `text/csv`).
    fn content_type(&self) -> &str;

    /// File extension without the leading dot (e.g. `csv`).
    fn extension(&self) -> &str;

    /// Download file name for `stem`, e.g. `orders` -> `orders.csv`.
    fn file_name(&self, stem: &str) -> String {
        format!("{stem}.{}", self.extension())
    }
}
