//! Record sources and the export entry point.

use crate::record::Record;
use crate::writer::ExportWriter;
use anyhow::{Context, Result};
use std::io::Write;

/// Supplies the record sequence for one export.
///
/// This is the data-retrieval side of an export (an order query, a customer
/// list, a file on disk). The whole sequence is returned at once; `None`
/// entries are placeholders the writer skips.
pub trait RecordSource {
    /// Fetch the records to export.
    ///
    /// # Errors
    /// Returns an error if the records cannot be retrieved.
    fn records(&self) -> Result<Vec<Option<Record>>>;
}

impl RecordSource for Vec<Option<Record>> {
    fn records(&self) -> Result<Vec<Option<Record>>> {
        Ok(self.clone())
    }
}

impl RecordSource for [Option<Record>] {
    fn records(&self) -> Result<Vec<Option<Record>>> {
        Ok(self.to_vec())
    }
}

/// Pull records from `source` once and render them with `writer` into `sink`.
///
/// Returns the number of data rows written.
///
/// # Errors
/// Returns an error if the source fails or if rendering fails.
pub fn export<S, E>(source: &S, writer: &E, sink: &mut dyn Write) -> Result<usize>
where
    S: RecordSource + ?Sized,
    E: ExportWriter + ?Sized,
{
    let records = source.records().context("fetch export records")?;
    log::debug!(
        "exporting {} entries as {}",
        records.len(),
        writer.content_type()
    );
    writer.render(sink, &records)
}
