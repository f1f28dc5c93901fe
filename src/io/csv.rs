//! CSV export writer.
//!
//! This module provides:
//! - [`CsvWriter`], which renders a record sequence to any [`Write`] sink
//! - [`write_csv_file`], which renders into a file with compression picked by
//!   extension (see [`crate::io::compression`])
//!
//! # Format
//! ```text
//! Email;Name
//! "hello@example.com";"Jane";
//! ```
//! * The header line holds the column names of the first non-null record,
//!   joined by `;`. Names are only quoted when they contain `;`, `"` or a
//!   line break.
//! * Every data value is double-quoted (inner `"` doubled) and followed by
//!   `;`. Each line ends with `\n`.
//! * `None` entries are skipped and do not take part in header derivation.
//! * A record missing a header column gets `""` for it; columns outside the
//!   header set are dropped.
//! * An empty sequence (or one holding only `None`) produces no output at all.

use crate::io::compression::auto_detect_writer;
use crate::record::Record;
use crate::writer::ExportWriter;
use anyhow::{Context, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs::{create_dir_all, File};
use std::io::Write;
use std::path::Path;

/// Separator between header names and terminator after each data value.
pub const DELIMITER: u8 = b';';

/// Renders export records as `;`-separated CSV text.
///
/// The writer is a plain options value; it keeps no state between calls.
///
/// ```
/// use woo_export::{CsvWriter, Record};
///
/// let records = vec![Some(Record::new().with("Email", "hello@example.com")), None];
/// let text = CsvWriter::new().render_to_string(&records).unwrap();
/// assert_eq!(text, "Email\n\"hello@example.com\";\n");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct CsvWriter {
    has_headers: bool,
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self { has_headers: true }
    }
}

impl CsvWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether to emit the header line (default `true`).
    #[must_use]
    pub fn has_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    /// Render `records` into `sink`.
    ///
    /// Returns the number of data rows written (`None` entries excluded).
    ///
    /// Each line is encoded in memory and written whole; `sink` is flushed
    /// once at the end.
    ///
    /// # Errors
    /// Returns an error if writing to or flushing `sink` fails.
    pub fn render<W: Write + ?Sized>(&self, sink: &mut W, records: &[Option<Record>]) -> Result<usize> {
        let Some(first) = records.iter().flatten().next() else {
            log::debug!("no records to export ({} null entries)", records.len());
            return Ok(0);
        };
        let columns: Vec<&str> = first.columns().collect();
        if columns.is_empty() {
            log::warn!("first export record has no columns; nothing written");
            return Ok(0);
        }

        let mut line = Vec::<u8>::with_capacity(64 * columns.len());
        if self.has_headers {
            encode_line(&mut line, &header_builder(), &columns).context("encode CSV header")?;
            sink.write_all(&line).context("write CSV header")?;
        }

        let rows_builder = row_builder();
        let mut rows = 0usize;
        for (i, entry) in records.iter().enumerate() {
            let Some(record) = entry else {
                log::trace!("skip null entry #{}", i + 1);
                continue;
            };
            let extra = record.columns().filter(|c| !columns.contains(c)).count();
            if extra > 0 {
                log::debug!("entry #{}: ignoring {extra} column(s) outside the header", i + 1);
            }
            let values: Vec<&str> = columns.iter().map(|c| record.get(c).unwrap_or("")).collect();
            encode_line(&mut line, &rows_builder, &values)
                .with_context(|| format!("encode CSV row #{}", i + 1))?;
            sink.write_all(&line)
                .with_context(|| format!("write CSV row #{}", i + 1))?;
            rows += 1;
        }
        sink.flush().context("flush CSV output")?;
        Ok(rows)
    }

    /// Render `records` into a `String`.
    ///
    /// # Errors
    /// Returns an error if rendering fails.
    pub fn render_to_string(&self, records: &[Option<Record>]) -> Result<String> {
        let mut buf = Vec::<u8>::new();
        self.render(&mut buf, records)?;
        String::from_utf8(buf).context("rendered CSV is not UTF-8")
    }

    /// Render `records` to the process's standard output.
    ///
    /// # Errors
    /// Returns an error if writing to or flushing stdout fails.
    pub fn render_stdout(&self, records: &[Option<Record>]) -> Result<usize> {
        let mut out = std::io::stdout().lock();
        self.render(&mut out, records).context("render CSV to stdout")
    }
}

impl ExportWriter for CsvWriter {
    fn render(&self, sink: &mut dyn Write, records: &[Option<Record>]) -> Result<usize> {
        CsvWriter::render(self, sink, records)
    }

    fn content_type(&self) -> &str {
        "text/csv"
    }

    fn extension(&self) -> &str {
        "csv"
    }
}

fn header_builder() -> WriterBuilder {
    let mut b = WriterBuilder::new();
    b.has_headers(false)
        .delimiter(DELIMITER)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'));
    b
}

// Every quoted value is closed by the delimiter, so the record terminator is
// the delimiter too and the line break is appended in `encode_line`.
fn row_builder() -> WriterBuilder {
    let mut b = WriterBuilder::new();
    b.has_headers(false)
        .delimiter(DELIMITER)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(DELIMITER));
    b
}

/// Replace `line` with one encoded record, ending in `\n`.
///
/// Header lines already end in `\n`; data lines end in the delimiter.
fn encode_line(line: &mut Vec<u8>, builder: &WriterBuilder, fields: &[&str]) -> Result<()> {
    line.clear();
    {
        let mut wtr = builder.from_writer(&mut *line);
        wtr.write_record(fields)?;
        wtr.flush()?;
    }
    if line.last() != Some(&b'\n') {
        line.push(b'\n');
    }
    Ok(())
}

/// Render `records` into a file at `path`.
///
/// * Creates parent directories if they don't exist.
/// * Truncates an existing file.
///
/// **Compression**: the output is compressed when the extension names a
/// registered codec (e.g. `orders.csv.gz`, `orders.csv.zst`).
///
/// # Returns
/// The number of data rows written.
///
/// # Errors
/// Returns an error if the file/dirs cannot be created or rendering/flushing
/// fails.
pub fn write_csv_file(
    path: impl AsRef<Path>,
    writer: &CsvWriter,
    records: &[Option<Record>],
) -> Result<usize> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent).with_context(|| format!("mkdir -p {}", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = auto_detect_writer(f, path)
        .with_context(|| format!("setup compression for {}", path.display()))?;
    let rows = writer
        .render(&mut w, records)
        .with_context(|| format!("render CSV to {}", path.display()))?;
    w.finish()
        .with_context(|| format!("finish {}", path.display()))?;
    Ok(rows)
}
