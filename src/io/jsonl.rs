//! JSON Lines record source.
//!
//! Each non-blank line holds one JSON value: an object becomes a [`Record`],
//! `null` becomes a null entry. Anything else is rejected.

use crate::record::Record;
use crate::source::RecordSource;
use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Read a JSON Lines file into a record sequence.
///
/// # Errors
/// Returns an error if the file cannot be read, a line is not valid JSON,
/// or a line holds something other than an object or `null`.
pub fn read_jsonl_records(path: impl AsRef<Path>) -> Result<Vec<Option<Record>>> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let reader = BufReader::new(f);

    let mut out = Vec::<Option<Record>>::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("read line {} in {}", idx + 1, path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(&line).with_context(|| {
            format!("parse JSONL line {} in {}: {}", idx + 1, path.display(), line)
        })?;
        let entry = match value {
            Value::Null => None,
            obj @ Value::Object(_) => Some(
                Record::from_json(obj)
                    .with_context(|| format!("JSONL line {} in {}", idx + 1, path.display()))?,
            ),
            other => bail!(
                "JSONL line {} in {}: expected an object or null, got {other}",
                idx + 1,
                path.display()
            ),
        };
        out.push(entry);
    }
    Ok(out)
}

/// A [`RecordSource`] backed by a JSON Lines file.
///
/// The file is read on every call to [`records`](RecordSource::records).
#[derive(Clone, Debug)]
pub struct JsonlSource {
    path: PathBuf,
}

impl JsonlSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for JsonlSource {
    fn records(&self) -> Result<Vec<Option<Record>>> {
        read_jsonl_records(&self.path)
    }
}
