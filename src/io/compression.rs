//! Pluggable output compression for file exports.
//!
//! Exports written to disk are compressed transparently when the file name
//! ends in a codec's extension (`orders.csv.gz`, `customers.csv.zst`).
//!
//! ## Built-in Codecs
//!
//! When enabled via feature flags:
//! - **Gzip** (`.gz`, `.gzip`) - via `flate2` (feature: `compression-gzip`)
//! - **Zstd** (`.zst`, `.zstd`) - via `zstd` (feature: `compression-zstd`)
//!
//! ## Custom Codecs
//! ```
//! use woo_export::io::compression::{register_codec, CompressionCodec, EncodedWrite};
//! use std::io::{BufWriter, Write};
//! use std::sync::Arc;
//!
//! struct Passthrough;
//!
//! impl CompressionCodec for Passthrough {
//!     fn name(&self) -> &str { "passthrough" }
//!     fn extensions(&self) -> &[&str] { &[".plain"] }
//!     fn wrap_writer_dyn(&self, w: Box<dyn Write>) -> std::io::Result<Box<dyn EncodedWrite>> {
//!         Ok(Box::new(BufWriter::new(w)))
//!     }
//! }
//!
//! register_codec(Arc::new(Passthrough));
//! ```

use anyhow::{Context, Result};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Global codec registry; built-ins are added on first use.
static CODEC_REGISTRY: RwLock<Option<Vec<Arc<dyn CompressionCodec>>>> = RwLock::new(None);

fn init_registry() -> Vec<Arc<dyn CompressionCodec>> {
    vec![
        #[cfg(feature = "compression-gzip")]
        Arc::new(GzipCodec),
        #[cfg(feature = "compression-zstd")]
        Arc::new(ZstdCodec),
    ]
}

fn get_registry() -> Vec<Arc<dyn CompressionCodec>> {
    let mut lock = CODEC_REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    lock.get_or_insert_with(init_registry).clone()
}

/// Register a custom compression codec globally.
///
/// Codecs registered later are consulted after the built-ins.
pub fn register_codec(codec: Arc<dyn CompressionCodec>) {
    let mut lock = CODEC_REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    lock.get_or_insert_with(init_registry).push(codec);
}

/// A compression algorithm for export files.
///
/// Implementations must be `Send + Sync` since they live in a global registry.
pub trait CompressionCodec: Send + Sync {
    /// Human-readable codec name (e.g. "gzip").
    fn name(&self) -> &str;

    /// File extensions with the leading dot, lowercase (e.g. `&[".gz"]`).
    fn extensions(&self) -> &[&str];

    /// Wrap a writer so that everything written to it is compressed.
    fn wrap_writer_dyn(&self, writer: Box<dyn Write>) -> std::io::Result<Box<dyn EncodedWrite>>;
}

/// A writer whose output is only complete after [`finish`](Self::finish).
///
/// Compressed streams end with a trailer or a closing frame; `finish` writes
/// it and flushes the underlying writer. Dropping without `finish` may leave a
/// truncated file.
pub trait EncodedWrite: Write {
    /// Write any trailing bytes and flush.
    ///
    /// # Errors
    /// Returns an error if the trailer cannot be written or flushed.
    fn finish(self: Box<Self>) -> std::io::Result<()>;
}

impl<W: Write> EncodedWrite for BufWriter<W> {
    fn finish(mut self: Box<Self>) -> std::io::Result<()> {
        self.flush()
    }
}

#[cfg(feature = "compression-gzip")]
impl<W: Write> EncodedWrite for flate2::write::GzEncoder<W> {
    fn finish(self: Box<Self>) -> std::io::Result<()> {
        flate2::write::GzEncoder::finish(*self)?.flush()
    }
}

#[cfg(feature = "compression-zstd")]
impl<W: Write> EncodedWrite for zstd::stream::write::Encoder<'static, W> {
    fn finish(self: Box<Self>) -> std::io::Result<()> {
        zstd::stream::write::Encoder::finish(*self)?.flush()
    }
}

/// First registered codec whose extension matches `path` (case-insensitive).
pub fn codec_for_path(path: impl AsRef<Path>) -> Option<Arc<dyn CompressionCodec>> {
    let path_str = path.as_ref().to_string_lossy().to_lowercase();
    get_registry()
        .into_iter()
        .find(|codec| codec.extensions().iter().any(|ext| path_str.ends_with(ext)))
}

/// Wrap `writer` with compression if `path_hint` names a registered codec.
///
/// Without a match the writer is returned buffered but uncompressed. Either
/// way the caller must call [`EncodedWrite::finish`] when done.
///
/// # Errors
/// Returns an error if the codec fails to set up its encoder.
pub fn auto_detect_writer<W: Write + 'static>(
    writer: W,
    path_hint: impl AsRef<Path>,
) -> Result<Box<dyn EncodedWrite>> {
    if let Some(codec) = codec_for_path(&path_hint) {
        log::debug!(
            "compressing {} with {}",
            path_hint.as_ref().display(),
            codec.name()
        );
        return codec
            .wrap_writer_dyn(Box::new(writer))
            .with_context(|| format!("wrap writer with {} codec", codec.name()));
    }
    Ok(Box::new(BufWriter::new(writer)))
}

#[cfg(feature = "compression-gzip")]
struct GzipCodec;

#[cfg(feature = "compression-gzip")]
impl CompressionCodec for GzipCodec {
    fn name(&self) -> &str {
        "gzip"
    }

    fn extensions(&self) -> &[&str] {
        &[".gz", ".gzip"]
    }

    fn wrap_writer_dyn(&self, writer: Box<dyn Write>) -> std::io::Result<Box<dyn EncodedWrite>> {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        Ok(Box::new(GzEncoder::new(writer, Compression::default())))
    }
}

#[cfg(feature = "compression-zstd")]
struct ZstdCodec;

#[cfg(feature = "compression-zstd")]
impl CompressionCodec for ZstdCodec {
    fn name(&self) -> &str {
        "zstd"
    }

    fn extensions(&self) -> &[&str] {
        &[".zst", ".zstd"]
    }

    fn wrap_writer_dyn(&self, writer: Box<dyn Write>) -> std::io::Result<Box<dyn EncodedWrite>> {
        zstd::stream::write::Encoder::new(writer, 3)
            .map(|e| Box::new(e) as Box<dyn EncodedWrite>)
    }
}
