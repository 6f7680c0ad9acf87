//! JSONL file writer for decoded communication logs.
//!
//! Each accepted [`CommunicationLogDetail`] is re-encoded in canonical form
//! and appended to the file as a single JSON line via a buffered writer.

use commlog_application::{DecodedLogSink, SinkError};
use commlog_domain::{CodecError, CommunicationLogCodec, CommunicationLogDetail};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// JSONL sink that writes one encoded log detail per line.
///
/// Thread-safe via `Mutex<W>`. Write errors are returned to the caller; the
/// final flush on `Drop` is best effort.
pub struct JsonlDetailSink<W: Write + Send = BufWriter<File>> {
    writer: Mutex<W>,
    path: PathBuf,
    codec: CommunicationLogCodec,
}

impl JsonlDetailSink {
    /// Create a sink writing to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist and
    /// truncates an existing file.
    pub fn create(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        Ok(Self::from_writer(BufWriter::new(file), path))
    }
}

impl<W: Write + Send> JsonlDetailSink<W> {
    /// Wrap an already open writer; `path` is only used in error messages.
    pub fn from_writer(writer: W, path: impl Into<PathBuf>) -> Self {
        Self {
            writer: Mutex::new(writer),
            path: path.into(),
            codec: CommunicationLogCodec::default(),
        }
    }

    /// Get the path to the output file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, W>, SinkError> {
        self.writer
            .lock()
            .map_err(|_| SinkError::Unavailable(self.path.display().to_string()))
    }

    fn io_error(&self, source: std::io::Error) -> SinkError {
        SinkError::Io {
            target: self.path.display().to_string(),
            source,
        }
    }
}

impl<W: Write + Send> DecodedLogSink for JsonlDetailSink<W> {
    fn write(&self, detail: &CommunicationLogDetail) -> Result<(), SinkError> {
        let line = self
            .codec
            .encode(detail)
            .and_then(|value| {
                serde_json::to_string(&value).map_err(|e| CodecError::Encoding(e.to_string()))
            })
            .map_err(|source| SinkError::Encoding {
                id: detail.id(),
                source,
            })?;

        let mut writer = self.lock()?;
        writeln!(writer, "{}", line).map_err(|e| self.io_error(e))
    }

    fn flush(&self) -> Result<(), SinkError> {
        self.lock()?.flush().map_err(|e| self.io_error(e))
    }
}

impl<W: Write + Send> Drop for JsonlDetailSink<W> {
    fn drop(&mut self) {
        if let Ok(writer) = self.writer.get_mut() {
            let _ = writer.flush();
        }
    }
}
