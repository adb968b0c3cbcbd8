//! File uploads attached to notifications
//!
//! An [`Upload`] captures the base64 text of a document at construction time.
//! The source is read to exhaustion exactly once and never retained, so a
//! file handle passed in by value is closed before the constructor returns.
//! Uploads are capped at [`DOCUMENT_UPLOAD_SIZE_LIMIT`]; precompiled letter
//! content goes through [`encode_document`] and has no cap.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::errors::{ClientError, ClientResult};

/// Largest document the API accepts as a personalisation upload.
pub const DOCUMENT_UPLOAD_SIZE_LIMIT: usize = 2 * 1024 * 1024;

/// A document to be sent inside personalisation.
///
/// Serializes with all four keys present; unset metadata is written as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upload {
    file: String,
    filename: Option<String>,
    confirm_email_before_download: Option<bool>,
    retention_period: Option<String>,
}

impl Upload {
    /// Read `source` fully and encode it.
    ///
    /// Read failures are returned as [`ClientError::Io`] holding the original
    /// `std::io::Error`. Documents over [`DOCUMENT_UPLOAD_SIZE_LIMIT`] are
    /// rejected with [`ClientError::DocumentTooLarge`].
    pub fn from_reader<R: Read>(source: R) -> ClientResult<Self> {
        let contents = read_limited(source, DOCUMENT_UPLOAD_SIZE_LIMIT)?;
        let file = STANDARD.encode(&contents);
        Ok(Self {
            file,
            filename: None,
            confirm_email_before_download: None,
            retention_period: None,
        })
    }

    /// Open, read and close the file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> ClientResult<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn confirm_email_before_download(mut self, confirm: bool) -> Self {
        self.confirm_email_before_download = Some(confirm);
        self
    }

    /// Retention period in the API's own format, e.g. `"52 weeks"`.
    pub fn retention_period(mut self, period: impl Into<String>) -> Self {
        self.retention_period = Some(period.into());
        self
    }

    /// The base64 text of the document.
    pub fn encoded(&self) -> &str {
        &self.file
    }
}

/// Read `source` to exhaustion and return its standard base64 encoding.
pub fn encode_document<R: Read>(mut source: R) -> ClientResult<String> {
    let mut contents = Vec::new();
    source.read_to_end(&mut contents)?;
    Ok(STANDARD.encode(&contents))
}

/// Read `source` to exhaustion, keeping at most `limit + 1` bytes in memory.
///
/// Past the limit the rest is drained unbuffered so the reported size is the
/// full length of the source.
fn read_limited<R: Read>(mut source: R, limit: usize) -> ClientResult<Vec<u8>> {
    let mut contents = Vec::new();
    (&mut source).take(limit as u64 + 1).read_to_end(&mut contents)?;
    if contents.len() <= limit {
        return Ok(contents);
    }
    let rest = io::copy(&mut source, &mut io::sink())?;
    Err(ClientError::DocumentTooLarge {
        size: contents.len() + rest as usize,
        limit,
    })
}
