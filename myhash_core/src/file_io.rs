//! Byte sources feeding the digest engine
//!
//! A source delivers the next chunk of a stream in order until it is
//! exhausted. Exhaustion (`Ok(0)`) and failure (`Err`) are distinct
//! outcomes, so a partially read stream never turns into a digest.

use crate::error::IoError;
use crate::hashing::DigestContext;
use crate::{Error, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncReadExt;

/// Ordered stream of bytes read chunk by chunk
#[async_trait]
pub trait ByteSource: Send {
    /// Human readable origin of the bytes, used in diagnostics
    fn describe(&self) -> String;

    /// Fill the front of `buf` with the next bytes of the stream
    ///
    /// Returns the number of bytes written, `0` once the stream is exhausted.
    async fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize>;
}

/// Regular file opened for sequential reading
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    file: File,
}

impl FileSource {
    /// Open `path`, rejecting missing files and directories up front
    pub async fn open(path: &Path) -> Result<Self> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| IoError::open_failed(path, e))?;
        if metadata.is_dir() {
            return Err(IoError::is_directory(path).into());
        }

        let file = File::open(path)
            .await
            .map_err(|e| IoError::open_failed(path, e))?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    /// Path this source reads from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ByteSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize> {
        loop {
            match self.file.read(buf).await {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(IoError::read_failed(Some(&self.path), e).into()),
            }
        }
    }
}

/// In-memory byte source
#[derive(Debug, Clone)]
pub struct MemorySource {
    label: String,
    data: Vec<u8>,
    position: usize,
}

impl MemorySource {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self::with_label("<memory>", data)
    }

    pub fn with_label(label: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
            position: 0,
        }
    }

    /// Bytes not yet handed out
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }
}

#[async_trait]
impl ByteSource for MemorySource {
    fn describe(&self) -> String {
        self.label.clone()
    }

    async fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize> {
        let n = buf.len().min(self.remaining());
        buf[..n].copy_from_slice(&self.data[self.position..self.position + n]);
        self.position += n;
        Ok(n)
    }
}

/// Feed every chunk of `source` into `context`, using `buffer` as scratch
///
/// Returns the number of bytes consumed. On error the context has seen a
/// prefix of the stream and must be discarded.
pub async fn hash_reader(
    context: &mut DigestContext,
    source: &mut dyn ByteSource,
    buffer: &mut [u8],
) -> Result<u64> {
    if buffer.is_empty() {
        return Err(Error::Validation(
            crate::error::ValidationError::invalid_parameter(
                "chunk_size",
                "must be greater than zero",
            ),
        ));
    }

    let mut bytes_read = 0u64;
    let mut chunks = 0u64;

    loop {
        let n = source.read_chunk(buffer).await?;
        if n == 0 {
            break;
        }
        context.update(&buffer[..n]);
        bytes_read += n as u64;
        chunks += 1;
    }

    log::trace!(
        "Read {bytes_read} bytes in {chunks} chunks from {}",
        source.describe()
    );
    Ok(bytes_read)
}
