use std::{
    fs::File,
    io::{self, BufWriter, Seek, Write},
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

/// Used to receive intersection results in a generic way. Inspired by
/// roaring-rs.
pub trait Visitor<T> {
    fn visit(&mut self, value: T);
    fn clear(&mut self);
}

/// Counts intersection size without storing result.
#[derive(Default)]
pub struct Counter {
    count: usize,
}

impl<T> Visitor<T> for Counter {
    fn visit(&mut self, _value: T) {
        self.count += 1;
    }

    fn clear(&mut self) {
        self.count = 0;
    }
}

impl Counter {
    pub fn count(&self) -> usize {
        self.count
    }
}

/// Stores intersection result in a vector.
pub struct VecWriter<T> {
    data: Vec<T>,
}

impl<T> VecWriter<T> {
    pub fn with_capacity(cardinality: usize) -> Self {
        Self {
            data: Vec::with_capacity(cardinality),
        }
    }
}

impl<T> AsRef<[T]> for VecWriter<T> {
    fn as_ref(&self) -> &[T] {
        &self.data
    }
}

impl<T> From<VecWriter<T>> for Vec<T> {
    fn from(writer: VecWriter<T>) -> Self {
        writer.data
    }
}

impl<T> Default for VecWriter<T> {
    fn default() -> Self {
        Self { data: Vec::default() }
    }
}

impl<T> Visitor<T> for VecWriter<T> {
    fn visit(&mut self, value: T) {
        self.data.push(value);
    }

    fn clear(&mut self) {
        self.data.clear();
    }
}

/// Appends each value to a file as 4 native endian bytes, no header.
///
/// `visit` cannot fail, so the first I/O error is held back, later values
/// are dropped, and the error surfaces from `finish`.
pub struct FileWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    written: u64,
    error: Option<io::Error>,
}

impl FileWriter {
    /// Create or truncate `path`.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::options()
            .write(true)
            .truncate(true)
            .create(true)
            .open(path)
            .map_err(|source| Error::Write { path: path.into(), source })?;

        Ok(Self {
            path: path.into(),
            writer: BufWriter::with_capacity(1 << 20, file),
            written: 0,
            error: None,
        })
    }

    /// Flush and return the number of bytes written.
    pub fn finish(mut self) -> Result<u64> {
        let flushed = match self.error.take() {
            Some(e) => Err(e),
            None => self.writer.flush(),
        };
        flushed
            .map(|_| self.written)
            .map_err(|source| Error::Write { path: self.path, source })
    }
}

impl Visitor<u32> for FileWriter {
    fn visit(&mut self, value: u32) {
        if self.error.is_some() {
            return;
        }
        match self.writer.write_all(&value.to_ne_bytes()) {
            Ok(()) => self.written += std::mem::size_of::<u32>() as u64,
            Err(e) => self.error = Some(e),
        }
    }

    /// Drop everything visited so far, like the in-memory sinks do: the file
    /// is truncated and later values start again at offset zero.
    fn clear(&mut self) {
        // Seeking a BufWriter flushes it first.
        match self.writer.rewind().and_then(|_| self.writer.get_ref().set_len(0)) {
            Ok(()) => {
                self.written = 0;
                self.error = None;
            }
            Err(e) => self.error = Some(e),
        }
    }
}
