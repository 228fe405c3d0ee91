use std::{
    fs::File,
    io::Read,
    ops::Deref,
    path::Path,
};

use memmap2::{Mmap, MmapOptions};

use crate::error::{Error, Result};

pub const ELEMENT_SIZE: usize = std::mem::size_of::<u32>();

/// How a source file's bytes are brought into memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Mapped,
    /// Read the file into an owned buffer, for filesystems that cannot be
    /// mapped.
    Buffered,
}

enum Bytes {
    Empty,
    Mapped(Mmap),
    Buffered(Vec<u8>),
}

/// Read-only view over the whole elements of an input file, capped by an
/// optional size limit (zero means no limit). The mapping is released when the view is dropped.
pub struct SourceFile {
    file_size: u64,
    bytes: Bytes,
}

impl SourceFile {
    pub fn open(path: &Path, size_limit: Option<u64>, mode: InputMode) -> Result<Self> {
        let file = File::open(path)
            .map_err(|source| Error::Open { path: path.into(), source })?;

        let file_size = file.metadata()
            .map_err(|source| Error::Stat { path: path.into(), source })?
            .len();

        if file_size % ELEMENT_SIZE as u64 != 0 {
            return Err(Error::Alignment { path: path.into(), len: file_size });
        }

        let effective = size_limit
            .filter(|&limit| limit > 0)
            .map_or(file_size, |limit| file_size.min(limit));
        let effective = effective - effective % ELEMENT_SIZE as u64;
        let len = usize::try_from(effective).map_err(|_| Error::Map {
            path: path.into(),
            source: std::io::Error::other("file does not fit in the address space"),
        })?;

        let bytes = if len == 0 {
            Bytes::Empty
        } else {
            match mode {
                InputMode::Mapped => {
                    let mmap = unsafe { MmapOptions::new().len(len).map(&file) }
                        .map_err(|source| Error::Map { path: path.into(), source })?;
                    Bytes::Mapped(mmap)
                }
                InputMode::Buffered => {
                    let mut buffer = Vec::new();
                    buffer.try_reserve_exact(len)
                        .map_err(|e| Error::Map {
                            path: path.into(),
                            source: std::io::Error::other(e),
                        })?;
                    file.take(effective)
                        .read_to_end(&mut buffer)
                        .map_err(|source| Error::Map { path: path.into(), source })?;
                    Bytes::Buffered(buffer)
                }
            }
        };

        Ok(Self { file_size, bytes })
    }

    /// Size of the file on disk, ignoring any limit.
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    pub fn element_count(&self) -> usize {
        self.len() / ELEMENT_SIZE
    }

    /// Elements `range` in file order.
    pub fn elements(&self, range: std::ops::Range<usize>) -> impl Iterator<Item = u32> + '_ {
        self[range.start * ELEMENT_SIZE..range.end * ELEMENT_SIZE]
            .chunks_exact(ELEMENT_SIZE)
            .map(|chunk| u32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
    }
}

impl Deref for SourceFile {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match &self.bytes {
            Bytes::Empty => &[],
            Bytes::Mapped(mmap) => &mmap[..],
            Bytes::Buffered(buffer) => &buffer[..],
        }
    }
}
