use std::{
    io,
    path::{Path, PathBuf},
};

pub type Result<T> = std::result::Result<T, Error>;

/// Every failure is fatal for the run; nothing here is retried.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("error opening file for reading {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("error getting file stats for {}: {source}", path.display())]
    Stat { path: PathBuf, source: io::Error },

    #[error("error file is not int32 aligned {} ({len} bytes)", path.display())]
    Alignment { path: PathBuf, len: u64 },

    #[error("failed to map {}: {source}", path.display())]
    Map { path: PathBuf, source: io::Error },

    #[error("error allocating presence table of {universe} slots")]
    Allocation { universe: u64 },

    #[error("error writing {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to start {workers} readers: {source}")]
    ThreadPool {
        workers: usize,
        source: rayon::ThreadPoolBuildError,
    },

    #[error("value {value} in {} lies outside a universe of {universe}", path.display())]
    OutOfUniverse {
        path: PathBuf,
        value: u32,
        universe: u64,
    },

    #[error("cannot intersect {0} sources, expected between 1 and 8")]
    SourceCount(usize),
}

impl Error {
    /// Input or output file the error refers to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Error::Open { path, .. }
            | Error::Stat { path, .. }
            | Error::Alignment { path, .. }
            | Error::Map { path, .. }
            | Error::Write { path, .. }
            | Error::OutOfUniverse { path, .. } => Some(path.as_path()),
            Error::Allocation { .. }
            | Error::ThreadPool { .. }
            | Error::SourceCount(_) => None,
        }
    }
}
