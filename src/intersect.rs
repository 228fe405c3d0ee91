use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use rayon::prelude::*;

use crate::{
    error::Result,
    extract::extract,
    marker::{mark_file, MarkOptions},
    report::Reporter,
    source::InputMode,
    table::PresenceTable,
    tag,
    visitor::{FileWriter, Visitor},
    UNIVERSE,
};

/// Intersection of several binary u32 files, computed through a shared
/// presence table.
#[derive(Debug, Clone)]
pub struct Intersection {
    sources: Vec<PathBuf>,
    options: MarkOptions,
    universe: u64,
}

#[derive(Debug, Clone)]
pub struct SourceSummary {
    pub path: PathBuf,
    pub bytes: u64,
    pub elapsed: Duration,
}

#[derive(Debug, Clone)]
pub struct Summary {
    pub sources: Vec<SourceSummary>,
    /// Bytes of output, zero when extracting into a caller's visitor.
    pub written: u64,
    pub matches: u64,
    pub extract_elapsed: Duration,
    pub total_elapsed: Duration,
}

impl Intersection {
    pub fn new<I, P>(sources: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            sources: sources.into_iter().map(Into::into).collect(),
            options: MarkOptions::default(),
            universe: UNIVERSE,
        }
    }

    /// Read at most `bytes` of each source; `None` or zero reads every file
    /// whole.
    pub fn size_limit(mut self, bytes: Option<u64>) -> Self {
        self.options.size_limit = bytes;
        self
    }

    /// Readers per source; `None` or zero uses one per hardware thread.
    pub fn workers(mut self, workers: Option<usize>) -> Self {
        self.options.workers = workers;
        self
    }

    pub fn mode(mut self, mode: InputMode) -> Self {
        self.options.mode = mode;
        self
    }

    /// Shrink the value universe. Every input value must lie below it.
    pub fn universe(mut self, universe: u64) -> Self {
        self.universe = universe;
        self
    }

    /// Write the intersection to `output`, replacing any existing file.
    /// The output is only created once every source has been marked, and is
    /// removed again if writing fails.
    pub fn run(&self, output: &Path, reporter: &dyn Reporter) -> Result<Summary> {
        let start = Instant::now();
        let (mut table, target, sources) = self.mark_all(reporter)?;

        reporter.writing(output);
        let extract_start = Instant::now();

        let mut writer = FileWriter::create(output)?;
        let matches = extract(&mut table, target, &mut writer);
        let written = writer.finish().map_err(|e| {
            let _ = fs::remove_file(output);
            e
        })?;

        let extract_elapsed = extract_start.elapsed();
        reporter.written(output, written, matches, extract_elapsed);

        Ok(Summary {
            sources,
            written,
            matches,
            extract_elapsed,
            total_elapsed: start.elapsed(),
        })
    }

    /// Hand the intersection to `visitor` instead of a file.
    pub fn run_with<V>(&self, visitor: &mut V, reporter: &dyn Reporter) -> Result<Summary>
    where
        V: Visitor<u32>,
    {
        let start = Instant::now();
        let (mut table, target, sources) = self.mark_all(reporter)?;

        let extract_start = Instant::now();
        let matches = extract(&mut table, target, visitor);

        Ok(Summary {
            sources,
            written: 0,
            matches,
            extract_elapsed: extract_start.elapsed(),
            total_elapsed: start.elapsed(),
        })
    }

    /// Mark every source concurrently and wait for all of them.
    fn mark_all(
        &self,
        reporter: &dyn Reporter,
    ) -> Result<(PresenceTable, u8, Vec<SourceSummary>)> {
        let (tags, target) = tag::assign(self.sources.len())?;
        let table = PresenceTable::allocate(self.universe)?;

        let sources = self
            .sources
            .par_iter()
            .zip(tags)
            .with_max_len(1)
            .map(|(path, tag)| -> Result<SourceSummary> {
                let start = Instant::now();
                let bytes = mark_file(&table, path, tag, &self.options, reporter)?;
                Ok(SourceSummary {
                    path: path.clone(),
                    bytes,
                    elapsed: start.elapsed(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok((table, target, sources))
    }
}
