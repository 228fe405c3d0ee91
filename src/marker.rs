use std::{path::Path, time::Instant};

use rayon::prelude::*;

use crate::{
    error::{Error, Result},
    partition::partition,
    report::{MarkPlan, Reporter},
    source::{InputMode, SourceFile, ELEMENT_SIZE},
    table::{OutOfUniverse, PresenceTable},
    tag::Tag,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkOptions {
    /// Cap on the bytes read from the file; `None` or zero reads all of it.
    pub size_limit: Option<u64>,
    /// Reader count; `None` or zero uses one per hardware thread.
    pub workers: Option<usize>,
    pub mode: InputMode,
}

impl MarkOptions {
    pub fn worker_count(&self) -> usize {
        match self.workers {
            Some(workers) if workers > 0 => workers,
            _ => num_cpus::get(),
        }
    }
}

/// Mark every value of the file at `path` with `tag`, spreading the file
/// across a dedicated pool of readers. Returns the number of bytes read once
/// every reader has finished.
pub fn mark_file(
    table: &PresenceTable,
    path: &Path,
    tag: Tag,
    options: &MarkOptions,
    reporter: &dyn Reporter,
) -> Result<u64> {
    let start = Instant::now();
    let source = SourceFile::open(path, options.size_limit, options.mode)?;

    let workers = options.worker_count();
    let ranges = partition(source.element_count(), workers);

    let plan = MarkPlan {
        file_size: source.file_size(),
        bytes: source.len() as u64,
        workers,
        elements_per_worker: source.element_count() / workers,
    };
    reporter.marking(path, &plan);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("int32set-reader-{}", i))
        .build()
        .map_err(|source| Error::ThreadPool { workers, source })?;

    // One task per range; install returns only when all of them are done.
    let elements = pool.install(|| {
        ranges
            .into_par_iter()
            .with_max_len(1)
            .map(|range| mark_range(table, &source, range, tag))
            .try_reduce(|| 0, |a, b| Ok(a + b))
    });

    let elements = elements.map_err(|OutOfUniverse(value)| Error::OutOfUniverse {
        path: path.into(),
        value,
        universe: table.universe(),
    })?;

    let bytes = elements * ELEMENT_SIZE as u64;
    reporter.marked(path, bytes, start.elapsed());
    Ok(bytes)
}

fn mark_range(
    table: &PresenceTable,
    source: &SourceFile,
    range: std::ops::Range<usize>,
    tag: Tag,
) -> std::result::Result<u64, OutOfUniverse> {
    let mut count = 0;
    for value in source.elements(range) {
        table.mark(value, tag)?;
        count += 1;
    }
    Ok(count)
}
