use std::{path::Path, time::Duration};

use colored::Colorize;

/// How a marking pass split its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkPlan {
    pub file_size: u64,
    pub bytes: u64,
    pub workers: usize,
    pub elements_per_worker: usize,
}

/// Receives progress from each phase of a run. Purely observational.
pub trait Reporter: Sync {
    fn marking(&self, _path: &Path, _plan: &MarkPlan) {}
    fn marked(&self, _path: &Path, _bytes: u64, _elapsed: Duration) {}
    fn writing(&self, _path: &Path) {}
    fn written(&self, _path: &Path, _bytes: u64, _matches: u64, _elapsed: Duration) {}
}

/// Discards everything.
pub struct Silent;

impl Reporter for Silent {}

/// Prints each phase to stdout.
pub struct Console;

impl Reporter for Console {
    fn marking(&self, path: &Path, plan: &MarkPlan) {
        println!(
            "{} {}, file_size={} bytes={} readers={} elements_per_reader={}",
            "Reading".green().bold(),
            path.display(),
            plan.file_size,
            plan.bytes,
            plan.workers,
            plan.elements_per_worker,
        );
    }

    fn marked(&self, path: &Path, bytes: u64, elapsed: Duration) {
        println!("{} {}: {}", "Read".bold(), path.display(), format_throughput(bytes, elapsed));
    }

    fn writing(&self, path: &Path) {
        println!("{} {}", "Writing".green().bold(), path.display());
    }

    fn written(&self, path: &Path, bytes: u64, matches: u64, elapsed: Duration) {
        println!(
            "{} {}: {}, found {} distinct values",
            "Wrote".bold(),
            path.display(),
            format_throughput(bytes, elapsed),
            matches,
        );
    }
}

pub fn format_throughput(bytes: u64, elapsed: Duration) -> String {
    let mb = bytes as f64 * 0.000001;
    let seconds = elapsed.as_secs_f64();
    let rate = if seconds > 0.0 { mb / seconds } else { 0.0 };
    format!("{:.3} MB in {:.3} seconds, {:.3} MB/s", mb, seconds, rate)
}
