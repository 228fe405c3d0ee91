use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use colored::Colorize;
use int32set::{
    report::{Console, Reporter, Silent},
    InputMode, Intersection,
};

const GIB: u64 = 1024 * 1024 * 1024;

/// Intersect flat binary files of native endian u32 values.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// First input set.
    #[arg(default_value = "1.bin")]
    first: PathBuf,
    /// Second input set.
    #[arg(default_value = "2.bin")]
    second: PathBuf,
    /// Further input sets, up to eight in total.
    more: Vec<PathBuf>,
    #[arg(short, long, default_value = "set.bin")]
    output: PathBuf,
    /// Read at most this many GiB of each input; 0 reads them whole.
    #[arg(short, long)]
    limit_gib: Option<u64>,
    /// Readers per input; defaults to one per hardware thread.
    #[arg(short, long)]
    readers: Option<usize>,
    /// Read inputs into memory instead of mapping them.
    #[arg(long, action)]
    buffered: bool,
    #[arg(short, long, action)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let sources = [cli.first.clone(), cli.second.clone()]
        .into_iter()
        .chain(cli.more.iter().cloned());

    let intersection = Intersection::new(sources)
        .size_limit(cli.limit_gib.map(|gib| gib.saturating_mul(GIB)))
        .workers(cli.readers)
        .mode(if cli.buffered { InputMode::Buffered } else { InputMode::Mapped });

    let reporter: &dyn Reporter = if cli.quiet { &Silent } else { &Console };

    match intersection.run(&cli.output, reporter) {
        Ok(summary) => {
            if !cli.quiet {
                let line = format!(
                    "total time {:.3} seconds",
                    summary.total_elapsed.as_secs_f64()
                );
                println!("{}", line.green().bold());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            let msg = format!("error: {}", e);
            eprintln!("{}", msg.red().bold());
            ExitCode::FAILURE
        }
    }
}
