//! `gg fetch` — refill the collection with unique jokes from the source.

use crate::output::{self, OutputMode, Renderable};
use anyhow::Result;
use clap::Args;
use giggle_core::collection::RefillReport;
use giggle_core::source::HttpJokeSource;
use std::io::{self, Write};

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Number of unique jokes to fetch (default from config).
    #[arg(short = 'n', long)]
    pub count: Option<usize>,
}

struct FetchRow(RefillReport);

impl Renderable for FetchRow {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "Added {} joke(s), skipped {} duplicate(s). Collection now holds {}.",
            self.0.added, self.0.duplicates, self.0.total
        )
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *w, &self.0)?;
        Ok(())
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{}\t{}\t{}", self.0.added, self.0.duplicates, self.0.total)
    }
}

pub fn run_fetch(args: &FetchArgs, output: OutputMode, quiet: bool) -> Result<()> {
    let (config, mut collection) = super::open_collection()?;
    let wanted = args.count.unwrap_or(config.fetch.batch_size);
    let budget = wanted.saturating_mul(config.fetch.max_attempts_per_joke);
    let source = HttpJokeSource::new(&config.source);

    // One outstanding request at a time; this line stands in for the
    // loading state while the loop runs.
    if output.is_pretty() && !quiet {
        eprintln!("Fetching {wanted} joke(s)...");
    }

    let report = collection.refill(&source, wanted, budget)?;
    output::render_item(&FetchRow(report), output)?;
    Ok(())
}
