//! `gg list` — the collection sorted by votes descending.

use crate::output::{self, OutputMode, Renderable, pretty_kv, pretty_rule};
use anyhow::Result;
use clap::Args;
use giggle_core::model::{Joke, Tier};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Maximum jokes to show.
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// One display row: the joke plus its derived band.
#[derive(Debug, Serialize)]
pub struct JokeRow {
    pub id: String,
    pub text: String,
    pub votes: i64,
    pub mood: &'static str,
    pub color: &'static str,
}

impl From<&Joke> for JokeRow {
    fn from(joke: &Joke) -> Self {
        let tier = Tier::from_votes(joke.votes);
        Self {
            id: joke.id.to_string(),
            text: joke.text.clone(),
            votes: joke.votes,
            mood: tier.mood(),
            color: tier.color(),
        }
    }
}

impl Renderable for JokeRow {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        pretty_rule(w)?;
        writeln!(w, "{}", self.text)?;
        pretty_kv(w, "id", &self.id)?;
        pretty_kv(w, "votes", self.votes.to_string())?;
        pretty_kv(w, "mood", format!("{} ({})", self.mood, self.color))
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *w, self)?;
        Ok(())
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{}\t{}\t{}\t{}",
            self.id, self.votes, self.mood, self.text
        )
    }

    fn table_headers() -> &'static [&'static str] {
        &["ID", "VOTES", "MOOD", "TEXT"]
    }
}

pub fn run_list(args: &ListArgs, output: OutputMode) -> Result<()> {
    let (_config, collection) = super::open_collection()?;

    let mut rows: Vec<JokeRow> = collection.sorted_view().iter().map(JokeRow::from).collect();
    if let Some(limit) = args.limit {
        rows.truncate(limit);
    }

    if rows.is_empty() && !output.is_json() {
        return output::render_success(output, "No jokes collected yet. Try `gg fetch`.");
    }

    output::render_list(&rows, output)?;
    Ok(())
}
