//! `gg up` / `gg down` / `gg vote` — adjust a joke's vote count.

use crate::output::{self, OutputMode, Renderable, pretty_kv};
use anyhow::Result;
use clap::Args;
use giggle_core::model::{JokeId, Tier};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Args, Debug)]
pub struct UpArgs {
    /// Joke id to upvote.
    pub id: String,
}

#[derive(Args, Debug)]
pub struct DownArgs {
    /// Joke id to downvote.
    pub id: String,
}

#[derive(Args, Debug)]
pub struct VoteArgs {
    /// Joke id to vote on.
    pub id: String,

    /// Signed vote adjustment.
    #[arg(long, allow_hyphen_values = true)]
    pub delta: i64,
}

#[derive(Debug, Serialize)]
struct VoteOutcome {
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    votes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mood: Option<&'static str>,
    ignored: bool,
}

impl Renderable for VoteOutcome {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        if self.ignored {
            return writeln!(w, "No joke with id {} (ignored).", self.id);
        }
        pretty_kv(w, "id", &self.id)?;
        if let Some(votes) = self.votes {
            pretty_kv(w, "votes", votes.to_string())?;
        }
        if let Some(mood) = self.mood {
            pretty_kv(w, "mood", mood)?;
        }
        Ok(())
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *w, self)?;
        Ok(())
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        if self.ignored {
            return writeln!(w, "{}\tignored", self.id);
        }
        writeln!(
            w,
            "{}\t{}\t{}",
            self.id,
            self.votes.unwrap_or_default(),
            self.mood.unwrap_or_default()
        )
    }
}

pub fn run_up(args: &UpArgs, output: OutputMode) -> Result<()> {
    apply_vote(&args.id, 1, output)
}

pub fn run_down(args: &DownArgs, output: OutputMode) -> Result<()> {
    apply_vote(&args.id, -1, output)
}

pub fn run_vote(args: &VoteArgs, output: OutputMode) -> Result<()> {
    apply_vote(&args.id, args.delta, output)
}

fn apply_vote(raw_id: &str, delta: i64, output: OutputMode) -> Result<()> {
    let (_config, mut collection) = super::open_collection()?;
    let id = JokeId::new_unchecked(raw_id);

    collection.vote(&id, delta);

    let outcome = collection.get(&id).map_or_else(
        || VoteOutcome {
            id: raw_id.to_string(),
            votes: None,
            mood: None,
            ignored: true,
        },
        |joke| VoteOutcome {
            id: raw_id.to_string(),
            votes: Some(joke.votes),
            mood: Some(Tier::from_votes(joke.votes).mood()),
            ignored: false,
        },
    );

    output::render_item(&outcome, output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vote_args_accept_negative_delta() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: VoteArgs,
        }
        let w = Wrapper::parse_from(["test", "abc", "--delta", "-3"]);
        assert_eq!(w.args.id, "abc");
        assert_eq!(w.args.delta, -3);
    }

    #[test]
    fn ignored_outcome_renders_as_such() {
        let outcome = VoteOutcome {
            id: "nope".to_string(),
            votes: None,
            mood: None,
            ignored: true,
        };
        let mut buf = Vec::new();
        outcome.render_human(&mut buf).expect("render");
        assert!(String::from_utf8(buf).expect("utf8").contains("ignored"));
    }

    #[test]
    fn applied_outcome_serializes_votes_and_mood() {
        let outcome = VoteOutcome {
            id: "abc".to_string(),
            votes: Some(12),
            mood: Some("laughing"),
            ignored: false,
        };
        let mut buf = Vec::new();
        outcome.render_json(&mut buf).expect("render");
        let value: serde_json::Value = serde_json::from_slice(&buf).expect("valid JSON");
        assert_eq!(value["votes"], 12);
        assert_eq!(value["mood"], "laughing");
        assert_eq!(value["ignored"], false);
    }
}
