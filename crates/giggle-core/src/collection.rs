use crate::error::ErrorCode;
use crate::model::{Joke, JokeId};
use crate::source::{JokeSource, SourceError};
use crate::store::{KvStore, StoreError};
use anyhow::Context as _;
use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info, warn};

/// The single store slot holding the JSON-serialized joke list.
pub const STORE_KEY: &str = "jokes";

/// Failures from the duplicate-avoiding fetch loop.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(
        "gave up after {attempts} source calls with {accepted} of {wanted} unique jokes"
    )]
    BudgetExhausted {
        attempts: usize,
        accepted: usize,
        wanted: usize,
    },
}

impl FetchError {
    /// Machine-readable code associated with this failure.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Source(err) => err.code(),
            Self::BudgetExhausted { .. } => ErrorCode::FetchBudgetExhausted,
        }
    }
}

/// Result of one fetch loop: the accepted batch plus loop accounting.
#[derive(Debug)]
pub struct FetchOutcome {
    pub jokes: Vec<Joke>,
    pub attempts: usize,
    pub duplicates: usize,
}

/// What a refill accomplished, in user-reportable terms.
#[derive(Debug, Serialize)]
pub struct RefillReport {
    pub added: usize,
    pub duplicates: usize,
    pub total: usize,
}

/// The joke aggregate: insertion-ordered items plus a seen-text index kept
/// strictly in sync with them on every insertion.
#[derive(Debug)]
pub struct JokeCollection<S> {
    items: Vec<Joke>,
    seen: HashSet<String>,
    store: S,
}

impl<S: KvStore> JokeCollection<S> {
    /// Build the collection from persisted storage. Anything short of a
    /// clean parse (no slot, unreadable slot, malformed JSON) starts the
    /// collection empty; hydration never fails.
    pub fn hydrate(store: S) -> Self {
        let items = match store.read(STORE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Joke>>(&raw) {
                Ok(items) => items,
                Err(err) => {
                    warn!(%err, "stored jokes are unparseable, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(%err, "store read failed, starting empty");
                Vec::new()
            }
        };

        let seen = items.iter().map(|joke| joke.text.clone()).collect();
        Self { items, seen, store }
    }

    #[must_use]
    pub fn items(&self) -> &[Joke] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &JokeId) -> Option<&Joke> {
        self.items.iter().find(|joke| &joke.id == id)
    }

    /// Repeatedly call the source until `wanted` jokes accumulate whose text
    /// is in neither the collection nor the batch being built. Duplicates are
    /// discarded silently and do not count toward `wanted`. The first source
    /// failure aborts the whole call; nothing is committed here.
    ///
    /// `max_attempts` bounds total source calls so a source that only ever
    /// returns known jokes cannot spin forever.
    pub fn fetch_unique(
        &self,
        source: &dyn JokeSource,
        wanted: usize,
        max_attempts: usize,
    ) -> Result<FetchOutcome, FetchError> {
        let mut jokes = Vec::with_capacity(wanted);
        let mut batch_seen: HashSet<String> = HashSet::new();
        let mut attempts = 0usize;
        let mut duplicates = 0usize;

        while jokes.len() < wanted {
            if attempts >= max_attempts {
                return Err(FetchError::BudgetExhausted {
                    attempts,
                    accepted: jokes.len(),
                    wanted,
                });
            }
            attempts += 1;

            let text = source.fetch_one()?;
            if self.seen.contains(&text) || batch_seen.contains(&text) {
                duplicates += 1;
                debug!(attempts, "duplicate joke from source, discarding");
                continue;
            }

            batch_seen.insert(text.clone());
            jokes.push(Joke::new(text));
        }

        Ok(FetchOutcome {
            jokes,
            attempts,
            duplicates,
        })
    }

    /// Append a batch and write the full updated list to storage. Atomic from
    /// the caller's view: the store write happens first, and memory is only
    /// committed once it succeeds.
    pub fn append_and_persist(&mut self, new_jokes: Vec<Joke>) -> Result<(), StoreError> {
        if new_jokes.is_empty() {
            return Ok(());
        }

        let added_texts: Vec<String> = new_jokes.iter().map(|joke| joke.text.clone()).collect();
        let mut next = self.items.clone();
        next.extend(new_jokes);

        let raw = serde_json::to_string(&next)?;
        self.store.write(STORE_KEY, &raw)?;

        self.items = next;
        self.seen.extend(added_texts);
        Ok(())
    }

    /// Fetch then persist: the path the CLI `fetch` command drives.
    pub fn refill(
        &mut self,
        source: &dyn JokeSource,
        wanted: usize,
        max_attempts: usize,
    ) -> anyhow::Result<RefillReport> {
        let outcome = self
            .fetch_unique(source, wanted, max_attempts)
            .context("fetch loop aborted")?;

        let added = outcome.jokes.len();
        self.append_and_persist(outcome.jokes)
            .context("failed to persist fetched jokes")?;

        info!(
            added,
            duplicates = outcome.duplicates,
            attempts = outcome.attempts,
            "refilled collection"
        );
        Ok(RefillReport {
            added,
            duplicates: outcome.duplicates,
            total: self.items.len(),
        })
    }

    /// Adjust a joke's vote count by `delta` and re-persist the collection.
    /// An unknown id is a no-op. A persist failure after the in-memory
    /// mutation is logged; memory stays authoritative for the session.
    pub fn vote(&mut self, id: &JokeId, delta: i64) {
        let Some(joke) = self.items.iter_mut().find(|joke| &joke.id == id) else {
            debug!(%id, "vote for unknown id ignored");
            return;
        };
        joke.votes = joke.votes.saturating_add(delta);

        if let Err(err) = self.persist() {
            warn!(%err, "persist after vote failed, in-memory state stays authoritative");
        }
    }

    /// Items ordered by votes descending. The sort is stable, so equal-vote
    /// jokes keep their insertion order across repeated calls.
    #[must_use]
    pub fn sorted_view(&self) -> Vec<Joke> {
        let mut view = self.items.clone();
        view.sort_by(|a, b| b.votes.cmp(&a.votes));
        view
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&self.items)?;
        self.store.write(STORE_KEY, &raw)
    }
}
