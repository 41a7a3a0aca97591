//! giggle-core library.
//!
//! Owns the joke collection: the duplicate-avoiding fetch loop against an
//! external joke endpoint, the vote model, and the key-value persistence seam.
//!
//! # Conventions
//!
//! - **Errors**: `thiserror` enums at the seams, `anyhow::Result` for
//!   top-level plumbing like config loading.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`).

pub mod collection;
pub mod config;
pub mod error;
pub mod lock;
pub mod model;
pub mod source;
pub mod store;

pub use collection::{FetchError, FetchOutcome, JokeCollection, RefillReport, STORE_KEY};
pub use config::ConfigParseError;
pub use model::{Joke, JokeId, Tier};
pub use source::{HttpJokeSource, JokeSource, SourceError};
pub use store::{FileStore, KvStore, MemStore, StoreError};
