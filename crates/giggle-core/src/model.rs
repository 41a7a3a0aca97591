use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identifier for a joke, assigned at creation and stable for the
/// joke's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JokeId(String);

impl JokeId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn fresh() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap a raw string as an id without validation (lookups, tests).
    #[must_use]
    pub fn new_unchecked(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JokeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single collected joke: text is the deduplication key, votes are
/// unbounded in both directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Joke {
    pub id: JokeId,
    pub text: String,
    pub votes: i64,
}

impl Joke {
    /// Create a new joke with a fresh id and zero votes.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: JokeId::fresh(),
            text: text.into(),
            votes: 0,
        }
    }
}

/// Discrete mood band derived purely from a joke's vote count.
///
/// Thresholds are evaluated highest-first; `Angry` is the sole negative band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    Angry,
    Confused,
    Neutral,
    SlightSmile,
    Smiley,
    Laughing,
    Rolling,
}

impl Tier {
    /// Map a vote count to its band. Pure function, first match wins.
    #[must_use]
    pub const fn from_votes(votes: i64) -> Self {
        if votes >= 15 {
            Self::Rolling
        } else if votes >= 12 {
            Self::Laughing
        } else if votes >= 9 {
            Self::Smiley
        } else if votes >= 6 {
            Self::SlightSmile
        } else if votes >= 3 {
            Self::Neutral
        } else if votes >= 0 {
            Self::Confused
        } else {
            Self::Angry
        }
    }

    /// Numeric rank, 0 (negative votes) through 6 (max positive).
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Angry => 0,
            Self::Confused => 1,
            Self::Neutral => 2,
            Self::SlightSmile => 3,
            Self::Smiley => 4,
            Self::Laughing => 5,
            Self::Rolling => 6,
        }
    }

    /// Fixed display color (hex) for this band.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Angry => "#F44336",
            Self::Confused => "#FF9800",
            Self::Neutral => "#FFC107",
            Self::SlightSmile => "#FFEB3B",
            Self::Smiley => "#CDDC39",
            Self::Laughing => "#8BC34A",
            Self::Rolling => "#4CAF50",
        }
    }

    /// Mood label for this band.
    #[must_use]
    pub const fn mood(self) -> &'static str {
        match self {
            Self::Angry => "angry",
            Self::Confused => "confused",
            Self::Neutral => "neutral",
            Self::SlightSmile => "slight-smile",
            Self::Smiley => "smiley",
            Self::Laughing => "laughing",
            Self::Rolling => "rolling",
        }
    }
}
