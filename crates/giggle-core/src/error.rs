use std::fmt;

/// Machine-readable error codes for script-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    SourceRequestFailed,
    SourceBadStatus,
    SourceMalformedBody,
    FetchBudgetExhausted,
    StoreWriteFailed,
    LockContention,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::SourceRequestFailed => "E2001",
            Self::SourceBadStatus => "E2002",
            Self::SourceMalformedBody => "E2003",
            Self::FetchBudgetExhausted => "E2004",
            Self::StoreWriteFailed => "E3001",
            Self::LockContention => "E3002",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::SourceRequestFailed => "Joke endpoint request failed",
            Self::SourceBadStatus => "Joke endpoint returned an error status",
            Self::SourceMalformedBody => "Joke endpoint body missing joke text",
            Self::FetchBudgetExhausted => "Fetch attempt budget exhausted",
            Self::StoreWriteFailed => "Store file write failed",
            Self::LockContention => "Lock contention",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to users and scripts.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in the giggle config.toml and retry."),
            Self::SourceRequestFailed => Some("Check network connectivity and the configured URL."),
            Self::SourceBadStatus => Some("The joke endpoint may be down. Retry later."),
            Self::SourceMalformedBody => {
                Some("Verify the configured endpoint returns `{ \"joke\": ... }` JSON.")
            }
            Self::FetchBudgetExhausted => {
                Some("The source keeps returning jokes already collected. Try a smaller -n.")
            }
            Self::StoreWriteFailed => Some("Check disk space and data directory permissions."),
            Self::LockContention => Some("Retry after the other `gg` process releases its lock."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
