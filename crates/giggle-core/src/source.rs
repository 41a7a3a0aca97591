use crate::config::SourceConfig;
use crate::error::ErrorCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Failures from a single joke request. None of these are retried here;
/// the fetch loop aborts on the first one.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("joke request failed: {0}")]
    Transport(String),

    #[error("joke endpoint returned status {0}")]
    BadStatus(u16),

    #[error("joke response body is not `{{ \"joke\": ... }}` JSON: {0}")]
    MalformedBody(String),
}

impl SourceError {
    /// Machine-readable code associated with this failure.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Transport(_) => ErrorCode::SourceRequestFailed,
            Self::BadStatus(_) => ErrorCode::SourceBadStatus,
            Self::MalformedBody(_) => ErrorCode::SourceMalformedBody,
        }
    }
}

/// One external endpoint returning one random joke per call.
pub trait JokeSource {
    /// Issue one request and return the joke text. No retry, no timeout
    /// policy beyond the transport's own.
    fn fetch_one(&self) -> Result<String, SourceError>;
}

/// Expected response shape; extra fields from the endpoint are ignored.
#[derive(Debug, Deserialize)]
struct JokeBody {
    joke: String,
}

/// Blocking HTTP implementation of [`JokeSource`].
#[derive(Debug, Clone)]
pub struct HttpJokeSource {
    url: String,
    user_agent: String,
}

impl HttpJokeSource {
    #[must_use]
    pub fn new(config: &SourceConfig) -> Self {
        Self {
            url: config.url.clone(),
            user_agent: config.user_agent.clone(),
        }
    }
}

impl JokeSource for HttpJokeSource {
    fn fetch_one(&self) -> Result<String, SourceError> {
        let response = ureq::get(&self.url)
            .set("Accept", "application/json")
            .set("User-Agent", &self.user_agent)
            .call()
            .map_err(|err| match err {
                ureq::Error::Status(code, _) => SourceError::BadStatus(code),
                ureq::Error::Transport(transport) => {
                    SourceError::Transport(transport.to_string())
                }
            })?;

        let body: JokeBody = response
            .into_json()
            .map_err(|err| SourceError::MalformedBody(err.to_string()))?;

        debug!(url = %self.url, "fetched one joke");
        Ok(body.joke)
    }
}
