use thiserror::Error;

/// The main error type for hubprobe operations.
#[derive(Debug, Error)]
pub enum HubError {
    #[error("transport failure for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("authorization required for {url} (HTTP {status})")]
    AuthorizationRequired { url: String, status: u16 },

    #[error("unexpected HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("failed to decode repository listing from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("invalid repo id '{input}': {message}")]
    InvalidRepoId { input: String, message: String },

    #[error("invalid URL '{input}': {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },
}
