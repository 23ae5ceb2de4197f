//! Error kinds for a single advisory run.

use thiserror::Error;

use crate::route::TravelMode;

/// A provider duration string did not have the `"<N>s"` shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid duration {raw:?}: expected \"<seconds>s\"")]
pub struct ParseError {
    pub raw: String,
}

impl ParseError {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("route query for {mode} failed: {source}")]
    Transport {
        mode: TravelMode,
        #[source]
        source: reqwest::Error,
    },

    #[error("route query for {mode} returned status {status}: {body}")]
    Status {
        mode: TravelMode,
        status: u16,
        body: String,
    },

    #[error("route query for {mode} returned a malformed body: {message}")]
    Malformed { mode: TravelMode, message: String },
}

#[derive(Debug, Error)]
pub enum AdvisoryError {
    #[error("no primary route found")]
    NoRoute,

    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("webhook delivery failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("webhook responded with status {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("missing required configuration: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("invalid value for {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}

/// Any failure that ends a run without a delivered advisory.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Advisory(#[from] AdvisoryError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to serialize webhook payload: {0}")]
    Render(#[from] serde_json::Error),
}
