//! Error taxonomy for diagram requests.
//!
//! Every failure on the request path ends up as an [`ApiError`], which knows
//! its HTTP status and how to render itself as the JSON error envelope.

use serde_json::{Map, Value};
use thiserror::Error;

/// Extra fields merged into the JSON error envelope.
pub type Payload = Map<String, Value>;

/// Failure turning an encoded path segment into diagram source.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("corrupt compressed stream: {0}")]
    Inflate(#[from] flate2::DecompressError),

    #[error("truncated compressed stream")]
    Truncated,

    #[error("decompressed source exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error("source is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Structured failure reported by a diagram renderer.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct GenerateError {
    pub message: String,
    /// HTTP status chosen by the renderer, `None` means server error.
    pub status: Option<u16>,
    pub payload: Option<Payload>,
}

impl GenerateError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            payload: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Error returned by a [`Renderer`](super::Renderer).
#[derive(Debug, Error)]
pub enum RenderError {
    /// The renderer rejected the diagram or failed in a way it can describe.
    #[error(transparent)]
    Generate(#[from] GenerateError),

    /// Anything else: spawn failures, I/O, bugs. Never shown to callers.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Errors surfaced to HTTP callers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid diagram source: {0}")]
    Decode(#[from] DecodeError),

    #[error(
        "Diagram source must begin with one of the following: blockdiag, seqdiag, actdiag or nwdiag"
    )]
    UnrecognizedSource,

    #[error("Unsupported output format: {0}. Must be one of: png, svg or pdf.")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error("Internal server error")]
    Internal,

    #[error("Not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Server is shutting down")]
    Unavailable,
}

impl ApiError {
    /// HTTP status code for this error.
    pub fn status(&self) -> u16 {
        match self {
            Self::Decode(_) | Self::UnrecognizedSource | Self::UnsupportedFormat(_) => 400,
            Self::Generate(e) => e.status.unwrap_or(500),
            Self::Internal => 500,
            Self::NotFound => 404,
            Self::MethodNotAllowed => 405,
            Self::Unavailable => 503,
        }
    }

    /// JSON envelope: payload fields first, then `message` (which wins on clash).
    pub fn to_json(&self) -> Value {
        let mut body = match self {
            Self::Generate(GenerateError {
                payload: Some(payload),
                ..
            }) => payload.clone(),
            _ => Map::new(),
        };
        body.insert("message".to_string(), Value::String(self.to_string()));
        Value::Object(body)
    }
}

impl From<RenderError> for ApiError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Generate(e) => Self::Generate(e),
            RenderError::Internal(e) => {
                crate::log!("render"; "internal error: {e:#}");
                Self::Internal
            }
        }
    }
}
