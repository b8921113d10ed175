// ── Core error types ──
//
// User-facing errors from stockdeck-core. Consumers never see reqwest
// errors or JSON parse failures directly; the `From<stockdeck_api::Error>`
// impl translates transport-layer failures into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Remote failures ──────────────────────────────────────────────
    /// A CRUD call against the catalog API failed (non-2xx or network).
    #[error("{message}")]
    Remote {
        message: String,
        /// HTTP status code, if one was observed.
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Returns `true` if the remote reported the target as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Remote { status: Some(404), .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<stockdeck_api::Error> for CoreError {
    fn from(err: stockdeck_api::Error) -> Self {
        match err {
            stockdeck_api::Error::Api { status, message } => CoreError::Remote {
                message,
                status: Some(status),
            },
            stockdeck_api::Error::Transport(ref e) => {
                let message = if e.is_timeout() {
                    "request timed out".into()
                } else if e.is_connect() {
                    format!(
                        "cannot reach catalog API at {}",
                        e.url().map_or_else(|| "<unknown>".into(), ToString::to_string)
                    )
                } else {
                    e.to_string()
                };
                CoreError::Remote {
                    message,
                    status: e.status().map(|s| s.as_u16()),
                }
            }
            stockdeck_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            stockdeck_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
