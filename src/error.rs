use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum MoodboardError {
    #[error("Spotify authorization was denied: {0}")]
    AuthorizationDenied(String),

    #[error("Missing PKCE verifier")]
    MissingVerifier,

    #[error("Token exchange failed with status {status}: {body}")]
    TokenExchangeFailed { status: u16, body: String },

    #[error("Cryptographic random source unavailable: {0}")]
    CryptoUnavailable(String),

    #[error("PKCE verifier length {0} is outside 43..=128")]
    InvalidVerifierLength(usize),

    #[error("Invalid token response: {0}")]
    InvalidTokenResponse(String),

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("'{0}' is not a Spotify playlist link, URI or id")]
    InvalidPlaylist(String),

    #[error("Spotify API returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Timed out waiting for the Spotify redirect after {}s", .0.as_secs())]
    CallbackTimeout(Duration),

    #[error("Error in config {}: {detail}", path.display())]
    ConfigError { path: PathBuf, detail: String },

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl MoodboardError {
    /// Error code string for structured JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            MoodboardError::AuthorizationDenied(_) => "authorization_denied",
            MoodboardError::MissingVerifier => "missing_verifier",
            MoodboardError::TokenExchangeFailed { .. } => "token_exchange_failed",
            MoodboardError::CryptoUnavailable(_) => "crypto_unavailable",
            MoodboardError::InvalidVerifierLength(_) => "invalid_verifier_length",
            MoodboardError::InvalidTokenResponse(_) => "invalid_token_response",
            MoodboardError::NotLoggedIn => "not_logged_in",
            MoodboardError::InvalidPlaylist(_) => "invalid_playlist",
            MoodboardError::Api { .. } => "api_error",
            MoodboardError::Http(_) => "http_error",
            MoodboardError::CallbackTimeout(_) => "timeout",
            MoodboardError::ConfigError { .. } => "config_error",
            MoodboardError::StorageError(_) => "storage_error",
            MoodboardError::IoError(_) => "io_error",
        }
    }

    /// True for failures that can only be resolved by a fresh `moodboard login`.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            MoodboardError::AuthorizationDenied(_)
                | MoodboardError::MissingVerifier
                | MoodboardError::TokenExchangeFailed { .. }
                | MoodboardError::InvalidTokenResponse(_)
                | MoodboardError::NotLoggedIn
        )
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            MoodboardError::TokenExchangeFailed { status, .. } => Some(*status),
            MoodboardError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::Map::new();
        if let Some(status) = self.status() {
            obj.insert("status".into(), serde_json::Value::from(status));
        }
        obj.insert("message".into(), serde_json::Value::String(self.to_string()));
        obj.insert("code".into(), serde_json::Value::String(self.code().to_string()));
        serde_json::json!({ "error": obj })
    }
}
