use serde::Serialize;
use url::Url;

use crate::error::MoodboardError;

pub const VERIFIER_KEY: &str = "pkce_verifier";
pub const ACCESS_TOKEN_KEY: &str = "spotify_access_token";
pub const EXPIRES_AT_KEY: &str = "spotify_expires_at";

pub const CHALLENGE_METHOD: &str = "S256";

/// A persisted login. Replaced wholesale, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    /// Epoch milliseconds after which the token must not be used.
    pub expires_at_ms: i64,
}

impl Session {
    pub fn is_valid_at(&self, now_ms: i64) -> bool {
        !self.access_token.is_empty() && now_ms < self.expires_at_ms
    }

    pub fn expires_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp_millis(self.expires_at_ms)
    }
}

/// The verifier stored between the authorization redirect and the callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAuth {
    pub verifier: String,
}

/// Parameters of the authorization redirect. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRequest {
    pub client_id: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
    pub challenge: String,
}

impl AuthorizationRequest {
    pub fn response_type(&self) -> &'static str {
        "code"
    }

    pub fn challenge_method(&self) -> &'static str {
        CHALLENGE_METHOD
    }

    /// Serialize onto the authorization endpoint as a query string.
    pub fn to_url(&self, authorize_endpoint: &str) -> Result<Url, MoodboardError> {
        let scope = self.scopes.join(" ");
        Url::parse_with_params(
            authorize_endpoint,
            &[
                ("response_type", self.response_type()),
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("scope", scope.as_str()),
                ("code_challenge_method", self.challenge_method()),
                ("code_challenge", self.challenge.as_str()),
            ],
        )
        .map_err(|e| MoodboardError::Http(format!("Invalid authorize URL {authorize_endpoint}: {e}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthState {
    LoggedOut,
    AuthorizationPending,
    CallbackReceived,
    LoggedIn,
    Expired,
}

impl AuthState {
    /// Only `LoggedIn` yields a token; `Expired` reads exactly like `LoggedOut`.
    pub fn has_usable_token(&self) -> bool {
        matches!(self, AuthState::LoggedIn)
    }

    pub fn label(&self) -> &'static str {
        match self {
            AuthState::LoggedOut => "logged out",
            AuthState::AuthorizationPending => "authorization pending",
            AuthState::CallbackReceived => "callback received",
            AuthState::LoggedIn => "logged in",
            AuthState::Expired => "session expired",
        }
    }
}
