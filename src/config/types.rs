use serde::{Deserialize, Serialize};

use crate::auth::pkce::DEFAULT_VERIFIER_LENGTH;

pub const SPOTIFY_AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";
pub const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const SPOTIFY_API_BASE: &str = "https://api.spotify.com/v1";
pub const DEFAULT_CLIENT_ID: &str = "6dfcf18c48004dbd82be1a5037b96ada";
/// Must match the value registered with Spotify byte for byte.
pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:5174/callback";
pub const DEFAULT_SCOPES: [&str; 2] = ["playlist-read-private", "playlist-read-collaborative"];
pub const DEFAULT_EXPIRY_BUFFER_MS: i64 = 10_000;
pub const DEFAULT_CALLBACK_TIMEOUT_MS: u64 = 120_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MoodboardConfig {
    pub client_id: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
    pub authorize_url: String,
    pub token_url: String,
    pub api_base: String,
    pub verifier_length: usize,
    pub expiry_buffer_ms: i64,
    pub callback_timeout_ms: u64,
}

impl Default for MoodboardConfig {
    fn default() -> Self {
        Self {
            client_id: DEFAULT_CLIENT_ID.to_string(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            scopes: DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
            authorize_url: SPOTIFY_AUTHORIZE_URL.to_string(),
            token_url: SPOTIFY_TOKEN_URL.to_string(),
            api_base: SPOTIFY_API_BASE.to_string(),
            verifier_length: DEFAULT_VERIFIER_LENGTH,
            expiry_buffer_ms: DEFAULT_EXPIRY_BUFFER_MS,
            callback_timeout_ms: DEFAULT_CALLBACK_TIMEOUT_MS,
        }
    }
}
