use serde::de::DeserializeOwned;

use crate::error::MoodboardError;

use super::types::{AudioFeaturesResponse, Playlist, PlaylistTracks};

pub const DEFAULT_TRACK_LIMIT: u32 = 50;
pub const MAX_AUDIO_FEATURE_IDS: usize = 100;

/// Accept `spotify:playlist:<id>`, a URL containing `/playlist/<id>`, or a bare id.
pub fn extract_playlist_id(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    for marker in ["spotify:playlist:", "/playlist/"] {
        if let Some(pos) = trimmed.find(marker) {
            let id = leading_alphanumeric(&trimmed[pos + marker.len()..]);
            if !id.is_empty() {
                return Some(id.to_string());
            }
        }
    }

    if trimmed.len() >= 10 && trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Some(trimmed.to_string());
    }
    None
}

fn leading_alphanumeric(s: &str) -> &str {
    let end = s
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(s.len());
    &s[..end]
}

/// Bearer-authenticated Spotify Web API calls.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: reqwest::Client,
    api_base: String,
    token: String,
}

impl SpotifyClient {
    pub fn new(api_base: &str, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    pub async fn get_playlist(&self, playlist_id: &str) -> Result<Playlist, MoodboardError> {
        self.get_json(&format!("/playlists/{playlist_id}"), &[]).await
    }

    pub async fn get_playlist_tracks(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<PlaylistTracks, MoodboardError> {
        let limit = limit.to_string();
        let offset = offset.to_string();
        self.get_json(
            &format!("/playlists/{playlist_id}/tracks"),
            &[("limit", limit.as_str()), ("offset", offset.as_str())],
        )
        .await
    }

    /// Audio features for up to 100 tracks. Empty input makes no request.
    pub async fn get_audio_features(
        &self,
        track_ids: &[String],
    ) -> Result<AudioFeaturesResponse, MoodboardError> {
        let ids: Vec<&str> = track_ids
            .iter()
            .map(String::as_str)
            .filter(|id| !id.is_empty())
            .take(MAX_AUDIO_FEATURE_IDS)
            .collect();
        if ids.is_empty() {
            return Ok(AudioFeaturesResponse::default());
        }
        let joined = ids.join(",");
        self.get_json("/audio-features", &[("ids", joined.as_str())])
            .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, MoodboardError> {
        let url = format!("{}{}", self.api_base, path);
        tracing::debug!(%url, "spotify api request");
        let resp = self
            .http
            .get(&url)
            .query(query)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| MoodboardError::Http(format!("Request to {url} failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(MoodboardError::Api { status, body });
        }

        resp.json()
            .await
            .map_err(|e| MoodboardError::Http(format!("Failed to parse response from {url}: {e}")))
    }
}
