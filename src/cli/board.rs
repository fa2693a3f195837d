use std::io::IsTerminal;

use crate::api::{extract_playlist_id, SpotifyClient};
use crate::board::preview::{preview_board, PreviewReason};
use crate::board::Moodboard;
use crate::config::MoodboardConfig;
use crate::error::MoodboardError;

use super::auth::auth_client;
use super::output::{print_board, OutputMode};

/// Build the moodboard for `input`, falling back to the preview board
/// whenever the real one cannot be produced.
pub async fn load_board(
    token: Option<String>,
    api_base: &str,
    input: &str,
    limit: u32,
) -> Moodboard {
    let Some(token) = token else {
        return preview_board(PreviewReason::NotLoggedIn);
    };

    match fetch_board(&SpotifyClient::new(api_base, token), input, limit).await {
        Ok(board) => board,
        Err(MoodboardError::InvalidPlaylist(input)) => {
            tracing::debug!(%input, "not a playlist reference");
            preview_board(PreviewReason::InvalidPlaylist)
        }
        Err(e) => {
            tracing::warn!("playlist fetch failed: {e}");
            match e {
                MoodboardError::Api { status: 403, .. } => preview_board(PreviewReason::Forbidden),
                _ => preview_board(PreviewReason::ApiError),
            }
        }
    }
}

/// Fetch the playlist named by `input` (link, URI or bare id) and its first page of tracks.
pub async fn fetch_board(
    client: &SpotifyClient,
    input: &str,
    limit: u32,
) -> Result<Moodboard, MoodboardError> {
    let playlist_id = extract_playlist_id(input)
        .ok_or_else(|| MoodboardError::InvalidPlaylist(input.trim().to_string()))?;
    let playlist = client.get_playlist(&playlist_id).await?;
    let page = client.get_playlist_tracks(&playlist_id, limit, 0).await?;
    Ok(Moodboard::from_playlist(&playlist, &page.items, page.total))
}

pub async fn run_board(
    config: MoodboardConfig,
    input: &str,
    limit: u32,
    json: bool,
) -> Result<(), MoodboardError> {
    let token = auth_client(config.clone()).access_token();
    let board = load_board(token, &config.api_base, input, limit).await;
    print_board(&board, OutputMode::from_flag(json), std::io::stdout().is_terminal());
    Ok(())
}
