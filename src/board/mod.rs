pub mod preview;

use serde::Serialize;

use crate::api::types::{best_image, Playlist, PlaylistItem};

/// One track tile of the moodboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub title: String,
    pub artists: String,
    pub art: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Moodboard {
    pub name: String,
    pub owner: String,
    pub total_tracks: u32,
    pub cover: Option<String>,
    pub cards: Vec<Card>,
    /// Set when the board shows sample data instead of the requested playlist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_reason: Option<String>,
}

impl Moodboard {
    /// Build from a playlist and one page of its items. Items without a track are dropped.
    pub fn from_playlist(playlist: &Playlist, items: &[PlaylistItem], total: Option<u32>) -> Self {
        let cards: Vec<Card> = items
            .iter()
            .filter_map(|item| item.track.as_ref())
            .map(|track| Card {
                title: if track.name.is_empty() {
                    "Untitled".to_string()
                } else {
                    track.name.clone()
                },
                artists: track.artist_line(),
                art: track
                    .album
                    .as_ref()
                    .and_then(|a| best_image(&a.images))
                    .map(str::to_string),
            })
            .collect();

        let total_tracks = total
            .or_else(|| playlist.tracks.as_ref().and_then(|t| t.total))
            .unwrap_or(items.len() as u32);

        Self {
            name: playlist.name.clone(),
            owner: playlist.owner.label().to_string(),
            total_tracks,
            cover: best_image(&playlist.images).map(str::to_string),
            cards,
            preview_reason: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_preview(&self) -> bool {
        self.preview_reason.is_some()
    }
}
