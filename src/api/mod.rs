pub mod client;
pub mod types;

pub use client::{extract_playlist_id, SpotifyClient, DEFAULT_TRACK_LIMIT};
pub use types::{AudioFeaturesResponse, Playlist, PlaylistItem, PlaylistTracks, Track};
