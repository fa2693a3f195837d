use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// Spotify lists images largest first.
pub fn best_image(images: &[Image]) -> Option<&str> {
    images.first().map(|i| i.url.as_str())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Owner {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl Owner {
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.id.as_deref())
            .unwrap_or("Unknown")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TracksRef {
    #[serde(default)]
    pub total: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Playlist {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub owner: Owner,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub tracks: Option<TracksRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub album: Option<Album>,
}

impl Track {
    /// "Rihanna, Drake", or a placeholder when no artist is listed.
    pub fn artist_line(&self) -> String {
        let names: Vec<&str> = self.artists.iter().map(|a| a.name.as_str()).collect();
        if names.is_empty() {
            "Unknown artist".to_string()
        } else {
            names.join(", ")
        }
    }
}

/// Spotify returns `track: null` for removed or local items.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistItem {
    #[serde(default)]
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistTracks {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    #[serde(default)]
    pub total: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub id: String,
    #[serde(default)]
    pub energy: Option<f32>,
    #[serde(default)]
    pub valence: Option<f32>,
    #[serde(default)]
    pub danceability: Option<f32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudioFeaturesResponse {
    /// Unknown ids come back as `null`.
    #[serde(default)]
    pub audio_features: Vec<Option<AudioFeatures>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playlist_deserialization() {
        let json = r#"{
            "id": "37i9dQZF1DXcBWIGoYBM5M",
            "name": "Today's Top Hits",
            "owner": { "id": "spotify", "display_name": "Spotify" },
            "images": [{ "url": "https://i.scdn.co/image/a", "width": 640, "height": 640 }],
            "tracks": { "total": 50, "href": "ignored" }
        }"#;
        let playlist: Playlist = serde_json::from_str(json).unwrap();
        assert_eq!(playlist.name, "Today's Top Hits");
        assert_eq!(playlist.owner.label(), "Spotify");
        assert_eq!(best_image(&playlist.images), Some("https://i.scdn.co/image/a"));
        assert_eq!(playlist.tracks.unwrap().total, Some(50));
    }

    #[test]
    fn owner_label_falls_back_to_id() {
        let owner = Owner {
            id: Some("user42".into()),
            display_name: None,
        };
        assert_eq!(owner.label(), "user42");
        assert_eq!(Owner::default().label(), "Unknown");
    }

    #[test]
    fn null_track_items_deserialize() {
        let json = r#"{ "items": [ { "track": null }, { "track": { "name": "Song", "artists": [] } } ], "total": 2 }"#;
        let page: PlaylistTracks = serde_json::from_str(json).unwrap();
        assert_eq!(page.items.len(), 2);
        assert!(page.items[0].track.is_none());
        assert_eq!(page.items[1].track.as_ref().unwrap().name, "Song");
    }

    #[test]
    fn artist_line_joins_names() {
        let track = Track {
            artists: vec![
                Artist { name: "Rihanna".into() },
                Artist { name: "Drake".into() },
            ],
            ..Track::default()
        };
        assert_eq!(track.artist_line(), "Rihanna, Drake");
        assert_eq!(Track::default().artist_line(), "Unknown artist");
    }

    #[test]
    fn audio_features_with_null_entries() {
        let json = r#"{ "audio_features": [ null, { "id": "a", "energy": 0.5 } ] }"#;
        let resp: AudioFeaturesResponse = serde_json::from_str(json).unwrap();
        assert!(resp.audio_features[0].is_none());
        assert_eq!(resp.audio_features[1].as_ref().unwrap().energy, Some(0.5));
    }
}
