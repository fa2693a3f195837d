use super::{Card, Moodboard};

const PREVIEW_COVER: &str =
    "https://images.unsplash.com/photo-1516223725307-6f76b9182f7c?auto=format&fit=crop&w=1200&q=60";

const PREVIEW_TRACKS: [(&str, &str, &str); 8] = [
    ("Neon Fever", "City Lights", "photo-1506157786151-b8491531f063"),
    ("Late Night Radio", "FM Dreams", "photo-1459749411175-04bf5292ceea"),
    ("Vinyl Therapy", "Analog Heart", "photo-1524678606370-a47ad25cb82a"),
    ("Bassline Bloom", "Club Signal", "photo-1470225620780-dba8ba36b745"),
    ("Midnight Studio", "Tape Delay", "photo-1511379938547-c1f69419868d"),
    ("After Hours", "Night Shift", "photo-1516455207990-7a41ce80f7ee"),
    ("Glow Up", "Electric Bloom", "photo-1514525253161-7a46d19cd819"),
    ("Night Ride", "Neon Roads", "photo-1501386761578-eac5c94b800a"),
];

/// Why the board fell back to sample data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewReason {
    NotLoggedIn,
    InvalidPlaylist,
    Forbidden,
    ApiError,
}

impl PreviewReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreviewReason::NotLoggedIn => "not logged in",
            PreviewReason::InvalidPlaylist => "invalid playlist input",
            PreviewReason::Forbidden => "403 forbidden",
            PreviewReason::ApiError => "API error",
        }
    }
}

impl std::fmt::Display for PreviewReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The built-in sample moodboard.
pub fn preview_board(reason: PreviewReason) -> Moodboard {
    let cards: Vec<Card> = PREVIEW_TRACKS
        .iter()
        .map(|(title, artist, photo)| Card {
            title: title.to_string(),
            artists: artist.to_string(),
            art: Some(format!(
                "https://images.unsplash.com/{photo}?auto=format&fit=crop&w=900&q=60"
            )),
        })
        .collect();

    Moodboard {
        name: "Preview Mode Moodboard".to_string(),
        owner: "HayetCreates".to_string(),
        total_tracks: cards.len() as u32,
        cover: Some(PREVIEW_COVER.to_string()),
        cards,
        preview_reason: Some(reason.to_string()),
    }
}
