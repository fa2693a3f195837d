use colored::Colorize;

use crate::auth::{AuthState, Session};
use crate::board::Moodboard;
use crate::error::MoodboardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Pretty,
    Json,
}

impl OutputMode {
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Pretty
        }
    }
}

pub fn status_json(state: AuthState, session: Option<&Session>) -> serde_json::Value {
    let expires_at = session
        .filter(|_| state != AuthState::LoggedOut)
        .and_then(Session::expires_at)
        .map(|t| t.to_rfc3339());
    serde_json::json!({
        "state": state,
        "loggedIn": state.has_usable_token(),
        "expiresAt": expires_at,
    })
}

pub fn print_status(state: AuthState, session: Option<&Session>, mode: OutputMode, is_tty: bool) {
    match mode {
        OutputMode::Json => {
            let json = status_json(state, session);
            println!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
        }
        OutputMode::Pretty => {
            let label = state.label();
            let label = match (is_tty, state) {
                (false, _) => label.to_string(),
                (true, AuthState::LoggedIn) => label.green().bold().to_string(),
                (true, AuthState::Expired) => label.yellow().bold().to_string(),
                (true, _) => label.dimmed().to_string(),
            };
            println!("Spotify: {label}");
            if let Some(expires) = session
                .filter(|_| matches!(state, AuthState::LoggedIn | AuthState::Expired))
                .and_then(Session::expires_at)
            {
                println!("Token expires: {}", expires.to_rfc3339());
            }
        }
    }
}

pub fn render_board(board: &Moodboard, is_tty: bool) -> String {
    let mut out = String::new();

    if let Some(reason) = &board.preview_reason {
        let msg = format!(
            "Preview Mode: Spotify access is restricted right now ({reason}). \
             Showing a sample moodboard so the layout can still be reviewed."
        );
        out.push_str(&if is_tty { msg.yellow().to_string() } else { msg });
        out.push_str("\n\n");
    }

    let title = if is_tty {
        board.name.bold().to_string()
    } else {
        board.name.clone()
    };
    out.push_str(&format!("{title}\n{} • {} tracks\n", board.owner, board.total_tracks));
    if let Some(cover) = &board.cover {
        out.push_str(&format!("{cover}\n"));
    }

    if board.is_empty() {
        out.push_str("\nNo tracks returned. Try another playlist.\n");
        return out;
    }

    for (i, card) in board.cards.iter().enumerate() {
        out.push('\n');
        let heading = format!("{:>2}. {}", i + 1, card.title);
        let artists = if is_tty {
            card.artists.dimmed().to_string()
        } else {
            card.artists.clone()
        };
        out.push_str(&format!("{heading}\n    {artists}\n"));
        if let Some(art) = &card.art {
            let art = if is_tty {
                art.underline().to_string()
            } else {
                art.clone()
            };
            out.push_str(&format!("    {art}\n"));
        }
    }
    out
}

pub fn print_board(board: &Moodboard, mode: OutputMode, is_tty: bool) {
    match mode {
        OutputMode::Json => {
            println!("{}", serde_json::to_string_pretty(board).unwrap_or_default());
        }
        OutputMode::Pretty => print!("{}", render_board(board, is_tty)),
    }
}

pub fn print_error(err: &MoodboardError, json_mode: bool) {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(&err.to_json()).unwrap_or_default());
    } else {
        eprintln!("Error: {err}");
        if err.requires_login() {
            eprintln!("Run: moodboard login");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::preview::{preview_board, PreviewReason};
    use crate::board::Card;

    #[test]
    fn status_json_logged_in() {
        let session = Session {
            access_token: "tok".into(),
            expires_at_ms: 1_700_000_000_000,
        };
        let json = status_json(AuthState::LoggedIn, Some(&session));
        assert_eq!(json["state"], "logged_in");
        assert_eq!(json["loggedIn"], true);
        assert!(json["expiresAt"].as_str().unwrap().starts_with("2023-11-14"));
    }

    #[test]
    fn status_json_never_contains_token() {
        let session = Session {
            access_token: "secret-token".into(),
            expires_at_ms: 0,
        };
        let json = status_json(AuthState::Expired, Some(&session));
        assert!(!json.to_string().contains("secret-token"));
        assert_eq!(json["loggedIn"], false);
    }

    #[test]
    fn status_json_logged_out_has_null_expiry() {
        let json = status_json(AuthState::LoggedOut, None);
        assert!(json["expiresAt"].is_null());
    }

    #[test]
    fn render_preview_board_plain() {
        let out = render_board(&preview_board(PreviewReason::NotLoggedIn), false);
        assert!(out.starts_with("Preview Mode: Spotify access is restricted right now (not logged in)"));
        assert!(out.contains("HayetCreates • 8 tracks"));
        assert!(out.contains(" 1. Neon Fever\n    City Lights\n"));
    }

    #[test]
    fn render_empty_board() {
        let board = Moodboard {
            name: "Empty".into(),
            owner: "me".into(),
            total_tracks: 0,
            cover: None,
            cards: vec![],
            preview_reason: None,
        };
        let out = render_board(&board, false);
        assert!(out.contains("No tracks returned"));
        assert!(!out.contains("Preview Mode"));
    }

    #[test]
    fn render_card_without_art() {
        let board = Moodboard {
            name: "B".into(),
            owner: "o".into(),
            total_tracks: 1,
            cover: None,
            cards: vec![Card {
                title: "T".into(),
                artists: "A".into(),
                art: None,
            }],
            preview_reason: None,
        };
        assert_eq!(render_board(&board, false), "B\no • 1 tracks\n\n 1. T\n    A\n");
    }
}
