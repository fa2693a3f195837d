pub mod http_mock;

use std::sync::Arc;

use moodboard::auth::{ManualClock, MemoryStore, RecordingNavigator};
use moodboard::{AuthClient, MoodboardConfig};

pub const T0: i64 = 1_700_000_000_000;

#[allow(dead_code)]
pub struct Harness {
    pub client: AuthClient,
    pub store: Arc<MemoryStore>,
    pub navigator: Arc<RecordingNavigator>,
    pub clock: Arc<ManualClock>,
}

/// An `AuthClient` over in-memory collaborators, talking to `token_url`.
#[allow(dead_code)]
pub fn harness(token_url: &str) -> Harness {
    let config = MoodboardConfig {
        token_url: token_url.to_string(),
        ..MoodboardConfig::default()
    };
    let store = Arc::new(MemoryStore::new());
    let navigator = Arc::new(RecordingNavigator::new());
    let clock = Arc::new(ManualClock::new(T0));
    let client = AuthClient::new(config, store.clone(), navigator.clone()).with_clock(clock.clone());
    Harness {
        client,
        store,
        navigator,
        clock,
    }
}

/// Create a temp directory usable as `MOODBOARD_HOME`, optionally holding a session.
#[allow(dead_code)]
pub fn temp_home(session: Option<(&str, i64)>) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    if let Some((token, expires_at_ms)) = session {
        let storage = serde_json::json!({
            "spotify_access_token": token,
            "spotify_expires_at": expires_at_ms.to_string(),
        });
        std::fs::write(
            dir.path().join("storage.json"),
            serde_json::to_string_pretty(&storage).unwrap(),
        )
        .unwrap();
    }
    dir
}
