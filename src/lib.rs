pub mod api;
pub mod auth;
pub mod board;
pub mod cli;
pub mod config;
pub mod error;

pub use auth::{AuthClient, AuthState, KeyValueStore, Navigator, ReturnOutcome, Session};
pub use board::Moodboard;
pub use config::{load_config, MoodboardConfig};
pub use error::MoodboardError;
