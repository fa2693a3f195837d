pub mod loader;
pub mod types;

pub use loader::{load_config, moodboard_home};
pub use types::MoodboardConfig;
