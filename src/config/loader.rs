use std::path::{Path, PathBuf};

use url::Url;

use crate::auth::pkce::{MAX_VERIFIER_LENGTH, MIN_VERIFIER_LENGTH};
use crate::error::MoodboardError;

use super::types::MoodboardConfig;

/// Directory holding `moodboard.json` and `storage.json`.
///
/// `MOODBOARD_HOME` wins over `~/.moodboard`.
pub fn moodboard_home() -> PathBuf {
    if let Ok(home) = std::env::var("MOODBOARD_HOME") {
        if !home.is_empty() {
            return PathBuf::from(home);
        }
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".moodboard")
}

/// Discover the config file to use, highest precedence first.
///
/// Precedence:
/// 1. `--config` CLI flag
/// 2. `MOODBOARD_CONFIG` env var
/// 3. `./config/moodboard.json` (project-level)
/// 4. `<home>/moodboard.json`
pub fn discover_config_file(cli_config: Option<&str>, home: &Path) -> Option<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(path) = cli_config {
        candidates.push(PathBuf::from(path));
    }
    if let Ok(env_path) = std::env::var("MOODBOARD_CONFIG") {
        candidates.push(PathBuf::from(env_path));
    }
    candidates.push(PathBuf::from("./config/moodboard.json"));
    candidates.push(home.join("moodboard.json"));

    candidates.into_iter().find(|p| p.exists())
}

fn load_config_file(path: &Path) -> Result<MoodboardConfig, MoodboardError> {
    let content = std::fs::read_to_string(path).map_err(|e| MoodboardError::ConfigError {
        path: path.to_path_buf(),
        detail: format!("Cannot read file: {}", e),
    })?;

    serde_json::from_str::<MoodboardConfig>(&content).map_err(|e| MoodboardError::ConfigError {
        path: path.to_path_buf(),
        detail: format!("Invalid JSON: {}", e),
    })
}

/// `MOODBOARD_CLIENT_ID` and `MOODBOARD_REDIRECT_URI` override file values.
fn apply_env_overrides(config: &mut MoodboardConfig) {
    if let Ok(client_id) = std::env::var("MOODBOARD_CLIENT_ID") {
        if !client_id.is_empty() {
            config.client_id = client_id;
        }
    }
    if let Ok(redirect_uri) = std::env::var("MOODBOARD_REDIRECT_URI") {
        if !redirect_uri.is_empty() {
            config.redirect_uri = redirect_uri;
        }
    }
}

pub fn validate_config(config: &MoodboardConfig, source: &Path) -> Result<(), MoodboardError> {
    let invalid = |detail: String| MoodboardError::ConfigError {
        path: source.to_path_buf(),
        detail,
    };

    if config.client_id.is_empty() {
        return Err(invalid("clientId must not be empty".into()));
    }
    if !(MIN_VERIFIER_LENGTH..=MAX_VERIFIER_LENGTH).contains(&config.verifier_length) {
        return Err(invalid(format!(
            "verifierLength {} is outside {MIN_VERIFIER_LENGTH}..={MAX_VERIFIER_LENGTH}",
            config.verifier_length
        )));
    }
    if config.expiry_buffer_ms < 0 {
        return Err(invalid("expiryBufferMs must not be negative".into()));
    }
    for (field, value) in [
        ("redirectUri", &config.redirect_uri),
        ("authorizeUrl", &config.authorize_url),
        ("tokenUrl", &config.token_url),
        ("apiBase", &config.api_base),
    ] {
        Url::parse(value).map_err(|e| invalid(format!("{field} '{value}' is not a URL: {e}")))?;
    }
    Ok(())
}

/// Load the first discovered config file (or defaults), apply env overrides and validate.
pub fn load_config(cli_config: Option<&str>) -> Result<MoodboardConfig, MoodboardError> {
    if let Some(path) = cli_config {
        if !Path::new(path).exists() {
            return Err(MoodboardError::ConfigError {
                path: PathBuf::from(path),
                detail: "File does not exist".into(),
            });
        }
    }

    let home = moodboard_home();
    let (mut config, source) = match discover_config_file(cli_config, &home) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            (load_config_file(&path)?, path)
        }
        None => (MoodboardConfig::default(), PathBuf::from("<defaults>")),
    };

    apply_env_overrides(&mut config);
    validate_config(&config, &source)?;
    Ok(config)
}
