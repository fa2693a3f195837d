use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::auth::{AuthClient, BrowserNavigator, CallbackServer, FileStore, ReturnOutcome, Session};
use crate::config::{moodboard_home, MoodboardConfig};
use crate::error::MoodboardError;

use super::output::{print_status, OutputMode};

/// An `AuthClient` backed by `<home>/storage.json` and the system browser.
pub fn auth_client(config: MoodboardConfig) -> AuthClient {
    let store = Arc::new(FileStore::in_home(&moodboard_home()));
    AuthClient::new(config, store, Arc::new(BrowserNavigator))
}

fn redirect_url(config: &MoodboardConfig) -> Result<Url, MoodboardError> {
    Url::parse(&config.redirect_uri).map_err(|e| MoodboardError::ConfigError {
        path: "<config>".into(),
        detail: format!("redirectUri '{}' is not a URL: {e}", config.redirect_uri),
    })
}

fn print_logged_in(session: &Session) {
    println!("Logged in to Spotify.");
    if let Some(expires) = session.expires_at() {
        println!("Token expires: {}", expires.to_rfc3339());
    }
}

/// Open the browser on the authorization page and, unless `no_wait`,
/// complete the login from the redirect caught on the loopback listener.
pub async fn run_login(config: MoodboardConfig, no_wait: bool) -> Result<(), MoodboardError> {
    let redirect = redirect_url(&config)?;
    let timeout = Duration::from_millis(config.callback_timeout_ms);
    let client = auth_client(config);

    if no_wait {
        client.start_login()?;
        println!("After approving access, run: moodboard callback '<redirected URL>'");
        return Ok(());
    }

    // Bind before redirecting so the browser cannot come back to a closed port.
    let server = CallbackServer::bind(&redirect).await?;
    client.start_login()?;
    eprintln!("Waiting for Spotify to redirect back to {redirect} ...");
    let location = server.wait(timeout).await?;

    match client.handle_return(&location).await? {
        ReturnOutcome::LoggedIn(session) => print_logged_in(&session),
        ReturnOutcome::NoCallback => {
            tracing::warn!("redirect carried neither code nor error");
            println!("Spotify did not return an authorization code. Not logged in.");
        }
    }
    Ok(())
}

/// Handle a redirect URL pasted by the user.
pub async fn run_callback(config: MoodboardConfig, location: &str) -> Result<(), MoodboardError> {
    let location = Url::parse(location.trim())
        .map_err(|e| MoodboardError::Http(format!("'{location}' is not a URL: {e}")))?;
    let client = auth_client(config);
    match client.handle_return(&location).await? {
        ReturnOutcome::LoggedIn(session) => print_logged_in(&session),
        ReturnOutcome::NoCallback => {
            print_status(client.state(None), client.session().as_ref(), OutputMode::Pretty, false)
        }
    }
    Ok(())
}

pub fn run_status(config: MoodboardConfig, json: bool, is_tty: bool) -> Result<(), MoodboardError> {
    let client = auth_client(config);
    let state = client.state(None);
    print_status(state, client.session().as_ref(), OutputMode::from_flag(json), is_tty);
    Ok(())
}

/// Print the access token for scripting; fails when there is no usable token.
pub fn run_token(config: MoodboardConfig) -> Result<(), MoodboardError> {
    let token = auth_client(config)
        .access_token()
        .ok_or(MoodboardError::NotLoggedIn)?;
    println!("{token}");
    Ok(())
}

pub fn run_logout(config: MoodboardConfig) -> Result<(), MoodboardError> {
    auth_client(config).logout()?;
    println!("Logged out.");
    Ok(())
}
