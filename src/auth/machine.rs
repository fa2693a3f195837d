use std::sync::Arc;

use url::Url;

use crate::auth::callback::{strip_callback_params, Callback};
use crate::auth::clock::{Clock, SystemClock};
use crate::auth::navigator::Navigator;
use crate::auth::pkce::{derive_challenge, generate_verifier};
use crate::auth::session::{
    AuthState, AuthorizationRequest, PendingAuth, Session, ACCESS_TOKEN_KEY, EXPIRES_AT_KEY,
    VERIFIER_KEY,
};
use crate::auth::storage::KeyValueStore;
use crate::auth::token::exchange_code;
use crate::config::MoodboardConfig;
use crate::error::MoodboardError;

/// Result of inspecting the location the user agent came back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnOutcome {
    /// No `code` or `error` on the location; persisted state is unchanged.
    NoCallback,
    LoggedIn(Session),
}

/// The PKCE login lifecycle over an injected store, navigator and clock.
///
/// The client holds no session state of its own: every query reads the
/// store, every transition writes it.
#[derive(Debug)]
pub struct AuthClient {
    config: MoodboardConfig,
    store: Arc<dyn KeyValueStore>,
    navigator: Arc<dyn Navigator>,
    clock: Arc<dyn Clock>,
    http: reqwest::Client,
}

impl AuthClient {
    pub fn new(
        config: MoodboardConfig,
        store: Arc<dyn KeyValueStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            config,
            store,
            navigator,
            clock: Arc::new(SystemClock),
            http: reqwest::Client::new(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &MoodboardConfig {
        &self.config
    }

    pub fn authorization_request(&self, pending: &PendingAuth) -> AuthorizationRequest {
        AuthorizationRequest {
            client_id: self.config.client_id.clone(),
            redirect_uri: self.config.redirect_uri.clone(),
            scopes: self.config.scopes.clone(),
            challenge: derive_challenge(&pending.verifier),
        }
    }

    /// Persist a fresh verifier and redirect to the authorization endpoint.
    pub fn start_login(&self) -> Result<(), MoodboardError> {
        let pending = PendingAuth {
            verifier: generate_verifier(self.config.verifier_length)?,
        };
        let url = self
            .authorization_request(&pending)
            .to_url(&self.config.authorize_url)?;
        self.store.set(VERIFIER_KEY, &pending.verifier)?;

        tracing::debug!("authorization pending, redirecting");
        self.navigator.redirect(&url);
        Ok(())
    }

    /// Complete a login if `current` is a provider callback.
    pub async fn handle_return(&self, current: &Url) -> Result<ReturnOutcome, MoodboardError> {
        match Callback::parse(current) {
            Callback::Denied(reason) => {
                tracing::debug!(%reason, "authorization denied by provider");
                Err(MoodboardError::AuthorizationDenied(reason))
            }
            Callback::None => Ok(ReturnOutcome::NoCallback),
            Callback::Code(code) => {
                let session = self.exchange(&code).await?;
                self.navigator
                    .replace_location(&strip_callback_params(current));
                Ok(ReturnOutcome::LoggedIn(session))
            }
        }
    }

    /// Trade an authorization code for a session using the stored verifier.
    ///
    /// The verifier is removed before the request goes out, so it is
    /// consumed whether or not the exchange succeeds.
    pub async fn exchange(&self, code: &str) -> Result<Session, MoodboardError> {
        let pending = self.take_pending()?.ok_or(MoodboardError::MissingVerifier)?;

        let token = exchange_code(
            &self.http,
            &self.config.token_url,
            &self.config.client_id,
            code,
            &self.config.redirect_uri,
            &pending.verifier,
        )
        .await?;

        let session = Session {
            expires_at_ms: token.expires_at_ms(self.clock.now_ms(), self.config.expiry_buffer_ms)?,
            access_token: token.access_token,
        };
        self.save_session(&session)?;
        tracing::debug!(expires_at_ms = session.expires_at_ms, "logged in");
        Ok(session)
    }

    /// The persisted token iff the session has not expired.
    pub fn access_token(&self) -> Option<String> {
        let now = self.clock.now_ms();
        self.session()
            .filter(|s| s.is_valid_at(now))
            .map(|s| s.access_token)
    }

    /// The persisted session, expired or not.
    pub fn session(&self) -> Option<Session> {
        let access_token = self.store.get(ACCESS_TOKEN_KEY)?;
        let expires_at_ms = self
            .store
            .get(EXPIRES_AT_KEY)
            .and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or(0);
        Some(Session {
            access_token,
            expires_at_ms,
        })
    }

    pub fn pending(&self) -> Option<PendingAuth> {
        self.store
            .get(VERIFIER_KEY)
            .filter(|v| !v.is_empty())
            .map(|verifier| PendingAuth { verifier })
    }

    /// Current lifecycle state. A live session wins over a pending verifier,
    /// and a pending verifier wins over an expired session.
    pub fn state(&self, location: Option<&Url>) -> AuthState {
        if let Some(url) = location {
            if matches!(Callback::parse(url), Callback::Code(_)) {
                return AuthState::CallbackReceived;
            }
        }
        match self.session() {
            Some(s) if s.is_valid_at(self.clock.now_ms()) => AuthState::LoggedIn,
            _ if self.pending().is_some() => AuthState::AuthorizationPending,
            Some(s) if !s.access_token.is_empty() => AuthState::Expired,
            _ => AuthState::LoggedOut,
        }
    }

    /// Forget the session and any pending verifier.
    pub fn logout(&self) -> Result<(), MoodboardError> {
        self.store.remove(ACCESS_TOKEN_KEY)?;
        self.store.remove(EXPIRES_AT_KEY)?;
        self.store.remove(VERIFIER_KEY)?;
        tracing::debug!("logged out");
        Ok(())
    }

    fn take_pending(&self) -> Result<Option<PendingAuth>, MoodboardError> {
        let pending = self.pending();
        self.store.remove(VERIFIER_KEY)?;
        Ok(pending)
    }

    fn save_session(&self, session: &Session) -> Result<(), MoodboardError> {
        self.store.set(ACCESS_TOKEN_KEY, &session.access_token)?;
        self.store
            .set(EXPIRES_AT_KEY, &session.expires_at_ms.to_string())
    }
}
