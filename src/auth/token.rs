use serde::Deserialize;

use crate::error::MoodboardError;

/// Success body of the token endpoint. Extra fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

impl TokenResponse {
    /// Expiry in epoch millis, pulled forward by `buffer_ms`.
    ///
    /// `expires_in` must be positive and small enough to land on the clock.
    pub fn expires_at_ms(&self, now_ms: i64, buffer_ms: i64) -> Result<i64, MoodboardError> {
        if self.expires_in <= 0 {
            return Err(MoodboardError::InvalidTokenResponse(format!(
                "expires_in must be positive, got {}",
                self.expires_in
            )));
        }
        self.expires_in
            .checked_mul(1000)
            .and_then(|lifetime| now_ms.checked_add(lifetime))
            .and_then(|deadline| deadline.checked_sub(buffer_ms))
            .ok_or_else(|| {
                MoodboardError::InvalidTokenResponse(format!(
                    "expires_in {} is out of range",
                    self.expires_in
                ))
            })
    }
}

/// Form fields of the authorization-code grant.
pub fn exchange_form<'a>(
    client_id: &'a str,
    code: &'a str,
    redirect_uri: &'a str,
    code_verifier: &'a str,
) -> [(&'static str, &'a str); 5] {
    [
        ("client_id", client_id),
        ("grant_type", "authorization_code"),
        ("code", code),
        ("redirect_uri", redirect_uri),
        ("code_verifier", code_verifier),
    ]
}

pub async fn exchange_code(
    http: &reqwest::Client,
    token_endpoint: &str,
    client_id: &str,
    code: &str,
    redirect_uri: &str,
    code_verifier: &str,
) -> Result<TokenResponse, MoodboardError> {
    let resp = http
        .post(token_endpoint)
        .form(&exchange_form(client_id, code, redirect_uri, code_verifier))
        .send()
        .await
        .map_err(|e| MoodboardError::Http(format!("Token exchange request failed: {e}")))?;

    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(MoodboardError::TokenExchangeFailed { status, body });
    }

    let body = resp
        .text()
        .await
        .map_err(|e| MoodboardError::Http(format!("Failed to read token response: {e}")))?;
    serde_json::from_str(&body).map_err(|e| MoodboardError::InvalidTokenResponse(e.to_string()))
}
