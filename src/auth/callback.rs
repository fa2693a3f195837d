use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use url::Url;

use crate::error::MoodboardError;

/// What the provider put on the redirect URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callback {
    Denied(String),
    Code(String),
    None,
}

impl Callback {
    /// An `error` parameter wins over `code`. Empty values count as absent.
    pub fn parse(location: &Url) -> Self {
        let mut code = None;
        for (key, value) in location.query_pairs() {
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "error" => return Callback::Denied(value.into_owned()),
                "code" if code.is_none() => code = Some(value.into_owned()),
                _ => {}
            }
        }
        code.map_or(Callback::None, Callback::Code)
    }
}

/// `location` without the callback parameters, so a reload cannot replay them.
pub fn strip_callback_params(location: &Url) -> Url {
    let kept: Vec<(String, String)> = location
        .query_pairs()
        .filter(|(k, _)| !matches!(k.as_ref(), "code" | "error" | "state"))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut clean = location.clone();
    clean.set_fragment(None);
    if kept.is_empty() {
        clean.set_query(None);
    } else {
        clean.query_pairs_mut().clear().extend_pairs(kept);
    }
    clean
}

/// One-shot HTTP listener on the redirect URI's host and port.
#[derive(Debug)]
pub struct CallbackServer {
    listener: TcpListener,
    redirect_uri: Url,
}

impl CallbackServer {
    pub async fn bind(redirect_uri: &Url) -> Result<Self, MoodboardError> {
        let host = redirect_uri.host_str().unwrap_or("127.0.0.1");
        let port = redirect_uri.port_or_known_default().unwrap_or(80);
        let listener = TcpListener::bind((host, port)).await?;
        tracing::debug!(host, port, "listening for Spotify redirect");
        Ok(Self {
            listener,
            redirect_uri: redirect_uri.clone(),
        })
    }

    pub fn local_port(&self) -> Result<u16, MoodboardError> {
        Ok(self.listener.local_addr()?.port())
    }

    /// Wait for the browser to hit the redirect path and return the full URL it requested.
    pub async fn wait(self, timeout: Duration) -> Result<Url, MoodboardError> {
        let accept_loop = async {
            loop {
                let (mut stream, _) = self.listener.accept().await?;
                let Some(target) = read_request_target(&mut stream).await? else {
                    respond(&mut stream, "400 Bad Request", "Bad request").await?;
                    continue;
                };

                let location = self.redirect_uri.join(&target).map_err(|e| {
                    MoodboardError::Http(format!("Malformed callback request {target}: {e}"))
                })?;
                if location.path() != self.redirect_uri.path() {
                    respond(&mut stream, "404 Not Found", "Not found").await?;
                    continue;
                }

                let body = "<!DOCTYPE html><html><body><h1>Back to moodboard</h1>\
                            <p>You can close this window and return to the terminal.</p></body></html>";
                respond(&mut stream, "200 OK", body).await?;
                return Ok::<Url, MoodboardError>(location);
            }
        };

        tokio::time::timeout(timeout, accept_loop)
            .await
            .map_err(|_| MoodboardError::CallbackTimeout(timeout))?
    }
}

async fn read_request_target(stream: &mut TcpStream) -> Result<Option<String>, MoodboardError> {
    let mut buf = vec![0u8; 4096];
    let n = stream.read(&mut buf).await?;
    let request = String::from_utf8_lossy(&buf[..n]);
    Ok(parse_request_target(&request))
}

/// Extract the path from "GET /callback?code=... HTTP/1.1".
fn parse_request_target(request: &str) -> Option<String> {
    let first_line = request.lines().next()?;
    let mut parts = first_line.split_whitespace();
    if parts.next()? != "GET" {
        return None;
    }
    let target = parts.next()?;
    target.starts_with('/').then(|| target.to_string())
}

async fn respond(stream: &mut TcpStream, status: &str, body: &str) -> Result<(), MoodboardError> {
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len(),
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await?;
    Ok(())
}
