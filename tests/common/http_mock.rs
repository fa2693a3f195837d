use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Start a mock token endpoint at `/api/token` answering with `status` and `body`.
#[allow(dead_code)]
pub async fn start_token_server(status: u16, body: serde_json::Value) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=authorization_code"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(&server)
        .await;

    server
}

#[allow(dead_code)]
pub fn token_url(server: &MockServer) -> String {
    format!("{}/api/token", server.uri())
}

/// Start a mock Web API serving one playlist and its first page of tracks.
#[allow(dead_code)]
pub async fn start_api_server(playlist_id: &str, token: &str) -> MockServer {
    let server = MockServer::start().await;
    let bearer = format!("Bearer {token}");

    Mock::given(method("GET"))
        .and(path(format!("/playlists/{playlist_id}")))
        .and(header("authorization", bearer.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": playlist_id,
            "name": "Late Night Drive",
            "owner": { "id": "u1", "display_name": "Hayet" },
            "images": [{ "url": "https://i.scdn.co/image/cover" }],
            "tracks": { "total": 3 }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/playlists/{playlist_id}/tracks")))
        .and(header("authorization", bearer.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total": 3,
            "items": [
                { "track": {
                    "id": "t1",
                    "name": "Nightcall",
                    "artists": [{ "name": "Kavinsky" }],
                    "album": { "images": [{ "url": "https://i.scdn.co/image/t1" }] }
                } },
                { "track": null },
                { "track": {
                    "id": "t2",
                    "name": "Midnight City",
                    "artists": [{ "name": "M83" }],
                    "album": { "images": [] }
                } }
            ]
        })))
        .mount(&server)
        .await;

    server
}
