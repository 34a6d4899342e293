use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};
use tokio::time::sleep;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server(upstream: &MockServer, default_user: Option<&str>) -> TestServer {
    let port = pick_free_port();
    let mut command = Command::new(env!("CARGO_BIN_EXE_scrobble_explorer"));
    command
        .env("PORT", port.to_string())
        .env("LASTFM_API_KEY", "test-key")
        .env("LASTFM_API_BASE", format!("{}/2.0/", upstream.uri()))
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    match default_user {
        Some(user) => command.env("LASTFM_USERNAME", user),
        None => command.env_remove("LASTFM_USERNAME"),
    };
    let child = command.spawn().expect("failed to spawn server");

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn get(server: &TestServer, route: &str) -> reqwest::Response {
    Client::new()
        .get(format!("{}{route}", server.base_url))
        .send()
        .await
        .unwrap()
}

fn lastfm(api_method: &str) -> wiremock::MockBuilder {
    Mock::given(method("GET"))
        .and(path("/2.0/"))
        .and(query_param("method", api_method))
        .and(query_param("api_key", "test-key"))
        .and(query_param("format", "json"))
}

#[tokio::test]
async fn http_search_without_term_is_rejected() {
    let upstream = MockServer::start().await;
    let server = spawn_server(&upstream, None).await;

    let response = get(&server, "/api/artist/search").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Search term is required" }));

    let response = get(&server, "/api/track/info?track=Roads").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Track and artist names are required");

    assert!(upstream.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn http_top_artists_forwards_params_and_returns_payload_verbatim() {
    let upstream = MockServer::start().await;
    let payload = json!({
        "topartists": {
            "artist": [{ "name": "Portishead", "playcount": "42" }],
            "@attr": { "user": "bob", "page": "1" }
        }
    });
    lastfm("user.getTopArtists")
        .and(query_param("user", "bob"))
        .and(query_param("period", "7day"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
        .expect(1)
        .mount(&upstream)
        .await;
    let server = spawn_server(&upstream, None).await;

    let response = get(&server, "/api/user/top-artists?user=bob&period=7day&limit=5").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, payload);
}

#[tokio::test]
async fn http_default_user_fills_missing_user() {
    let upstream = MockServer::start().await;
    lastfm("user.getLovedTracks")
        .and(query_param("user", "rj"))
        .and(query_param("limit", "10"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "lovedtracks": { "track": [] } })),
        )
        .expect(1)
        .mount(&upstream)
        .await;
    let server = spawn_server(&upstream, Some("rj")).await;

    let response = get(&server, "/api/user/loved-tracks?user=").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = get(&server, "/").await.text().await.unwrap();
    assert!(html.contains(r#"data-default-user="rj""#));
}

#[tokio::test]
async fn http_missing_user_without_default_is_rejected() {
    let upstream = MockServer::start().await;
    let server = spawn_server(&upstream, None).await;

    let response = get(&server, "/api/user/info").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "User is required");
}

#[tokio::test]
async fn http_upstream_error_becomes_500() {
    let upstream = MockServer::start().await;
    lastfm("artist.getInfo")
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({ "error": 10, "message": "Invalid API key" })),
        )
        .mount(&upstream)
        .await;
    lastfm("tag.getInfo")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": 6 })))
        .mount(&upstream)
        .await;
    let server = spawn_server(&upstream, None).await;

    let response = get(&server, "/api/artist/info?artist=Cher").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Invalid API key" }));

    let response = get(&server, "/api/tag/info?tag=jazz").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Last.fm API error");
}

async fn mount_dashboard(upstream: &MockServer, fail_top_tracks: bool) {
    lastfm("user.getInfo")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {
                "name": "rj",
                "playcount": "150316",
                "artist_count": "4000",
                "track_count": "30000",
                "registered": { "unixtime": "1037793040" }
            }
        })))
        .mount(upstream)
        .await;
    lastfm("user.getRecentTracks")
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "recenttracks": { "track": [
                { "name": "Glory Box", "artist": { "#text": "Portishead" }, "@attr": { "nowplaying": "true" } },
                { "name": "Roads", "artist": { "#text": "Portishead" } }
            ] }
        })))
        .mount(upstream)
        .await;
    lastfm("user.getTopArtists")
        .and(query_param("period", "7day"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "topartists": { "artist": [{ "name": "Massive Attack", "playcount": "17" }] }
        })))
        .mount(upstream)
        .await;
    let top_tracks = if fail_top_tracks {
        ResponseTemplate::new(200).set_body_json(json!({ "error": 8, "message": "Operation failed" }))
    } else {
        ResponseTemplate::new(200).set_body_json(json!({
            "toptracks": { "track": { "name": "Teardrop", "artist": { "name": "Massive Attack" } } }
        }))
    };
    lastfm("user.getTopTracks")
        .respond_with(top_tracks)
        .mount(upstream)
        .await;
}

#[tokio::test]
async fn http_dashboard_view_renders_panels() {
    let upstream = MockServer::start().await;
    mount_dashboard(&upstream, false).await;
    let server = spawn_server(&upstream, None).await;

    let html = get(&server, "/view/section/dashboard?user=rj")
        .await
        .text()
        .await
        .unwrap();
    assert!(html.contains("Your music overview"));
    assert!(html.contains("150,316"));
    assert!(html.contains("Nov 20, 2002"));
    assert!(html.contains("Recent Tracks"));
    assert!(html.contains("Massive Attack"));
    assert!(html.contains("Teardrop"));
    assert!(html.contains("Now Playing"));
    assert!(html.contains(r#"class="now-playing-update" data-active="true""#));

    let body: Value = get(&server, "/view/section/dashboard?user=rj&format=json")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["view"]["view"], "dashboard");
    assert_eq!(body["view"]["profile"]["play_count"], 150316);
    assert_eq!(body["view"]["now_playing"]["state"], "playing");
}

#[tokio::test]
async fn http_dashboard_view_fails_whole_on_one_error() {
    let upstream = MockServer::start().await;
    mount_dashboard(&upstream, true).await;
    let server = spawn_server(&upstream, None).await;

    let response = get(&server, "/view/section/dashboard?user=rj").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await.unwrap();
    assert!(html.contains("Something went wrong"));
    assert!(html.contains("Operation failed"));
    assert!(!html.contains("stats-grid"));
}

#[tokio::test]
async fn http_search_view_renders_results() {
    let upstream = MockServer::start().await;
    lastfm("album.search")
        .and(query_param("album", "mezzanine"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": { "albummatches": { "album": [
                { "name": "Mezzanine", "artist": "Massive Attack" }
            ] } }
        })))
        .mount(&upstream)
        .await;
    let server = spawn_server(&upstream, None).await;

    let html = get(&server, "/view/search/album?q=mezzanine")
        .await
        .text()
        .await
        .unwrap();
    assert!(html.contains("Results for &quot;mezzanine&quot;"));
    assert!(html.contains("Mezzanine"));

    let html = get(&server, "/view/search/album?q=").await.text().await.unwrap();
    assert!(html.contains("Search term is required"));
}

#[tokio::test]
async fn http_geo_view_renders_country_charts() {
    let upstream = MockServer::start().await;
    lastfm("geo.getTopArtists")
        .and(query_param("country", "Japan"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "topartists": { "artist": [{ "name": "Perfume", "listeners": "900000" }] }
        })))
        .mount(&upstream)
        .await;
    lastfm("geo.getTopTracks")
        .and(query_param("country", "Japan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": { "track": { "name": "Idol", "artist": { "name": "YOASOBI" } } }
        })))
        .mount(&upstream)
        .await;
    let server = spawn_server(&upstream, None).await;

    let html = get(&server, "/view/geo?country=Japan")
        .await
        .text()
        .await
        .unwrap();
    assert!(html.contains("Top Artists in Japan"));
    assert!(html.contains("Top Tracks in Japan"));
    assert!(html.contains("Perfume"));
    assert!(html.contains("Idol"));

    let html = get(&server, "/view/section/geo-charts?user=rj&country=Japan")
        .await
        .text()
        .await
        .unwrap();
    assert!(html.contains("Charts by Country"));
    assert!(html.contains("Top Tracks in Japan"));
    assert!(html.contains("YOASOBI"));
}

#[tokio::test]
async fn http_tag_view_renders_explore_results() {
    let upstream = MockServer::start().await;
    lastfm("tag.getTopArtists")
        .and(query_param("tag", "jazz"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "topartists": { "artist": [{ "name": "Miles Davis" }] }
        })))
        .mount(&upstream)
        .await;
    lastfm("tag.getTopTracks")
        .and(query_param("tag", "jazz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": { "track": [{ "name": "So What", "artist": { "name": "Miles Davis" } }] }
        })))
        .mount(&upstream)
        .await;
    let server = spawn_server(&upstream, None).await;

    let html = get(&server, "/view/tag?tag=jazz").await.text().await.unwrap();
    assert!(html.contains("Top jazz Artists"));
    assert!(html.contains("So What"));

    let body: Value = get(&server, "/view/tag?tag=jazz&format=json")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["results"]["results"], "tag");
    assert_eq!(body["results"]["artists"][0]["name"], "Miles Davis");

    let html = get(&server, "/view/tag").await.text().await.unwrap();
    assert!(html.contains("Tag name is required"));
}

#[tokio::test]
async fn http_user_switch_reloads_current_section() {
    let upstream = MockServer::start().await;
    lastfm("user.getLovedTracks")
        .and(query_param("user", "bob"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "lovedtracks": { "track": [{ "name": "Roads", "artist": { "name": "Portishead" } }] }
        })))
        .expect(1)
        .mount(&upstream)
        .await;
    let server = spawn_server(&upstream, None).await;

    let body: Value = get(&server, "/view/user?user=%20%20&current=rj&section=loved-tracks")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(
        body,
        json!({ "status": "rejected", "message": "Please enter a username" })
    );

    let body: Value = get(&server, "/view/user?user=rj&current=rj&section=loved-tracks")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({ "status": "unchanged" }));

    let response = get(&server, "/view/user?user=%20bob%20&current=rj&section=loved-tracks").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "loaded");
    assert_eq!(body["user"], "bob");
    assert_eq!(body["section"], "loved-tracks");
    let html = body["html"].as_str().unwrap();
    assert!(html.contains("Loved Tracks"));
    assert!(html.contains("Roads"));
}
