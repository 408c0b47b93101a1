use reqwest::StatusCode;
use serde_json::{Value, json};
use sparcli::{
    error::SpotifyError,
    spotify::ArtistClient,
    types::{AccessToken, Artist},
};
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-token";

// Helper function to create a client talking to the mock server
fn client_for(server: &MockServer) -> ArtistClient {
    ArtistClient::new(AccessToken::new(TOKEN).unwrap(), server.uri()).unwrap()
}

fn artist_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Artist {id}"),
        "images": [{ "url": format!("https://i.scdn.co/image/{id}"), "width": 640, "height": 640 }]
    })
}

fn tracks_json(artist_ids: &[&str]) -> Value {
    let items: Vec<Value> = artist_ids
        .iter()
        .map(|id| json!({ "track": { "artists": [{ "id": id }] } }))
        .collect();
    json!({ "items": items })
}

fn ids(artists: &[Artist]) -> Vec<&str> {
    artists.iter().map(|a| a.id.as_str()).collect()
}

async fn mount_playlists(server: &MockServer, playlist_ids: &[&str]) {
    let items: Vec<Value> = playlist_ids.iter().map(|id| json!({ "id": id })).collect();
    Mock::given(method("GET"))
        .and(path("/me/playlists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": items })))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_tracks(server: &MockServer, playlist_id: &str, artist_ids: &[&str]) {
    Mock::given(method("GET"))
        .and(path(format!("/playlists/{playlist_id}/tracks")))
        .respond_with(ResponseTemplate::new(200).set_body_json(tracks_json(artist_ids)))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_artist_batch(server: &MockServer, artist_ids: &[String], status: u16) {
    let artists: Vec<Value> = artist_ids.iter().map(|id| artist_json(id)).collect();
    Mock::given(method("GET"))
        .and(path("/artists"))
        .and(query_param("ids", artist_ids.join(",")))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({ "artists": artists })))
        .expect(1)
        .mount(server)
        .await;
}

fn strings(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

#[tokio::test]
async fn test_followed_artists_concatenates_pages_until_next_is_null() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/following"))
        .and(query_param("type", "artist"))
        .and(query_param("limit", "50"))
        .and(query_param_is_missing("after"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "artists": {
                "items": [artist_json("A"), artist_json("B")],
                "next": format!("{}/me/following?type=artist&limit=50&after=B", server.uri()),
                "cursors": { "after": "B" },
                "total": 3
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/me/following"))
        .and(query_param("after", "B"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "artists": {
                "items": [artist_json("C")],
                "next": null,
                "cursors": { "after": null },
                "total": 3
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let artists = client_for(&server).get_followed_artists().await.unwrap();

    assert_eq!(ids(&artists), vec!["A", "B", "C"]);
    assert_eq!(artists[0].name, "Artist A");
    assert_eq!(artists[0].images[0].url, "https://i.scdn.co/image/A");
}

#[tokio::test]
async fn test_followed_artists_single_empty_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/following"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "artists": { "items": [] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let artists = client_for(&server).get_followed_artists().await.unwrap();
    assert!(artists.is_empty());
}

#[tokio::test]
async fn test_followed_artists_page_failure_aborts_whole_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/following"))
        .and(query_param_is_missing("after"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "artists": {
                "items": [artist_json("A")],
                "next": format!("{}/me/following?type=artist&limit=50&after=A", server.uri())
            }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/me/following"))
        .and(query_param("after", "A"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).get_followed_artists().await.unwrap_err();

    match err {
        SpotifyError::RequestFailed {
            status,
            status_text,
        } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(status_text, "Internal Server Error");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_followed_artists_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/following"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client_for(&server).get_followed_artists().await.unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_followed_artists_undecodable_body_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/following"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_followed_artists().await.unwrap_err();
    assert!(matches!(err, SpotifyError::Transport(_)));
}

#[tokio::test]
async fn test_playlist_artist_ids_are_deduplicated_in_first_seen_order() {
    let server = MockServer::start().await;

    mount_playlists(&server, &["P1", "P2"]).await;
    mount_tracks(&server, "P1", &["A", "B"]).await;
    mount_tracks(&server, "P2", &["B", "C"]).await;

    let collected = client_for(&server)
        .collect_playlist_artist_ids()
        .await
        .unwrap();
    assert_eq!(collected.as_slice(), ["A", "B", "C"]);
}

#[tokio::test]
async fn test_playlist_artists_resolves_unique_ids_in_one_batch() {
    let server = MockServer::start().await;

    mount_playlists(&server, &["P1", "P2"]).await;
    mount_tracks(&server, "P1", &["A", "B"]).await;
    mount_tracks(&server, "P2", &["B", "C"]).await;
    mount_artist_batch(&server, &strings(&["A", "B", "C"]), 200).await;

    let artists = client_for(&server).get_playlist_artists().await.unwrap();
    assert_eq!(ids(&artists), vec!["A", "B", "C"]);
}

#[tokio::test]
async fn test_playlist_artists_skips_failing_playlist() {
    let server = MockServer::start().await;

    mount_playlists(&server, &["P1", "P2"]).await;
    Mock::given(method("GET"))
        .and(path("/playlists/P1/tracks"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    mount_tracks(&server, "P2", &["C", "D"]).await;
    mount_artist_batch(&server, &strings(&["C", "D"]), 200).await;

    let artists = client_for(&server).get_playlist_artists().await.unwrap();
    assert_eq!(ids(&artists), vec!["C", "D"]);
}

#[tokio::test]
async fn test_playlist_artists_batches_more_than_fifty_ids() {
    let server = MockServer::start().await;

    let all: Vec<String> = (0..120).map(|i| format!("a{i:03}")).collect();
    let all_refs: Vec<&str> = all.iter().map(String::as_str).collect();

    mount_playlists(&server, &["P1"]).await;
    mount_tracks(&server, "P1", &all_refs).await;
    mount_artist_batch(&server, &all[0..50], 200).await;
    mount_artist_batch(&server, &all[50..100], 200).await;
    mount_artist_batch(&server, &all[100..120], 200).await;

    let artists = client_for(&server).get_playlist_artists().await.unwrap();

    assert_eq!(artists.len(), 120);
    assert_eq!(ids(&artists), all_refs);
}

#[tokio::test]
async fn test_playlist_artists_omits_failing_batch() {
    let server = MockServer::start().await;

    let all: Vec<String> = (0..60).map(|i| format!("b{i:02}")).collect();
    let all_refs: Vec<&str> = all.iter().map(String::as_str).collect();

    mount_playlists(&server, &["P1"]).await;
    mount_tracks(&server, "P1", &all_refs).await;
    mount_artist_batch(&server, &all[0..50], 502).await;
    mount_artist_batch(&server, &all[50..60], 200).await;

    let artists = client_for(&server).get_playlist_artists().await.unwrap();

    assert_eq!(ids(&artists), all_refs[50..60].to_vec());
}

#[tokio::test]
async fn test_playlist_artists_ignores_null_tracks_and_local_artists() {
    let server = MockServer::start().await;

    mount_playlists(&server, &["P1"]).await;
    Mock::given(method("GET"))
        .and(path("/playlists/P1/tracks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "track": null },
                { "track": { "artists": [{ "id": null, "name": "Local File" }] } },
                { "track": { "artists": [{ "id": "A" }, { "id": "B" }] } }
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/artists"))
        .and(query_param("ids", "A,B"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "artists": [artist_json("A"), null]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let artists = client_for(&server).get_playlist_artists().await.unwrap();
    assert_eq!(ids(&artists), vec!["A"]);
}

#[tokio::test]
async fn test_playlist_artists_without_playlists_makes_no_detail_request() {
    let server = MockServer::start().await;

    mount_playlists(&server, &[]).await;
    Mock::given(method("GET"))
        .and(path("/artists"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let artists = client_for(&server).get_playlist_artists().await.unwrap();
    assert!(artists.is_empty());
}

#[tokio::test]
async fn test_playlist_list_failure_aborts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/playlists"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client_for(&server).get_playlist_artists().await.unwrap_err();
    assert!(matches!(err, SpotifyError::Unauthorized));
}

#[tokio::test]
async fn test_follow_artist_success() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/me/following"))
        .and(query_param("type", "artist"))
        .and(query_param("ids", "X"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).follow_artist("X").await.unwrap();
    assert!(result.success);
}

#[tokio::test]
async fn test_unfollow_artist_success() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/me/following"))
        .and(query_param("type", "artist"))
        .and(query_param("ids", "X"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).unfollow_artist("X").await.unwrap();
    assert!(result.success);
}

#[tokio::test]
async fn test_follow_artist_classifies_failures() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/me/following"))
        .and(query_param("ids", "expired"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/me/following"))
        .and(query_param("ids", "bogus"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let err = client.follow_artist("expired").await.unwrap_err();
    assert!(err.is_unauthorized());

    let err = client.follow_artist("bogus").await.unwrap_err();
    assert!(!err.is_unauthorized());
    assert_eq!(err.to_string(), "Spotify API error: Bad Request");
}

#[tokio::test]
async fn test_unfollow_artist_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/me/following"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server).unfollow_artist("X").await.unwrap_err();
    assert!(matches!(
        err,
        SpotifyError::RequestFailed {
            status: StatusCode::SERVICE_UNAVAILABLE,
            ..
        }
    ));
}

#[tokio::test]
async fn test_network_failure_is_transport_error() {
    // nothing listens on the discard port
    let client = ArtistClient::new(AccessToken::new(TOKEN).unwrap(), "http://127.0.0.1:9").unwrap();

    let err = client.follow_artist("X").await.unwrap_err();
    assert!(matches!(err, SpotifyError::Transport(_)));
}
