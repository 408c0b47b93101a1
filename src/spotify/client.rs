use reqwest::{Client, RequestBuilder, Response, header::CONTENT_LENGTH};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
    error::{SpotifyError, SpotifyResult},
    types::{
        AccessToken, Artist, ArtistIdSet, FollowedArtistsResponse, GetSeveralArtistsResponse,
        GetUserPlaylistsResponse, MutationResult, PlaylistTracksResponse,
    },
};

/// Page size used when walking the followed artists.
pub const FOLLOWED_PAGE_LIMIT: u32 = 50;

/// Maximum number of ids accepted by `GET /artists`.
pub const ARTIST_BATCH_SIZE: usize = 50;

/// Client for the artist related parts of the Spotify Web API.
///
/// Every operation issues its requests one after another and awaits each
/// response before sending the next one. The client keeps no state besides the
/// token and base URL, so two calls never influence each other.
#[derive(Debug, Clone)]
pub struct ArtistClient {
    http: Client,
    base_url: String,
    token: AccessToken,
}

impl ArtistClient {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// # Arguments
    ///
    /// * `token` - Bearer token, assumed valid at call time
    /// * `base_url` - API root, e.g. `https://api.spotify.com/v1`
    ///
    /// # Errors
    ///
    /// Returns [`SpotifyError::Transport`] if the HTTP client cannot be built.
    pub fn new(token: AccessToken, base_url: impl Into<String>) -> SpotifyResult<Self> {
        let http = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self::with_http_client(http, token, base_url))
    }

    /// Creates a client reusing an existing [`reqwest::Client`].
    pub fn with_http_client(http: Client, token: AccessToken, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            token,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Retrieves every artist the user follows.
    ///
    /// Walks `GET /me/following?type=artist&limit=50` page by page, following the
    /// `next` link of each response until Spotify returns none. Pages are
    /// concatenated in server order.
    ///
    /// # Errors
    ///
    /// A failure on any page aborts the whole call, no partial list is returned.
    pub async fn get_followed_artists(&self) -> SpotifyResult<Vec<Artist>> {
        let mut artists: Vec<Artist> = Vec::new();
        let mut next_url = Some(format!(
            "{uri}/me/following?type=artist&limit={limit}",
            uri = self.base_url,
            limit = FOLLOWED_PAGE_LIMIT
        ));

        while let Some(url) = next_url {
            let page: FollowedArtistsResponse = self.fetch_json(&url).await?;
            debug!(count = page.artists.items.len(), "Fetched followed artists page");

            artists.extend(page.artists.items);
            next_url = page.artists.next;
        }

        Ok(artists)
    }

    /// Retrieves every distinct artist appearing in the user's playlists.
    ///
    /// Collects the artist ids of all tracks in all playlists (see
    /// [`ArtistClient::collect_playlist_artist_ids`]) and resolves them to full
    /// artist records with [`ArtistClient::resolve_artists`]. The result is
    /// ordered by first appearance while scanning playlists and their tracks
    /// top to bottom.
    ///
    /// # Errors
    ///
    /// Only a failure while listing the playlists aborts the call. Broken
    /// playlists and failed detail batches are skipped.
    pub async fn get_playlist_artists(&self) -> SpotifyResult<Vec<Artist>> {
        let ids = self.collect_playlist_artist_ids().await?;
        Ok(self.resolve_artists(ids.as_slice()).await)
    }

    /// Scans the user's playlists and gathers the ids of their track artists.
    ///
    /// Only the first page of `GET /me/playlists` is read. A playlist whose
    /// tracks cannot be fetched contributes nothing and the scan moves on.
    pub async fn collect_playlist_artist_ids(&self) -> SpotifyResult<ArtistIdSet> {
        let playlists: GetUserPlaylistsResponse = self
            .fetch_json(&format!("{uri}/me/playlists", uri = self.base_url))
            .await?;

        let mut ids = ArtistIdSet::new();
        for playlist in &playlists.items {
            let url = format!(
                "{uri}/playlists/{id}/tracks",
                uri = self.base_url,
                id = playlist.id
            );

            let tracks = match self.fetch_json::<PlaylistTracksResponse>(&url).await {
                Ok(tracks) => tracks,
                Err(e) => {
                    warn!(playlist = %playlist.id, error = %e, "Skipping playlist, failed to fetch tracks");
                    continue;
                }
            };

            tracks
                .items
                .iter()
                .filter_map(|item| item.track.as_ref())
                .flat_map(|track| track.artists.iter())
                .filter_map(|artist| artist.id.as_deref())
                .for_each(|id| {
                    ids.insert(id);
                });
        }

        debug!(
            playlists = playlists.items.len(),
            artists = ids.len(),
            "Collected playlist artist ids"
        );
        Ok(ids)
    }

    /// Resolves artist ids to full records using `GET /artists?ids=...`.
    ///
    /// Ids are sent in chunks of at most [`ARTIST_BATCH_SIZE`]. A chunk that
    /// fails is left out of the result, unknown ids (returned as `null`) are
    /// dropped.
    pub async fn resolve_artists(&self, ids: &[String]) -> Vec<Artist> {
        let mut artists: Vec<Artist> = Vec::with_capacity(ids.len());

        for (index, batch) in ids.chunks(ARTIST_BATCH_SIZE).enumerate() {
            let url = format!(
                "{uri}/artists?ids={ids}",
                uri = self.base_url,
                ids = batch.join(",")
            );

            match self.fetch_json::<GetSeveralArtistsResponse>(&url).await {
                Ok(res) => artists.extend(res.artists.into_iter().flatten()),
                Err(e) => {
                    warn!(batch = index, size = batch.len(), error = %e, "Skipping artist batch");
                }
            }
        }

        artists
    }

    /// Follows the artist with the given id.
    ///
    /// Following an already followed artist succeeds as well.
    ///
    /// # Errors
    ///
    /// Any non-2xx response is returned as a classified [`SpotifyError`].
    pub async fn follow_artist(&self, artist_id: &str) -> SpotifyResult<MutationResult> {
        let request = self.http.put(self.following_url()).query(&[
            ("type", "artist"),
            ("ids", artist_id),
        ]);
        self.execute(request.header(CONTENT_LENGTH, "0")).await?;
        Ok(MutationResult::ok())
    }

    /// Unfollows the artist with the given id.
    ///
    /// # Errors
    ///
    /// Any non-2xx response is returned as a classified [`SpotifyError`].
    pub async fn unfollow_artist(&self, artist_id: &str) -> SpotifyResult<MutationResult> {
        let request = self.http.delete(self.following_url()).query(&[
            ("type", "artist"),
            ("ids", artist_id),
        ]);
        self.execute(request).await?;
        Ok(MutationResult::ok())
    }

    fn following_url(&self) -> String {
        format!("{uri}/me/following", uri = self.base_url)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> SpotifyResult<T> {
        let response = self.execute(self.http.get(url)).await?;
        Ok(response.json::<T>().await?)
    }

    async fn execute(&self, request: RequestBuilder) -> SpotifyResult<Response> {
        let response = request.bearer_auth(self.token.as_str()).send().await?;

        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "Spotify API response");
        if !status.is_success() {
            return Err(SpotifyError::from_status(status));
        }

        Ok(response)
    }
}
