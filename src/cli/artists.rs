use crate::{
    error, info,
    management::HiddenArtistsManager,
    reconcile::Reconciliation,
    success,
    types::Artist,
    utils,
};

use super::{artist_client, fail, print_artists, spinner};

pub async fn followed(search: Option<String>, sort: bool, json: bool) {
    let client = artist_client().await;

    let pb = spinner("Fetching followed artists...");
    let result = client.get_followed_artists().await;
    pb.finish_and_clear();

    let mut artists = match result {
        Ok(artists) => artists,
        Err(e) => {
            fail("fetch followed artists", &e).await;
            return;
        }
    };

    present(&mut artists, search, sort, json);
}

pub async fn playlist_artists(search: Option<String>, sort: bool, json: bool) {
    let client = artist_client().await;

    let pb = spinner("Scanning playlists for artists...");
    let result = client.get_playlist_artists().await;
    pb.finish_and_clear();

    let mut artists = match result {
        Ok(artists) => artists,
        Err(e) => {
            fail("fetch playlist artists", &e).await;
            return;
        }
    };

    present(&mut artists, search, sort, json);
}

pub async fn reconcile(json: bool) {
    let hidden = match HiddenArtistsManager::load().await {
        Ok(mgr) => mgr,
        Err(e) => error!("Failed to load hidden artists. Err: {}", e),
    };

    let client = artist_client().await;

    let pb = spinner("Fetching followed artists...");
    let followed = match client.get_followed_artists().await {
        Ok(artists) => artists,
        Err(e) => {
            pb.finish_and_clear();
            fail("fetch followed artists", &e).await;
            return;
        }
    };

    pb.set_message("Scanning playlists for artists...");
    let playlist = match client.get_playlist_artists().await {
        Ok(artists) => artists,
        Err(e) => {
            pb.finish_and_clear();
            fail("fetch playlist artists", &e).await;
            return;
        }
    };
    pb.finish_and_clear();

    let reconciliation = Reconciliation::new(followed, playlist, hidden.ids());
    let followed_count = reconciliation.followed().len();
    let hidden_count = reconciliation.hidden_count();
    let followable = reconciliation.into_followable();

    if json {
        print_artists(&followable, true);
        return;
    }

    info!(
        "Following {} artists, {} hidden from suggestions",
        followed_count, hidden_count
    );

    if followable.is_empty() {
        success!("No new artists to follow");
        return;
    }

    print_artists(&followable, false);
    info!("Run sparcli follow <ID>... to follow, sparcli hide <ID>... to hide");
}

fn present(artists: &mut Vec<Artist>, search: Option<String>, sort: bool, json: bool) {
    if let Some(search) = search {
        utils::filter_artists_by_name(artists, &search);
    }

    if sort {
        utils::sort_artists_by_name(artists);
    }

    print_artists(artists, json);
    if !json {
        success!("{} artists", artists.len());
    }
}
