use crate::{
    error,
    error::SpotifyResult,
    spotify::ArtistClient,
    success,
    types::MutationResult,
    warning,
};

use super::{artist_client, fail};

#[derive(Clone, Copy)]
enum Change {
    Follow,
    Unfollow,
}

impl Change {
    fn verb(self) -> &'static str {
        match self {
            Change::Follow => "follow",
            Change::Unfollow => "unfollow",
        }
    }

    fn past(self) -> &'static str {
        match self {
            Change::Follow => "Followed",
            Change::Unfollow => "Unfollowed",
        }
    }
}

pub async fn follow(artist_ids: Vec<String>) {
    apply(Change::Follow, artist_ids).await;
}

pub async fn unfollow(artist_ids: Vec<String>) {
    apply(Change::Unfollow, artist_ids).await;
}

// one request per artist, in the order given
async fn apply(change: Change, artist_ids: Vec<String>) {
    let client = artist_client().await;
    let mut failed = 0;

    for artist_id in &artist_ids {
        match send(&client, change, artist_id).await {
            Ok(_) => success!("{} {}", change.past(), artist_id),
            Err(e) if e.is_unauthorized() => fail(change.verb(), &e).await,
            Err(e) => {
                failed += 1;
                warning!("Failed to {} {}. Err: {}", change.verb(), artist_id, e);
            }
        }
    }

    if failed > 0 {
        error!(
            "{} of {} artists could not be {}",
            failed,
            artist_ids.len(),
            change.past().to_lowercase()
        );
    }
}

async fn send(
    client: &ArtistClient,
    change: Change,
    artist_id: &str,
) -> SpotifyResult<MutationResult> {
    match change {
        Change::Follow => client.follow_artist(artist_id).await,
        Change::Unfollow => client.unfollow_artist(artist_id).await,
    }
}
