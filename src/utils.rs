use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::{Artist, ArtistTableRow};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Keeps artists whose name contains `search`, ignoring case.
pub fn filter_artists_by_name(artists: &mut Vec<Artist>, search: &str) {
    let search_term = search.to_lowercase();
    artists.retain(|a| a.name.to_lowercase().contains(&search_term));
}

pub fn sort_artists_by_name(artists: &mut [Artist]) {
    artists.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
}

pub fn artist_table_rows(artists: &[Artist]) -> Vec<ArtistTableRow> {
    artists
        .iter()
        .map(|a| ArtistTableRow {
            name: a.name.clone(),
            image: a
                .images
                .first()
                .map(|img| img.url.clone())
                .unwrap_or_else(|| "-".to_string()),
            id: a.id.clone(),
        })
        .collect()
}
