//! Comparison of followed artists with the artists found in playlists.

use std::collections::HashSet;

use crate::types::Artist;

/// Followed and playlist artists side by side.
///
/// The followable list is what the user can tap to follow: playlist artists that
/// are neither followed yet nor hidden, in the order the playlists yielded them.
pub struct Reconciliation {
    followed: Vec<Artist>,
    followable: Vec<Artist>,
    hidden_count: usize,
}

impl Reconciliation {
    pub fn new(followed: Vec<Artist>, playlist: Vec<Artist>, hidden: &[String]) -> Self {
        let followed_ids: HashSet<&str> = followed.iter().map(|a| a.id.as_str()).collect();
        let hidden_ids: HashSet<&str> = hidden.iter().map(String::as_str).collect();

        let mut hidden_count = 0;
        let followable = playlist
            .into_iter()
            .filter(|a| !followed_ids.contains(a.id.as_str()))
            .filter(|a| {
                let hide = hidden_ids.contains(a.id.as_str());
                if hide {
                    hidden_count += 1;
                }
                !hide
            })
            .collect();

        Self {
            followed,
            followable,
            hidden_count,
        }
    }

    pub fn followed(&self) -> &[Artist] {
        &self.followed
    }

    pub fn followable(&self) -> &[Artist] {
        &self.followable
    }

    /// Number of unfollowed playlist artists suppressed by the hidden list.
    pub fn hidden_count(&self) -> usize {
        self.hidden_count
    }

    pub fn into_followable(self) -> Vec<Artist> {
        self.followable
    }
}
