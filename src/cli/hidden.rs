use crate::{error, info, management::HiddenArtistsManager, success};

pub async fn hide(artist_ids: Vec<String>, clear: bool) {
    let mut hidden = load().await;

    if clear {
        hidden.clear();
    }

    let added = artist_ids.iter().filter(|id| hidden.hide(id)).count();
    save(&hidden).await;

    if clear {
        info!("Hidden artist list cleared");
    }
    success!("Hid {} artists ({} hidden in total)", added, hidden.count());
}

pub async fn unhide(artist_ids: Vec<String>) {
    let mut hidden = load().await;

    let removed = artist_ids.iter().filter(|id| hidden.unhide(id)).count();
    save(&hidden).await;

    success!(
        "Unhid {} artists ({} hidden in total)",
        removed,
        hidden.count()
    );
}

async fn load() -> HiddenArtistsManager {
    match HiddenArtistsManager::load().await {
        Ok(mgr) => mgr,
        Err(e) => error!("Failed to load hidden artists. Err: {}", e),
    }
}

async fn save(hidden: &HiddenArtistsManager) {
    if let Err(e) = hidden.persist().await {
        error!("Failed to save hidden artists. Err: {}", e);
    }
}
