use kanal::AsyncSender;
use shobdo_core::favorites::categorize;
use shobdo_types::{AppEvent, VocabularyEntry};

use crate::state::AppState;

/// Star or unstar a search result row
pub async fn handle_toggle_favorite(
    state: &AppState,
    index: usize,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let Some(result) = state.results.read().await.get(index).cloned() else {
        tracing::warn!("No result at {}", index);
        return Ok(());
    };

    let entry = VocabularyEntry::from(&result);
    toggle(state, &entry, app_to_ui_tx).await
}

/// Star or unstar a library row
pub async fn handle_library_favorite(
    state: &AppState,
    index: usize,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let Some(entry) = state.listed_library.read().await.get(index).cloned() else {
        tracing::warn!("No library row at {}", index);
        return Ok(());
    };

    toggle(state, &entry, app_to_ui_tx).await
}

async fn toggle(
    state: &AppState,
    entry: &VocabularyEntry,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let starred = state.favorites.toggle(entry).await;
    let message = if starred {
        format!("Added '{}' to favorites", entry.bangla)
    } else {
        format!("Removed '{}' from favorites", entry.bangla)
    };
    app_to_ui_tx
        .send(AppEvent::Notice {
            title: "Favorites".to_string(),
            message,
        })
        .await?;
    Ok(())
}

/// Show favorites grouped into day buckets
pub async fn handle_show_favorites(
    state: &AppState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let snapshot = state.favorites.snapshot().await;
    let buckets = categorize(&snapshot);

    // Row numbers follow bucket order
    let listed = buckets
        .iter()
        .flat_map(|b| b.entries.iter().cloned())
        .collect();
    *state.listed_favorites.write().await = listed;

    app_to_ui_tx.send(AppEvent::ShowFavorites(buckets)).await?;
    Ok(())
}

pub async fn handle_remove_favorite(
    state: &AppState,
    index: usize,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let Some(favorite) = state.listed_favorites.read().await.get(index).cloned() else {
        tracing::warn!("No favorite at {}", index);
        return Ok(());
    };

    state.favorites.remove(&favorite.entry).await;
    handle_show_favorites(state, app_to_ui_tx).await
}
