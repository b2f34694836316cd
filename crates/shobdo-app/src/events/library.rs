use std::sync::Arc;

use kanal::AsyncSender;
use shobdo_core::library::{LibraryIndex, LoadOutcome};
use shobdo_types::AppEvent;

use crate::events::notify;
use crate::state::AppState;

pub use crate::events::favorites::handle_library_favorite;

/// Reload the library from its first page. `announce` reports failures.
pub async fn handle_refresh(
    state: &AppState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    announce: bool,
) -> anyhow::Result<()> {
    match state.library.refresh().await {
        LoadOutcome::Failed if announce => {
            notify(app_to_ui_tx, "Error", "Failed to load vocabulary").await?;
        }
        LoadOutcome::Busy => {
            tracing::debug!("Library refresh skipped, fetch in flight");
            return Ok(());
        }
        _ => {}
    }
    show_all(state, app_to_ui_tx).await
}

pub async fn handle_load_more(
    state: &AppState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    match state.library.load_more().await {
        LoadOutcome::Loaded(added) => {
            tracing::debug!("Loaded {} more library entries", added);
            show_all(state, app_to_ui_tx).await
        }
        LoadOutcome::Exhausted => {
            notify(app_to_ui_tx, "Library", "No more entries").await
        }
        LoadOutcome::Busy => Ok(()),
        LoadOutcome::Failed => {
            notify(app_to_ui_tx, "Error", "Failed to load more vocabulary").await
        }
    }
}

/// A library row was acted on; fetch the next page when it sits near the end
/// of the listed rows.
pub async fn handle_row_viewed(
    state: &AppState,
    row: usize,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let threshold = state.config.read().await.library.end_reached_threshold;
    let rendered = state.listed_library.read().await.len();

    if !LibraryIndex::should_load_more(row, rendered, threshold) {
        return Ok(());
    }

    match state.library.load_more().await {
        LoadOutcome::Loaded(added) if added > 0 => show_all(state, app_to_ui_tx).await,
        _ => Ok(()),
    }
}

/// Filter the mirror once typing pauses. Blank input lists everything at once.
pub async fn handle_library_search(
    state: &Arc<AppState>,
    text: String,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    if text.trim().is_empty() {
        state.library_search.cancel();
        return show_all(state, app_to_ui_tx).await;
    }

    let task_state = state.clone();
    let tx = app_to_ui_tx.clone();

    state.library_search.schedule(async move {
        let matches = task_state.library.search(&text).await;
        tracing::debug!("Library search '{}' matched {}", text, matches.len());
        *task_state.listed_library.write().await = matches.clone();

        if let Err(e) = tx.send(AppEvent::ShowLibrary(matches)).await {
            tracing::warn!("Library search update failed: {}", e);
        }
    });

    Ok(())
}

async fn show_all(state: &AppState, app_to_ui_tx: &AsyncSender<AppEvent>) -> anyhow::Result<()> {
    let entries = state.library.entries().await;
    *state.listed_library.write().await = entries.clone();
    app_to_ui_tx.send(AppEvent::ShowLibrary(entries)).await?;
    Ok(())
}
