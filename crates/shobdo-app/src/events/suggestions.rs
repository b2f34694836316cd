use kanal::AsyncSender;
use shobdo_core::session::SuggestionView;
use shobdo_types::AppEvent;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::events::notify;
use crate::state::AppState;

/// Forward every suggestion list change to the front-end
pub async fn watch_suggestions(
    mut rx: watch::Receiver<SuggestionView>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("Suggestion watcher cancelled");
                return Ok(());
            }
            changed = rx.changed() => {
                if changed.is_err() {
                    tracing::debug!("Suggestion session dropped");
                    return Ok(());
                }
                let suggestions = rx.borrow_and_update().suggestions.clone();
                app_to_ui_tx.send(AppEvent::ShowSuggestions(suggestions)).await?;
            }
        }
    }
}

pub async fn handle_commit_key(
    state: &AppState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    match state.session.commit_key() {
        Some(completed) => {
            tracing::debug!("Committed '{}'", completed);
            app_to_ui_tx.send(AppEvent::ShowInput(completed)).await?;
        }
        None => tracing::debug!("Nothing to commit"),
    }
    Ok(())
}

pub async fn handle_select_suggestion(
    state: &AppState,
    index: usize,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    match state.session.select(index) {
        Some(chosen) => app_to_ui_tx.send(AppEvent::ShowInput(chosen)).await?,
        None => tracing::warn!("No suggestion at {}", index),
    }
    Ok(())
}

/// Replace the buffer with clipboard text and refetch suggestions for it
pub async fn handle_paste(
    state: &AppState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let Some(clipboard) = state.devices.clipboard.as_ref() else {
        return notify(app_to_ui_tx, "Error", "Clipboard is not available").await;
    };

    match clipboard.get_text() {
        Ok(text) => {
            state.session.input_changed(&text);
            app_to_ui_tx.send(AppEvent::ShowInput(text)).await?;
        }
        Err(e) => {
            tracing::warn!("Clipboard read failed: {}", e);
            notify(app_to_ui_tx, "Error", "Could not read the clipboard").await?;
        }
    }
    Ok(())
}
