use kanal::AsyncSender;
use shobdo_types::AppEvent;

use crate::events::notify;
use crate::state::AppState;

/// Resolve the current buffer against the store, falling back to translation
pub async fn handle_search(
    state: &AppState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let query = state.session.input();
    let language = state.session.language();
    tracing::info!("Searching '{}' as {:?}", query, language);

    match state.resolver.resolve(&query, language).await {
        Ok(results) => {
            tracing::debug!("Search produced {} results", results.len());
            *state.results.write().await = results.clone();
            app_to_ui_tx.send(AppEvent::ShowResults(results)).await?;
        }
        Err(e) => {
            tracing::warn!("Search for '{}' failed: {}", query, e);
            let notice = e.notice();
            notify(app_to_ui_tx, &notice.title, notice.message).await?;
        }
    }
    Ok(())
}

/// Empty the buffer, suggestions and result rows
pub async fn handle_clear(
    state: &AppState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    state.session.clear();
    state.results.write().await.clear();

    app_to_ui_tx.send(AppEvent::ShowInput(String::new())).await?;
    app_to_ui_tx.send(AppEvent::ShowResults(Vec::new())).await?;
    Ok(())
}
