use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use shobdo_types::{AppEvent, UiEvent};

use crate::state::AppState;

pub mod favorites;
pub mod library;
pub mod result_actions;
pub mod search;
pub mod suggestions;

use favorites::{handle_remove_favorite, handle_show_favorites, handle_toggle_favorite};
use library::{
    handle_library_favorite, handle_library_search, handle_load_more, handle_refresh,
    handle_row_viewed,
};
use result_actions::{handle_copy, handle_share, handle_speak};
use search::{handle_clear, handle_search};
use suggestions::{handle_commit_key, handle_paste, handle_select_suggestion};

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    // Library mirror fills in the background
    {
        let state = state.clone();
        let tx = app_to_ui_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_refresh(&state, &tx, false).await {
                tracing::warn!("Initial library load failed: {}", e);
            }
        });
    }

    app_to_ui_tx.send(AppEvent::BackendReady).await?;

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = ui_to_app_rx.recv().await?;

        if matches!(event, AppEvent::UiEvent(UiEvent::Close)) {
            tracing::info!("[EVENT_LOOP] Close requested");
            return Ok(());
        }

        handle_events(state.clone(), &app_to_ui_tx, event).await?;
    }
}

async fn handle_events(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<()> {
    let AppEvent::UiEvent(event) = event else {
        // Everything else flows app -> ui
        return Ok(());
    };

    tracing::debug!("Handling {:?}", event);
    match event {
        UiEvent::SelectLanguage(language) => {
            tracing::info!("Language set to {:?}", language);
            state.session.set_language(language);
        }
        UiEvent::TextInput(text) => {
            state.session.input_changed(&text);
        }
        UiEvent::CommitKey => handle_commit_key(&state, app_to_ui_tx).await?,
        UiEvent::SelectSuggestion(index) => {
            handle_select_suggestion(&state, index, app_to_ui_tx).await?
        }
        UiEvent::Search => handle_search(&state, app_to_ui_tx).await?,
        UiEvent::ClearInput => handle_clear(&state, app_to_ui_tx).await?,
        UiEvent::PasteFromClipboard => handle_paste(&state, app_to_ui_tx).await?,
        UiEvent::ToggleFavorite(index) => handle_toggle_favorite(&state, index, app_to_ui_tx).await?,
        UiEvent::RemoveFavorite(index) => handle_remove_favorite(&state, index, app_to_ui_tx).await?,
        UiEvent::ShowFavorites => handle_show_favorites(&state, app_to_ui_tx).await?,
        UiEvent::CopyResult(index) => handle_copy(&state, index, app_to_ui_tx).await?,
        UiEvent::ShareResult(index) => handle_share(&state, index, app_to_ui_tx).await?,
        UiEvent::SpeakResult(index) => handle_speak(state.clone(), index).await?,
        UiEvent::RefreshLibrary => handle_refresh(&state, app_to_ui_tx, true).await?,
        UiEvent::LoadMoreLibrary => handle_load_more(&state, app_to_ui_tx).await?,
        UiEvent::SearchLibrary(text) => handle_library_search(&state, text, app_to_ui_tx).await?,
        UiEvent::ToggleLibraryFavorite(index) => {
            handle_library_favorite(&state, index, app_to_ui_tx).await?;
            handle_row_viewed(&state, index, app_to_ui_tx).await?
        }
        UiEvent::Close => {}
    }

    Ok(())
}

/// Send a titled message to the front-end
pub(crate) async fn notify(
    app_to_ui_tx: &AsyncSender<AppEvent>,
    title: &str,
    message: impl Into<String>,
) -> anyhow::Result<()> {
    app_to_ui_tx
        .send(AppEvent::Notice {
            title: title.to_string(),
            message: message.into(),
        })
        .await?;
    Ok(())
}
