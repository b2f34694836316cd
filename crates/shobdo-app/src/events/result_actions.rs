use std::sync::Arc;

use kanal::AsyncSender;
use shobdo_core::capabilities::{ShareOutcome, SpeechAction, SpeechOptions};
use shobdo_types::{AppEvent, SearchResult};

use crate::events::notify;
use crate::state::AppState;

async fn result_at(state: &AppState, index: usize) -> Option<SearchResult> {
    let result = state.results.read().await.get(index).cloned();
    if result.is_none() {
        tracing::warn!("No result at {}", index);
    }
    result
}

/// Copy the Korean side of a result
pub async fn handle_copy(
    state: &AppState,
    index: usize,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let Some(result) = result_at(state, index).await else {
        return Ok(());
    };
    let Some(clipboard) = state.devices.clipboard.as_ref() else {
        return notify(app_to_ui_tx, "Error", "Clipboard is not available").await;
    };

    match clipboard.set_text(&result.korean) {
        Ok(()) => notify(app_to_ui_tx, "Copied", "Copied to clipboard!").await,
        Err(e) => {
            tracing::warn!("Clipboard write failed: {}", e);
            notify(app_to_ui_tx, "Error", "Could not copy to clipboard").await
        }
    }
}

pub async fn handle_share(
    state: &AppState,
    index: usize,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let Some(result) = result_at(state, index).await else {
        return Ok(());
    };

    match state.devices.share.share(&result.share_text()).await {
        Ok(ShareOutcome::Shared { activity }) => {
            tracing::info!("Shared via {}", activity.as_deref().unwrap_or("default"));
            Ok(())
        }
        Ok(ShareOutcome::Dismissed) => {
            tracing::debug!("Share dismissed");
            Ok(())
        }
        Err(e) => {
            tracing::warn!("Share failed: {}", e);
            notify(app_to_ui_tx, "Error", "Error sharing content").await
        }
    }
}

/// Start reading a result's Korean text, or stop it if it is already playing
pub async fn handle_speak(state: Arc<AppState>, index: usize) -> anyhow::Result<()> {
    let Some(result) = result_at(&state, index).await else {
        return Ok(());
    };

    let (action, previous) = {
        let mut toggle = match state.speech.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let previous = toggle.speaking();
        (toggle.press(index), previous)
    };

    match action {
        SpeechAction::Stop(_) => {
            state.devices.speaker.stop();
        }
        SpeechAction::Start(_) => {
            if previous.is_some() {
                state.devices.speaker.stop();
            }

            tokio::spawn(async move {
                let options = SpeechOptions::korean();
                if let Err(e) = state.devices.speaker.speak(&result.korean, &options).await {
                    tracing::warn!("Speech failed: {}", e);
                }

                let mut toggle = match state.speech.lock() {
                    Ok(guard) => guard,
                    Err(poisoned) => poisoned.into_inner(),
                };
                toggle.finished(index);
            });
        }
    }
    Ok(())
}
