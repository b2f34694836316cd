use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use shobdo_appwrite::AppwriteStore;
use shobdo_core::capabilities::ClipboardAccess;
use shobdo_core::favorites::FavoritesStore;
use shobdo_core::store::{MemoryStore, VocabularyStore};
use shobdo_io::{ArboardClipboard, JsonFileStorage};
use shobdo_translator::Translator;
use shobdo_translator::apps_script::AppsScriptTranslator;
use shobdo_types::Language;

pub mod controller;
pub mod devices;
pub mod events;
pub mod logging;
pub mod profile;
pub mod state;
pub mod ui;


use self::controller::AppController;
use self::devices::{ConsoleShareSheet, ConsoleSpeaker};
use self::state::{AppState, Devices};

/// Bangla/Korean vocabulary lookup
#[derive(Debug, Parser)]
#[command(name = "shobdo", version)]
struct Args {
    /// JSON profile overriding environment configuration
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Serve vocabulary from a local JSON file instead of the remote store
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Directory for the favorites snapshot
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Initial input language (bn or ko)
    #[arg(long, default_value = "bn")]
    language: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut config = profile::load_config(args.profile.as_deref())?;
    logging::init_tracing(&config.log);

    if let Some(dir) = args.data_dir {
        config.favorites.data_dir = dir;
    }
    let timeout = Duration::from_secs(config.request_timeout_secs);

    let store: Arc<dyn VocabularyStore> = match &args.seed {
        Some(path) => Arc::new(MemoryStore::new(profile::load_seed(path)?)),
        None => {
            if !config.store.is_configured() {
                tracing::warn!("Store is not fully configured, requests will fail");
            }
            Arc::new(AppwriteStore::new(&config.store, timeout)?)
        }
    };

    let translator: Option<Arc<dyn Translator>> =
        if config.translator.enabled && !config.translator.url.is_empty() {
            Some(Arc::new(AppsScriptTranslator::new(
                config.translator.url.clone(),
                timeout,
            )?))
        } else {
            tracing::info!("Translation fallback disabled");
            None
        };

    let storage = Arc::new(JsonFileStorage::new(config.favorites.data_dir.clone()));
    let favorites = Arc::new(FavoritesStore::new(storage, config.favorites.key.clone()));
    let restored = favorites.load().await;
    tracing::info!("Restored {} favorites", restored.len());

    let clipboard: Option<Arc<dyn ClipboardAccess>> = match ArboardClipboard::new() {
        Ok(clipboard) => Some(Arc::new(clipboard)),
        Err(e) => {
            tracing::warn!("Clipboard unavailable: {}", e);
            None
        }
    };
    let devices = Devices {
        clipboard,
        share: Arc::new(ConsoleShareSheet),
        speaker: Arc::new(ConsoleSpeaker),
    };

    let language = Language::from_code(&args.language).unwrap_or_else(|| {
        tracing::warn!("Unknown language '{}', using Bangla", args.language);
        Language::Bangla
    });

    let state = Arc::new(AppState::new(config, store, translator, favorites, devices));
    state.session.set_language(language);

    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks();

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("Task finished, shutting down"),
                Ok(Err(e)) => tracing::error!("Task failed: {}", e),
                Err(e) => tracing::error!("Task panicked: {}", e),
            }
        }
    }

    controller.shutdown();
    tasks.shutdown().await;
    Ok(())
}
