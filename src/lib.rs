pub mod analyzer;
pub mod api;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod refresh;
pub mod settings;
pub mod state;
pub mod view;

use std::sync::Arc;

use api::ApiClient;
use config::AppConfig;
use error::AppResult;
use settings::{SettingsRepository, SqliteSettings};
use state::{AppState, DbAccess};

/// Opens the settings store, loads everything from the backend, prints the
/// dashboard, then keeps it fresh until Ctrl-C (unless `once` is set).
pub async fn run(config: AppConfig) -> AppResult<()> {
    let conn = db::setup::init_db(&config.db_path)?;
    let state = Arc::new(AppState::new(Some(conn)));

    let appearance = state.db(|conn| SqliteSettings::new(conn).load_appearance())?;
    log::info!(
        "{} ({:?}) sur {}",
        appearance.app_name,
        appearance.app_theme,
        config.base_url
    );

    let api = ApiClient::new(&config.base_url, config.token.clone())?;
    if !api.has_token() {
        log::warn!("Aucun jeton fourni, les notifications sont désactivées");
    }

    refresh::load_all(&state, &api).await;
    print_dashboard(&state)?;

    if config.once {
        return Ok(());
    }

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Impossible d'écouter Ctrl-C: {}", e);
        }
    };
    refresh::poll(Arc::clone(&state), api, config.refresh_interval(), shutdown).await;
    print_dashboard(&state)
}

fn print_dashboard(state: &AppState) -> AppResult<()> {
    let dashboard = commands::dashboard::get_dashboard(state)?;
    println!("{}", serde_json::to_string_pretty(&dashboard)?);
    Ok(())
}

// ─── E2E Integration Tests ──────────────────────────────────────────────────
