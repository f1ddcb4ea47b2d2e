//! Loading of the backend collections into `AppState`.
//!
//! Every reload replaces the whole collection. A failed fetch is logged and
//! the last-known copy is kept.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::api::ApiClient;
use crate::error::AppResult;
use crate::state::AppState;

pub const DEFAULT_REFRESH_SECS: u64 = 30;

fn keep_last<T>(what: &str, result: AppResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Chargement {} impossible, données précédentes conservées: {}", what, e);
            None
        }
    }
}

/// Refetches the ticket collection. Returns `true` when it was replaced.
pub async fn reload_tickets(state: &AppState, api: &ApiClient) -> bool {
    let Some(tickets) = keep_last("des tickets", api.fetch_tickets().await) else {
        return false;
    };
    log::debug!("{} tickets chargés", tickets.len());
    match state.replace_tickets(tickets) {
        Ok(()) => true,
        Err(e) => {
            log::error!("{}", e);
            false
        }
    }
}

/// Refetches notifications and the unread counter.
pub async fn reload_notifications(state: &AppState, api: &ApiClient) {
    let notifications = keep_last("des notifications", api.fetch_notifications().await);
    let unread = keep_last("du compteur de notifications", api.unread_count().await);

    match state.data() {
        Ok(mut data) => {
            if let Some(notifications) = notifications {
                data.notifications = notifications;
            }
            if let Some(unread) = unread {
                data.unread_count = unread;
            }
        }
        Err(e) => log::error!("{}", e),
    }
}

/// Initial load: tickets, technicians, profile, the user directory for
/// admins, then notifications.
pub async fn load_all(state: &AppState, api: &ApiClient) {
    reload_tickets(state, api).await;

    let technicians = keep_last("des techniciens", api.fetch_technicians().await);
    let me = keep_last("du profil", api.fetch_me().await);
    let users = match &me {
        Some(me) if me.is_admin() => keep_last("des utilisateurs", api.fetch_users().await),
        _ => None,
    };

    match state.data() {
        Ok(mut data) => {
            if let Some(technicians) = technicians {
                data.technicians = technicians;
            }
            if let Some(users) = users {
                data.users = users;
            }
            if me.is_some() {
                data.current_user = me;
            }
        }
        Err(e) => log::error!("{}", e),
    }

    reload_notifications(state, api).await;
}

/// Reloads tickets and notifications every `every` until `shutdown` resolves.
pub async fn poll<S>(state: Arc<AppState>, api: ApiClient, every: Duration, shutdown: S)
where
    S: Future<Output = ()>,
{
    let mut interval = tokio::time::interval(every);
    // the first tick completes immediately; the initial load already ran
    interval.tick().await;
    tokio::pin!(shutdown);

    log::info!("Rafraîchissement toutes les {} s", every.as_secs());
    loop {
        tokio::select! {
            _ = interval.tick() => {
                reload_tickets(&state, &api).await;
                reload_notifications(&state, &api).await;
            }
            _ = &mut shutdown => {
                log::info!("Arrêt du rafraîchissement");
                break;
            }
        }
    }
}
