use crate::api::ApiClient;
use crate::error::AppResult;
use crate::models::Notification;
use crate::refresh::reload_notifications;
use crate::state::AppState;

/// Marks one notification read, then reloads the list and the unread count.
///
/// Failures are logged; the notification panel keeps its previous content.
pub async fn mark_notification_read(state: &AppState, api: &ApiClient, notification_id: &str) {
    match api.mark_notification_read(notification_id).await {
        Ok(true) => reload_notifications(state, api).await,
        Ok(false) => {}
        Err(e) => log::error!(
            "Erreur lors du marquage de la notification {} comme lue: {}",
            notification_id,
            e
        ),
    }
}

/// Notifications currently held, newest first as sent by the backend.
pub fn list_notifications(state: &AppState) -> AppResult<(Vec<Notification>, u32)> {
    let data = state.data()?;
    Ok((data.notifications.clone(), data.unread_count))
}
