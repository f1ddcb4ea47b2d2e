//! Ticket lifecycle actions: assign, reassign, escalate, close, reopen.
//!
//! Each action validates locally, asks for confirmation where needed, sends
//! one request, and on success refetches the whole ticket collection.

use serde::{Deserialize, Serialize};

use super::Notice;
use crate::api::ApiClient;
use crate::error::{AppError, AppResult};
use crate::models::TicketStatus;
use crate::refresh::reload_tickets;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketAction {
    Assign,
    Reassign,
    Escalate,
    Close,
    Reopen,
}

impl TicketAction {
    /// Warning shown when the action needs a technician and none is selected.
    fn missing_technician(self) -> Option<&'static str> {
        match self {
            TicketAction::Assign => Some("Veuillez sélectionner un technicien"),
            TicketAction::Reassign => {
                Some("Veuillez sélectionner un technicien pour la réassignation")
            }
            TicketAction::Reopen => Some("Veuillez sélectionner un technicien pour la réouverture"),
            TicketAction::Escalate | TicketAction::Close => None,
        }
    }

    pub fn confirmation_prompt(self) -> Option<&'static str> {
        match self {
            TicketAction::Escalate => Some(
                "Êtes-vous sûr de vouloir escalader ce ticket ? La priorité sera augmentée.",
            ),
            TicketAction::Close => Some("Êtes-vous sûr de vouloir clôturer ce ticket ?"),
            TicketAction::Reopen => {
                Some("Êtes-vous sûr de vouloir réouvrir ce ticket et le réassigner ?")
            }
            TicketAction::Assign | TicketAction::Reassign => None,
        }
    }

    fn success_message(self) -> &'static str {
        match self {
            TicketAction::Assign => "Ticket assigné avec succès",
            TicketAction::Reassign => "Ticket réassigné avec succès",
            TicketAction::Escalate => "Ticket escaladé avec succès",
            TicketAction::Close => "Ticket clôturé avec succès",
            TicketAction::Reopen => "Ticket réouvert et réassigné avec succès",
        }
    }

    /// Used when the backend refuses without a `detail`.
    fn failure_message(self) -> &'static str {
        match self {
            TicketAction::Assign => "Impossible d'assigner le ticket",
            TicketAction::Reassign => "Impossible de réassigner le ticket",
            TicketAction::Escalate => "Impossible d'escalader le ticket",
            TicketAction::Close => "Impossible de clôturer le ticket",
            TicketAction::Reopen => "Impossible de réouvrir le ticket",
        }
    }

    /// Used when the request never got an answer.
    fn transport_message(self) -> &'static str {
        match self {
            TicketAction::Assign => "Erreur lors de l'assignation",
            TicketAction::Reassign => "Erreur lors de la réassignation",
            TicketAction::Escalate => "Erreur lors de l'escalade",
            TicketAction::Close => "Erreur lors de la clôture",
            TicketAction::Reopen => "Erreur lors de la réouverture",
        }
    }

    fn clears_selection(self) -> bool {
        self.missing_technician().is_some()
    }
}

/// Validated request, ready to send.
enum Request<'a> {
    Assign(&'a str),
    Reassign(&'a str),
    Escalate,
    Close,
    Reopen(&'a str),
}

impl Request<'_> {
    async fn send(&self, api: &ApiClient, ticket_id: &str) -> AppResult<()> {
        match self {
            Request::Assign(tech) => api.assign(ticket_id, tech).await,
            Request::Reassign(tech) => api.reassign(ticket_id, tech).await,
            Request::Escalate => api.escalate(ticket_id).await,
            Request::Close => api.update_status(ticket_id, &TicketStatus::Cloture).await,
            Request::Reopen(tech) => api.reopen(ticket_id, tech).await,
        }
    }
}

fn build_request(action: TicketAction, technician: Option<&str>) -> Option<Request<'_>> {
    match (action, technician) {
        (TicketAction::Assign, Some(t)) => Some(Request::Assign(t)),
        (TicketAction::Reassign, Some(t)) => Some(Request::Reassign(t)),
        (TicketAction::Reopen, Some(t)) => Some(Request::Reopen(t)),
        (TicketAction::Escalate, _) => Some(Request::Escalate),
        (TicketAction::Close, _) => Some(Request::Close),
        (_, None) => None,
    }
}

/// Runs `action` on `ticket_id` with the technician selected in the view.
///
/// `confirm` receives the prompt of actions that need one; answering `false`
/// cancels silently and `Ok(None)` is returned.
pub async fn run_ticket_action<C>(
    state: &AppState,
    api: &ApiClient,
    action: TicketAction,
    ticket_id: &str,
    confirm: C,
) -> AppResult<Option<Notice>>
where
    C: FnOnce(&str) -> bool,
{
    let technician = state.view()?.selected_technician.clone();

    let Some(request) = build_request(action, technician.as_deref()) else {
        let warning = action.missing_technician().unwrap_or_default();
        return Ok(Some(Notice::warning(warning)));
    };

    if let Some(prompt) = action.confirmation_prompt() {
        if !confirm(prompt) {
            log::debug!("{:?} du ticket {} annulé", action, ticket_id);
            return Ok(None);
        }
    }

    state.set_loading(true)?;
    let outcome = request.send(api, ticket_id).await;

    let notice = match outcome {
        Ok(()) => {
            reload_tickets(state, api).await;
            if action.clears_selection() {
                if let Ok(mut view) = state.view() {
                    view.clear_selection();
                    view.close_modal();
                }
            }
            Notice::success(action.success_message())
        }
        Err(e @ AppError::Api { .. }) => {
            log::warn!("{:?} du ticket {} refusé: {}", action, ticket_id, e);
            Notice::error(format!(
                "Erreur: {}",
                e.detail().unwrap_or(action.failure_message())
            ))
        }
        Err(e) => {
            log::error!("{:?} du ticket {}: {}", action, ticket_id, e);
            Notice::error(action.transport_message())
        }
    };

    state.set_loading(false)?;
    Ok(Some(notice))
}
