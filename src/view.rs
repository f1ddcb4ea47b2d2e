use serde::{Deserialize, Serialize};

use crate::analyzer::status::StatusFilter;
use crate::analyzer::users::UserFilter;

// ─── Navigation ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Statistiques,
    Metriques,
    Agence,
    Technicien,
    Evolutions,
    Recurrents,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SettingsTab {
    Apparence,
    Email,
    Securite,
    TypesTickets,
    Priorites,
    Departements,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "section", content = "detail", rename_all = "camelCase")]
pub enum Section {
    #[default]
    Dashboard,
    Tickets,
    /// `None` is the report picker.
    Reports(Option<ReportKind>),
    Users,
    Settings(SettingsTab),
}

/// At most one modal is open at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "modal", rename_all = "camelCase")]
pub enum Modal {
    #[default]
    None,
    Assign { ticket_id: String },
    Reassign { ticket_id: String },
    Reopen { ticket_id: String },
    /// `type_id` is `None` when adding a new type.
    TicketTypeEditor { type_id: Option<u32> },
    PriorityEditor { priority_id: Option<u32> },
    AddUser,
    EditUser { user_id: String },
    GenerateReport,
    Notifications,
}

impl Modal {
    /// Ticket the modal acts on, for the assignment-style modals.
    pub fn ticket_id(&self) -> Option<&str> {
        match self {
            Modal::Assign { ticket_id }
            | Modal::Reassign { ticket_id }
            | Modal::Reopen { ticket_id } => Some(ticket_id),
            _ => None,
        }
    }
}

// ─── View state ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub section: Section,
    pub modal: Modal,
    pub status_filter: StatusFilter,
    pub selected_ticket: Option<String>,
    pub selected_technician: Option<String>,
    pub loading: bool,
    pub user_filter: UserFilter,
    pub user_page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            section: Section::Dashboard,
            modal: Modal::None,
            status_filter: StatusFilter::All,
            selected_ticket: None,
            selected_technician: None,
            loading: false,
            user_filter: UserFilter::default(),
            user_page: 1,
        }
    }
}

impl ViewState {
    /// Switches section. Any open modal is closed.
    pub fn navigate(&mut self, section: Section) {
        self.section = section;
        self.close_modal();
    }

    /// Opens the ticket table with the given status filter.
    pub fn show_tickets(&mut self, filter: StatusFilter) {
        self.status_filter = filter;
        self.navigate(Section::Tickets);
    }

    pub fn open_modal(&mut self, modal: Modal) {
        if let Some(id) = modal.ticket_id() {
            self.selected_ticket = Some(id.to_string());
        }
        self.modal = modal;
    }

    /// Closes the modal; closing an assignment modal also drops the selection.
    pub fn close_modal(&mut self) {
        if self.modal.ticket_id().is_some() {
            self.clear_selection();
        }
        self.modal = Modal::None;
    }

    pub fn select_technician(&mut self, technician_id: &str) {
        self.selected_technician = Some(technician_id.to_string()).filter(|id| !id.is_empty());
    }

    pub fn clear_selection(&mut self) {
        self.selected_ticket = None;
        self.selected_technician = None;
    }

    /// Any filter change sends the user table back to its first page.
    pub fn set_user_filter(&mut self, filter: UserFilter) {
        self.user_filter = filter;
        self.user_page = 1;
    }
}
