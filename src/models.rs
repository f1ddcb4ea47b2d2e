use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ─── Closed enumerations ─────────────────────────────────────────────────────

/// Ticket lifecycle status as sent by the backend.
///
/// Unknown values are kept in `Other` so that one odd record never makes the
/// whole collection unreadable; they never land in a known bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TicketStatus {
    EnAttenteAnalyse,
    AssigneTechnicien,
    EnCours,
    Resolu,
    Cloture,
    Rejete,
    Other(String),
}

impl TicketStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TicketStatus::EnAttenteAnalyse => "en_attente_analyse",
            TicketStatus::AssigneTechnicien => "assigne_technicien",
            TicketStatus::EnCours => "en_cours",
            TicketStatus::Resolu => "resolu",
            TicketStatus::Cloture => "cloture",
            TicketStatus::Rejete => "rejete",
            TicketStatus::Other(s) => s,
        }
    }

    /// `assigne_technicien` and `en_cours` share one "in progress" bucket.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, TicketStatus::AssigneTechnicien | TicketStatus::EnCours)
    }

    /// Resolved or closed.
    pub fn is_terminated(&self) -> bool {
        matches!(self, TicketStatus::Resolu | TicketStatus::Cloture)
    }
}

impl From<&str> for TicketStatus {
    fn from(s: &str) -> Self {
        match s {
            "en_attente_analyse" => TicketStatus::EnAttenteAnalyse,
            "assigne_technicien" => TicketStatus::AssigneTechnicien,
            "en_cours" => TicketStatus::EnCours,
            "resolu" => TicketStatus::Resolu,
            "cloture" => TicketStatus::Cloture,
            "rejete" => TicketStatus::Rejete,
            other => TicketStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for TicketStatus {
    fn from(s: String) -> Self {
        TicketStatus::from(s.as_str())
    }
}

impl From<TicketStatus> for String {
    fn from(status: TicketStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    Critique,
    Haute,
    Moyenne,
    Faible,
    Other(String),
}

impl Priority {
    /// Display order used by the priority chart.
    pub const KNOWN: [Priority; 4] = [
        Priority::Critique,
        Priority::Haute,
        Priority::Moyenne,
        Priority::Faible,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Priority::Critique => "critique",
            Priority::Haute => "haute",
            Priority::Moyenne => "moyenne",
            Priority::Faible => "faible",
            Priority::Other(s) => s,
        }
    }

    pub fn label(&self) -> String {
        capitalize(self.as_str())
    }
}

impl From<&str> for Priority {
    fn from(s: &str) -> Self {
        match s {
            "critique" => Priority::Critique,
            "haute" => Priority::Haute,
            "moyenne" => Priority::Moyenne,
            "faible" => Priority::Faible,
            other => Priority::Other(other.to_string()),
        }
    }
}

impl From<String> for Priority {
    fn from(s: String) -> Self {
        Priority::from(s.as_str())
    }
}

impl From<Priority> for String {
    fn from(p: Priority) -> Self {
        p.as_str().to_string()
    }
}

// ─── Backend records ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Creator {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub agency: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TechnicianRef {
    #[serde(default)]
    pub full_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    #[serde(default)]
    pub number: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub creator_id: Option<String>,
    #[serde(default)]
    pub creator: Option<Creator>,
    #[serde(default)]
    pub user_agency: Option<String>,
    pub priority: Priority,
    pub status: TicketStatus,
    #[serde(default, rename = "type")]
    pub ticket_type: Option<String>,
    #[serde(default)]
    pub technician_id: Option<String>,
    #[serde(default)]
    pub technician: Option<TechnicianRef>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub feedback_score: Option<f64>,
}

impl Ticket {
    /// Creator's agency, else the ticket's own `user_agency`. Empty strings count as absent.
    pub fn effective_agency(&self) -> Option<&str> {
        self.creator
            .as_ref()
            .and_then(|c| c.agency.as_deref())
            .filter(|a| !a.is_empty())
            .or_else(|| self.user_agency.as_deref().filter(|a| !a.is_empty()))
    }

    /// Creation timestamp on the local wall clock.
    pub fn created_local(&self) -> Option<NaiveDateTime> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Technician {
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
}

/// Profile returned by `/auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub agency: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

impl CurrentUser {
    pub fn role_name(&self) -> Option<&str> {
        self.role.as_ref().map(|r| r.name.as_str())
    }

    pub fn is_admin(&self) -> bool {
        self.role_name() == Some("Admin")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub agency: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl User {
    /// Missing `is_active` means active.
    pub fn is_active(&self) -> bool {
        self.is_active != Some(false)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub ticket_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnreadCount {
    #[serde(default)]
    pub unread_count: u32,
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Parses a backend timestamp into local wall-clock time.
///
/// Offsets (RFC 3339) are converted to the local zone; naive timestamps are
/// taken as already local.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Uppercases the first character.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
