//! Local preferences: appearance, ticket-type and priority catalogues,
//! security policy and the list of recent reports.
//!
//! Optional fields carry `#[serde(default)]` so a partially stored value is
//! completed from the defaults below instead of being thrown away.

pub mod catalogue;
pub mod logo;
pub mod repository;

pub use repository::{SettingsRepository, SqliteSettings};

use serde::{Deserialize, Serialize};

// ─── Appearance ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Clair,
    Sombre,
    Auto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appearance {
    pub app_name: String,
    pub app_theme: Theme,
    pub primary_color: String,
    /// `data:image/...;base64,` URL.
    pub app_logo: Option<String>,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            app_name: "Système de Gestion des Tickets".to_string(),
            app_theme: Theme::Clair,
            primary_color: "#007bff".to_string(),
            app_logo: None,
        }
    }
}

// ─── Catalogues ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketType {
    pub id: u32,
    #[serde(rename = "type")]
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: String,
}

pub fn default_ticket_types() -> Vec<TicketType> {
    [
        (1, "Matériel", "Problèmes matériels", "#dc3545"),
        (2, "Applicatif", "Problèmes logiciels", "#28a745"),
        (3, "Réseau", "Problèmes réseau", "#ffc107"),
        (4, "Accès", "Problèmes d'accès", "#9c27b0"),
        (5, "Autre", "Autres problèmes", "#6c757d"),
    ]
    .into_iter()
    .map(|(id, label, description, color)| TicketType {
        id,
        label: label.to_string(),
        description: description.to_string(),
        color: color.to_string(),
    })
    .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityLevel {
    pub id: u32,
    #[serde(rename = "priority")]
    pub label: String,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub color: String,
    /// Display form of the maximum handling time, e.g. `"4 heures"`.
    #[serde(default)]
    pub max_time: String,
    #[serde(default)]
    pub max_time_value: u32,
    #[serde(default)]
    pub max_time_unit: String,
}

pub fn default_priorities() -> Vec<PriorityLevel> {
    [
        (1, "Critique", "#dc3545", 1, "heure"),
        (2, "Haute", "#ff9800", 4, "heures"),
        (3, "Moyenne", "#ffc107", 1, "jour"),
        (4, "Basse", "#28a745", 3, "jours"),
    ]
    .into_iter()
    .map(|(id, label, color, value, unit)| PriorityLevel {
        id,
        label: label.to_string(),
        level: id,
        color: color.to_string(),
        max_time: format!("{} {}", value, unit),
        max_time_value: value,
        max_time_unit: unit.to_string(),
    })
    .collect()
}

// ─── Security ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecuritySettings {
    // Authentification
    pub mfa_required: bool,
    /// Minutes.
    pub session_timeout: u32,
    pub connection_history: bool,
    pub suspicious_connection_alerts: bool,
    // Mot de passe
    pub min_password_length: u32,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_numbers: bool,
    pub require_special_chars: bool,
    /// Days.
    pub password_expiration: u32,
    // Audit
    pub record_all_actions: bool,
    pub record_sensitive_data_changes: bool,
    pub record_failed_logins: bool,
    /// Days.
    pub keep_logs_for: u32,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            mfa_required: true,
            session_timeout: 30,
            connection_history: true,
            suspicious_connection_alerts: true,
            min_password_length: 8,
            require_uppercase: true,
            require_lowercase: true,
            require_numbers: true,
            require_special_chars: true,
            password_expiration: 90,
            record_all_actions: true,
            record_sensitive_data_changes: true,
            record_failed_logins: true,
            keep_logs_for: 90,
        }
    }
}

// ─── Reports ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentReport {
    pub id: u32,
    pub report: String,
    #[serde(default)]
    pub generated_by: String,
    /// `dd/mm/yyyy`
    #[serde(default)]
    pub date: String,
}

pub fn default_recent_reports() -> Vec<RecentReport> {
    [
        (1, "Performance Janvier 2024", "Admin", "01/02/2024"),
        (2, "Tickets par Département", "DSI", "31/01/2024"),
        (3, "Satisfaction Utilisateurs", "Admin", "30/01/2024"),
    ]
    .into_iter()
    .map(|(id, report, by, date)| RecentReport {
        id,
        report: report.to_string(),
        generated_by: by.to_string(),
        date: date.to_string(),
    })
    .collect()
}

// ─── Colours ─────────────────────────────────────────────────────────────────

const COLOR_NAMES: &[(&str, &str)] = &[
    ("#007bff", "Bleu"),
    ("#28a745", "Vert"),
    ("#dc3545", "Rouge"),
    ("#ffc107", "Jaune"),
    ("#6c757d", "Gris"),
    ("#17a2b8", "Cyan"),
    ("#ff9800", "Orange"),
    ("#9c27b0", "Violet"),
];

/// French name of a palette colour, `"Personnalisé"` for anything else.
pub fn color_name(hex: &str) -> &'static str {
    COLOR_NAMES
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(hex.trim()))
        .map_or("Personnalisé", |(_, name)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_name() {
        assert_eq!(color_name("#007bff"), "Bleu");
        assert_eq!(color_name("#9C27B0"), "Violet");
        assert_eq!(color_name("#123456"), "Personnalisé");
    }

    #[test]
    fn test_default_priorities_max_time() {
        let p = default_priorities();
        assert_eq!(p.len(), 4);
        assert_eq!(p[0].max_time, "1 heure");
        assert_eq!(p[1].max_time, "4 heures");
        assert_eq!(p[3].label, "Basse");
        assert_eq!(p[3].level, 4);
    }

    #[test]
    fn test_security_partial_json_merges_defaults() {
        let s: SecuritySettings =
            serde_json::from_str(r#"{"sessionTimeout": 15, "mfaRequired": false}"#).unwrap();
        assert_eq!(s.session_timeout, 15);
        assert!(!s.mfa_required);
        assert_eq!(s.min_password_length, 8);
        assert_eq!(s.keep_logs_for, 90);
    }

    #[test]
    fn test_catalogue_wire_names() {
        let json = serde_json::to_value(&default_ticket_types()[0]).unwrap();
        assert_eq!(json["type"], "Matériel");
        let json = serde_json::to_value(&default_priorities()[0]).unwrap();
        assert_eq!(json["priority"], "Critique");
        assert_eq!(json["maxTimeValue"], 1);
        let json = serde_json::to_value(&default_recent_reports()[1]).unwrap();
        assert_eq!(json["generatedBy"], "DSI");
    }
}
