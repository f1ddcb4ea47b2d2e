use chrono::NaiveDateTime;
use serde::Serialize;

use super::stats::{elapsed_days, format_one_decimal, moyenne};
use super::status::count_open;
use crate::models::{Priority, Ticket, TicketStatus};

/// Headline figures shown at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub open_tickets: usize,
    pub avg_resolution_days: i64,
    /// "<n> jours"
    pub avg_resolution_time: String,
    /// One decimal, "0" when no ticket is scored.
    pub avg_satisfaction: String,
    /// "<x>/5"
    pub user_satisfaction: String,
}

/// Average age in days of resolved/closed tickets, rounded to the nearest integer.
///
/// The age runs from creation to `now`: no resolution timestamp is available
/// on the ticket records.
pub fn avg_resolution_days(tickets: &[Ticket], now: NaiveDateTime) -> i64 {
    let days: Vec<f64> = tickets
        .iter()
        .filter(|t| t.status.is_terminated())
        .filter_map(|t| t.created_local())
        .map(|created| elapsed_days(created, now) as f64)
        .collect();
    if days.is_empty() {
        return 0;
    }
    moyenne(&days).round() as i64
}

/// Scores of every ticket that carries one.
pub fn feedback_scores(tickets: &[Ticket]) -> Vec<f64> {
    tickets.iter().filter_map(|t| t.feedback_score).collect()
}

/// Mean feedback score with one decimal, or "0".
pub fn avg_satisfaction(tickets: &[Ticket]) -> String {
    format_one_decimal(&feedback_scores(tickets))
}

pub fn compute_metrics(tickets: &[Ticket], now: NaiveDateTime) -> MetricsSnapshot {
    let days = avg_resolution_days(tickets, now);
    let satisfaction = avg_satisfaction(tickets);
    MetricsSnapshot {
        open_tickets: count_open(tickets),
        avg_resolution_days: days,
        avg_resolution_time: format!("{} jours", days),
        user_satisfaction: format!("{}/5", satisfaction),
        avg_satisfaction: satisfaction,
    }
}

// ─── Performance report ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    pub avg_resolution_time: String,
    pub user_satisfaction: String,
    /// Critical tickets still pending or in progress.
    pub escalated_tickets: usize,
}

/// "0 jours", "1 jour", "12 jours".
pub fn resolution_display(days: i64) -> String {
    match days {
        0 => "0 jours".to_string(),
        d if d > 1 => format!("{} jours", d),
        d => format!("{} jour", d),
    }
}

pub fn build_performance_report(tickets: &[Ticket], now: NaiveDateTime) -> PerformanceReport {
    let escalated_tickets = tickets
        .iter()
        .filter(|t| t.priority == Priority::Critique)
        .filter(|t| t.status.is_in_progress() || t.status == TicketStatus::EnAttenteAnalyse)
        .count();

    PerformanceReport {
        avg_resolution_time: resolution_display(avg_resolution_days(tickets, now)),
        user_satisfaction: format!("{}/5", avg_satisfaction(tickets)),
        escalated_tickets,
    }
}
