use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate, Timelike};
use serde::Serialize;

use super::stats::{moyenne, round1};
use crate::models::{Ticket, TicketStatus};

/// Window of the created/resolved volume chart.
pub const VOLUME_WINDOW_DAYS: u32 = 30;
/// Window of the status evolution and satisfaction trend charts.
pub const SHORT_WINDOW_DAYS: u32 = 7;

const WEEKDAY_LABELS: [&str; 7] = ["Lun", "Mar", "Mer", "Jeu", "Ven", "Sam", "Dim"];

// ─── Data Structures ─────────────────────────────────────────────────────────

/// One calendar day of a chart window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayKey {
    pub date: NaiveDate,
    /// ISO date, `YYYY-MM-DD`
    pub key: String,
    /// `dd/mm`
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyVolume {
    pub date: String,
    pub label: String,
    pub crees: usize,
    pub resolus: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStatus {
    pub date: String,
    pub label: String,
    pub en_attente: usize,
    pub en_cours: usize,
    pub resolus: usize,
    pub clotures: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySatisfaction {
    pub date: String,
    pub label: String,
    pub satisfaction: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayCount {
    pub jour: String,
    pub tickets: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyCount {
    pub heure: String,
    pub tickets: usize,
}

// ─── Windows ─────────────────────────────────────────────────────────────────

/// The `days` calendar days ending with `today`, oldest first.
pub fn window_days(today: NaiveDate, days: u32) -> Vec<DayKey> {
    (0..days as i64)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            DayKey {
                date,
                key: date.format("%Y-%m-%d").to_string(),
                label: format!("{:02}/{:02}", date.day(), date.month()),
            }
        })
        .collect()
}

/// Groups tickets by local creation date. Tickets without a usable timestamp are left out.
fn by_creation_date<'a>(
    tickets: impl IntoIterator<Item = &'a Ticket>,
) -> HashMap<NaiveDate, Vec<&'a Ticket>> {
    let mut map: HashMap<NaiveDate, Vec<&Ticket>> = HashMap::new();
    for t in tickets {
        if let Some(created) = t.created_local() {
            map.entry(created.date()).or_default().push(t);
        }
    }
    map
}

// ─── Series ──────────────────────────────────────────────────────────────────

/// Tickets created per day, and how many of those are now resolved or closed.
pub fn volume_series(tickets: &[Ticket], today: NaiveDate, days: u32) -> Vec<DailyVolume> {
    let grouped = by_creation_date(tickets);
    window_days(today, days)
        .into_iter()
        .map(|day| {
            let day_tickets = grouped.get(&day.date).map(Vec::as_slice).unwrap_or(&[]);
            DailyVolume {
                crees: day_tickets.len(),
                resolus: day_tickets.iter().filter(|t| t.status.is_terminated()).count(),
                date: day.key,
                label: day.label,
            }
        })
        .collect()
}

/// Current status of the tickets created on each day.
pub fn status_evolution(tickets: &[Ticket], today: NaiveDate, days: u32) -> Vec<DailyStatus> {
    let grouped = by_creation_date(tickets);
    window_days(today, days)
        .into_iter()
        .map(|day| {
            let day_tickets = grouped.get(&day.date).map(Vec::as_slice).unwrap_or(&[]);
            let count = |pred: fn(&TicketStatus) -> bool| {
                day_tickets.iter().filter(|t| pred(&t.status)).count()
            };
            DailyStatus {
                en_attente: count(|s| *s == TicketStatus::EnAttenteAnalyse),
                en_cours: count(TicketStatus::is_in_progress),
                resolus: count(|s| *s == TicketStatus::Resolu),
                clotures: count(|s| *s == TicketStatus::Cloture),
                date: day.key,
                label: day.label,
            }
        })
        .collect()
}

/// Average feedback of the scored tickets created each day.
///
/// Empty when no ticket carries a score at all; days without scores are 0.
pub fn satisfaction_trend(
    tickets: &[Ticket],
    today: NaiveDate,
    days: u32,
) -> Vec<DailySatisfaction> {
    let scored = || tickets.iter().filter(|t| t.feedback_score.is_some());
    if scored().next().is_none() {
        return Vec::new();
    }

    let grouped = by_creation_date(scored());
    window_days(today, days)
        .into_iter()
        .map(|day| {
            let scores: Vec<f64> = grouped
                .get(&day.date)
                .map(|ts| ts.iter().filter_map(|t| t.feedback_score).collect())
                .unwrap_or_default();
            DailySatisfaction {
                satisfaction: round1(moyenne(&scores)),
                date: day.key,
                label: day.label,
            }
        })
        .collect()
}

/// Tickets per day of week, Monday first.
pub fn weekday_histogram(tickets: &[Ticket]) -> Vec<WeekdayCount> {
    let mut counts = [0usize; 7];
    for created in tickets.iter().filter_map(Ticket::created_local) {
        counts[created.weekday().num_days_from_monday() as usize] += 1;
    }
    WEEKDAY_LABELS
        .iter()
        .zip(counts)
        .map(|(jour, tickets)| WeekdayCount {
            jour: jour.to_string(),
            tickets,
        })
        .collect()
}

/// Tickets per hour of creation, 0h to 23h.
pub fn hourly_histogram(tickets: &[Ticket]) -> Vec<HourlyCount> {
    let mut counts = [0usize; 24];
    for created in tickets.iter().filter_map(Ticket::created_local) {
        counts[created.hour() as usize] += 1;
    }
    counts
        .iter()
        .enumerate()
        .map(|(h, &tickets)| HourlyCount {
            heure: format!("{}h", h),
            tickets,
        })
        .collect()
}
