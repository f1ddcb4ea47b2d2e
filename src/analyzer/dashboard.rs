//! Dashboard DSI: assembles every aggregate of the ticket collection into one payload.

use std::time::Instant;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::breakdown::{
    agency_rollup, priority_distribution, technician_report, type_breakdown, AgencyCount,
    PriorityCount, TechnicianPerformance, TypeCount,
};
use super::metrics::{build_performance_report, compute_metrics, MetricsSnapshot, PerformanceReport};
use super::recurring::{frequent_keywords, recurring_problems, FrequentKeyword, RecurringProblem};
use super::status::{partition_by_status, StatusPartition};
use super::temporal::{
    hourly_histogram, satisfaction_trend, status_evolution, volume_series, weekday_histogram,
    DailySatisfaction, DailyStatus, DailyVolume, HourlyCount, WeekdayCount, SHORT_WINDOW_DAYS,
    VOLUME_WINDOW_DAYS,
};
use crate::models::{Technician, Ticket};

// ─── Data Structures ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub meta: DashboardMeta,
    pub metrics: MetricsSnapshot,
    pub partition: StatusPartition,
    pub charts: DashboardCharts,
    pub problems: ProblemAnalysis,
    pub reports: DashboardReports,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMeta {
    pub total_tickets: usize,
    pub total_technicians: usize,
    /// Tickets without a usable creation timestamp (absent from every time series).
    pub undated_tickets: usize,
    pub generated_at: String,
    pub calcul_duration_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCharts {
    pub volume_30_jours: Vec<DailyVolume>,
    pub evolution_statuts: Vec<DailyStatus>,
    pub satisfaction_7_jours: Vec<DailySatisfaction>,
    pub par_priorite: Vec<PriorityCount>,
    pub par_jour_semaine: Vec<WeekdayCount>,
    pub par_heure: Vec<HourlyCount>,
    pub par_agence: Vec<AgencyCount>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemAnalysis {
    pub recurrents: Vec<RecurringProblem>,
    pub mots_frequents: Vec<FrequentKeyword>,
    pub par_type: Vec<TypeCount>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReports {
    pub performance: PerformanceReport,
    pub techniciens: Vec<TechnicianPerformance>,
}

// ─── Builder ─────────────────────────────────────────────────────────────────

/// Builds the complete dashboard from an in-memory snapshot.
///
/// # Arguments
/// * `tickets` - Current ticket collection
/// * `technicians` - Technician list, used by the per-technician report
/// * `now` - Local wall-clock time; its date closes every chart window
pub fn build_dashboard(
    tickets: &[Ticket],
    technicians: &[Technician],
    now: NaiveDateTime,
) -> DashboardData {
    let start = Instant::now();
    let today = now.date();

    let charts = DashboardCharts {
        volume_30_jours: volume_series(tickets, today, VOLUME_WINDOW_DAYS),
        evolution_statuts: status_evolution(tickets, today, SHORT_WINDOW_DAYS),
        satisfaction_7_jours: satisfaction_trend(tickets, today, SHORT_WINDOW_DAYS),
        par_priorite: priority_distribution(tickets),
        par_jour_semaine: weekday_histogram(tickets),
        par_heure: hourly_histogram(tickets),
        par_agence: agency_rollup(tickets),
    };

    let problems = ProblemAnalysis {
        recurrents: recurring_problems(tickets),
        mots_frequents: frequent_keywords(tickets),
        par_type: type_breakdown(tickets),
    };

    let reports = DashboardReports {
        performance: build_performance_report(tickets, now),
        techniciens: technician_report(tickets, technicians),
    };

    let meta = DashboardMeta {
        total_tickets: tickets.len(),
        total_technicians: technicians.len(),
        undated_tickets: tickets.iter().filter(|t| t.created_local().is_none()).count(),
        generated_at: now.format("%Y-%m-%dT%H:%M:%S").to_string(),
        calcul_duration_ms: start.elapsed().as_millis() as u64,
    };

    DashboardData {
        meta,
        metrics: compute_metrics(tickets, now),
        partition: partition_by_status(tickets),
        charts,
        problems,
        reports,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
