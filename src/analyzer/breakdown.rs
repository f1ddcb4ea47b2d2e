use std::collections::HashMap;

use serde::Serialize;

use crate::models::{capitalize, Priority, Technician, Ticket};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgencyCount {
    pub agence: String,
    pub tickets: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityCount {
    pub priorite: String,
    pub nombre: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCount {
    pub application: String,
    pub tickets: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianPerformance {
    pub technician_id: String,
    pub technicien: String,
    /// Resolved or closed tickets.
    pub tickets_traites: usize,
    /// Tickets assigned or in progress.
    pub charge_actuelle: usize,
}

/// Counts keys in first-seen order, then sorts by descending count.
/// The sort is stable, so ties keep their first-seen order.
fn count_sorted<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut order: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for key in keys {
        match index.get(key) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(key, order.len());
                order.push((key, 1));
            }
        }
    }
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order
}

/// Tickets per effective agency, biggest first. Tickets without agency are skipped.
pub fn agency_rollup(tickets: &[Ticket]) -> Vec<AgencyCount> {
    count_sorted(tickets.iter().filter_map(Ticket::effective_agency))
        .into_iter()
        .map(|(agence, tickets)| AgencyCount {
            agence: agence.to_string(),
            tickets,
        })
        .collect()
}

/// Tickets per known priority, in severity order.
pub fn priority_distribution(tickets: &[Ticket]) -> Vec<PriorityCount> {
    Priority::KNOWN
        .iter()
        .map(|p| PriorityCount {
            priorite: p.label(),
            nombre: tickets.iter().filter(|t| &t.priority == p).count(),
        })
        .collect()
}

fn type_label(code: &str) -> String {
    match code {
        "materiel" => "Matériel".to_string(),
        "applicatif" => "Applicatif".to_string(),
        other => capitalize(other),
    }
}

/// Tickets per type, biggest first. Missing type counts as `autre`.
pub fn type_breakdown(tickets: &[Ticket]) -> Vec<TypeCount> {
    count_sorted(
        tickets
            .iter()
            .map(|t| t.ticket_type.as_deref().filter(|s| !s.is_empty()).unwrap_or("autre")),
    )
    .into_iter()
    .map(|(code, tickets)| TypeCount {
        application: type_label(code),
        tickets,
    })
    .collect()
}

/// Treated tickets and current load of each technician, in list order.
pub fn technician_report(
    tickets: &[Ticket],
    technicians: &[Technician],
) -> Vec<TechnicianPerformance> {
    technicians
        .iter()
        .map(|tech| {
            let assigned = tickets
                .iter()
                .filter(|t| t.technician_id.as_deref() == Some(tech.id.as_str()));
            let (mut traites, mut charge) = (0, 0);
            for t in assigned {
                if t.status.is_terminated() {
                    traites += 1;
                } else if t.status.is_in_progress() {
                    charge += 1;
                }
            }
            TechnicianPerformance {
                technician_id: tech.id.clone(),
                technicien: tech.full_name.clone(),
                tickets_traites: traites,
                charge_actuelle: charge,
            }
        })
        .collect()
}
