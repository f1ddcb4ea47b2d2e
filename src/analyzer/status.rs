use serde::{Deserialize, Serialize};

use crate::models::{Ticket, TicketStatus};

/// Ticket counts per logical status bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPartition {
    pub en_attente: usize,
    pub en_cours: usize,
    pub resolus: usize,
    pub clotures: usize,
    pub rejetes: usize,
    /// Tickets whose status is outside the known set.
    pub autres: usize,
}

impl StatusPartition {
    pub fn total(&self) -> usize {
        self.en_attente + self.en_cours + self.resolus + self.clotures + self.rejetes + self.autres
    }
}

pub fn partition_by_status(tickets: &[Ticket]) -> StatusPartition {
    let mut p = StatusPartition::default();
    for t in tickets {
        match t.status {
            TicketStatus::EnAttenteAnalyse => p.en_attente += 1,
            TicketStatus::AssigneTechnicien | TicketStatus::EnCours => p.en_cours += 1,
            TicketStatus::Resolu => p.resolus += 1,
            TicketStatus::Cloture => p.clotures += 1,
            TicketStatus::Rejete => p.rejetes += 1,
            TicketStatus::Other(_) => p.autres += 1,
        }
    }
    p
}

/// Open = anything neither resolved nor closed.
pub fn count_open(tickets: &[Ticket]) -> usize {
    tickets.iter().filter(|t| !t.status.is_terminated()).count()
}

/// Filter applied to the ticket table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatusFilter {
    #[default]
    All,
    /// `assigne_technicien` or `en_cours`
    EnTraitement,
    Exact(TicketStatus),
}

impl StatusFilter {
    pub fn matches(&self, ticket: &Ticket) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::EnTraitement => ticket.status.is_in_progress(),
            StatusFilter::Exact(s) => &ticket.status == s,
        }
    }
}

impl From<String> for StatusFilter {
    fn from(s: String) -> Self {
        match s.as_str() {
            "all" => StatusFilter::All,
            "en_traitement" => StatusFilter::EnTraitement,
            other => StatusFilter::Exact(TicketStatus::from(other)),
        }
    }
}

impl From<StatusFilter> for String {
    fn from(f: StatusFilter) -> Self {
        match f {
            StatusFilter::All => "all".to_string(),
            StatusFilter::EnTraitement => "en_traitement".to_string(),
            StatusFilter::Exact(s) => s.into(),
        }
    }
}

pub fn filter_tickets<'a>(tickets: &'a [Ticket], filter: &StatusFilter) -> Vec<&'a Ticket> {
    tickets.iter().filter(|t| filter.matches(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::fixtures::ticket;

    fn sample() -> Vec<Ticket> {
        vec![
            ticket("1", "en_attente_analyse"),
            ticket("2", "assigne_technicien"),
            ticket("3", "en_cours"),
            ticket("4", "resolu"),
            ticket("5", "cloture"),
            ticket("6", "cloture"),
            ticket("7", "rejete"),
        ]
    }

    #[test]
    fn test_partition_exclusive_and_exhaustive() {
        let tickets = sample();
        let p = partition_by_status(&tickets);
        assert_eq!(p.en_attente, 1);
        assert_eq!(p.en_cours, 2);
        assert_eq!(p.resolus, 1);
        assert_eq!(p.clotures, 2);
        assert_eq!(p.rejetes, 1);
        assert_eq!(p.autres, 0);
        assert_eq!(p.total(), tickets.len());
    }

    #[test]
    fn test_partition_unknown_status_not_bucketed() {
        let tickets = vec![ticket("1", "archive"), ticket("2", "resolu")];
        let p = partition_by_status(&tickets);
        assert_eq!(p.resolus, 1);
        assert_eq!(p.autres, 1);
        assert_eq!(p.en_attente + p.en_cours + p.resolus + p.clotures + p.rejetes, 1);
    }

    #[test]
    fn test_count_open() {
        // pending, 2 in progress, rejected
        assert_eq!(count_open(&sample()), 4);
        assert_eq!(count_open(&[]), 0);
    }

    #[test]
    fn test_filter_tickets() {
        let tickets = sample();
        assert_eq!(filter_tickets(&tickets, &StatusFilter::All).len(), 7);
        let in_progress = filter_tickets(&tickets, &StatusFilter::EnTraitement);
        assert_eq!(
            in_progress.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
            vec!["2", "3"]
        );
        let closed = filter_tickets(&tickets, &StatusFilter::from("cloture".to_string()));
        assert_eq!(closed.len(), 2);
    }

    #[test]
    fn test_status_filter_round_trip_names() {
        assert_eq!(StatusFilter::from("all".to_string()), StatusFilter::All);
        assert_eq!(String::from(StatusFilter::EnTraitement), "en_traitement");
        assert_eq!(
            StatusFilter::from("rejete".to_string()),
            StatusFilter::Exact(TicketStatus::Rejete)
        );
    }
}
