use chrono::Local;

use crate::analyzer::users::UserPage;
use crate::analyzer::DashboardData;
use crate::error::AppResult;
use crate::models::Ticket;
use crate::state::AppState;

/// Returns the complete dashboard payload over the last loaded tickets.
///
/// Chart windows close on today's local date.
pub fn get_dashboard(state: &AppState) -> AppResult<DashboardData> {
    state.dashboard(Local::now().naive_local())
}

/// Ticket list for the current status filter.
pub fn get_tickets(state: &AppState) -> AppResult<Vec<Ticket>> {
    state.visible_tickets()
}

pub fn get_user_page(state: &AppState) -> AppResult<UserPage> {
    state.user_page()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::fixtures::ticket;
    use crate::analyzer::StatusFilter;
    use crate::analyzer::users::UserFilter;
    use crate::models::{TicketStatus, User};

    #[test]
    fn test_dashboard_over_snapshot() {
        let state = AppState::new(None);
        state
            .replace_tickets(vec![ticket("1", "en_attente_analyse"), ticket("2", "resolu")])
            .unwrap();

        let data = get_dashboard(&state).unwrap();
        assert_eq!(data.meta.total_tickets, 2);
        assert_eq!(data.partition.en_attente, 1);
    }

    #[test]
    fn test_tickets_follow_view_filter() {
        let state = AppState::new(None);
        state
            .replace_tickets(vec![ticket("1", "en_cours"), ticket("2", "cloture")])
            .unwrap();
        state.view().unwrap().show_tickets(StatusFilter::Exact(TicketStatus::Cloture));

        let tickets = get_tickets(&state).unwrap();
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].id, "2");
    }

    #[test]
    fn test_user_page_uses_view_filter() {
        let state = AppState::new(None);
        state.data().unwrap().users = (1..=12)
            .map(|i| User {
                id: Some(format!("u{i}")),
                full_name: Some(format!("Agent {i}")),
                agency: Some((if i % 2 == 0 { "Dakar" } else { "Thiès" }).to_string()),
                ..User::default()
            })
            .collect();

        let page = get_user_page(&state).unwrap();
        assert_eq!(page.total_matching, 12);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.users.len(), 10);

        state.view().unwrap().set_user_filter(UserFilter {
            agency: Some("Dakar".into()),
            ..UserFilter::default()
        });
        let page = get_user_page(&state).unwrap();
        assert_eq!(page.total_matching, 6);
        assert_eq!(page.page, 1);
    }
}
