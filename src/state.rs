use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDateTime;
use rusqlite::Connection;
use serde::Serialize;

use crate::analyzer::users::{paginate_users, UserPage};
use crate::analyzer::{build_dashboard, filter_tickets, DashboardData};
use crate::error::{AppError, AppResult};
use crate::models::{CurrentUser, Notification, Technician, Ticket, User};
use crate::view::ViewState;

/// Last-known copy of everything loaded from the backend.
///
/// Every field is replaced wholesale on refresh, never patched.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub tickets: Vec<Ticket>,
    pub technicians: Vec<Technician>,
    pub current_user: Option<CurrentUser>,
    pub users: Vec<User>,
    pub notifications: Vec<Notification>,
    pub unread_count: u32,
}

pub struct AppState {
    pub db: Mutex<Option<Connection>>,
    pub data: Mutex<Snapshot>,
    pub view: Mutex<ViewState>,
}

fn lock<T>(m: &Mutex<T>) -> AppResult<MutexGuard<'_, T>> {
    m.lock()
        .map_err(|e| AppError::Custom(format!("Mutex poisoned: {}", e)))
}

impl AppState {
    pub fn new(db: Option<Connection>) -> Self {
        Self {
            db: Mutex::new(db),
            data: Mutex::new(Snapshot::default()),
            view: Mutex::new(ViewState::default()),
        }
    }

    pub fn data(&self) -> AppResult<MutexGuard<'_, Snapshot>> {
        lock(&self.data)
    }

    pub fn view(&self) -> AppResult<MutexGuard<'_, ViewState>> {
        lock(&self.view)
    }

    pub fn set_loading(&self, loading: bool) -> AppResult<()> {
        self.view()?.loading = loading;
        Ok(())
    }

    pub fn replace_tickets(&self, tickets: Vec<Ticket>) -> AppResult<()> {
        self.data()?.tickets = tickets;
        Ok(())
    }

    /// Dashboard payload over the current snapshot.
    pub fn dashboard(&self, now: NaiveDateTime) -> AppResult<DashboardData> {
        let data = self.data()?;
        Ok(build_dashboard(&data.tickets, &data.technicians, now))
    }

    /// Tickets matching the current status filter, in collection order.
    pub fn visible_tickets(&self) -> AppResult<Vec<Ticket>> {
        let filter = self.view()?.status_filter.clone();
        let data = self.data()?;
        Ok(filter_tickets(&data.tickets, &filter)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Current page of the user table.
    pub fn user_page(&self) -> AppResult<UserPage> {
        let (filter, page) = {
            let view = self.view()?;
            (view.user_filter.clone(), view.user_page)
        };
        let data = self.data()?;
        Ok(paginate_users(&data.users, &filter, page))
    }
}

pub trait DbAccess {
    fn db<F, T>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&Connection) -> AppResult<T>;
}

impl DbAccess for AppState {
    fn db<F, T>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&Connection) -> AppResult<T>,
    {
        let guard = lock(&self.db)?;
        let conn = guard.as_ref().ok_or(AppError::DbNotInitialized)?;
        f(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::fixtures::{dt, ticket};
    use crate::analyzer::StatusFilter;

    #[test]
    fn test_db_not_initialized() {
        let state = AppState::new(None);
        let err = state.db(|_| Ok(())).unwrap_err();
        assert!(matches!(err, AppError::DbNotInitialized));
    }

    #[test]
    fn test_db_access_runs_closure() {
        let state = AppState::new(Some(Connection::open_in_memory().unwrap()));
        let one: i64 = state
            .db(|conn| Ok(conn.query_row("SELECT 1", [], |r| r.get(0))?))
            .unwrap();
        assert_eq!(one, 1);
    }

    #[test]
    fn test_visible_tickets_follow_filter() {
        let state = AppState::new(None);
        state
            .replace_tickets(vec![
                ticket("1", "en_cours"),
                ticket("2", "assigne_technicien"),
                ticket("3", "resolu"),
            ])
            .unwrap();
        state.view().unwrap().status_filter = StatusFilter::EnTraitement;
        let ids: Vec<String> = state
            .visible_tickets()
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_dashboard_over_snapshot() {
        let state = AppState::new(None);
        state
            .replace_tickets(vec![ticket("1", "en_cours"), ticket("2", "cloture")])
            .unwrap();
        let data = state.dashboard(dt("2025-06-15 12:00:00")).unwrap();
        assert_eq!(data.meta.total_tickets, 2);
        assert_eq!(data.metrics.open_tickets, 1);
    }
}
