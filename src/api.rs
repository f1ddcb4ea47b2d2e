//! REST client for the ticketing backend.
//!
//! All calls go through one `reqwest::Client` and a single base URL. Non-2xx
//! answers are turned into `AppError::Api`, keeping the JSON `detail` sent by
//! the backend when there is one.

use std::time::Duration;

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::models::{CurrentUser, Notification, Technician, Ticket, TicketStatus, UnreadCount, User};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const REASSIGN_REASON: &str = "Réassignation par DSI";
pub const REOPEN_REASON: &str = "Réouverture après rejet utilisateur";

// ─── Request bodies ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct AssignBody<'a> {
    technician_id: &'a str,
}

#[derive(Debug, Serialize)]
struct ReasonedAssignBody<'a> {
    technician_id: &'a str,
    reason: &'a str,
}

#[derive(Debug, Serialize)]
struct StatusBody<'a> {
    status: &'a str,
}

// ─── Client ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    /// A blank token is treated as no token at all.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Passes 2xx responses through, maps anything else to `AppError::Api`.
    async fn check(resp: Response) -> AppResult<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let detail = resp
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| body.get("detail").and_then(|d| d.as_str()).map(String::from));
        Err(AppError::Api {
            status: status.as_u16(),
            detail,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let resp = self.authorized(self.http.get(self.url(path))).send().await?;
        Ok(Self::check(resp).await?.json::<T>().await?)
    }

    async fn put<B: Serialize + ?Sized>(&self, path: &str, body: Option<&B>) -> AppResult<()> {
        let mut req = self.authorized(self.http.put(self.url(path)));
        if let Some(body) = body {
            req = req.json(body);
        }
        Self::check(req.send().await?).await?;
        Ok(())
    }

    // ─── Collections ─────────────────────────────────────────────────────

    pub async fn fetch_tickets(&self) -> AppResult<Vec<Ticket>> {
        self.get_json("/tickets/").await
    }

    pub async fn fetch_technicians(&self) -> AppResult<Vec<Technician>> {
        self.get_json("/users/technicians").await
    }

    pub async fn fetch_me(&self) -> AppResult<CurrentUser> {
        self.get_json("/auth/me").await
    }

    /// Full user directory. The backend only answers this for admins.
    pub async fn fetch_users(&self) -> AppResult<Vec<User>> {
        let users: Option<Vec<User>> = self.get_json("/users/").await?;
        Ok(users.unwrap_or_default())
    }

    // ─── Ticket lifecycle ────────────────────────────────────────────────

    pub async fn assign(&self, ticket_id: &str, technician_id: &str) -> AppResult<()> {
        self.put(
            &format!("/tickets/{}/assign", ticket_id),
            Some(&AssignBody { technician_id }),
        )
        .await
    }

    pub async fn reassign(&self, ticket_id: &str, technician_id: &str) -> AppResult<()> {
        self.put(
            &format!("/tickets/{}/reassign", ticket_id),
            Some(&ReasonedAssignBody {
                technician_id,
                reason: REASSIGN_REASON,
            }),
        )
        .await
    }

    pub async fn escalate(&self, ticket_id: &str) -> AppResult<()> {
        self.put::<()>(&format!("/tickets/{}/escalate", ticket_id), None)
            .await
    }

    pub async fn update_status(&self, ticket_id: &str, status: &TicketStatus) -> AppResult<()> {
        self.put(
            &format!("/tickets/{}/status", ticket_id),
            Some(&StatusBody {
                status: status.as_str(),
            }),
        )
        .await
    }

    pub async fn reopen(&self, ticket_id: &str, technician_id: &str) -> AppResult<()> {
        self.put(
            &format!("/tickets/{}/reopen", ticket_id),
            Some(&ReasonedAssignBody {
                technician_id,
                reason: REOPEN_REASON,
            }),
        )
        .await
    }

    // ─── Notifications ───────────────────────────────────────────────────
    //
    // Without a token none of these hit the network.

    pub async fn fetch_notifications(&self) -> AppResult<Vec<Notification>> {
        if !self.has_token() {
            return Ok(Vec::new());
        }
        self.get_json("/notifications/").await
    }

    pub async fn unread_count(&self) -> AppResult<u32> {
        if !self.has_token() {
            return Ok(0);
        }
        let count: UnreadCount = self.get_json("/notifications/unread/count").await?;
        Ok(count.unread_count)
    }

    /// Returns `false` when the call was skipped for lack of a token.
    pub async fn mark_notification_read(&self, notification_id: &str) -> AppResult<bool> {
        if !self.has_token() {
            return Ok(false);
        }
        self.put::<()>(&format!("/notifications/{}/read", notification_id), None)
            .await?;
        Ok(true)
    }
}
