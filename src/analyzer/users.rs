use serde::{Deserialize, Serialize};

use crate::models::User;

pub const USERS_PER_PAGE: usize = 10;

/// Filters of the user management table. `None` means "all".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilter {
    pub role: Option<String>,
    /// `"actif"` or `"inactif"`
    pub status: Option<String>,
    pub agency: Option<String>,
    pub search: Option<String>,
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        if let Some(role) = &self.role {
            if user.role.as_ref().map(|r| &r.name) != Some(role) {
                return false;
            }
        }
        if let Some(status) = &self.status {
            let wants_active = status == "actif";
            if user.is_active() != wants_active {
                return false;
            }
        }
        if let Some(agency) = &self.agency {
            if user.agency.as_ref() != Some(agency) {
                return false;
            }
        }
        if let Some(query) = self.search.as_deref().filter(|q| !q.is_empty()) {
            let query = query.to_lowercase();
            let hit = |field: &Option<String>| {
                field
                    .as_deref()
                    .map_or(false, |v| v.to_lowercase().contains(&query))
            };
            if !hit(&user.full_name) && !hit(&user.email) {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPage {
    pub users: Vec<User>,
    pub page: usize,
    pub total_pages: usize,
    pub total_matching: usize,
    pub roles: Vec<String>,
    pub agencies: Vec<String>,
}

/// Distinct non-empty values in first-seen order.
fn distinct<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for v in values.flatten().filter(|v| !v.is_empty()) {
        if !out.iter().any(|o| o.as_str() == v) {
            out.push(v.to_string());
        }
    }
    out
}

/// Applies the filter and returns page `page` (1-based) of 10 users.
pub fn paginate_users(users: &[User], filter: &UserFilter, page: usize) -> UserPage {
    let matching: Vec<&User> = users.iter().filter(|u| filter.matches(u)).collect();
    let total_pages = matching.len().div_ceil(USERS_PER_PAGE);
    let page = page.max(1);
    let start = (page - 1).saturating_mul(USERS_PER_PAGE);

    UserPage {
        users: matching
            .iter()
            .skip(start)
            .take(USERS_PER_PAGE)
            .map(|u| (*u).clone())
            .collect(),
        page,
        total_pages,
        total_matching: matching.len(),
        roles: distinct(users.iter().map(|u| u.role.as_ref().map(|r| r.name.as_str()))),
        agencies: distinct(users.iter().map(|u| u.agency.as_deref())),
    }
}
