use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{
    default_priorities, default_recent_reports, default_ticket_types, Appearance, PriorityLevel,
    RecentReport, SecuritySettings, Theme, TicketType,
};
use crate::error::AppResult;

pub const KEY_APP_NAME: &str = "appName";
pub const KEY_APP_THEME: &str = "appTheme";
pub const KEY_PRIMARY_COLOR: &str = "primaryColor";
pub const KEY_APP_LOGO: &str = "appLogo";
pub const KEY_TICKET_TYPES: &str = "ticketTypes";
pub const KEY_PRIORITIES: &str = "priorities";
pub const KEY_SECURITY: &str = "securitySettings";
pub const KEY_RECENT_REPORTS: &str = "recentReports";

/// Key/value store of JSON-encoded preferences.
///
/// Implementors only provide raw access; typed accessors are built on top and
/// fall back to defaults for missing or unreadable values.
pub trait SettingsRepository {
    fn get_raw(&self, key: &str) -> AppResult<Option<String>>;
    fn put_raw(&self, key: &str, value: &str) -> AppResult<()>;
    fn remove(&self, key: &str) -> AppResult<()>;

    fn load_or<T, F>(&self, key: &str, default: F) -> AppResult<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        match self.get_raw(key)? {
            None => Ok(default()),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(value) => Ok(value),
                Err(e) => {
                    log::warn!("Paramètre '{}' illisible, valeur par défaut utilisée: {}", key, e);
                    Ok(default())
                }
            },
        }
    }

    fn store<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> AppResult<()> {
        self.put_raw(key, &serde_json::to_string(value)?)
    }

    // ─── Appearance ──────────────────────────────────────────────────────

    fn load_appearance(&self) -> AppResult<Appearance> {
        let defaults = Appearance::default();
        Ok(Appearance {
            app_name: self.load_or(KEY_APP_NAME, || defaults.app_name.clone())?,
            app_theme: self.load_or(KEY_APP_THEME, Theme::default)?,
            primary_color: self.load_or(KEY_PRIMARY_COLOR, || defaults.primary_color.clone())?,
            app_logo: self.load_or(KEY_APP_LOGO, || None)?,
        })
    }

    /// A `None` logo removes the stored one.
    fn save_appearance(&self, appearance: &Appearance) -> AppResult<()> {
        self.store(KEY_APP_NAME, &appearance.app_name)?;
        self.store(KEY_APP_THEME, &appearance.app_theme)?;
        self.store(KEY_PRIMARY_COLOR, &appearance.primary_color)?;
        match &appearance.app_logo {
            Some(logo) => self.store(KEY_APP_LOGO, logo),
            None => self.remove(KEY_APP_LOGO),
        }
    }

    // ─── Catalogues ──────────────────────────────────────────────────────

    fn load_ticket_types(&self) -> AppResult<Vec<TicketType>> {
        self.load_or(KEY_TICKET_TYPES, default_ticket_types)
    }

    fn save_ticket_types(&self, types: &[TicketType]) -> AppResult<()> {
        self.store(KEY_TICKET_TYPES, types)
    }

    fn load_priorities(&self) -> AppResult<Vec<PriorityLevel>> {
        self.load_or(KEY_PRIORITIES, default_priorities)
    }

    fn save_priorities(&self, priorities: &[PriorityLevel]) -> AppResult<()> {
        self.store(KEY_PRIORITIES, priorities)
    }

    // ─── Security & reports ──────────────────────────────────────────────

    fn load_security(&self) -> AppResult<SecuritySettings> {
        self.load_or(KEY_SECURITY, SecuritySettings::default)
    }

    fn save_security(&self, settings: &SecuritySettings) -> AppResult<()> {
        self.store(KEY_SECURITY, settings)
    }

    fn load_recent_reports(&self) -> AppResult<Vec<RecentReport>> {
        self.load_or(KEY_RECENT_REPORTS, default_recent_reports)
    }

    fn save_recent_reports(&self, reports: &[RecentReport]) -> AppResult<()> {
        self.store(KEY_RECENT_REPORTS, reports)
    }
}

// ─── SQLite ──────────────────────────────────────────────────────────────────

pub struct SqliteSettings<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteSettings<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl SettingsRepository for SqliteSettings<'_> {
    fn get_raw(&self, key: &str) -> AppResult<Option<String>> {
        let value = self
            .conn
            .prepare_cached("SELECT value FROM settings WHERE key = ?1")?
            .query_row(params![key], |row| row.get::<_, String>(0))
            .optional()?;
        Ok(value)
    }

    fn put_raw(&self, key: &str, value: &str) -> AppResult<()> {
        self.conn
            .prepare_cached(
                "INSERT OR REPLACE INTO settings (key, value, updated_at) VALUES (?1, ?2, datetime('now'))",
            )?
            .execute(params![key, value])?;
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.conn
            .prepare_cached("DELETE FROM settings WHERE key = ?1")?
            .execute(params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::setup::init_in_memory;

    #[test]
    fn test_defaults_when_empty() {
        let conn = init_in_memory().unwrap();
        let repo = SqliteSettings::new(&conn);
        assert_eq!(repo.load_appearance().unwrap(), Appearance::default());
        assert_eq!(repo.load_ticket_types().unwrap().len(), 5);
        assert_eq!(repo.load_priorities().unwrap().len(), 4);
        assert_eq!(repo.load_security().unwrap(), SecuritySettings::default());
        assert_eq!(repo.load_recent_reports().unwrap().len(), 3);
    }

    #[test]
    fn test_appearance_round_trip_and_logo_removal() {
        let conn = init_in_memory().unwrap();
        let repo = SqliteSettings::new(&conn);
        let appearance = Appearance {
            app_name: "Helpdesk DSI".into(),
            app_theme: Theme::Sombre,
            primary_color: "#28a745".into(),
            app_logo: Some("data:image/png;base64,AAAA".into()),
        };
        repo.save_appearance(&appearance).unwrap();
        assert_eq!(repo.load_appearance().unwrap(), appearance);

        let without_logo = Appearance {
            app_logo: None,
            ..appearance
        };
        repo.save_appearance(&without_logo).unwrap();
        assert_eq!(repo.get_raw(KEY_APP_LOGO).unwrap(), None);
        assert_eq!(repo.load_appearance().unwrap().app_logo, None);
    }

    #[test]
    fn test_unreadable_value_falls_back_to_default() {
        let conn = init_in_memory().unwrap();
        let repo = SqliteSettings::new(&conn);
        repo.put_raw(KEY_TICKET_TYPES, "{pas du json").unwrap();
        repo.put_raw(KEY_APP_THEME, "\"fluo\"").unwrap();
        assert_eq!(repo.load_ticket_types().unwrap(), default_ticket_types());
        assert_eq!(repo.load_appearance().unwrap().app_theme, Theme::Clair);
    }

    #[test]
    fn test_partial_security_is_merged() {
        let conn = init_in_memory().unwrap();
        let repo = SqliteSettings::new(&conn);
        repo.put_raw(KEY_SECURITY, r#"{"keepLogsFor": 30}"#).unwrap();
        let security = repo.load_security().unwrap();
        assert_eq!(security.keep_logs_for, 30);
        assert!(security.mfa_required);
    }

    #[test]
    fn test_save_overwrites_previous_value() {
        let conn = init_in_memory().unwrap();
        let repo = SqliteSettings::new(&conn);
        let mut types = repo.load_ticket_types().unwrap();
        types.truncate(2);
        repo.save_ticket_types(&types).unwrap();
        repo.save_ticket_types(&types[..1]).unwrap();
        assert_eq!(repo.load_ticket_types().unwrap().len(), 1);
        let rows: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM settings WHERE key = ?1",
                params![KEY_TICKET_TYPES],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(rows, 1);
    }
}
