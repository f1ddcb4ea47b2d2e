pub mod dashboard;
pub mod notifications;
pub mod settings;
pub mod tickets;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// User-facing outcome of a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        let notice = Self {
            level,
            message: message.into(),
        };
        match level {
            NoticeLevel::Success => log::info!("{}", notice.message),
            NoticeLevel::Warning => log::warn!("{}", notice.message),
            NoticeLevel::Error => log::error!("{}", notice.message),
        }
        notice
    }
}
