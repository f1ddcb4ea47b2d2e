use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erreur d'entrée/sortie: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erreur SQLite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Erreur de sérialisation: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Erreur réseau: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Erreur API ({status}): {}", .detail.as_deref().unwrap_or("sans détail"))]
    Api { status: u16, detail: Option<String> },

    #[error("{0}")]
    Validation(String),

    #[error("Base de données non initialisée")]
    DbNotInitialized,

    #[error("{0}")]
    Custom(String),
}

impl AppError {
    /// `detail` field sent back by the backend, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            AppError::Api { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_only_on_api_errors() {
        let refused = AppError::Api {
            status: 409,
            detail: Some("Ticket déjà clôturé".into()),
        };
        assert_eq!(refused.detail(), Some("Ticket déjà clôturé"));
        assert_eq!(refused.to_string(), "Erreur API (409): Ticket déjà clôturé");

        let bare = AppError::Api { status: 500, detail: None };
        assert_eq!(bare.detail(), None);
        assert_eq!(AppError::Validation("x".into()).detail(), None);
    }
}
