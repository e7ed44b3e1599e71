/// Shown when the backend answered but refused the credentials.
pub const LOGIN_REJECTED_MESSAGE: &str = "Błąd logowania. Sprawdź dane.";
/// Shown when the login request never got a response.
pub const CONNECTION_MESSAGE: &str = "Brak połączenia z serwerem.";

/// Failures of the budget persistence clients.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server responded with status {status}")]
    Status { status: u16 },

    #[error("invalid budget document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("save task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    /// No response at all: refused, unreachable, timed out.
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("login rejected with status {status}")]
    Rejected { status: u16 },
}

impl LoginError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Connection(_) => CONNECTION_MESSAGE,
            Self::Rejected { .. } => LOGIN_REJECTED_MESSAGE,
        }
    }
}

/// Local validation failures. The message is the text of the alert shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Najpierw dodaj i wybierz okres/miesiąc.")]
    NoPeriodSelected,
}
