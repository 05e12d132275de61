//! Unified error type for the ledger client, pipeline and binary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Ledger error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("{kind} with id {id} not found")]
    EntityNotFound { kind: &'static str, id: i64 },

    #[error("Invalid amount: {amount}")]
    InvalidAmount { amount: String },

    #[error("Invalid time of day: {value}")]
    InvalidTime { value: String },

    #[error("Account {account} does not hold role {role}")]
    Unauthorized { account: String, role: &'static str },

    #[error("A mutation is already being submitted")]
    MutationInProgress,

    #[error("No pending mutation intent")]
    NoIntent,

    #[error("Cannot {action} a {kind} record")]
    UnsupportedAction {
        action: &'static str,
        kind: &'static str,
    },

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    /// Builds an [`Error::EntityNotFound`] for the given entity kind.
    #[must_use]
    pub const fn not_found(kind: &'static str, id: i64) -> Self {
        Self::EntityNotFound { kind, id }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
