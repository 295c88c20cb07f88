use thiserror::Error;

#[derive(Debug, Error)]
pub enum MockError {
    #[error(
        "Database name, user, and password must be set as environment variables (missing: {missing})"
    )]
    MissingCredentials { missing: String },

    #[error("DB_PORT must be a valid port number, got {0:?}")]
    InvalidPort(String),

    #[error("Database connection failed: {0}")]
    Connection(#[source] postgres::Error),

    #[error("Unknown target column {0:?}: no mock value is generated for it")]
    UnknownColumn(String),

    #[error("Unsupported SQL type {sql_type:?} for column {column:?}")]
    InvalidColumnType { column: String, sql_type: String },

    #[error("Identifier must not be empty")]
    EmptyIdentifier,
}
