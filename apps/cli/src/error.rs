//! # CLI Error Type
//!
//! Every failure a command can hit ends up as an [`AppError`]: a stable
//! machine-readable code, a message for the terminal and a process exit
//! status.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ValidationError ─┐                                                     │
//! │  CoreError ───────┼──► AppError { code, message } ──┬──► stderr text    │
//! │  DbError ─────────┤                                 ├──► JSON (--json)  │
//! │  ConfigError ─────┘                                 └──► exit status    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! | Code               | Exit |
//! |--------------------|------|
//! | `VALIDATION_ERROR` | 2    |
//! | `NOT_FOUND`        | 3    |
//! | `CONFLICT`         | 4    |
//! | `DATABASE_ERROR`   | 5    |
//! | `CONFIG_ERROR`     | 6    |
//! | `INTERNAL`         | 1    |

use serde::Serialize;

use crate::config::ConfigError;
use costwise_core::{CoreError, ValidationError};
use costwise_db::DbError;

/// Error reported by a CLI command.
#[derive(Debug, Clone, Serialize)]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input rejected before anything was computed or written.
    ValidationError,
    /// A referenced item, line or lookup entry does not exist.
    NotFound,
    /// A unique name is already taken.
    Conflict,
    DatabaseError,
    ConfigError,
    Internal,
}

impl ErrorCode {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorCode::Internal => 1,
            ErrorCode::ValidationError => 2,
            ErrorCode::NotFound => 3,
            ErrorCode::Conflict => 4,
            ErrorCode::DatabaseError => 5,
            ErrorCode::ConfigError => 6,
        }
    }
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }

    pub fn exit_code(&self) -> i32 {
        self.code.exit_code()
    }
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => AppError::not_found(&entity, id),
            DbError::UniqueViolation { field, value } => {
                // SQLite reports "table.column"
                let column = field.rsplit('.').next().unwrap_or(&field);
                AppError::new(
                    ErrorCode::Conflict,
                    format!("{} '{}' already exists", column, value),
                )
            }
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                AppError::validation("Invalid reference")
            }
            DbError::ConnectionFailed(e) => AppError::new(
                ErrorCode::DatabaseError,
                format!("Database connection failed: {}", e),
            ),
            DbError::MigrationFailed(e) => AppError::new(
                ErrorCode::DatabaseError,
                format!("Database migration failed: {}", e),
            ),
            DbError::PoolExhausted => {
                AppError::new(ErrorCode::DatabaseError, "Database is busy, try again")
            }
            DbError::QueryFailed(e) | DbError::Internal(e) => {
                tracing::error!("Database operation failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ItemNotFound(id) => AppError::not_found("Item", id),
            other => AppError::validation(other.to_string()),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::internal(format!("JSON encoding failed: {}", err))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors() {
        let err = AppError::from(CoreError::ItemNotFound(12));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Item not found: 12");
        assert_eq!(err.exit_code(), 3);

        let err = AppError::from(CoreError::EmptyPortfolio);
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_unique_violation_names_the_column() {
        let err = AppError::from(DbError::duplicate("categories.name", "Kitchen"));
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.message, "name 'Kitchen' already exists");
    }

    #[test]
    fn test_internal_details_are_not_shown() {
        let err = AppError::from(DbError::QueryFailed("near \"SELEC\": syntax error".into()));
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "Database operation failed");
    }

    #[test]
    fn test_json_shape() {
        let err = AppError::not_found("BOM line", 4);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "BOM line not found: 4");
    }
}
