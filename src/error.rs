use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: i64 },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl PlanError {
    pub fn validation(message: impl Into<String>) -> Self {
        PlanError::Validation(message.into())
    }

    pub fn to_error_code(&self) -> &'static str {
        match self {
            PlanError::Store(_) => "STORE_ERROR",
            PlanError::Validation(_) => "VALIDATION_ERROR",
            PlanError::NotFound { .. } => "NOT_FOUND",
            _ => "INTERNAL_ERROR",
        }
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            code: self.to_error_code().to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            PlanError::validation("name is required").to_error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            PlanError::NotFound {
                kind: "Epic",
                id: 7
            }
            .to_error_code(),
            "NOT_FOUND"
        );
        assert_eq!(
            PlanError::Store(sqlx::Error::PoolClosed).to_error_code(),
            "STORE_ERROR"
        );
    }

    #[test]
    fn test_error_response_message() {
        let response = PlanError::NotFound { kind: "Task", id: 42 }.to_error_response();
        assert_eq!(response.error, "Task not found: 42");
        assert_eq!(response.code, "NOT_FOUND");
    }
}
