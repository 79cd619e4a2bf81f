use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    /// Caller-supplied input is inconsistent or invalid.
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Item not found: {0}")]
    NotFound(i64),

    /// The item was removed between validation and commit.
    #[error("Item {0} was modified concurrently")]
    Conflict(i64),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ItemError {
    /// Only conflicts are safe to retry unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ItemError::Conflict(_))
    }
}

pub type ItemResult<T> = Result<T, ItemError>;

/// Convert ItemError to AppError for standardized error responses
impl From<ItemError> for AppError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::Validation(msg) => AppError::BadRequest(msg),
            ItemError::NotFound(id) => AppError::NotFound(format!("Item {} not found", id)),
            ItemError::Conflict(id) => AppError::Conflict(format!(
                "Item {} was removed while the update was in progress",
                id
            )),
            ItemError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (ItemError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (ItemError::NotFound(1), StatusCode::NOT_FOUND),
            (ItemError::Conflict(1), StatusCode::CONFLICT),
            (ItemError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_only_conflict_is_retryable() {
        assert!(ItemError::Conflict(3).is_retryable());
        assert!(!ItemError::NotFound(3).is_retryable());
        assert!(!ItemError::Validation(String::new()).is_retryable());
        assert!(!ItemError::Internal(String::new()).is_retryable());
    }
}
