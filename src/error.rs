use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Domain error for every route. All variants are recoverable at the
/// route level; only `Internal` maps to a 5xx.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0} already taken")]
    Duplicate(&'static str),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("forbidden")]
    Forbidden,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid or expired token")]
    InvalidOrExpiredToken,
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error("{0}")]
    Validation(&'static str),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Duplicate(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::InvalidCredentials
            | AppError::InvalidOrExpiredToken
            | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Internal(e) => {
                error!(error = %e, "internal error");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Which unique constraint tripped. Postgres names them
/// users_username_key / users_email_key.
fn duplicate_field(source: &str) -> &'static str {
    if source.contains("username") {
        "username"
    } else if source.contains("email") {
        "email"
    } else {
        "value"
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            if db.is_unique_violation() {
                let source = db.constraint().unwrap_or_else(|| db.message());
                return AppError::Duplicate(duplicate_field(source));
            }
        }
        AppError::Internal(e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_maps_to_its_status() {
        assert_eq!(AppError::Duplicate("email").status(), StatusCode::CONFLICT);
        assert_eq!(AppError::NotFound("post").status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::InvalidOrExpiredToken.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Unauthorized("missing Authorization header").status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Validation("invalid email").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn messages_stay_generic_where_it_matters() {
        // Login failure must not distinguish bad email from bad password.
        assert_eq!(
            AppError::InvalidCredentials.to_string(),
            "invalid credentials"
        );
        // Reset failure collapses malformed/expired/bad-signature into one.
        assert_eq!(
            AppError::InvalidOrExpiredToken.to_string(),
            "invalid or expired token"
        );
    }

    #[test]
    fn duplicate_field_resolves_constraint_names() {
        assert_eq!(duplicate_field("users_username_key"), "username");
        assert_eq!(duplicate_field("users_email_key"), "email");
        assert_eq!(duplicate_field("something_else"), "value");
    }

    #[test]
    fn non_database_sqlx_error_becomes_internal() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
