use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use staffdir_auth::AuthError;
use staffdir_core::DomainError;
use staffdir_directory::DirectoryError;

pub fn directory_error_to_response(err: DirectoryError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        DirectoryError::Auth(e) => auth_error_to_response(&e),
        DirectoryError::UserNotFound => json_error(StatusCode::UNAUTHORIZED, "user_not_found", message),
        DirectoryError::IncorrectPassword => {
            json_error(StatusCode::UNAUTHORIZED, "incorrect_password", message)
        }
        DirectoryError::EmailTaken => json_error(StatusCode::CONFLICT, "email_taken", message),
        DirectoryError::Domain(e) => domain_error_to_response(e),
        DirectoryError::Password(_) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "password_error", message)
        }
    }
}

/// Gate rejections keep their message verbatim.
pub fn auth_error_to_response(err: &AuthError) -> axum::response::Response {
    let status = match err {
        AuthError::MalformedRequest => StatusCode::BAD_REQUEST,
        AuthError::MissingCredential(_) | AuthError::InvalidOrExpiredCredential => {
            StatusCode::UNAUTHORIZED
        }
        AuthError::Configuration(_) | AuthError::InvalidPrincipal => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    json_error(status, err.code(), err.to_string())
}

fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
    }
}

/// Extractor rejections (bad JSON body, bad query string) are validation failures.
pub fn rejection_to_response(rejection: impl std::fmt::Display) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "validation_error", rejection.to_string())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
