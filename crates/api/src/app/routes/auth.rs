use std::sync::Arc;

use axum::{
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use staffdir_directory::{DirectoryError, DirectoryService};

use crate::app::{dto, errors};

/// Public identity-establishing endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
}

pub async fn signup(
    Extension(directory): Extension<Arc<DirectoryService>>,
    body: Result<Json<dto::SignupRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::rejection_to_response(rejection.body_text()),
    };
    // bcrypt is CPU-bound; keep it off the async workers.
    let res = tokio::task::spawn_blocking(move || {
        directory.signup(&body.username, &body.email, &body.password)
    })
    .await;

    token_response(StatusCode::CREATED, res)
}

pub async fn login(
    Extension(directory): Extension<Arc<DirectoryService>>,
    body: Result<Json<dto::LoginRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::rejection_to_response(rejection.body_text()),
    };
    let res = tokio::task::spawn_blocking(move || directory.login(&body.email, &body.password)).await;

    token_response(StatusCode::OK, res)
}

fn token_response(
    status: StatusCode,
    res: Result<Result<String, DirectoryError>, tokio::task::JoinError>,
) -> axum::response::Response {
    match res {
        Ok(Ok(token)) => (status, Json(dto::TokenResponse { token })).into_response(),
        Ok(Err(e)) => errors::directory_error_to_response(e),
        Err(e) => {
            tracing::error!(error = %e, "credential task failed");
            errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "internal error")
        }
    }
}
