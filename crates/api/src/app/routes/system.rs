use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use staffdir_auth::RequestContext;
use staffdir_directory::DirectoryService;

use crate::app::errors;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(
    Extension(directory): Extension<Arc<DirectoryService>>,
    Extension(mut ctx): Extension<RequestContext>,
) -> axum::response::Response {
    match directory.whoami(&mut ctx) {
        Ok(claims) => Json(serde_json::json!({
            "principal_id": claims.sub.as_str(),
            "issued_at": claims.issued_at().map(|t| t.to_rfc3339()),
            "expires_at": claims.expires_at().map(|t| t.to_rfc3339()),
        }))
        .into_response(),
        Err(e) => errors::directory_error_to_response(e),
    }
}
