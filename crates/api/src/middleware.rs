use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use staffdir_directory::DirectoryService;

use crate::app::errors;
use crate::context::request_context;

#[derive(Clone)]
pub struct AuthState {
    pub directory: Arc<DirectoryService>,
}

/// Reject unauthenticated requests before routing and hand the admitted
/// [`staffdir_auth::RequestContext`] to handlers via request extensions.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let mut ctx = request_context(req.headers());

    if let Err(e) = state.directory.gate().authorize(&mut ctx) {
        debug!(reason = e.code(), path = %req.uri().path(), "request rejected by credential gate");
        return Err(errors::auth_error_to_response(&e));
    }

    req.extensions_mut().insert(ctx);
    Ok(next.run(req).await)
}
