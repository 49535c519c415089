use std::sync::Arc;

use axum::{
    extract::{
        Extension, Path, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use staffdir_auth::RequestContext;
use staffdir_core::EmployeeId;
use staffdir_directory::{DirectoryService, EmployeePatch, NewEmployee};

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_employees).post(add_employee))
        .route("/search", get(search_employees))
        .route(
            "/:id",
            get(get_employee).patch(update_employee).delete(delete_employee),
        )
}

pub async fn list_employees(
    Extension(directory): Extension<Arc<DirectoryService>>,
    Extension(mut ctx): Extension<RequestContext>,
) -> axum::response::Response {
    match directory.get_employees(&mut ctx) {
        Ok(items) => {
            let items = items.iter().map(dto::employee_to_json).collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::directory_error_to_response(e),
    }
}

pub async fn search_employees(
    Extension(directory): Extension<Arc<DirectoryService>>,
    Extension(mut ctx): Extension<RequestContext>,
    query: Result<Query<dto::SearchEmployeesQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(q) = match query {
        Ok(query) => query,
        Err(rejection) => return errors::rejection_to_response(rejection.body_text()),
    };
    match directory.search_by_designation_or_department(
        &mut ctx,
        q.designation.as_deref(),
        q.department.as_deref(),
    ) {
        Ok(items) => {
            let items = items.iter().map(dto::employee_to_json).collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::directory_error_to_response(e),
    }
}

pub async fn add_employee(
    Extension(directory): Extension<Arc<DirectoryService>>,
    Extension(mut ctx): Extension<RequestContext>,
    body: Result<Json<NewEmployee>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::rejection_to_response(rejection.body_text()),
    };
    match directory.add_employee(&mut ctx, body) {
        Ok(e) => (StatusCode::CREATED, Json(dto::employee_to_json(&e))).into_response(),
        Err(e) => errors::directory_error_to_response(e),
    }
}

pub async fn get_employee(
    Extension(directory): Extension<Arc<DirectoryService>>,
    Extension(mut ctx): Extension<RequestContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    found_or_404(directory.search_employee(&mut ctx, &id))
}

pub async fn update_employee(
    Extension(directory): Extension<Arc<DirectoryService>>,
    Extension(mut ctx): Extension<RequestContext>,
    Path(id): Path<String>,
    body: Result<Json<EmployeePatch>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::rejection_to_response(rejection.body_text()),
    };
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    found_or_404(directory.update_employee(&mut ctx, &id, body))
}

pub async fn delete_employee(
    Extension(directory): Extension<Arc<DirectoryService>>,
    Extension(mut ctx): Extension<RequestContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    found_or_404(directory.delete_employee(&mut ctx, &id))
}

fn parse_id(id: &str) -> Result<EmployeeId, axum::response::Response> {
    id.parse()
        .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid employee id"))
}

fn found_or_404(
    res: Result<Option<staffdir_directory::Employee>, staffdir_directory::DirectoryError>,
) -> axum::response::Response {
    match res {
        Ok(Some(e)) => (StatusCode::OK, Json(dto::employee_to_json(&e))).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "employee not found"),
        Err(e) => errors::directory_error_to_response(e),
    }
}
