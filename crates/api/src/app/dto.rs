use serde::{Deserialize, Serialize};

use staffdir_directory::Employee;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchEmployeesQuery {
    pub designation: Option<String>,
    pub department: Option<String>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn employee_to_json(e: &Employee) -> serde_json::Value {
    serde_json::json!({
        "id": e.id.to_string(),
        "first_name": e.first_name,
        "last_name": e.last_name,
        "email": e.email,
        "gender": e.gender,
        "designation": e.designation,
        "salary": e.salary,
        "date_of_joining": e.date_of_joining.map(|d| d.to_string()),
        "department": e.department,
        "employee_photo": e.employee_photo,
        "created_at": e.created_at.to_rfc3339(),
    })
}
