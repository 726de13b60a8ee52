//! Route handlers for the public employee API.
//!
//! Thin layer: validate where needed, call the domain service, translate
//! the outcome into a transport response. All retry and classification
//! behavior lives below the service boundary.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::employees::types::{CreateEmployeeInput, Employee};
use crate::http::response::error_response;
use crate::http::server::AppState;
use crate::upstream::UpstreamError;

/// `GET /api/v1/employee`
pub async fn list_employees(
    State(state): State<AppState>,
) -> Result<Json<Vec<Employee>>, UpstreamError> {
    tracing::info!("GET /api/v1/employee - Fetching all employees");
    let employees = state.service.get_all_employees().await?;
    tracing::info!(count = employees.len(), "Returning employees");
    Ok(Json(employees))
}

/// `GET /api/v1/employee/search/{fragment}`
pub async fn search_employees(
    State(state): State<AppState>,
    Path(fragment): Path<String>,
) -> Result<Json<Vec<Employee>>, UpstreamError> {
    tracing::info!(fragment = %fragment, "GET /api/v1/employee/search - Searching by name");
    let employees = state.service.search_by_name(&fragment).await?;
    tracing::info!(count = employees.len(), "Returning matching employees");
    Ok(Json(employees))
}

/// `GET /api/v1/employee/{id}`
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Employee>, UpstreamError> {
    tracing::info!(id = %id, "GET /api/v1/employee - Fetching employee by ID");
    let employee = state.service.get_employee_by_id(&id).await?;
    Ok(Json(employee))
}

/// `GET /api/v1/employee/highestSalary`
pub async fn highest_salary(
    State(state): State<AppState>,
) -> Result<Json<i64>, UpstreamError> {
    tracing::info!("GET /api/v1/employee/highestSalary - Fetching highest salary");
    let highest = state.service.highest_salary().await?;
    Ok(Json(highest))
}

/// `GET /api/v1/employee/topTenHighestEarningEmployeeNames`
pub async fn top_earner_names(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, UpstreamError> {
    tracing::info!("GET /api/v1/employee/topTenHighestEarningEmployeeNames - Fetching top earners");
    let names = state.service.top_earner_names().await?;
    Ok(Json(names))
}

/// `POST /api/v1/employee`
pub async fn create_employee(
    State(state): State<AppState>,
    Json(input): Json<CreateEmployeeInput>,
) -> Response {
    tracing::info!(name = input.name.as_deref().unwrap_or(""), "POST /api/v1/employee - Creating employee");

    if let Err(errors) = input.validate() {
        let message = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        tracing::warn!(message = %message, "Validation error");
        return error_response(StatusCode::BAD_REQUEST, message);
    }

    match state.service.create_employee(&input).await {
        Ok(employee) => (StatusCode::CREATED, Json(employee)).into_response(),
        Err(err) => err.into_response(),
    }
}

/// `DELETE /api/v1/employee/{id}`
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<String, UpstreamError> {
    tracing::info!(id = %id, "DELETE /api/v1/employee - Deleting employee");
    let name = state.service.delete_employee_by_id(&id).await?;
    Ok(name)
}
