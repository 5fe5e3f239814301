// src/handlers/employees.rs

use crate::{
    errors::{AppError, AppResult},
    models::{CreateEmployeeRequest, Employee, EmployeeRateCard, SetRateCardRequest},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Register an employee.
#[utoipa::path(
    post,
    path = "/api/v1/employees",
    request_body = CreateEmployeeRequest,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 409, description = "Employee ID already taken"),
    ),
    tag = "Employees"
)]
pub async fn create_employee(
    State(state): State<AppState>,
    Json(body): Json<CreateEmployeeRequest>,
) -> AppResult<(StatusCode, Json<Employee>)> {
    if body.employee_id.trim().is_empty() {
        return Err(AppError::Validation("employee_id must not be empty".to_string()));
    }

    let employee = sqlx::query_as::<_, Employee>(
        "INSERT INTO employees (id, employee_id, first_name, last_name)
         VALUES ($1, $2, $3, $4)
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(body.employee_id.trim())
    .bind(&body.first_name)
    .bind(&body.last_name)
    .fetch_one(&state.db)
    .await
    .map_err(|err| match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict(format!("Employee ID {} already exists", body.employee_id))
        }
        _ => AppError::Database(err),
    })?;

    Ok((StatusCode::CREATED, Json(employee)))
}

/// List active employees.
#[utoipa::path(
    get,
    path = "/api/v1/employees",
    responses((status = 200, description = "Employees", body = Vec<Employee>)),
    tag = "Employees"
)]
pub async fn list_employees(State(state): State<AppState>) -> AppResult<Json<Vec<Employee>>> {
    let employees = sqlx::query_as::<_, Employee>(
        "SELECT * FROM employees WHERE is_active = TRUE ORDER BY employee_id",
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(employees))
}

/// Fetch one employee by business ID.
#[utoipa::path(
    get,
    path = "/api/v1/employees/{employee_id}",
    params(("employee_id" = String, Path, description = "Business employee ID")),
    responses(
        (status = 200, description = "Employee", body = Employee),
        (status = 404, description = "Unknown employee"),
    ),
    tag = "Employees"
)]
pub async fn get_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> AppResult<Json<Employee>> {
    let employee = sqlx::query_as::<_, Employee>(
        "SELECT * FROM employees WHERE employee_id = $1",
    )
    .bind(&employee_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::EmployeeNotFound(employee_id))?;

    Ok(Json(employee))
}

/// Set the rate card taking effect today. Until one exists, completed days
/// are recorded attendance-only with zero pay.
#[utoipa::path(
    put,
    path = "/api/v1/employees/{employee_id}/rate-card",
    params(("employee_id" = String, Path, description = "Business employee ID")),
    request_body = SetRateCardRequest,
    responses(
        (status = 200, description = "Rate card saved", body = EmployeeRateCard),
        (status = 404, description = "Unknown employee"),
    ),
    tag = "Employees"
)]
pub async fn set_rate_card(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Json(body): Json<SetRateCardRequest>,
) -> AppResult<Json<EmployeeRateCard>> {
    if body.daily_rate <= Decimal::ZERO || body.overtime_rate <= Decimal::ZERO {
        return Err(AppError::Validation(
            "Daily and overtime rates must be positive".to_string(),
        ));
    }

    let exists: Option<(Uuid,)> = sqlx::query_as(
        "SELECT id FROM employees WHERE employee_id = $1 AND is_active = TRUE",
    )
    .bind(&employee_id)
    .fetch_optional(&state.db)
    .await?;
    if exists.is_none() {
        return Err(AppError::EmployeeNotFound(employee_id));
    }

    let today = state.clock.local_date(Utc::now());

    let card = sqlx::query_as::<_, EmployeeRateCard>(
        "INSERT INTO rate_cards (employee_id, daily_rate, overtime_rate, effective_from)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (employee_id, effective_from) DO UPDATE
         SET daily_rate = EXCLUDED.daily_rate,
             overtime_rate = EXCLUDED.overtime_rate
         RETURNING *",
    )
    .bind(&employee_id)
    .bind(body.daily_rate)
    .bind(body.overtime_rate)
    .bind(today)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(card))
}
