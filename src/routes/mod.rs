// src/routes/mod.rs

use crate::{
    handlers::{
        advances::{decide_advance, list_advances, request_advance},
        attendance::{auto_close, list_attendance, scan},
        employees::{create_employee, get_employee, list_employees, set_rate_card},
        payroll::{get_payroll, list_payroll, run_payroll, transition_payroll},
    },
    state::AppState,
};
use axum::{
    Router,
    routing::{get, patch, post, put},
};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // ─── Employees ────────────────────────────────────────
        .route("/employees", post(create_employee).get(list_employees))
        .route("/employees/{employee_id}", get(get_employee))
        .route("/employees/{employee_id}/rate-card", put(set_rate_card))
        .route("/employees/{employee_id}/cash-advances", get(list_advances))
        // ─── Attendance ───────────────────────────────────────
        .route("/attendance/scan", post(scan))
        .route("/attendance/auto-close", post(auto_close))
        .route("/attendance", get(list_attendance))
        // ─── Cash Advances ────────────────────────────────────
        .route("/cash-advances", post(request_advance))
        .route("/cash-advances/{advance_id}", patch(decide_advance))
        // ─── Payroll ──────────────────────────────────────────
        .route("/payroll/run", post(run_payroll))
        .route("/payroll", get(list_payroll))
        .route("/payroll/{payroll_id}", get(get_payroll))
        .route("/payroll/{payroll_id}/status", patch(transition_payroll))
}
