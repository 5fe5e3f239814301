// src/errors.rs

use crate::engine::{AdvanceRejection, EngineError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[allow(dead_code)]
#[derive(Debug, Error)]
pub enum AppError {
    // Database errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Employee not found: {0}")]
    EmployeeNotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    // Business rejections — normal outcomes, reported as 4xx, never faults
    #[error("Attendance already completed for today; both scans are recorded")]
    AlreadyCompleted,

    #[error("Cash advance rejected: {0}")]
    AdvanceRejected(AdvanceRejection),

    #[error("No rate card configured for employee {0}")]
    RateCardMissing(String),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) | AppError::EmployeeNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) | AppError::AlreadyCompleted => StatusCode::CONFLICT,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::AdvanceRejected(_) | AppError::RateCardMissing(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Engine(e) => match e {
                EngineError::InvalidInterval { .. } | EngineError::PeriodNotMonday { .. } => {
                    StatusCode::BAD_REQUEST
                }
                EngineError::InvalidTransition { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            },
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Advance rejections carry structured context (current vs. required
        // earnings and days) alongside the human-readable message.
        let body = match &self {
            AppError::AdvanceRejected(rejection) => json!({
                "error": {
                    "code": status.as_u16(),
                    "message": self.to_string(),
                    "rejection": rejection,
                }
            }),
            _ => json!({
                "error": {
                    "code": status.as_u16(),
                    "message": self.to_string(),
                }
            }),
        };
        (status, Json(body)).into_response()
    }
}

// Convenience alias
pub type AppResult<T> = Result<T, AppError>;
