use crate::state::AppState;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
};
use serde_json::json;

/// Root handler — returns an HTML landing page with project info and links
pub async fn root_handler() -> impl IntoResponse {
    Html(r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0"/>
  <title>Timeclock Payroll API</title>
  <style>
    * { box-sizing: border-box; margin: 0; padding: 0; }
    body { font-family: 'Segoe UI', system-ui, sans-serif; background: #0f172a; color: #e2e8f0; min-height: 100vh; padding: 40px 20px; }
    .container { max-width: 860px; margin: 0 auto; }
    header { text-align: center; margin-bottom: 48px; }
    header h1 { font-size: 2.8rem; font-weight: 800; background: linear-gradient(135deg, #3b82f6, #8b5cf6); -webkit-background-clip: text; -webkit-text-fill-color: transparent; margin-bottom: 8px; }
    header p { color: #94a3b8; font-size: 1.1rem; }
    .badge { display: inline-block; background: #1e293b; border: 1px solid #334155; color: #38bdf8; padding: 4px 12px; border-radius: 20px; font-size: 0.8rem; margin-top: 12px; }
    .routes { background: #1e293b; border: 1px solid #334155; border-radius: 12px; padding: 24px; }
    .routes h2 { font-size: 1.2rem; font-weight: 700; color: #f1f5f9; margin-bottom: 16px; }
    .route-item { display: flex; align-items: flex-start; gap: 12px; padding: 8px 0; border-bottom: 1px solid #0f172a; }
    .route-item:last-child { border-bottom: none; }
    .method { font-size: 0.7rem; font-weight: 700; padding: 2px 8px; border-radius: 4px; min-width: 52px; text-align: center; font-family: monospace; }
    .get { background: #064e3b; color: #34d399; }
    .post { background: #1e3a5f; color: #60a5fa; }
    .patch, .put { background: #451a03; color: #fb923c; }
    .route-path { font-family: monospace; font-size: 0.85rem; color: #e2e8f0; flex: 1; }
    .route-desc { font-size: 0.8rem; color: #64748b; }
    footer { text-align: center; margin-top: 40px; color: #475569; font-size: 0.85rem; }
  </style>
</head>
<body>
<div class="container">
  <header>
    <h1>⏱ Timeclock Payroll API</h1>
    <p>Attendance classification and weekly payroll, Monday to Saturday</p>
    <span class="badge">v1.0.0 · REST API · JSON</span>
  </header>

  <div class="routes">
    <h2>Key Endpoints</h2>
    <div class="route-item"><span class="method post">POST</span><span class="route-path">/api/v1/attendance/scan</span><span class="route-desc">Time-in / time-out scan</span></div>
    <div class="route-item"><span class="method get">GET</span><span class="route-path">/api/v1/attendance</span><span class="route-desc">Attendance records</span></div>
    <div class="route-item"><span class="method post">POST</span><span class="route-path">/api/v1/cash-advances</span><span class="route-desc">Request an advance</span></div>
    <div class="route-item"><span class="method post">POST</span><span class="route-path">/api/v1/payroll/run</span><span class="route-desc">Assemble a closed pay period</span></div>
    <div class="route-item"><span class="method patch">PATCH</span><span class="route-path">/api/v1/payroll/{id}/status</span><span class="route-desc">Advance the status machine</span></div>
    <div class="route-item"><span class="method get">GET</span><span class="route-path">/docs</span><span class="route-desc">Swagger UI</span></div>
  </div>

  <footer>Rate cards, lunch-break arithmetic and the 09:30 cutoff live in one engine. See /docs for the full surface.</footer>
</div>
</body>
</html>"#)
}

/// Liveness/readiness probe: verifies the database connection.
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "database": "connected" })),
        ),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "degraded", "database": "unreachable" })),
        ),
    }
}
