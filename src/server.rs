//! Web server for the calculation API and history.
//!
//! Handlers are thin: they normalize form labels, range-check the numeric
//! inputs, run the engine pipeline and hand the finished values to the
//! store. Optionally serves a frontend from a static directory.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;

use crate::domain::{ActivityLevel, CalculationInput, Gender, Goal};
use crate::energy::{calculate_bmr, calculate_target_calories, calculate_tdee};
use crate::macros::{MacroBreakdown, MacroGuidance, calculate_macros, guidance_for};
use crate::session;
use crate::store::{CalculationRecord, NewCalculation, Store};

/// Shared application state.
pub struct AppState {
    pub store: Store,
}

// === JSON Request/Response Types ===

#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    pub gender: String,
    pub age: u32,
    /// Bodyweight in kilograms.
    pub weight: f64,
    /// Height in centimeters.
    pub height: f64,
    #[serde(default)]
    pub activity: String,
    #[serde(default)]
    pub goal: String,
}

#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    pub id: i64,
    pub gender: String,
    pub age: u32,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub activity: String,
    pub activity_name: String,
    pub goal: String,
    pub goal_name: String,
    pub bmr: f64,
    pub tdee: f64,
    pub target_calories: f64,
    pub macros: MacroBreakdown,
    pub guidance: MacroGuidance,
}

#[derive(Serialize)]
pub struct OptionEntry {
    pub id: &'static str,
    pub name: &'static str,
}

#[derive(Serialize)]
pub struct OptionsResponse {
    pub activities: Vec<OptionEntry>,
    pub goals: Vec<OptionEntry>,
}

// === Router Setup ===

/// Creates the application router.
pub fn create_router(state: Arc<AppState>, static_dir: Option<PathBuf>) -> Router {
    let router = Router::new()
        .route("/api/calculate", post(calculate))
        .route("/api/options", get(get_options))
        .route("/api/history", get(get_history))
        .route("/api/history/{id}", delete(delete_history_entry));

    let router = match static_dir {
        Some(dir) => router
            .fallback_service(ServeDir::new(dir).append_index_html_on_directories(true)),
        None => router,
    };

    router.with_state(state)
}

/// Runs the web server.
pub async fn run_server(
    state: Arc<AppState>,
    port: u16,
    static_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let app = create_router(state, static_dir);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    println!("Server running at http://localhost:{}", port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// === API Handlers ===

/// POST /api/calculate - Run the engine pipeline and persist the result.
async fn calculate(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<CalculateRequest>,
) -> Result<(CookieJar, Json<CalculateResponse>), StatusCode> {
    if !req.weight.is_finite() || req.weight <= 0.0 || !req.height.is_finite() || req.height <= 0.0
    {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }

    let input = CalculationInput {
        gender: Gender::from_label(&req.gender),
        age: req.age,
        weight_kg: req.weight,
        height_cm: req.height,
        activity: ActivityLevel::from_label(&req.activity),
        goal: Goal::from_label(&req.goal),
    };

    let bmr = calculate_bmr(input.gender, input.weight_kg, input.height_cm, input.age);
    let tdee = calculate_tdee(bmr, input.activity);
    let target_calories = calculate_target_calories(tdee, input.goal);
    let macros = calculate_macros(target_calories, input.goal, input.weight_kg).map_err(|e| {
        log::warn!("Rejected degenerate calculation: {}", e);
        StatusCode::UNPROCESSABLE_ENTITY
    })?;

    let (jar, identity) = session::ensure_identity(jar);

    let id = state
        .store
        .save(
            &identity,
            &NewCalculation {
                input: &input,
                bmr,
                tdee,
                target_calories,
                macros: &macros,
            },
        )
        .await
        .map_err(|e| {
            log::error!("Failed to save calculation: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let response = CalculateResponse {
        id,
        gender: input.gender.as_label().to_string(),
        age: input.age,
        weight_kg: input.weight_kg,
        height_cm: input.height_cm,
        activity: input.activity.as_label().to_string(),
        activity_name: input.activity.display_name().to_string(),
        goal: input.goal.as_label().to_string(),
        goal_name: input.goal.display_name().to_string(),
        bmr,
        tdee,
        target_calories,
        macros,
        guidance: guidance_for(input.goal),
    };

    Ok((jar, Json(response)))
}

/// GET /api/history - Records for the current identity, newest first.
async fn get_history(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Vec<CalculationRecord>>), StatusCode> {
    let (jar, identity) = session::ensure_identity(jar);

    let records = state.store.history(&identity).await.map_err(|e| {
        log::error!("Failed to load history: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok((jar, Json(records)))
}

/// DELETE /api/history/:id - Remove one record owned by the caller.
async fn delete_history_entry(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> StatusCode {
    let (_, identity) = session::ensure_identity(jar);

    match state.store.delete(&identity, id).await {
        Ok(true) => StatusCode::NO_CONTENT,
        Ok(false) => StatusCode::NOT_FOUND,
        Err(e) => {
            log::error!("Failed to delete record {}: {}", id, e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// GET /api/options - Activity level and goal catalog for form rendering.
async fn get_options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        activities: ActivityLevel::all()
            .iter()
            .map(|level| OptionEntry {
                id: level.as_label(),
                name: level.display_name(),
            })
            .collect(),
        goals: Goal::all()
            .iter()
            .map(|goal| OptionEntry {
                id: goal.as_label(),
                name: goal.display_name(),
            })
            .collect(),
    })
}
