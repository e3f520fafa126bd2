//! Calorie estimation API routes

use crate::error::ApiResult;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use calorie_calc_shared::{ConstantsResponse, EstimateRequest, EstimateResponse};

/// Create estimation routes
pub fn estimate_routes() -> Router<AppState> {
    Router::new()
        .route("/estimate", post(estimate))
        .route("/estimate/constants", get(get_constants))
}

/// POST /api/v1/estimate - Estimate daily calories and macros
///
/// Weight, height and goal weight change are read in the request's unit
/// system (metric by default). Missing macro parameters fall back to the
/// configured defaults. Bodies that are not a valid request are reported
/// with the same error envelope as engine errors.
async fn estimate(
    State(state): State<AppState>,
    payload: Result<Json<EstimateRequest>, JsonRejection>,
) -> ApiResult<Json<EstimateResponse>> {
    let Json(req) = payload?;
    let response = state.estimation().estimate(&req)?;
    Ok(Json(response))
}

/// GET /api/v1/estimate/constants - Active multiplier table, constants and
/// the macro defaults used when a request leaves them out
async fn get_constants(State(state): State<AppState>) -> Json<ConstantsResponse> {
    let service = state.estimation();
    Json(ConstantsResponse {
        constants: service.constants().clone(),
        defaults: *service.defaults(),
    })
}
