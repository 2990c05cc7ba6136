//! Unit catalog routes
//!
//! - `GET /api/v1/units` - List units by name
//! - `POST /api/v1/units` - Add a unit (idempotent by name)

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use super::{commands::CreateUnitCommand, queries::ListUnitsQuery};
use crate::api::response::ApiResponse;
use crate::error::AppError;
use crate::features::FeatureState;

pub fn units_routes() -> Router<FeatureState> {
    Router::new().route("/", get(list_units).post(create_unit))
}

#[tracing::instrument(skip(state, command), fields(name = %command.name))]
async fn create_unit(
    State(state): State<FeatureState>,
    Json(command): Json<CreateUnitCommand>,
) -> Result<Response, AppError> {
    let unit = super::commands::create::handle(state.store.as_ref(), command).await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(unit))).into_response())
}

#[tracing::instrument(skip(state))]
async fn list_units(State(state): State<FeatureState>) -> Result<Response, AppError> {
    let units = super::queries::list::handle(state.store.as_ref(), ListUnitsQuery).await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(units))).into_response())
}
