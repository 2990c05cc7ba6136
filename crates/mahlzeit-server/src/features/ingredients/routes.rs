//! Ingredient catalog routes
//!
//! - `GET /api/v1/ingredients` - List ingredients by name
//! - `POST /api/v1/ingredients` - Add an ingredient (idempotent by name)
//! - `GET /api/v1/ingredients/:id` - Get one ingredient

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use super::{
    commands::CreateIngredientCommand,
    queries::{GetIngredientQuery, ListIngredientsQuery},
};
use crate::api::response::ApiResponse;
use crate::error::AppError;
use crate::features::FeatureState;

pub fn ingredients_routes() -> Router<FeatureState> {
    Router::new()
        .route("/", get(list_ingredients).post(create_ingredient))
        .route("/:id", get(get_ingredient))
}

/// `POST /api/v1/ingredients`
///
/// Returns `200 OK` with the stored entry whether it was created or already
/// existed.
#[tracing::instrument(skip(state, command), fields(name = %command.name))]
async fn create_ingredient(
    State(state): State<FeatureState>,
    Json(command): Json<CreateIngredientCommand>,
) -> Result<Response, AppError> {
    let ingredient = super::commands::create::handle(state.store.as_ref(), command).await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(ingredient))).into_response())
}

#[tracing::instrument(skip(state))]
async fn list_ingredients(State(state): State<FeatureState>) -> Result<Response, AppError> {
    let items = super::queries::list::handle(state.store.as_ref(), ListIngredientsQuery).await?;

    tracing::debug!(count = items.len(), "Ingredients listed via API");

    Ok((StatusCode::OK, Json(ApiResponse::success(items))).into_response())
}

#[tracing::instrument(skip(state))]
async fn get_ingredient(
    State(state): State<FeatureState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let ingredient =
        super::queries::get::handle(state.store.as_ref(), GetIngredientQuery { id }).await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(ingredient))).into_response())
}
