//! Recipe API routes
//!
//! - `GET /api/v1/recipes` - List recipes by name
//! - `POST /api/v1/recipes` - Create a recipe
//! - `GET /api/v1/recipes/:id?servings=N` - Load the full recipe, rescaled when `N > 0`
//! - `PUT /api/v1/recipes/:id` - Partially update name, servings or description

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use super::{
    commands::{CreateRecipeCommand, UpdateRecipeCommand},
    queries::{GetRecipeQuery, ListRecipesQuery},
};
use crate::api::response::ApiResponse;
use crate::error::AppError;
use crate::features::FeatureState;

pub fn recipes_routes() -> Router<FeatureState> {
    Router::new()
        .route("/", get(list_recipes).post(create_recipe))
        .route("/:id", get(get_recipe).put(update_recipe))
}

/// Raw query string of the recipe view
///
/// `servings` stays a string so that a malformed value falls back to the
/// base view instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct RecipeViewParams {
    pub servings: Option<String>,
}

impl RecipeViewParams {
    pub fn servings(&self) -> Option<i32> {
        self.servings.as_deref().and_then(|s| s.trim().parse().ok())
    }
}

/// `POST /api/v1/recipes`
///
/// ```json
/// { "name": "Pancakes", "servings": 4, "working_time": 900 }
/// ```
///
/// - `201 Created`
/// - `400 Bad Request` - Validation error
#[tracing::instrument(skip(state, command), fields(name = %command.name))]
async fn create_recipe(
    State(state): State<FeatureState>,
    Json(command): Json<CreateRecipeCommand>,
) -> Result<Response, AppError> {
    let response = super::commands::create::handle(state.store.as_ref(), command).await?;

    tracing::info!(recipe_id = response.id, "Recipe created via API");

    Ok((StatusCode::CREATED, Json(ApiResponse::success(response))).into_response())
}

/// `PUT /api/v1/recipes/:id`
///
/// Fields left out of the body keep their stored value.
///
/// - `200 OK`
/// - `400 Bad Request` - Validation error or empty update
/// - `404 Not Found`
#[tracing::instrument(skip(state, command), fields(recipe_id = id))]
async fn update_recipe(
    State(state): State<FeatureState>,
    Path(id): Path<i64>,
    Json(mut command): Json<UpdateRecipeCommand>,
) -> Result<Response, AppError> {
    command.id = id;

    let response = super::commands::update::handle(state.store.as_ref(), command).await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

/// `GET /api/v1/recipes`
#[tracing::instrument(skip(state))]
async fn list_recipes(State(state): State<FeatureState>) -> Result<Response, AppError> {
    let response = super::queries::list::handle(state.store.as_ref(), ListRecipesQuery).await?;

    tracing::debug!(count = response.items.len(), "Recipes listed via API");

    Ok((StatusCode::OK, Json(ApiResponse::success(response.items))).into_response())
}

/// `GET /api/v1/recipes/:id?servings=N`
///
/// - `200 OK` - Recipe with steps and ingredient totals
/// - `400 Bad Request` - Non-positive id
/// - `404 Not Found`
#[tracing::instrument(skip(state, params), fields(recipe_id = id))]
async fn get_recipe(
    State(state): State<FeatureState>,
    Path(id): Path<i64>,
    Query(params): Query<RecipeViewParams>,
) -> Result<Response, AppError> {
    let query = GetRecipeQuery {
        id,
        servings: params.servings(),
    };

    let recipe = super::queries::get::handle(state.store.as_ref(), query).await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(recipe))).into_response())
}
