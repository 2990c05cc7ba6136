//! Step API routes, mounted under the recipe they belong to
//!
//! - `POST /api/v1/recipes/:id/steps` - Add an empty step
//! - `GET /api/v1/recipes/:id/steps/:step_id` - Get a step header
//! - `PUT /api/v1/recipes/:id/steps/:step_id` - Replace instruction and time
//! - `DELETE /api/v1/recipes/:id/steps/:step_id` - Delete a step (idempotent)
//! - `POST /api/v1/recipes/:id/steps/:step_id/ingredients` - Add or replace a step ingredient
//! - `DELETE /api/v1/recipes/:id/steps/:step_id/ingredients/:ingredient_id` - Remove a step ingredient (idempotent)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};

use super::{
    commands::{
        AddIngredientToStepCommand, AddStepCommand, DeleteStepCommand,
        RemoveIngredientFromStepCommand, UpdateStepCommand,
    },
    queries::GetStepQuery,
};
use crate::api::response::ApiResponse;
use crate::error::AppError;
use crate::features::FeatureState;

pub fn steps_routes() -> Router<FeatureState> {
    Router::new()
        .route("/:id/steps", post(add_step))
        .route(
            "/:id/steps/:step_id",
            get(get_step).put(update_step).delete(delete_step),
        )
        .route("/:id/steps/:step_id/ingredients", post(add_ingredient_to_step))
        .route(
            "/:id/steps/:step_id/ingredients/:ingredient_id",
            delete(remove_ingredient_from_step),
        )
}

/// `POST /api/v1/recipes/:id/steps`
///
/// - `201 Created` - The new, empty step
/// - `404 Not Found` - Recipe does not exist
#[tracing::instrument(skip(state))]
async fn add_step(
    State(state): State<FeatureState>,
    Path(recipe_id): Path<i64>,
) -> Result<Response, AppError> {
    let step = super::commands::add::handle(state.store.as_ref(), AddStepCommand { recipe_id })
        .await?;

    tracing::info!(step_id = step.id, "Step added via API");

    Ok((StatusCode::CREATED, Json(ApiResponse::success(step))).into_response())
}

/// `GET /api/v1/recipes/:id/steps/:step_id`
#[tracing::instrument(skip(state))]
async fn get_step(
    State(state): State<FeatureState>,
    Path((recipe_id, step_id)): Path<(i64, i64)>,
) -> Result<Response, AppError> {
    let step =
        super::queries::get::handle(state.store.as_ref(), GetStepQuery { recipe_id, step_id })
            .await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(step))).into_response())
}

/// `PUT /api/v1/recipes/:id/steps/:step_id`
///
/// ```json
/// { "instruction": "Let the dough rest", "time": 1800 }
/// ```
///
/// - `200 OK`
/// - `404 Not Found` - No such step in this recipe
#[tracing::instrument(skip(state, command))]
async fn update_step(
    State(state): State<FeatureState>,
    Path((recipe_id, step_id)): Path<(i64, i64)>,
    Json(mut command): Json<UpdateStepCommand>,
) -> Result<Response, AppError> {
    command.recipe_id = recipe_id;
    command.step_id = step_id;

    let step = super::commands::update::handle(state.store.as_ref(), command).await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(step))).into_response())
}

/// `DELETE /api/v1/recipes/:id/steps/:step_id`
///
/// Always `200 OK` for well-formed ids; `deleted` tells whether a row went away.
#[tracing::instrument(skip(state))]
async fn delete_step(
    State(state): State<FeatureState>,
    Path((recipe_id, step_id)): Path<(i64, i64)>,
) -> Result<Response, AppError> {
    let response = super::commands::delete::handle(
        state.store.as_ref(),
        DeleteStepCommand { recipe_id, step_id },
    )
    .await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

/// `POST /api/v1/recipes/:id/steps/:step_id/ingredients`
///
/// - `200 OK` - Association written
/// - `400 Bad Request` - Invalid amount, unknown ingredient or unknown unit
/// - `404 Not Found` - Step does not exist
#[tracing::instrument(skip(state, command))]
async fn add_ingredient_to_step(
    State(state): State<FeatureState>,
    Path((recipe_id, step_id)): Path<(i64, i64)>,
    Json(mut command): Json<AddIngredientToStepCommand>,
) -> Result<Response, AppError> {
    command.recipe_id = recipe_id;
    command.step_id = step_id;

    let response = super::commands::add_ingredient::handle(state.store.as_ref(), command).await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

/// `DELETE /api/v1/recipes/:id/steps/:step_id/ingredients/:ingredient_id`
#[tracing::instrument(skip(state))]
async fn remove_ingredient_from_step(
    State(state): State<FeatureState>,
    Path((recipe_id, step_id, ingredient_id)): Path<(i64, i64, i64)>,
) -> Result<Response, AppError> {
    let response = super::commands::remove_ingredient::handle(
        state.store.as_ref(),
        RemoveIngredientFromStepCommand {
            recipe_id,
            step_id,
            ingredient_id,
        },
    )
    .await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}
