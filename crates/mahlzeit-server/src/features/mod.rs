//! Feature slices of the recipe API
//!
//! Each feature is a vertical slice following the CQRS pattern:
//! - `commands/` - Write operations
//! - `queries/` - Read operations
//! - `routes.rs` - HTTP route definitions
//!
//! # Features
//!
//! - **recipes**: Recipe headers and the assembled, optionally rescaled recipe view
//! - **steps**: Steps of a recipe and the ingredients used in each step
//! - **ingredients**: The shared ingredient catalog
//! - **units**: The shared unit catalog

pub mod ingredients;
pub mod recipes;
pub mod shared;
pub mod steps;
pub mod units;

use axum::Router;
use std::sync::Arc;

use crate::db::RecipeStore;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    pub store: Arc<dyn RecipeStore>,
}

impl FeatureState {
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self { store }
    }
}

/// Mount every feature under its path prefix:
/// - `/recipes` - Recipes and their steps
/// - `/ingredients` - Ingredient catalog
/// - `/units` - Unit catalog
pub fn router(state: FeatureState) -> Router<()> {
    Router::new()
        .nest(
            "/recipes",
            recipes::recipes_routes()
                .merge(steps::steps_routes())
                .with_state(state.clone()),
        )
        .nest("/ingredients", ingredients::ingredients_routes().with_state(state.clone()))
        .nest("/units", units::units_routes().with_state(state))
}
