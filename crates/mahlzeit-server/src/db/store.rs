//! The data access interface and the plain row types it exchanges.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mahlzeit_common::types::{
    duration_secs, CatalogIngredient, Ingredient, Recipe, RecipeListEntry, Step, Unit,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::DbResult;

/// Recipe header row, without steps or ingredients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeHeader {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[serde(with = "duration_secs")]
    pub working_time: Duration,
    #[serde(with = "duration_secs")]
    pub waiting_time: Duration,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub source: Option<String>,
    /// Stored serving count; the base for rescaling
    pub servings: i32,
    pub servings_description: String,
}

impl RecipeHeader {
    /// Assemble the aggregate, displayed at its base serving count.
    pub fn into_recipe(self, ingredients: Vec<Ingredient>, steps: Vec<Step>) -> Recipe {
        Recipe {
            id: self.id,
            name: self.name,
            description: self.description,
            working_time: self.working_time,
            waiting_time: self.waiting_time,
            created_at: self.created_at,
            updated_at: self.updated_at,
            source: self.source,
            base_servings: self.servings,
            servings: self.servings,
            servings_description: self.servings_description,
            ingredients,
            steps,
        }
    }
}

/// Step row without its ingredients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub id: i64,
    pub recipe_id: i64,
    pub instruction: String,
    #[serde(with = "duration_secs")]
    pub time: Duration,
}

/// Values for a new recipe header
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecipe {
    pub name: String,
    pub description: String,
    pub working_time: Duration,
    pub waiting_time: Duration,
    pub source: Option<String>,
    pub servings: i32,
    pub servings_description: String,
}

/// Partial header update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeUpdate {
    pub id: i64,
    pub name: Option<String>,
    pub servings: Option<i32>,
    pub description: Option<String>,
}

/// Association of a catalog ingredient with a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepIngredientParams {
    pub step_id: i64,
    pub ingredient_id: i64,
    pub unit_id: Option<i64>,
    pub amount: f64,
    pub note: Option<String>,
}

/// One async method per query.
///
/// Implementations never retry; dropping a returned future cancels the
/// underlying call.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// All catalog ingredients ordered by name
    async fn get_all_ingredients(&self) -> DbResult<Vec<CatalogIngredient>>;

    async fn get_ingredient_name_by_id(&self, id: i64) -> DbResult<CatalogIngredient>;

    /// Insert by name, returning the existing entity when the name is taken
    async fn add_ingredient(&self, name: &str) -> DbResult<CatalogIngredient>;

    /// All units ordered by name
    async fn get_all_units(&self) -> DbResult<Vec<Unit>>;

    /// Insert by name, returning the existing entity when the name is taken
    async fn add_unit(&self, name: &str) -> DbResult<Unit>;

    async fn add_recipe(&self, recipe: &NewRecipe) -> DbResult<RecipeHeader>;

    async fn get_recipe_by_id(&self, id: i64) -> DbResult<RecipeHeader>;

    /// (id, name) of every recipe ordered by name
    async fn get_all_recipes_by_name(&self) -> DbResult<Vec<RecipeListEntry>>;

    /// Amounts summed over all steps, one entry per ingredient and unit
    async fn get_total_ingredients_for_recipe(&self, recipe_id: i64) -> DbResult<Vec<Ingredient>>;

    /// Steps in creation order with their ingredients. A step without
    /// ingredients may carry one placeholder entry with an empty name.
    async fn get_steps_for_recipe_by_id(&self, recipe_id: i64) -> DbResult<Vec<Step>>;

    async fn get_step_by_id(&self, id: i64) -> DbResult<StepRecord>;

    async fn add_new_empty_step(&self, recipe_id: i64) -> DbResult<StepRecord>;

    async fn update_step_by_id(
        &self,
        id: i64,
        instruction: &str,
        time: Duration,
    ) -> DbResult<StepRecord>;

    /// Returns the number of deleted rows
    async fn delete_step_by_id(&self, id: i64) -> DbResult<u64>;

    /// Insert or replace the association for (step, ingredient)
    async fn add_ingredient_to_step(&self, params: &StepIngredientParams) -> DbResult<()>;

    /// Returns the number of deleted rows
    async fn delete_ingredient_from_step(&self, step_id: i64, ingredient_id: i64) -> DbResult<u64>;

    async fn update_basic_recipe_information(&self, update: &RecipeUpdate)
        -> DbResult<RecipeHeader>;

    /// Connectivity check for the health endpoint
    async fn ping(&self) -> DbResult<()>;
}
