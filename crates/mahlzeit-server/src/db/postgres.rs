//! Postgres implementation of [`RecipeStore`].
//!
//! Queries are checked at runtime (`query_as::<_, Row>`) so the crate builds
//! without a live database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mahlzeit_common::types::{CatalogIngredient, Ingredient, RecipeListEntry, Step, Unit};
use serde::Deserialize;
use sqlx::{postgres::types::PgInterval, types::Json, PgPool};
use std::time::Duration;

use super::{
    interval, DbError, DbResult, NewRecipe, RecipeHeader, RecipeStore, RecipeUpdate,
    StepIngredientParams, StepRecord,
};

const RECIPE_COLUMNS: &str = "id, name, description, working_time, waiting_time, created_at, \
                              updated_at, source, servings, servings_description";

const STEP_COLUMNS: &str = "id, recipe_id, instruction, time";

#[derive(Debug, Clone)]
pub struct PgRecipeStore {
    pool: PgPool,
}

impl PgRecipeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(Debug, sqlx::FromRow)]
struct RecipeRow {
    id: i64,
    name: String,
    description: String,
    working_time: PgInterval,
    waiting_time: PgInterval,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    source: Option<String>,
    servings: i32,
    servings_description: String,
}

impl From<RecipeRow> for RecipeHeader {
    fn from(row: RecipeRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            working_time: interval::to_duration(&row.working_time),
            waiting_time: interval::to_duration(&row.waiting_time),
            created_at: row.created_at,
            updated_at: row.updated_at,
            source: row.source,
            servings: row.servings,
            servings_description: row.servings_description,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct StepRow {
    id: i64,
    recipe_id: i64,
    instruction: String,
    time: PgInterval,
}

impl From<StepRow> for StepRecord {
    fn from(row: StepRow) -> Self {
        Self {
            id: row.id,
            recipe_id: row.recipe_id,
            instruction: row.instruction,
            time: interval::to_duration(&row.time),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct StepWithIngredientsRow {
    id: i64,
    recipe_id: i64,
    instruction: String,
    time: PgInterval,
    ingredients: Json<Vec<AggregatedIngredient>>,
}

/// Element of the `json_agg` column built by the steps query
#[derive(Debug, Deserialize)]
struct AggregatedIngredient {
    id: i64,
    name: String,
    amount: f64,
    note: Option<String>,
    unit_name: Option<String>,
}

impl From<StepWithIngredientsRow> for Step {
    fn from(row: StepWithIngredientsRow) -> Self {
        Self {
            id: row.id,
            recipe_id: row.recipe_id,
            instruction: row.instruction,
            time: interval::to_duration(&row.time),
            ingredients: row
                .ingredients
                .0
                .into_iter()
                .map(|i| Ingredient {
                    id: i.id,
                    name: i.name,
                    amount: i.amount,
                    note: i.note,
                    unit_name: i.unit_name,
                })
                .collect(),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TotalRow {
    id: i64,
    name: String,
    amount: f64,
    unit_name: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct NamedRow {
    id: i64,
    name: String,
}

// ============================================================================
// Catalog
// ============================================================================

impl PgRecipeStore {
    /// Get-or-create by name on a `(id, name UNIQUE)` catalog table.
    ///
    /// `ON CONFLICT DO NOTHING` plus the re-read makes concurrent inserts of the
    /// same name converge on one row.
    async fn get_or_create_named(&self, table: &'static str, name: &str) -> DbResult<NamedRow> {
        let select = format!("SELECT id, name FROM {table} WHERE name = $1");

        if let Some(existing) = sqlx::query_as::<_, NamedRow>(&select)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?
        {
            return Ok(existing);
        }

        sqlx::query(&format!(
            "INSERT INTO {table} (name) VALUES ($1) ON CONFLICT (name) DO NOTHING"
        ))
        .bind(name)
        .execute(&self.pool)
        .await?;

        let row = sqlx::query_as::<_, NamedRow>(&select)
            .bind(name)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!(table, id = row.id, "Catalog entry created");
        Ok(row)
    }
}

#[async_trait]
impl RecipeStore for PgRecipeStore {
    async fn get_all_ingredients(&self) -> DbResult<Vec<CatalogIngredient>> {
        let rows = sqlx::query_as::<_, NamedRow>("SELECT id, name FROM ingredients ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| CatalogIngredient {
                id: r.id,
                name: r.name,
            })
            .collect())
    }

    async fn get_ingredient_name_by_id(&self, id: i64) -> DbResult<CatalogIngredient> {
        let row = sqlx::query_as::<_, NamedRow>("SELECT id, name FROM ingredients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Ingredient", id))?;

        Ok(CatalogIngredient {
            id: row.id,
            name: row.name,
        })
    }

    async fn add_ingredient(&self, name: &str) -> DbResult<CatalogIngredient> {
        let row = self.get_or_create_named("ingredients", name).await?;
        Ok(CatalogIngredient {
            id: row.id,
            name: row.name,
        })
    }

    async fn get_all_units(&self) -> DbResult<Vec<Unit>> {
        let rows = sqlx::query_as::<_, NamedRow>("SELECT id, name FROM units ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| Unit {
                id: r.id,
                name: r.name,
            })
            .collect())
    }

    async fn add_unit(&self, name: &str) -> DbResult<Unit> {
        let row = self.get_or_create_named("units", name).await?;
        Ok(Unit {
            id: row.id,
            name: row.name,
        })
    }

    // ========================================================================
    // Recipes
    // ========================================================================

    async fn add_recipe(&self, recipe: &NewRecipe) -> DbResult<RecipeHeader> {
        let row = sqlx::query_as::<_, RecipeRow>(&format!(
            r#"
            INSERT INTO recipes
                (name, description, working_time, waiting_time, source, servings, servings_description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {RECIPE_COLUMNS}
            "#
        ))
        .bind(&recipe.name)
        .bind(&recipe.description)
        .bind(interval::from_duration(recipe.working_time))
        .bind(interval::from_duration(recipe.waiting_time))
        .bind(&recipe.source)
        .bind(recipe.servings)
        .bind(&recipe.servings_description)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn get_recipe_by_id(&self, id: i64) -> DbResult<RecipeHeader> {
        let row = sqlx::query_as::<_, RecipeRow>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Recipe", id))?;

        Ok(row.into())
    }

    async fn get_all_recipes_by_name(&self) -> DbResult<Vec<RecipeListEntry>> {
        let rows = sqlx::query_as::<_, NamedRow>("SELECT id, name FROM recipes ORDER BY name, id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| RecipeListEntry {
                id: r.id,
                name: r.name,
            })
            .collect())
    }

    async fn get_total_ingredients_for_recipe(&self, recipe_id: i64) -> DbResult<Vec<Ingredient>> {
        let rows = sqlx::query_as::<_, TotalRow>(
            r#"
            SELECT i.id, i.name, SUM(si.amount)::DOUBLE PRECISION AS amount, u.name AS unit_name
            FROM steps s
            JOIN step_ingredients si ON si.step_id = s.id
            JOIN ingredients i ON i.id = si.ingredients_id
            LEFT JOIN units u ON u.id = si.unit_id
            WHERE s.recipe_id = $1
            GROUP BY i.id, i.name, u.name
            ORDER BY i.name, u.name
            "#,
        )
        .bind(recipe_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Ingredient {
                id: r.id,
                name: r.name,
                amount: r.amount,
                note: None,
                unit_name: r.unit_name,
            })
            .collect())
    }

    async fn get_steps_for_recipe_by_id(&self, recipe_id: i64) -> DbResult<Vec<Step>> {
        // The LEFT JOINs yield one all-NULL association for a step without
        // ingredients; it is aggregated as an entry with an empty name.
        let rows = sqlx::query_as::<_, StepWithIngredientsRow>(
            r#"
            SELECT s.id, s.recipe_id, s.instruction, s.time,
                   COALESCE(
                       json_agg(
                           json_build_object(
                               'id', COALESCE(i.id, 0),
                               'name', COALESCE(i.name, ''),
                               'amount', COALESCE(si.amount, 0),
                               'note', si.note,
                               'unit_name', u.name
                           )
                           ORDER BY i.name
                       ),
                       '[]'::json
                   ) AS ingredients
            FROM steps s
            LEFT JOIN step_ingredients si ON si.step_id = s.id
            LEFT JOIN ingredients i ON i.id = si.ingredients_id
            LEFT JOIN units u ON u.id = si.unit_id
            WHERE s.recipe_id = $1
            GROUP BY s.id
            ORDER BY s.id
            "#,
        )
        .bind(recipe_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Step::from).collect())
    }

    async fn update_basic_recipe_information(
        &self,
        update: &RecipeUpdate,
    ) -> DbResult<RecipeHeader> {
        let row = sqlx::query_as::<_, RecipeRow>(&format!(
            r#"
            UPDATE recipes
            SET name = COALESCE($2, name),
                servings = COALESCE($3, servings),
                description = COALESCE($4, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {RECIPE_COLUMNS}
            "#
        ))
        .bind(update.id)
        .bind(&update.name)
        .bind(update.servings)
        .bind(&update.description)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Recipe", update.id))?;

        Ok(row.into())
    }

    // ========================================================================
    // Steps
    // ========================================================================

    async fn get_step_by_id(&self, id: i64) -> DbResult<StepRecord> {
        let row = sqlx::query_as::<_, StepRow>(&format!(
            "SELECT {STEP_COLUMNS} FROM steps WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Step", id))?;

        Ok(row.into())
    }

    async fn add_new_empty_step(&self, recipe_id: i64) -> DbResult<StepRecord> {
        let row = sqlx::query_as::<_, StepRow>(&format!(
            "INSERT INTO steps (recipe_id) VALUES ($1) RETURNING {STEP_COLUMNS}"
        ))
        .bind(recipe_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update_step_by_id(
        &self,
        id: i64,
        instruction: &str,
        time: Duration,
    ) -> DbResult<StepRecord> {
        let row = sqlx::query_as::<_, StepRow>(&format!(
            "UPDATE steps SET instruction = $2, time = $3 WHERE id = $1 RETURNING {STEP_COLUMNS}"
        ))
        .bind(id)
        .bind(instruction)
        .bind(interval::from_duration(time))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Step", id))?;

        Ok(row.into())
    }

    async fn delete_step_by_id(&self, id: i64) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM steps WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn add_ingredient_to_step(&self, params: &StepIngredientParams) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO step_ingredients (step_id, ingredients_id, unit_id, amount, note)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (step_id, ingredients_id) DO UPDATE
            SET unit_id = EXCLUDED.unit_id,
                amount = EXCLUDED.amount,
                note = EXCLUDED.note
            "#,
        )
        .bind(params.step_id)
        .bind(params.ingredient_id)
        .bind(params.unit_id)
        .bind(params.amount)
        .bind(&params.note)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_ingredient_from_step(&self, step_id: i64, ingredient_id: i64) -> DbResult<u64> {
        let result =
            sqlx::query("DELETE FROM step_ingredients WHERE step_id = $1 AND ingredients_id = $2")
                .bind(step_id)
                .bind(ingredient_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> DbResult<()> {
        super::health_check(&self.pool).await
    }
}
