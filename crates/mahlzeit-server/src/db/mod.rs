//! Data access layer
//!
//! Handlers talk to the database through the [`RecipeStore`] trait, one async
//! method per query. [`PgRecipeStore`] is the Postgres implementation used by
//! the server binary.
//!
//! # Error mapping
//!
//! Every store method returns [`DbResult`]. A query that matches no row
//! surfaces as [`DbError::NotFound`]; a referential integrity violation surfaces
//! as [`DbError::ForeignKey`] carrying the violated constraint name, which
//! callers use to tell which referenced entity is missing.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use thiserror::Error;

use crate::config::DatabaseConfig;

pub mod interval;
pub mod postgres;
pub mod store;

pub use postgres::PgRecipeStore;
pub use store::{NewRecipe, RecipeHeader, RecipeStore, RecipeUpdate, StepIngredientParams, StepRecord};

/// `step_ingredients.step_id` references `steps.id`
pub const STEP_INGREDIENTS_STEP_FKEY: &str = "step_ingredients_step_id_fkey";

/// `step_ingredients.ingredients_id` references `ingredients.id`
pub const STEP_INGREDIENTS_INGREDIENT_FKEY: &str = "step_ingredients_ingredients_id_fkey";

/// `step_ingredients.unit_id` references `units.id`
pub const STEP_INGREDIENTS_UNIT_FKEY: &str = "step_ingredients_unit_id_fkey";

/// `steps.recipe_id` references `recipes.id`
pub const STEPS_RECIPE_FKEY: &str = "steps_recipe_id_fkey";

/// Database operation errors with contextual information
#[derive(Error, Debug)]
pub enum DbError {
    /// SQL query or connection error
    #[error("Database query failed: {0}")]
    Sqlx(sqlx::Error),

    /// Database configuration is invalid or missing
    #[error("Database configuration error: {0}. Check DATABASE_URL and connection settings.")]
    Config(String),

    /// Requested record does not exist
    #[error("{0}")]
    NotFound(String),

    /// A referenced row does not exist
    #[error("Foreign key constraint '{constraint}' violated")]
    ForeignKey { constraint: String },
}

impl DbError {
    /// Create a not found error with resource context
    pub fn not_found(resource_type: &str, identifier: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{} '{}' not found in database", resource_type, identifier))
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Name of the violated foreign key, if this is a referential integrity error
    pub fn foreign_key(&self) -> Option<&str> {
        match self {
            Self::ForeignKey { constraint } => Some(constraint.as_str()),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NotFound("no rows in result set".to_string()),
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                Self::ForeignKey {
                    constraint: db_err.constraint().unwrap_or_default().to_string(),
                }
            },
            other => Self::Sqlx(other),
        }
    }
}

pub type DbResult<T> = Result<T, DbError>;

pub async fn create_pool(config: &DatabaseConfig) -> DbResult<PgPool> {
    if config.url.is_empty() {
        return Err(DbError::config("DATABASE_URL is empty"));
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect(&config.url)
        .await?;

    tracing::info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Database connection pool created"
    );

    Ok(pool)
}

pub async fn health_check(pool: &PgPool) -> DbResult<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(DbError::from)
}
