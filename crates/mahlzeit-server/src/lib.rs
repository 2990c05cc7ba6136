//! Mahlzeit Server Library
//!
//! HTTP service for managing recipes: recipes are built from steps, steps use
//! ingredients from a shared catalog, and any recipe can be viewed rescaled to
//! a different number of servings.
//!
//! # Architecture
//!
//! The server follows a **CQRS** layout:
//!
//! - **Commands** (write operations) create and change recipes, steps and the
//!   ingredients used by a step. Deletes are idempotent.
//! - **Queries** (read operations) list the catalog and assemble a recipe from
//!   its header, its ingredient totals and its steps.
//!
//! Handlers depend on the [`db::RecipeStore`] trait; [`db::PgRecipeStore`] is
//! the PostgreSQL implementation.
//!
//! ## Framework Stack
//!
//! - **Axum**: HTTP routing
//! - **SQLx**: PostgreSQL access and migrations
//! - **Tower**: Middleware (CORS, tracing, compression, timeout, panic recovery)
//!
//! # Example
//!
//! ```no_run
//! use mahlzeit_server::{api, config::Config, db, features::FeatureState};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let pool = db::create_pool(&config.database).await?;
//!     let state = FeatureState::new(Arc::new(db::PgRecipeStore::new(pool)));
//!     let app = api::create_router(state, &config);
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod api;
pub mod config;
pub mod cqrs;
pub mod db;
pub mod error;
pub mod features;
pub mod middleware;

// Re-export commonly used types
pub use db::{DbError, DbResult, PgRecipeStore, RecipeStore};
pub use error::AppError;
