//! Mediator wiring
//!
//! Every command and query handler is registered against the shared
//! [`RecipeStore`]. Route handlers call the feature `handle` functions
//! directly; the mediator is the single place listing all of them.

pub use mediator::DefaultAsyncMediator;
use std::sync::Arc;

use crate::db::RecipeStore;

pub mod middleware;

pub type AppMediator = DefaultAsyncMediator;

/// Register every feature handler against `store`
///
/// Must be called from within a multi-threaded Tokio runtime; the mediator
/// builder blocks in place on the current runtime handle.
pub fn build_mediator(store: Arc<dyn RecipeStore>) -> AppMediator {
    DefaultAsyncMediator::builder()
        // Recipes
        .add_handler({
            let store = store.clone();
            move |cmd| {
                let store = store.clone();
                async move { crate::features::recipes::commands::create::handle(store.as_ref(), cmd).await }
            }
        })
        .add_handler({
            let store = store.clone();
            move |cmd| {
                let store = store.clone();
                async move { crate::features::recipes::commands::update::handle(store.as_ref(), cmd).await }
            }
        })
        .add_handler({
            let store = store.clone();
            move |query| {
                let store = store.clone();
                async move { crate::features::recipes::queries::list::handle(store.as_ref(), query).await }
            }
        })
        .add_handler({
            let store = store.clone();
            move |query| {
                let store = store.clone();
                async move { crate::features::recipes::queries::get::handle(store.as_ref(), query).await }
            }
        })
        // Steps
        .add_handler({
            let store = store.clone();
            move |cmd| {
                let store = store.clone();
                async move { crate::features::steps::commands::add::handle(store.as_ref(), cmd).await }
            }
        })
        .add_handler({
            let store = store.clone();
            move |cmd| {
                let store = store.clone();
                async move { crate::features::steps::commands::update::handle(store.as_ref(), cmd).await }
            }
        })
        .add_handler({
            let store = store.clone();
            move |cmd| {
                let store = store.clone();
                async move { crate::features::steps::commands::delete::handle(store.as_ref(), cmd).await }
            }
        })
        .add_handler({
            let store = store.clone();
            move |cmd| {
                let store = store.clone();
                async move {
                    crate::features::steps::commands::add_ingredient::handle(store.as_ref(), cmd).await
                }
            }
        })
        .add_handler({
            let store = store.clone();
            move |cmd| {
                let store = store.clone();
                async move {
                    crate::features::steps::commands::remove_ingredient::handle(store.as_ref(), cmd)
                        .await
                }
            }
        })
        .add_handler({
            let store = store.clone();
            move |query| {
                let store = store.clone();
                async move { crate::features::steps::queries::get::handle(store.as_ref(), query).await }
            }
        })
        // Ingredients
        .add_handler({
            let store = store.clone();
            move |cmd| {
                let store = store.clone();
                async move { crate::features::ingredients::commands::create::handle(store.as_ref(), cmd).await }
            }
        })
        .add_handler({
            let store = store.clone();
            move |query| {
                let store = store.clone();
                async move { crate::features::ingredients::queries::list::handle(store.as_ref(), query).await }
            }
        })
        .add_handler({
            let store = store.clone();
            move |query| {
                let store = store.clone();
                async move { crate::features::ingredients::queries::get::handle(store.as_ref(), query).await }
            }
        })
        // Units
        .add_handler({
            let store = store.clone();
            move |cmd| {
                let store = store.clone();
                async move { crate::features::units::commands::create::handle(store.as_ref(), cmd).await }
            }
        })
        .add_handler({
            let store = store.clone();
            move |query| {
                let store = store.clone();
                async move { crate::features::units::queries::list::handle(store.as_ref(), query).await }
            }
        })
        .build()
}
