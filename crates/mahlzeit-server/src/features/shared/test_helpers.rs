//! Test fixtures and an in-memory [`RecipeStore`]
//!
//! [`InMemoryStore`] mirrors the Postgres schema closely enough for handler and
//! route tests: catalog names are unique, step and step-ingredient writes check
//! their references and report the same constraint names, and the steps read
//! yields an empty-name placeholder for steps without ingredients.
//!
//! ```rust,ignore
//! let store = InMemoryStore::new();
//! let recipe_id = store.insert_recipe("Pancakes", 4);
//! let step_id = store.insert_step(recipe_id, "Mix");
//! let flour = store.insert_ingredient("Flour");
//! store.associate(step_id, flour, None, 100.0);
//! ```

#![allow(clippy::unwrap_used, clippy::expect_used)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use http_body_util::BodyExt;
use mahlzeit_common::types::{CatalogIngredient, Ingredient, RecipeListEntry, Step, Unit};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

use crate::db::{
    DbError, DbResult, NewRecipe, RecipeHeader, RecipeStore, RecipeUpdate, StepIngredientParams,
    StepRecord, STEPS_RECIPE_FKEY, STEP_INGREDIENTS_INGREDIENT_FKEY, STEP_INGREDIENTS_STEP_FKEY,
    STEP_INGREDIENTS_UNIT_FKEY,
};

#[derive(Debug, Clone)]
struct Association {
    unit_id: Option<i64>,
    amount: f64,
    note: Option<String>,
}

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    recipes: BTreeMap<i64, RecipeHeader>,
    ingredients: BTreeMap<i64, String>,
    units: BTreeMap<i64, String>,
    steps: BTreeMap<i64, StepRecord>,
    step_ingredients: BTreeMap<(i64, i64), Association>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn named(map: &BTreeMap<i64, String>) -> Vec<(i64, String)> {
        let mut entries: Vec<_> = map.iter().map(|(id, name)| (*id, name.clone())).collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1));
        entries
    }

    fn get_or_create(map: &mut BTreeMap<i64, String>, next: i64, name: &str) -> (i64, String) {
        if let Some((id, existing)) = map.iter().find(|(_, n)| n.as_str() == name) {
            return (*id, existing.clone());
        }
        map.insert(next, name.to_string());
        (next, name.to_string())
    }

    fn ingredient_entry(&self, ingredient_id: i64, assoc: &Association) -> Ingredient {
        Ingredient {
            id: ingredient_id,
            name: self.ingredients.get(&ingredient_id).cloned().unwrap_or_default(),
            amount: assoc.amount,
            note: assoc.note.clone(),
            unit_name: assoc.unit_id.and_then(|id| self.units.get(&id).cloned()),
        }
    }
}

/// In-memory [`RecipeStore`] for tests
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
    fail: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every subsequent call fail with a connection error
    pub fn fail_all(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> DbResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Fixtures (bypass validation)
    // ------------------------------------------------------------------------

    pub fn insert_recipe(&self, name: &str, servings: i32) -> i64 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        state.recipes.insert(
            id,
            RecipeHeader {
                id,
                name: name.to_string(),
                description: String::new(),
                working_time: Duration::from_secs(600),
                waiting_time: Duration::from_secs(600),
                created_at: Utc::now(),
                updated_at: None,
                source: None,
                servings,
                servings_description: String::new(),
            },
        );
        id
    }

    pub fn insert_step(&self, recipe_id: i64, instruction: &str) -> i64 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        state.steps.insert(
            id,
            StepRecord {
                id,
                recipe_id,
                instruction: instruction.to_string(),
                time: Duration::from_secs(600),
            },
        );
        id
    }

    pub fn insert_ingredient(&self, name: &str) -> i64 {
        let mut state = self.state.lock().unwrap();
        let next = state.next_id();
        State::get_or_create(&mut state.ingredients, next, name).0
    }

    pub fn insert_unit(&self, name: &str) -> i64 {
        let mut state = self.state.lock().unwrap();
        let next = state.next_id();
        State::get_or_create(&mut state.units, next, name).0
    }

    pub fn associate(&self, step_id: i64, ingredient_id: i64, unit_id: Option<i64>, amount: f64) {
        let mut state = self.state.lock().unwrap();
        state.step_ingredients.insert(
            (step_id, ingredient_id),
            Association {
                unit_id,
                amount,
                note: None,
            },
        );
    }

    pub fn recipe(&self, id: i64) -> Option<RecipeHeader> {
        self.state.lock().unwrap().recipes.get(&id).cloned()
    }

    pub fn ingredient_count(&self) -> usize {
        self.state.lock().unwrap().ingredients.len()
    }

    pub fn unit_count(&self) -> usize {
        self.state.lock().unwrap().units.len()
    }

    pub fn step_count(&self) -> usize {
        self.state.lock().unwrap().steps.len()
    }

    pub fn association_count(&self) -> usize {
        self.state.lock().unwrap().step_ingredients.len()
    }
}

#[async_trait]
impl RecipeStore for InMemoryStore {
    async fn get_all_ingredients(&self) -> DbResult<Vec<CatalogIngredient>> {
        self.check()?;
        let state = self.state.lock().unwrap();
        Ok(State::named(&state.ingredients)
            .into_iter()
            .map(|(id, name)| CatalogIngredient { id, name })
            .collect())
    }

    async fn get_ingredient_name_by_id(&self, id: i64) -> DbResult<CatalogIngredient> {
        self.check()?;
        let state = self.state.lock().unwrap();
        state
            .ingredients
            .get(&id)
            .map(|name| CatalogIngredient {
                id,
                name: name.clone(),
            })
            .ok_or_else(|| DbError::not_found("Ingredient", id))
    }

    async fn add_ingredient(&self, name: &str) -> DbResult<CatalogIngredient> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let next = state.next_id();
        let (id, name) = State::get_or_create(&mut state.ingredients, next, name);
        Ok(CatalogIngredient { id, name })
    }

    async fn get_all_units(&self) -> DbResult<Vec<Unit>> {
        self.check()?;
        let state = self.state.lock().unwrap();
        Ok(State::named(&state.units)
            .into_iter()
            .map(|(id, name)| Unit { id, name })
            .collect())
    }

    async fn add_unit(&self, name: &str) -> DbResult<Unit> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let next = state.next_id();
        let (id, name) = State::get_or_create(&mut state.units, next, name);
        Ok(Unit { id, name })
    }

    async fn add_recipe(&self, recipe: &NewRecipe) -> DbResult<RecipeHeader> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let header = RecipeHeader {
            id,
            name: recipe.name.clone(),
            description: recipe.description.clone(),
            working_time: recipe.working_time,
            waiting_time: recipe.waiting_time,
            created_at: Utc::now(),
            updated_at: None,
            source: recipe.source.clone(),
            servings: recipe.servings,
            servings_description: recipe.servings_description.clone(),
        };
        state.recipes.insert(id, header.clone());
        Ok(header)
    }

    async fn get_recipe_by_id(&self, id: i64) -> DbResult<RecipeHeader> {
        self.check()?;
        let state = self.state.lock().unwrap();
        state
            .recipes
            .get(&id)
            .cloned()
            .ok_or_else(|| DbError::not_found("Recipe", id))
    }

    async fn get_all_recipes_by_name(&self) -> DbResult<Vec<RecipeListEntry>> {
        self.check()?;
        let state = self.state.lock().unwrap();
        let mut entries: Vec<_> = state
            .recipes
            .values()
            .map(|r| RecipeListEntry {
                id: r.id,
                name: r.name.clone(),
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(entries)
    }

    async fn get_total_ingredients_for_recipe(&self, recipe_id: i64) -> DbResult<Vec<Ingredient>> {
        self.check()?;
        let state = self.state.lock().unwrap();
        let mut totals: BTreeMap<(String, Option<String>), Ingredient> = BTreeMap::new();

        for ((step_id, ingredient_id), assoc) in &state.step_ingredients {
            let belongs = state
                .steps
                .get(step_id)
                .is_some_and(|s| s.recipe_id == recipe_id);
            if !belongs {
                continue;
            }

            let entry = state.ingredient_entry(*ingredient_id, assoc);
            totals
                .entry((entry.name.clone(), entry.unit_name.clone()))
                .and_modify(|total| total.amount += entry.amount)
                .or_insert(Ingredient { note: None, ..entry });
        }

        Ok(totals.into_values().collect())
    }

    async fn get_steps_for_recipe_by_id(&self, recipe_id: i64) -> DbResult<Vec<Step>> {
        self.check()?;
        let state = self.state.lock().unwrap();

        let steps = state
            .steps
            .values()
            .filter(|s| s.recipe_id == recipe_id)
            .map(|s| {
                let mut ingredients: Vec<_> = state
                    .step_ingredients
                    .iter()
                    .filter(|((step_id, _), _)| *step_id == s.id)
                    .map(|((_, ingredient_id), assoc)| state.ingredient_entry(*ingredient_id, assoc))
                    .collect();
                ingredients.sort_by(|a, b| a.name.cmp(&b.name));

                // Outer join artifact
                if ingredients.is_empty() {
                    ingredients.push(Ingredient::new(0, "", 0.0));
                }

                Step {
                    id: s.id,
                    recipe_id: s.recipe_id,
                    instruction: s.instruction.clone(),
                    time: s.time,
                    ingredients,
                }
            })
            .collect();

        Ok(steps)
    }

    async fn get_step_by_id(&self, id: i64) -> DbResult<StepRecord> {
        self.check()?;
        let state = self.state.lock().unwrap();
        state
            .steps
            .get(&id)
            .cloned()
            .ok_or_else(|| DbError::not_found("Step", id))
    }

    async fn add_new_empty_step(&self, recipe_id: i64) -> DbResult<StepRecord> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        if !state.recipes.contains_key(&recipe_id) {
            return Err(DbError::ForeignKey {
                constraint: STEPS_RECIPE_FKEY.to_string(),
            });
        }
        let id = state.next_id();
        let step = StepRecord {
            id,
            recipe_id,
            instruction: String::new(),
            time: Duration::ZERO,
        };
        state.steps.insert(id, step.clone());
        Ok(step)
    }

    async fn update_step_by_id(
        &self,
        id: i64,
        instruction: &str,
        time: Duration,
    ) -> DbResult<StepRecord> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let step = state
            .steps
            .get_mut(&id)
            .ok_or_else(|| DbError::not_found("Step", id))?;
        step.instruction = instruction.to_string();
        step.time = time;
        Ok(step.clone())
    }

    async fn delete_step_by_id(&self, id: i64) -> DbResult<u64> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let removed = state.steps.remove(&id).is_some();
        state.step_ingredients.retain(|(step_id, _), _| *step_id != id);
        Ok(u64::from(removed))
    }

    async fn add_ingredient_to_step(&self, params: &StepIngredientParams) -> DbResult<()> {
        self.check()?;
        let mut state = self.state.lock().unwrap();

        let violated = if !state.steps.contains_key(&params.step_id) {
            Some(STEP_INGREDIENTS_STEP_FKEY)
        } else if !state.ingredients.contains_key(&params.ingredient_id) {
            Some(STEP_INGREDIENTS_INGREDIENT_FKEY)
        } else if params.unit_id.is_some_and(|id| !state.units.contains_key(&id)) {
            Some(STEP_INGREDIENTS_UNIT_FKEY)
        } else {
            None
        };
        if let Some(constraint) = violated {
            return Err(DbError::ForeignKey {
                constraint: constraint.to_string(),
            });
        }

        state.step_ingredients.insert(
            (params.step_id, params.ingredient_id),
            Association {
                unit_id: params.unit_id,
                amount: params.amount,
                note: params.note.clone(),
            },
        );
        Ok(())
    }

    async fn delete_ingredient_from_step(&self, step_id: i64, ingredient_id: i64) -> DbResult<u64> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        Ok(u64::from(
            state.step_ingredients.remove(&(step_id, ingredient_id)).is_some(),
        ))
    }

    async fn update_basic_recipe_information(
        &self,
        update: &RecipeUpdate,
    ) -> DbResult<RecipeHeader> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let recipe = state
            .recipes
            .get_mut(&update.id)
            .ok_or_else(|| DbError::not_found("Recipe", update.id))?;

        if let Some(name) = &update.name {
            recipe.name = name.clone();
        }
        if let Some(servings) = update.servings {
            recipe.servings = servings;
        }
        if let Some(description) = &update.description {
            recipe.description = description.clone();
        }
        recipe.updated_at = Some(Utc::now());
        Ok(recipe.clone())
    }

    async fn ping(&self) -> DbResult<()> {
        self.check()
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// Ids of the pancake fixture
#[derive(Debug, Clone, Copy)]
pub struct Pancakes {
    pub recipe_id: i64,
    pub batter_step: i64,
    pub rest_step: i64,
    pub fry_step: i64,
    pub flour: i64,
    pub milk: i64,
    pub butter: i64,
    pub grams: i64,
    pub millilitres: i64,
}

/// Pancakes for 4: flour 100 g and milk 250 ml in the batter, butter 20 g
/// plus another 10 g of flour for frying, and a resting step without
/// ingredients.
pub fn pancakes(store: &InMemoryStore) -> Pancakes {
    let recipe_id = store.insert_recipe("Pancakes", 4);
    let batter_step = store.insert_step(recipe_id, "Mix the batter");
    let rest_step = store.insert_step(recipe_id, "Let it rest");
    let fry_step = store.insert_step(recipe_id, "Fry");

    let flour = store.insert_ingredient("Flour");
    let milk = store.insert_ingredient("Milk");
    let butter = store.insert_ingredient("Butter");
    let grams = store.insert_unit("g");
    let millilitres = store.insert_unit("ml");

    store.associate(batter_step, flour, Some(grams), 100.0);
    store.associate(batter_step, milk, Some(millilitres), 250.0);
    store.associate(fry_step, butter, Some(grams), 20.0);
    store.associate(fry_step, flour, Some(grams), 10.0);

    Pancakes {
        recipe_id,
        batter_step,
        rest_step,
        fry_step,
        flour,
        milk,
        butter,
        grams,
        millilitres,
    }
}

// ============================================================================
// Router helpers
// ============================================================================

/// Send one request through `app` and decode the JSON body (`Null` when empty).
pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        },
        None => Body::empty(),
    };

    let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, json)
}
