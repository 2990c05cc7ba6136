//! The recipe aggregate and serving rescaling
//!
//! Stored ingredient amounts are written for [`Recipe::base_servings`].
//! [`Recipe::with_servings`] projects them onto another serving count for a
//! single view; the projection is never written back, so every rescale must
//! start from a freshly loaded aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A fully hydrated recipe: header, flattened ingredient totals and steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[serde(with = "super::duration_secs")]
    pub working_time: Duration,
    #[serde(with = "super::duration_secs")]
    pub waiting_time: Duration,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub source: Option<String>,
    /// Serving count the stored amounts are written for
    pub base_servings: i32,
    /// Serving count the amounts are currently expressed in
    pub servings: i32,
    pub servings_description: String,
    /// Amounts summed over all steps, one entry per ingredient and unit
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<Step>,
}

/// One instruction of a recipe with the ingredients it uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub id: i64,
    pub recipe_id: i64,
    pub instruction: String,
    #[serde(with = "super::duration_secs")]
    pub time: Duration,
    pub ingredients: Vec<Ingredient>,
}

/// A catalog ingredient used at a given amount inside a recipe or step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<String>,
}

impl Recipe {
    /// Create an empty recipe displayed at its base serving count.
    pub fn new(id: i64, name: impl Into<String>, base_servings: i32) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            working_time: Duration::ZERO,
            waiting_time: Duration::ZERO,
            created_at: Utc::now(),
            updated_at: None,
            source: None,
            base_servings,
            servings: base_servings,
            servings_description: String::new(),
            ingredients: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// Rescale every ingredient amount to `servings`.
    ///
    /// Amounts in the totals and in every step are recomputed independently as
    /// `amount / base_servings * servings`. A non-positive target, or a target
    /// equal to the base, leaves the recipe untouched.
    ///
    /// # Panics
    ///
    /// Panics if `base_servings` is zero. A recipe without a base serving count
    /// cannot be scaled and reaching this point means a corrupted aggregate.
    pub fn with_servings(&mut self, servings: i32) {
        assert!(
            self.base_servings != 0,
            "recipe {} has no base servings, refusing to rescale",
            self.id
        );

        if servings <= 0 || servings == self.base_servings {
            return;
        }

        let base = f64::from(self.base_servings);
        let target = f64::from(servings);

        let totals = self.ingredients.iter_mut();
        let per_step = self.steps.iter_mut().flat_map(|step| step.ingredients.iter_mut());
        for ingredient in totals.chain(per_step) {
            ingredient.rescale(base, target);
        }

        self.servings = servings;
    }
}

impl Step {
    pub fn new(id: i64, recipe_id: i64) -> Self {
        Self {
            id,
            recipe_id,
            instruction: String::new(),
            time: Duration::ZERO,
            ingredients: Vec::new(),
        }
    }
}

impl Ingredient {
    pub fn new(id: i64, name: impl Into<String>, amount: f64) -> Self {
        Self {
            id,
            name: name.into(),
            amount,
            note: None,
            unit_name: None,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit_name = Some(unit.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Placeholder entries produced by outer joins carry no name.
    pub fn is_placeholder(&self) -> bool {
        self.name.is_empty()
    }

    // Divide first, then multiply.
    fn rescale(&mut self, base: f64, target: f64) {
        self.amount = self.amount / base * target;
    }
}
