use serde::{Deserialize, Serialize};

/// A globally shared ingredient, unique by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogIngredient {
    pub id: i64,
    pub name: String,
}

/// A globally shared measurement unit, unique by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Unit {
    pub id: i64,
    pub name: String,
}

/// Entry of the recipe overview list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeListEntry {
    pub id: i64,
    pub name: String,
}
