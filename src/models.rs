// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response data structures used by the REST API. All types
//! derive `Serialize`/`Deserialize` and `ToSchema` for JSON handling and
//! OpenAPI documentation.
//!
//! ## Drink Representations
//!
//! - **short**: public view, recipe entries only carry `color` and `parts`
//! - **long**: full view including ingredient names, for baristas

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Drink Models
// =============================================================================

/// One ingredient of a drink recipe.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Ingredient {
    /// Ingredient name, e.g. "milk".
    pub name: String,
    /// Display color used to draw the drink.
    pub color: String,
    /// Relative amount of this ingredient.
    pub parts: u32,
}

/// Public view of an ingredient, without its name.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct IngredientSummary {
    pub color: String,
    pub parts: u32,
}

/// A drink in the catalog (long representation).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Drink {
    pub id: u64,
    /// Unique drink title.
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

/// Public view of a drink (short representation).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct DrinkSummary {
    pub id: u64,
    pub title: String,
    pub recipe: Vec<IngredientSummary>,
}

impl Drink {
    /// Short representation, hiding ingredient names.
    pub fn short(&self) -> DrinkSummary {
        DrinkSummary {
            id: self.id,
            title: self.title.clone(),
            recipe: self
                .recipe
                .iter()
                .map(|ingredient| IngredientSummary {
                    color: ingredient.color.clone(),
                    parts: ingredient.parts,
                })
                .collect(),
        }
    }
}

/// A recipe as submitted by clients: a single ingredient or a list.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(untagged)]
pub enum RecipeInput {
    Many(Vec<Ingredient>),
    One(Ingredient),
}

impl From<RecipeInput> for Vec<Ingredient> {
    fn from(value: RecipeInput) -> Self {
        match value {
            RecipeInput::Many(ingredients) => ingredients,
            RecipeInput::One(ingredient) => vec![ingredient],
        }
    }
}

/// Request to add a drink to the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateDrinkRequest {
    pub title: String,
    pub recipe: RecipeInput,
}

/// Request to change a drink. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateDrinkRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub recipe: Option<RecipeInput>,
}

// =============================================================================
// Response Envelopes
// =============================================================================

/// Public drink listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DrinkSummariesResponse {
    pub success: bool,
    pub drinks: Vec<DrinkSummary>,
}

/// Detailed drink listing, or the drink affected by a create or update.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DrinksResponse {
    pub success: bool,
    pub drinks: Vec<Drink>,
}

/// Result of deleting a drink.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteDrinkResponse {
    pub success: bool,
    /// Identifier of the deleted drink.
    pub delete: u64,
}
