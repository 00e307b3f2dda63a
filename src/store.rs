// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory drink catalog.

use std::collections::BTreeMap;

use crate::error::ApiError;
use crate::models::{CreateDrinkRequest, Drink, Ingredient, UpdateDrinkRequest};

#[derive(Default)]
pub struct InMemoryStore {
    drinks: BTreeMap<u64, Drink>,
    last_id: u64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All drinks ordered by id.
    pub fn list_drinks(&self) -> Vec<Drink> {
        self.drinks.values().cloned().collect()
    }

    pub fn contains_drink(&self, id: u64) -> bool {
        self.drinks.contains_key(&id)
    }

    pub fn create_drink(&mut self, request: CreateDrinkRequest) -> Result<Drink, ApiError> {
        let title = validated_title(&request.title)?;
        self.ensure_title_free(&title, None)?;
        let recipe: Vec<Ingredient> = request.recipe.into();
        if recipe.is_empty() {
            return Err(ApiError::unprocessable());
        }

        self.last_id += 1;
        let drink = Drink {
            id: self.last_id,
            title,
            recipe,
        };
        self.drinks.insert(drink.id, drink.clone());
        Ok(drink)
    }

    pub fn update_drink(&mut self, id: u64, request: UpdateDrinkRequest) -> Result<Drink, ApiError> {
        if !self.contains_drink(id) {
            return Err(ApiError::not_found());
        }

        let title = request.title.as_deref().map(validated_title).transpose()?;
        if let Some(title) = &title {
            self.ensure_title_free(title, Some(id))?;
        }
        let recipe: Option<Vec<Ingredient>> = request.recipe.map(Into::into);
        if recipe.as_ref().is_some_and(Vec::is_empty) {
            return Err(ApiError::unprocessable());
        }

        let drink = self.drinks.get_mut(&id).ok_or_else(ApiError::not_found)?;
        if let Some(title) = title {
            drink.title = title;
        }
        if let Some(recipe) = recipe {
            drink.recipe = recipe;
        }
        Ok(drink.clone())
    }

    pub fn delete_drink(&mut self, id: u64) -> Result<(), ApiError> {
        if self.drinks.remove(&id).is_some() {
            Ok(())
        } else {
            Err(ApiError::not_found())
        }
    }

    fn ensure_title_free(&self, title: &str, except: Option<u64>) -> Result<(), ApiError> {
        let taken = self
            .drinks
            .values()
            .any(|drink| drink.title == title && Some(drink.id) != except);
        if taken {
            Err(ApiError::unprocessable())
        } else {
            Ok(())
        }
    }
}

fn validated_title(title: &str) -> Result<String, ApiError> {
    let title = title.trim();
    if title.is_empty() {
        Err(ApiError::unprocessable())
    } else {
        Ok(title.to_string())
    }
}
