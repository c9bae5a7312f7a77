//! Menu service: browsing and recipe editing

use std::sync::Arc;

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use shared::validation::validate_recipe;

use crate::error::{AppError, AppResult};
use crate::models::{MainIngredient, MenuCategory, MenuItem};
use crate::store::MenuCatalog;

#[derive(Clone)]
pub struct MenuService {
    menu: Arc<dyn MenuCatalog>,
}

/// Input for replacing a menu item's recipe
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetMainIngredientsInput {
    #[validate]
    pub main_ingredients: Vec<MainIngredient>,
}

impl MenuService {
    pub fn new(menu: Arc<dyn MenuCatalog>) -> Self {
        Self { menu }
    }

    /// List menu items, optionally restricted to a category and to items
    /// currently available
    pub async fn list(
        &self,
        category: Option<MenuCategory>,
        available_only: bool,
    ) -> AppResult<Vec<MenuItem>> {
        self.menu.list_menu_items(category, available_only).await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<MenuItem> {
        self.menu
            .find_menu_item(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Menu item".to_string()))
    }

    /// Replace the main ingredients tracked against inventory for a menu item
    pub async fn set_main_ingredients(
        &self,
        id: Uuid,
        input: SetMainIngredientsInput,
    ) -> AppResult<MenuItem> {
        input.validate()?;
        validate_recipe(&input.main_ingredients)
            .map_err(|m| AppError::validation("mainIngredients", m))?;

        let ingredients = input
            .main_ingredients
            .into_iter()
            .map(|i| MainIngredient::new(i.name.trim(), i.quantity, i.unit.trim()))
            .collect();

        let item = self
            .menu
            .set_main_ingredients(id, ingredients)
            .await?
            .ok_or_else(|| AppError::NotFound("Menu item".to_string()))?;

        tracing::info!(
            "Recipe for {} updated with {} main ingredients",
            item.name,
            item.main_ingredients.len()
        );
        Ok(item)
    }
}
