//! Recipe resolution: menu items to their main ingredients, and ingredient
//! names to active inventory rows

use std::sync::Arc;

use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{InventoryItem, MainIngredient};
use crate::store::{InventoryStore, MenuCatalog};

/// A menu item's name together with its recipe lines
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub menu_item: String,
    pub main_ingredients: Vec<MainIngredient>,
}

impl Recipe {
    pub fn is_tracked(&self) -> bool {
        !self.main_ingredients.is_empty()
    }
}

#[derive(Clone)]
pub struct RecipeResolver {
    menu: Arc<dyn MenuCatalog>,
    inventory: Arc<dyn InventoryStore>,
}

impl RecipeResolver {
    pub fn new(menu: Arc<dyn MenuCatalog>, inventory: Arc<dyn InventoryStore>) -> Self {
        Self { menu, inventory }
    }

    /// Recipe for a menu item, `None` when the item does not exist
    ///
    /// Items without main ingredients come back with an empty recipe; not
    /// every menu item tracks stock.
    pub async fn recipe(&self, menu_item_id: Uuid) -> AppResult<Option<Recipe>> {
        let item = self.menu.find_menu_item(menu_item_id).await?;
        Ok(item.map(|item| Recipe {
            menu_item: item.name,
            main_ingredients: item.main_ingredients,
        }))
    }

    /// Active inventory row whose name equals `ingredient_name` ignoring case
    ///
    /// No partial or fuzzy matching is attempted.
    pub async fn resolve(&self, ingredient_name: &str) -> AppResult<Option<InventoryItem>> {
        self.inventory.find_active_by_name(ingredient_name).await
    }
}
