//! Business logic services for the café ordering platform

pub mod inventory;
pub mod menu;
pub mod order;
pub mod recipe;

pub use inventory::InventoryService;
pub use menu::MenuService;
pub use order::OrderService;
pub use recipe::RecipeResolver;
