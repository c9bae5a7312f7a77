//! HTTP request handlers

pub mod health;
pub mod inventory;
pub mod menu;
pub mod order;

pub use health::health_check;
pub use inventory::{
    create_inventory_item, delete_inventory_item, get_low_stock, list_inventory,
    update_inventory_item,
};
pub use menu::{get_menu_item, list_menu, set_main_ingredients};
pub use order::{check_inventory, update_order_status};
