//! Café ordering platform backend
//!
//! Menu browsing, order status workflow and the inventory engine that
//! deducts main ingredients when orders are delivered.

use std::sync::Arc;

use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use config::Config;

use services::{InventoryService, MenuService, OrderService};
use store::{InventoryStore, MenuCatalog, OrderStore, PgStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: Arc<Config>,
    pub menu: Arc<dyn MenuCatalog>,
    pub inventory: Arc<dyn InventoryStore>,
    pub orders: Arc<dyn OrderStore>,
}

impl AppState {
    /// State backed by Postgres for every store
    pub fn new(db: sqlx::PgPool, config: Config) -> Self {
        let store = Arc::new(PgStore::new(db.clone()));
        Self {
            db,
            config: Arc::new(config),
            menu: store.clone(),
            inventory: store.clone(),
            orders: store,
        }
    }

    pub fn inventory_service(&self) -> InventoryService {
        InventoryService::new(self.menu.clone(), self.inventory.clone())
    }

    pub fn menu_service(&self) -> MenuService {
        MenuService::new(self.menu.clone())
    }

    pub fn order_service(&self) -> OrderService {
        OrderService::new(self.orders.clone(), self.inventory_service())
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/v1", routes::api_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
