//! Route definitions for the café ordering platform

use axum::{
    middleware,
    routing::{get, patch, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Menu browsing (public)
        .nest("/menu", menu_routes())
        // Protected routes - admin management
        .nest("/admin", admin_routes(state.clone()))
        // Protected routes - order workflow
        .nest("/orders", order_routes(state))
}

/// Menu routes (public)
fn menu_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_menu))
        .route("/:id", get(handlers::get_menu_item))
}

/// Admin routes (protected, admin role checked per handler)
fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/menu/:id/main-ingredients",
            put(handlers::set_main_ingredients),
        )
        .route(
            "/inventory",
            get(handlers::list_inventory).post(handlers::create_inventory_item),
        )
        .route(
            "/inventory/:id",
            put(handlers::update_inventory_item).delete(handlers::delete_inventory_item),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Order routes (protected, staff role checked per handler)
fn order_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/:id/status", patch(handlers::update_order_status))
        .route("/check-inventory", post(handlers::check_inventory))
        .route("/inventory/low-stock", get(handlers::get_low_stock))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
