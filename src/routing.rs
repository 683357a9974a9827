//! Application router configuration.

use axum::{Router, routing::get};

use crate::{
    AppState,
    category::{create_category_endpoint, get_categories_page},
    endpoints,
    error_page::get_404_not_found,
    landing::get_landing_page,
    movement::{create_movement_endpoint, get_movements_page},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_landing_page))
        .route(
            endpoints::MOVEMENTS_VIEW,
            get(get_movements_page).post(create_movement_endpoint),
        )
        .route(
            endpoints::CATEGORIES_VIEW,
            get(get_categories_page).post(create_category_endpoint),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}
