use axum::Router;
use domain_items::{ItemService, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let service = ItemService::new(state.repository.clone());
    handlers::router(service)
}
