use crate::commands;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/inventaris",
            get(commands::inventaris::get_inventaris_list),
        )
        .route(
            "/api/inventaris/save",
            post(commands::inventaris::save_inventaris),
        )
        .route(
            "/api/inventaris/delete",
            post(commands::inventaris::delete_inventaris),
        )
}
