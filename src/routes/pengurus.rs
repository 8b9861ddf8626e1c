use crate::commands;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/pengurus", get(commands::pengurus::get_pengurus_list))
        .route("/api/pengurus/save", post(commands::pengurus::save_pengurus))
        .route(
            "/api/pengurus/delete",
            post(commands::pengurus::delete_pengurus),
        )
}
