use crate::commands;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/warga", get(commands::warga::get_warga_list))
        .route("/api/warga/save", post(commands::warga::save_warga))
        .route("/api/warga/delete", post(commands::warga::delete_warga))
        // Self-service sign-up, reachable without a token
        .route("/api/warga/register", post(commands::warga::register_warga))
}
