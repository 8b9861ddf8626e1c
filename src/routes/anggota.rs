use crate::commands;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/anggota", get(commands::anggota::get_anggota_list))
        .route("/api/anggota/save", post(commands::anggota::save_anggota))
        .route("/api/anggota/delete", post(commands::anggota::delete_anggota))
}
