use crate::commands;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/pengumuman",
            get(commands::pengumuman::get_pengumuman_list),
        )
        .route(
            "/api/pengumuman/save",
            post(commands::pengumuman::save_pengumuman),
        )
        .route(
            "/api/pengumuman/delete",
            post(commands::pengumuman::delete_pengumuman),
        )
}
