use crate::commands;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/iuran", get(commands::iuran::get_iuran_list))
        .route("/api/iuran/save", post(commands::iuran::save_iuran))
        .route("/api/iuran/delete", post(commands::iuran::delete_iuran))
        .route("/api/iuran/bulk", post(commands::iuran::bulk_generate_iuran))
}
