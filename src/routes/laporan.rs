use crate::commands;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/laporan/iuran", get(commands::laporan::get_laporan_iuran))
        .route(
            "/api/laporan/pengeluaran",
            get(commands::laporan::get_laporan_pengeluaran),
        )
        .route("/api/laporan/warga", get(commands::laporan::get_laporan_warga))
        .route(
            "/api/laporan/anggota",
            get(commands::laporan::get_laporan_anggota),
        )
}
