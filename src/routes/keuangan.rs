use crate::commands;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        // Expenses
        .route(
            "/api/keuangan/pengeluaran",
            get(commands::keuangan::get_pengeluaran_list),
        )
        .route(
            "/api/keuangan/pengeluaran/save",
            post(commands::keuangan::save_pengeluaran),
        )
        .route(
            "/api/keuangan/pengeluaran/delete",
            post(commands::keuangan::delete_pengeluaran),
        )
        // Non-dues income
        .route(
            "/api/keuangan/pemasukan",
            get(commands::keuangan::get_pemasukan_list),
        )
        .route(
            "/api/keuangan/pemasukan/save",
            post(commands::keuangan::save_pemasukan),
        )
        .route(
            "/api/keuangan/pemasukan/delete",
            post(commands::keuangan::delete_pemasukan),
        )
}
