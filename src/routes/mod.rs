use crate::state::AppState;
use axum::Router;

pub mod anggota;
pub mod auth;
pub mod dashboard;
pub mod inventaris;
pub mod iuran;
pub mod keuangan;
pub mod laporan;
pub mod pengumuman;
pub mod pengurus;
pub mod warga;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(dashboard::router())
        .merge(warga::router())
        .merge(anggota::router())
        .merge(iuran::router())
        .merge(keuangan::router())
        .merge(inventaris::router())
        .merge(pengumuman::router())
        .merge(pengurus::router())
        .merge(laporan::router())
}
