use crate::error::RukunResult;
use crate::logic::scope::community_visible;
use crate::logic::stats::compute_dashboard_stats;
use crate::middleware::auth::Claims;
use crate::models::{AnggotaKeluarga, DashboardStats, Iuran, PemasukanLain, Pengeluaran, Warga};
use crate::state::AppState;
use crate::store::{self, tables};
use axum::{extract::State, Extension, Json};

/// Community-wide snapshot for the landing page. Sources that fail to load
/// contribute zeroed sections instead of failing the whole dashboard.
pub async fn get_dashboard_stats(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> RukunResult<Json<DashboardStats>> {
    if !community_visible(claims.peran) {
        return Ok(Json(DashboardStats::default()));
    }

    let warga: Vec<Warga> =
        store::fetch_all_or_empty(state.store.as_ref(), tables::WARGA).await;
    let anggota: Vec<AnggotaKeluarga> =
        store::fetch_all_or_empty(state.store.as_ref(), tables::ANGGOTA).await;
    let iuran: Vec<Iuran> =
        store::fetch_all_or_empty(state.store.as_ref(), tables::IURAN).await;
    let pengeluaran: Vec<Pengeluaran> =
        store::fetch_all_or_empty(state.store.as_ref(), tables::PENGELUARAN).await;
    let pemasukan: Vec<PemasukanLain> =
        store::fetch_all_or_empty(state.store.as_ref(), tables::PEMASUKAN).await;

    let today = chrono::Local::now().date_naive();
    let stats = compute_dashboard_stats(&warga, &anggota, &iuran, &pengeluaran, &pemasukan, today);
    Ok(Json(stats))
}
