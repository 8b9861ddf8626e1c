use crate::error::RukunResult;
use crate::logic::enrich::{enrich_anggota, enrich_iuran, index_warga};
use crate::logic::report::{
    laporan_anggota, laporan_iuran, laporan_pengeluaran, laporan_warga, LaporanAnggota,
    LaporanIuran, LaporanPengeluaran, LaporanWarga,
};
use crate::logic::scope::{community_visible, scope_by_owner, scope_warga};
use crate::middleware::auth::Claims;
use crate::models::{AnggotaKeluarga, Iuran, Pengeluaran, Warga};
use crate::state::AppState;
use crate::store::{self, tables};
use axum::{extract::State, Extension, Json};

/// Reports reuse the list scoping rules: a koordinator prints their own blok,
/// a warga prints their own household, admin and pengawas print everything.
/// Like the dashboard, a sheet tab that fails to load contributes an empty
/// source instead of failing the whole report.
pub async fn get_laporan_iuran(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> RukunResult<Json<LaporanIuran>> {
    let warga: Vec<Warga> = store::fetch_all_or_empty(state.store.as_ref(), tables::WARGA).await;
    let iuran: Vec<Iuran> = store::fetch_all_or_empty(state.store.as_ref(), tables::IURAN).await;

    let ctx = claims.scope();
    let index = index_warga(&warga);
    let scoped = scope_by_owner(&ctx, iuran, &index, |i| &i.warga_id);
    let enriched = enrich_iuran(scoped, &index);
    Ok(Json(laporan_iuran(enriched)))
}

pub async fn get_laporan_pengeluaran(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> RukunResult<Json<LaporanPengeluaran>> {
    if !community_visible(claims.peran) {
        return Ok(Json(laporan_pengeluaran(Vec::new())));
    }
    let pengeluaran: Vec<Pengeluaran> =
        store::fetch_all_or_empty(state.store.as_ref(), tables::PENGELUARAN).await;
    Ok(Json(laporan_pengeluaran(pengeluaran)))
}

pub async fn get_laporan_warga(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> RukunResult<Json<LaporanWarga>> {
    let warga: Vec<Warga> = store::fetch_all_or_empty(state.store.as_ref(), tables::WARGA).await;
    let ctx = claims.scope();
    Ok(Json(laporan_warga(scope_warga(&ctx, warga))))
}

pub async fn get_laporan_anggota(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> RukunResult<Json<LaporanAnggota>> {
    let warga: Vec<Warga> = store::fetch_all_or_empty(state.store.as_ref(), tables::WARGA).await;
    let anggota: Vec<AnggotaKeluarga> =
        store::fetch_all_or_empty(state.store.as_ref(), tables::ANGGOTA).await;

    let ctx = claims.scope();
    let index = index_warga(&warga);
    let scoped = scope_by_owner(&ctx, anggota, &index, |a| &a.warga_id);
    let enriched = enrich_anggota(scoped, &index);
    Ok(Json(laporan_anggota(enriched)))
}
