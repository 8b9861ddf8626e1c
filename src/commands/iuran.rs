use crate::commands::auth::ensure_admin;
use crate::error::{RukunError, RukunResult};
use crate::logic::bulk::expand_month_range;
use crate::logic::enrich::{enrich_iuran, index_warga, IuranView};
use crate::logic::scope::scope_by_owner;
use crate::middleware::auth::Claims;
use crate::models::{Bulan, Iuran, IuranStatus, Warga};
use crate::state::AppState;
use crate::store::{self, tables};
use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

pub async fn get_iuran_list(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> RukunResult<Json<Vec<IuranView>>> {
    let warga: Vec<Warga> = store::fetch_all(state.store.as_ref(), tables::WARGA).await?;
    let iuran: Vec<Iuran> = store::fetch_all(state.store.as_ref(), tables::IURAN).await?;

    let index = index_warga(&warga);
    let scoped = scope_by_owner(&claims.scope(), iuran, &index, |i| &i.warga_id);
    Ok(Json(enrich_iuran(scoped, &index)))
}

#[derive(Deserialize)]
pub struct IuranInput {
    pub id: Option<String>,
    pub warga_id: String,
    pub bulan: Bulan,
    pub tahun: i32,
    #[serde(default)]
    pub iuran_lingkungan: i64,
    #[serde(default)]
    pub iuran_sosial: i64,
    #[serde(default)]
    pub iuran_masjid: i64,
    pub tanggal_bayar: Option<String>,
    #[serde(default)]
    pub status: IuranStatus,
    pub metode_bayar: Option<String>,
    pub bukti_url: Option<String>,
    pub catatan: Option<String>,
}

fn validate_iuran(input: &IuranInput) -> RukunResult<()> {
    if input.warga_id.trim().is_empty() {
        return Err(RukunError::Validation(
            "Iuran harus terkait dengan data warga.".to_string(),
        ));
    }
    if input.iuran_lingkungan < 0 || input.iuran_sosial < 0 || input.iuran_masjid < 0 {
        return Err(RukunError::Validation(
            "Nominal iuran tidak boleh negatif.".to_string(),
        ));
    }
    Ok(())
}

fn iuran_fields(input: &IuranInput, dicatat_oleh: &str) -> Value {
    json!({
        "warga_id": input.warga_id.trim(),
        "bulan": input.bulan,
        "tahun": input.tahun,
        "iuran_lingkungan": input.iuran_lingkungan,
        "iuran_sosial": input.iuran_sosial,
        "iuran_masjid": input.iuran_masjid,
        "tanggal_bayar": input.tanggal_bayar.as_deref().unwrap_or(""),
        "status": input.status,
        "metode_bayar": input.metode_bayar.as_deref().unwrap_or(""),
        "dicatat_oleh": dicatat_oleh,
        "bukti_url": input.bukti_url.as_deref().unwrap_or(""),
        "catatan": input.catatan.as_deref().unwrap_or(""),
    })
}

fn new_iuran_id() -> String {
    format!("IU-{}", uuid::Uuid::new_v4().to_string()[..8].to_uppercase())
}

pub async fn save_iuran(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(input): Json<IuranInput>,
) -> RukunResult<Json<Value>> {
    ensure_admin(&claims)?;
    validate_iuran(&input)?;

    match input.id.as_deref().filter(|id| !id.trim().is_empty()) {
        Some(id) => {
            let partial = iuran_fields(&input, &claims.nama);
            let row = state.store.update_by_id(tables::IURAN, id, partial).await?;
            Ok(Json(json!({
                "success": true,
                "message": "Catatan iuran diperbarui.",
                "data": row,
            })))
        }
        None => {
            let mut row = iuran_fields(&input, &claims.nama);
            if let Some(obj) = row.as_object_mut() {
                obj.insert("id".to_string(), json!(new_iuran_id()));
            }
            let row = state.store.append(tables::IURAN, row).await?;
            Ok(Json(json!({
                "success": true,
                "message": "Catatan iuran tersimpan.",
                "data": row,
            })))
        }
    }
}

#[derive(Deserialize)]
pub struct IuranDeleteInput {
    pub id: String,
}

pub async fn delete_iuran(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(input): Json<IuranDeleteInput>,
) -> RukunResult<Json<Value>> {
    ensure_admin(&claims)?;
    state.store.delete_by_id(tables::IURAN, &input.id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Catatan iuran dihapus.",
    })))
}

#[derive(Deserialize)]
pub struct BulkIuranRequest {
    pub warga_id: String,
    pub bulan_mulai: Bulan,
    pub bulan_selesai: Bulan,
    pub tahun: i32,
    /// Explicit end year for ranges longer than twelve months.
    pub tahun_selesai: Option<i32>,
    #[serde(default)]
    pub iuran_lingkungan: i64,
    #[serde(default)]
    pub iuran_sosial: i64,
    #[serde(default)]
    pub iuran_masjid: i64,
    #[serde(default)]
    pub status: IuranStatus,
    pub tanggal_bayar: Option<String>,
    pub metode_bayar: Option<String>,
    pub catatan: Option<String>,
}

/// Generates one dues row per month in the range, all copied from the same
/// template. Appends go out one by one; the sheet bridge has no batch
/// operation, so a mid-run failure leaves the earlier rows in place and the
/// response says exactly how far it got.
pub async fn bulk_generate_iuran(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(input): Json<BulkIuranRequest>,
) -> RukunResult<Json<Value>> {
    ensure_admin(&claims)?;

    if input.warga_id.trim().is_empty() {
        return Err(RukunError::Validation(
            "Iuran harus terkait dengan data warga.".to_string(),
        ));
    }
    if input.iuran_lingkungan < 0 || input.iuran_sosial < 0 || input.iuran_masjid < 0 {
        return Err(RukunError::Validation(
            "Nominal iuran tidak boleh negatif.".to_string(),
        ));
    }

    let rentang = expand_month_range(
        input.bulan_mulai,
        input.bulan_selesai,
        input.tahun,
        input.tahun_selesai,
    )?;

    let mut dibuat = 0usize;
    let mut detail_gagal: Vec<String> = Vec::new();

    for (bulan, tahun) in rentang {
        let row = json!({
            "id": new_iuran_id(),
            "warga_id": input.warga_id.trim(),
            "bulan": bulan,
            "tahun": tahun,
            "iuran_lingkungan": input.iuran_lingkungan,
            "iuran_sosial": input.iuran_sosial,
            "iuran_masjid": input.iuran_masjid,
            "tanggal_bayar": input.tanggal_bayar.as_deref().unwrap_or(""),
            "status": input.status,
            "metode_bayar": input.metode_bayar.as_deref().unwrap_or(""),
            "dicatat_oleh": claims.nama,
            "catatan": input.catatan.as_deref().unwrap_or(""),
        });
        match state.store.append(tables::IURAN, row).await {
            Ok(_) => dibuat += 1,
            Err(e) => {
                tracing::error!("Bulk append {} {} failed: {}", bulan.nama(), tahun, e);
                detail_gagal.push(format!("{} {}: gagal menyimpan", bulan.nama(), tahun));
            }
        }
    }

    let gagal = detail_gagal.len();
    let message = if gagal == 0 {
        format!("{} catatan iuran dibuat.", dibuat)
    } else {
        format!("{} catatan dibuat, {} gagal.", dibuat, gagal)
    };

    Ok(Json(json!({
        "success": gagal == 0,
        "message": message,
        "dibuat": dibuat,
        "gagal": gagal,
        "detail_gagal": detail_gagal,
    })))
}
