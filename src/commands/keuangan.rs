use crate::commands::auth::ensure_admin;
use crate::error::{RukunError, RukunResult};
use crate::logic::scope::community_visible;
use crate::middleware::auth::Claims;
use crate::models::{PemasukanLain, Pengeluaran};
use crate::state::AppState;
use crate::store::{self, tables};
use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

pub async fn get_pengeluaran_list(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> RukunResult<Json<Vec<Pengeluaran>>> {
    if !community_visible(claims.peran) {
        return Ok(Json(Vec::new()));
    }
    let daftar: Vec<Pengeluaran> =
        store::fetch_all(state.store.as_ref(), tables::PENGELUARAN).await?;
    Ok(Json(daftar))
}

#[derive(Deserialize)]
pub struct PengeluaranInput {
    pub id: Option<String>,
    pub tanggal: String,
    pub kategori: String,
    pub sub_kategori: Option<String>,
    pub deskripsi: String,
    #[serde(default)]
    pub jumlah: i64,
    pub metode_bayar: Option<String>,
    pub bukti_url: Option<String>,
}

fn validate_pengeluaran(input: &PengeluaranInput) -> RukunResult<()> {
    if input.deskripsi.trim().is_empty() {
        return Err(RukunError::Validation("Deskripsi wajib diisi.".to_string()));
    }
    if input.jumlah < 0 {
        return Err(RukunError::Validation(
            "Jumlah tidak boleh negatif.".to_string(),
        ));
    }
    Ok(())
}

fn pengeluaran_fields(input: &PengeluaranInput, dicatat_oleh: &str) -> Value {
    json!({
        "tanggal": input.tanggal.trim(),
        "kategori": input.kategori.trim(),
        "sub_kategori": input.sub_kategori.as_deref().unwrap_or("").trim(),
        "deskripsi": input.deskripsi.trim(),
        "jumlah": input.jumlah,
        "metode_bayar": input.metode_bayar.as_deref().unwrap_or("").trim(),
        "bukti_url": input.bukti_url.as_deref().unwrap_or("").trim(),
        "dicatat_oleh": dicatat_oleh,
    })
}

pub async fn save_pengeluaran(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(input): Json<PengeluaranInput>,
) -> RukunResult<Json<Value>> {
    ensure_admin(&claims)?;
    validate_pengeluaran(&input)?;

    match input.id.as_deref().filter(|id| !id.trim().is_empty()) {
        Some(id) => {
            let partial = pengeluaran_fields(&input, &claims.nama);
            let row = state
                .store
                .update_by_id(tables::PENGELUARAN, id, partial)
                .await?;
            Ok(Json(json!({
                "success": true,
                "message": "Catatan pengeluaran diperbarui.",
                "data": row,
            })))
        }
        None => {
            let mut row = pengeluaran_fields(&input, &claims.nama);
            if let Some(obj) = row.as_object_mut() {
                obj.insert(
                    "id".to_string(),
                    json!(format!(
                        "PG-{}",
                        uuid::Uuid::new_v4().to_string()[..8].to_uppercase()
                    )),
                );
                obj.insert(
                    "created_at".to_string(),
                    json!(chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()),
                );
            }
            let row = state.store.append(tables::PENGELUARAN, row).await?;
            Ok(Json(json!({
                "success": true,
                "message": "Catatan pengeluaran tersimpan.",
                "data": row,
            })))
        }
    }
}

#[derive(Deserialize)]
pub struct KeuanganDeleteInput {
    pub id: String,
}

pub async fn delete_pengeluaran(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(input): Json<KeuanganDeleteInput>,
) -> RukunResult<Json<Value>> {
    ensure_admin(&claims)?;
    state
        .store
        .delete_by_id(tables::PENGELUARAN, &input.id)
        .await?;
    Ok(Json(json!({
        "success": true,
        "message": "Catatan pengeluaran dihapus.",
    })))
}

pub async fn get_pemasukan_list(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> RukunResult<Json<Vec<PemasukanLain>>> {
    if !community_visible(claims.peran) {
        return Ok(Json(Vec::new()));
    }
    let daftar: Vec<PemasukanLain> =
        store::fetch_all(state.store.as_ref(), tables::PEMASUKAN).await?;
    Ok(Json(daftar))
}

#[derive(Deserialize)]
pub struct PemasukanInput {
    pub id: Option<String>,
    pub tanggal: String,
    pub deskripsi: String,
    #[serde(default)]
    pub jumlah: i64,
}

pub async fn save_pemasukan(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(input): Json<PemasukanInput>,
) -> RukunResult<Json<Value>> {
    ensure_admin(&claims)?;
    if input.deskripsi.trim().is_empty() {
        return Err(RukunError::Validation("Deskripsi wajib diisi.".to_string()));
    }
    if input.jumlah < 0 {
        return Err(RukunError::Validation(
            "Jumlah tidak boleh negatif.".to_string(),
        ));
    }

    let fields = json!({
        "tanggal": input.tanggal.trim(),
        "deskripsi": input.deskripsi.trim(),
        "jumlah": input.jumlah,
    });

    match input.id.as_deref().filter(|id| !id.trim().is_empty()) {
        Some(id) => {
            let row = state
                .store
                .update_by_id(tables::PEMASUKAN, id, fields)
                .await?;
            Ok(Json(json!({
                "success": true,
                "message": "Catatan pemasukan diperbarui.",
                "data": row,
            })))
        }
        None => {
            let mut row = fields;
            if let Some(obj) = row.as_object_mut() {
                obj.insert(
                    "id".to_string(),
                    json!(format!(
                        "PM-{}",
                        uuid::Uuid::new_v4().to_string()[..8].to_uppercase()
                    )),
                );
                obj.insert(
                    "created_at".to_string(),
                    json!(chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()),
                );
            }
            let row = state.store.append(tables::PEMASUKAN, row).await?;
            Ok(Json(json!({
                "success": true,
                "message": "Catatan pemasukan tersimpan.",
                "data": row,
            })))
        }
    }
}

pub async fn delete_pemasukan(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(input): Json<KeuanganDeleteInput>,
) -> RukunResult<Json<Value>> {
    ensure_admin(&claims)?;
    state
        .store
        .delete_by_id(tables::PEMASUKAN, &input.id)
        .await?;
    Ok(Json(json!({
        "success": true,
        "message": "Catatan pemasukan dihapus.",
    })))
}
