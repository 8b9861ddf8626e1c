use crate::commands::auth::ensure_admin;
use crate::error::{RukunError, RukunResult};
use crate::logic::enrich::{enrich_anggota, index_warga, AnggotaView};
use crate::logic::scope::scope_by_owner;
use crate::middleware::auth::Claims;
use crate::models::{AnggotaKeluarga, Warga};
use crate::state::AppState;
use crate::store::{self, tables};
use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

pub async fn get_anggota_list(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> RukunResult<Json<Vec<AnggotaView>>> {
    let warga: Vec<Warga> = store::fetch_all(state.store.as_ref(), tables::WARGA).await?;
    let anggota: Vec<AnggotaKeluarga> =
        store::fetch_all(state.store.as_ref(), tables::ANGGOTA).await?;

    let index = index_warga(&warga);
    let scoped = scope_by_owner(&claims.scope(), anggota, &index, |a| &a.warga_id);
    Ok(Json(enrich_anggota(scoped, &index)))
}

#[derive(Deserialize)]
pub struct AnggotaInput {
    pub id: Option<String>,
    pub warga_id: String,
    #[serde(default)]
    pub no_kk: String,
    pub nama: String,
    #[serde(default)]
    pub hubungan: String,
    #[serde(default)]
    pub jenis_kelamin: String,
    #[serde(default)]
    pub tanggal_lahir: String,
    pub dokumen_url: Option<String>,
}

fn validate_anggota(input: &AnggotaInput) -> RukunResult<()> {
    if input.nama.trim().is_empty() {
        return Err(RukunError::Validation("Nama wajib diisi.".to_string()));
    }
    if input.warga_id.trim().is_empty() {
        return Err(RukunError::Validation(
            "Anggota keluarga harus terkait dengan data warga.".to_string(),
        ));
    }
    Ok(())
}

fn anggota_fields(input: &AnggotaInput) -> Value {
    json!({
        "warga_id": input.warga_id.trim(),
        "no_kk": input.no_kk.trim(),
        "nama": input.nama.trim(),
        "hubungan": input.hubungan.trim(),
        "jenis_kelamin": input.jenis_kelamin.trim(),
        "tanggal_lahir": input.tanggal_lahir.trim(),
        "dokumen_url": input.dokumen_url.as_deref().unwrap_or("").trim(),
    })
}

pub async fn save_anggota(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(input): Json<AnggotaInput>,
) -> RukunResult<Json<Value>> {
    ensure_admin(&claims)?;
    validate_anggota(&input)?;

    match input.id.as_deref().filter(|id| !id.trim().is_empty()) {
        Some(id) => {
            let partial = anggota_fields(&input);
            let row = state
                .store
                .update_by_id(tables::ANGGOTA, id, partial)
                .await?;
            Ok(Json(json!({
                "success": true,
                "message": "Data anggota keluarga diperbarui.",
                "data": row,
            })))
        }
        None => {
            let new_id = format!("A-{}", uuid::Uuid::new_v4().to_string()[..8].to_uppercase());
            let mut row = anggota_fields(&input);
            if let Some(obj) = row.as_object_mut() {
                obj.insert("id".to_string(), json!(new_id));
            }
            let row = state.store.append(tables::ANGGOTA, row).await?;
            Ok(Json(json!({
                "success": true,
                "message": "Data anggota keluarga tersimpan.",
                "data": row,
            })))
        }
    }
}

#[derive(Deserialize)]
pub struct AnggotaDeleteInput {
    pub id: String,
}

pub async fn delete_anggota(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(input): Json<AnggotaDeleteInput>,
) -> RukunResult<Json<Value>> {
    ensure_admin(&claims)?;
    state.store.delete_by_id(tables::ANGGOTA, &input.id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Data anggota keluarga dihapus.",
    })))
}
