use crate::commands::auth::ensure_admin;
use crate::error::{RukunError, RukunResult};
use crate::logic::scope::community_visible;
use crate::middleware::auth::Claims;
use crate::models::Inventaris;
use crate::state::AppState;
use crate::store::{self, tables};
use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

pub async fn get_inventaris_list(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> RukunResult<Json<Vec<Inventaris>>> {
    if !community_visible(claims.peran) {
        return Ok(Json(Vec::new()));
    }
    let daftar: Vec<Inventaris> =
        store::fetch_all(state.store.as_ref(), tables::INVENTARIS).await?;
    Ok(Json(daftar))
}

#[derive(Deserialize)]
pub struct InventarisInput {
    pub id: Option<String>,
    pub nama_barang: String,
    #[serde(default)]
    pub jumlah: i64,
    #[serde(default)]
    pub lokasi: String,
    #[serde(default)]
    pub penanggung_jawab: String,
    pub catatan: Option<String>,
}

fn validate_inventaris(input: &InventarisInput) -> RukunResult<()> {
    if input.nama_barang.trim().is_empty() {
        return Err(RukunError::Validation(
            "Nama barang wajib diisi.".to_string(),
        ));
    }
    if input.jumlah < 0 {
        return Err(RukunError::Validation(
            "Jumlah barang tidak boleh negatif.".to_string(),
        ));
    }
    Ok(())
}

fn inventaris_fields(input: &InventarisInput) -> Value {
    json!({
        "nama_barang": input.nama_barang.trim(),
        "jumlah": input.jumlah,
        "lokasi": input.lokasi.trim(),
        "penanggung_jawab": input.penanggung_jawab.trim(),
        "catatan": input.catatan.as_deref().unwrap_or("").trim(),
    })
}

pub async fn save_inventaris(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(input): Json<InventarisInput>,
) -> RukunResult<Json<Value>> {
    ensure_admin(&claims)?;
    validate_inventaris(&input)?;

    match input.id.as_deref().filter(|id| !id.trim().is_empty()) {
        Some(id) => {
            let partial = inventaris_fields(&input);
            let row = state
                .store
                .update_by_id(tables::INVENTARIS, id, partial)
                .await?;
            Ok(Json(json!({
                "success": true,
                "message": "Data inventaris diperbarui.",
                "data": row,
            })))
        }
        None => {
            let mut row = inventaris_fields(&input);
            if let Some(obj) = row.as_object_mut() {
                obj.insert(
                    "id".to_string(),
                    json!(format!(
                        "INV-{}",
                        uuid::Uuid::new_v4().to_string()[..8].to_uppercase()
                    )),
                );
                obj.insert(
                    "created_at".to_string(),
                    json!(chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()),
                );
            }
            let row = state.store.append(tables::INVENTARIS, row).await?;
            Ok(Json(json!({
                "success": true,
                "message": "Data inventaris tersimpan.",
                "data": row,
            })))
        }
    }
}

#[derive(Deserialize)]
pub struct InventarisDeleteInput {
    pub id: String,
}

pub async fn delete_inventaris(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(input): Json<InventarisDeleteInput>,
) -> RukunResult<Json<Value>> {
    ensure_admin(&claims)?;
    state
        .store
        .delete_by_id(tables::INVENTARIS, &input.id)
        .await?;
    Ok(Json(json!({
        "success": true,
        "message": "Data inventaris dihapus.",
    })))
}
