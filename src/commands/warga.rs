use crate::commands::auth::ensure_admin;
use crate::error::{RukunError, RukunResult};
use crate::logic::scope::scope_warga;
use crate::middleware::auth::Claims;
use crate::models::Warga;
use crate::state::AppState;
use crate::store::{self, tables};
use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

pub async fn get_warga_list(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> RukunResult<Json<Vec<Warga>>> {
    let warga: Vec<Warga> = store::fetch_all(state.store.as_ref(), tables::WARGA).await?;
    Ok(Json(scope_warga(&claims.scope(), warga)))
}

#[derive(Deserialize)]
pub struct WargaInput {
    pub id: Option<String>,
    pub nama: String,
    #[serde(default)]
    pub jenis_kelamin: String,
    pub blok: String,
    pub nomor_rumah: String,
    #[serde(default)]
    pub status_tinggal: String,
    #[serde(default)]
    pub status_ktp: String,
    #[serde(default)]
    pub no_hp: String,
    pub email: Option<String>,
}

fn validate_warga(input: &WargaInput) -> RukunResult<()> {
    if input.nama.trim().is_empty() {
        return Err(RukunError::Validation("Nama wajib diisi.".to_string()));
    }
    if input.blok.trim().is_empty() || input.nomor_rumah.trim().is_empty() {
        return Err(RukunError::Validation(
            "Blok dan nomor rumah wajib diisi.".to_string(),
        ));
    }
    Ok(())
}

fn warga_fields(input: &WargaInput) -> Value {
    json!({
        "nama": input.nama.trim(),
        "jenis_kelamin": input.jenis_kelamin.trim(),
        "blok": input.blok.trim(),
        "nomor_rumah": input.nomor_rumah.trim(),
        "status_tinggal": input.status_tinggal.trim(),
        "status_ktp": input.status_ktp.trim(),
        "no_hp": input.no_hp.trim(),
        "email": input.email.as_deref().unwrap_or("").trim(),
    })
}

async fn insert_warga(state: &AppState, input: &WargaInput) -> RukunResult<Value> {
    let new_id = format!("W-{}", uuid::Uuid::new_v4().to_string()[..8].to_uppercase());
    let mut row = warga_fields(input);
    if let Some(obj) = row.as_object_mut() {
        obj.insert("id".to_string(), json!(new_id));
        obj.insert(
            "created_at".to_string(),
            json!(chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()),
        );
    }
    state.store.append(tables::WARGA, row).await
}

pub async fn save_warga(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(input): Json<WargaInput>,
) -> RukunResult<Json<Value>> {
    ensure_admin(&claims)?;
    validate_warga(&input)?;

    match input.id.as_deref().filter(|id| !id.trim().is_empty()) {
        Some(id) => {
            let mut partial = warga_fields(&input);
            if let Some(obj) = partial.as_object_mut() {
                obj.insert(
                    "updated_at".to_string(),
                    json!(chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()),
                );
            }
            let row = state.store.update_by_id(tables::WARGA, id, partial).await?;
            Ok(Json(json!({
                "success": true,
                "message": "Data warga diperbarui.",
                "data": row,
            })))
        }
        None => {
            let row = insert_warga(&state, &input).await?;
            Ok(Json(json!({
                "success": true,
                "message": "Data warga tersimpan.",
                "data": row,
            })))
        }
    }
}

#[derive(Deserialize)]
pub struct WargaDeleteInput {
    pub id: String,
}

pub async fn delete_warga(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(input): Json<WargaDeleteInput>,
) -> RukunResult<Json<Value>> {
    ensure_admin(&claims)?;
    state.store.delete_by_id(tables::WARGA, &input.id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Data warga dihapus.",
    })))
}

/// Open self-registration: a new household announces itself and an admin
/// follows up out of band. No authentication on this route.
pub async fn register_warga(
    State(state): State<AppState>,
    Json(input): Json<WargaInput>,
) -> RukunResult<Json<Value>> {
    validate_warga(&input)?;
    let row = insert_warga(&state, &input).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Pendaftaran berhasil. Data Anda akan diverifikasi oleh pengurus.",
        "data": row,
    })))
}
