use crate::commands::auth::ensure_admin;
use crate::error::{RukunError, RukunResult};
use crate::logic::dates::parse_date_safe;
use crate::logic::scope::community_visible;
use crate::middleware::auth::Claims;
use crate::models::Pengumuman;
use crate::state::AppState;
use crate::store::{self, tables};
use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

pub async fn get_pengumuman_list(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> RukunResult<Json<Vec<Pengumuman>>> {
    if !community_visible(claims.peran) {
        return Ok(Json(Vec::new()));
    }
    let mut daftar: Vec<Pengumuman> =
        store::fetch_all(state.store.as_ref(), tables::PENGUMUMAN).await?;
    // Newest announcements first; rows whose date does not parse go last.
    daftar.sort_by_key(|p| std::cmp::Reverse(parse_date_safe(&p.tanggal_terbit)));
    Ok(Json(daftar))
}

#[derive(Deserialize)]
pub struct PengumumanInput {
    pub id: Option<String>,
    pub judul: String,
    pub isi: String,
    #[serde(default)]
    pub tanggal_terbit: String,
    pub target: Option<String>,
}

pub async fn save_pengumuman(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(input): Json<PengumumanInput>,
) -> RukunResult<Json<Value>> {
    ensure_admin(&claims)?;
    if input.judul.trim().is_empty() || input.isi.trim().is_empty() {
        return Err(RukunError::Validation(
            "Judul dan isi pengumuman wajib diisi.".to_string(),
        ));
    }

    let tanggal_terbit = if input.tanggal_terbit.trim().is_empty() {
        chrono::Local::now().format("%Y-%m-%d").to_string()
    } else {
        input.tanggal_terbit.trim().to_string()
    };

    let fields = json!({
        "judul": input.judul.trim(),
        "isi": input.isi.trim(),
        "tanggal_terbit": tanggal_terbit,
        "penulis": claims.nama,
        "target": input.target.as_deref().unwrap_or("").trim(),
    });

    match input.id.as_deref().filter(|id| !id.trim().is_empty()) {
        Some(id) => {
            let row = state
                .store
                .update_by_id(tables::PENGUMUMAN, id, fields)
                .await?;
            Ok(Json(json!({
                "success": true,
                "message": "Pengumuman diperbarui.",
                "data": row,
            })))
        }
        None => {
            let mut row = fields;
            if let Some(obj) = row.as_object_mut() {
                obj.insert(
                    "id".to_string(),
                    json!(format!(
                        "PU-{}",
                        uuid::Uuid::new_v4().to_string()[..8].to_uppercase()
                    )),
                );
                obj.insert(
                    "created_at".to_string(),
                    json!(chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()),
                );
            }
            let row = state.store.append(tables::PENGUMUMAN, row).await?;
            Ok(Json(json!({
                "success": true,
                "message": "Pengumuman diterbitkan.",
                "data": row,
            })))
        }
    }
}

#[derive(Deserialize)]
pub struct PengumumanDeleteInput {
    pub id: String,
}

pub async fn delete_pengumuman(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(input): Json<PengumumanDeleteInput>,
) -> RukunResult<Json<Value>> {
    ensure_admin(&claims)?;
    state
        .store
        .delete_by_id(tables::PENGUMUMAN, &input.id)
        .await?;
    Ok(Json(json!({
        "success": true,
        "message": "Pengumuman dihapus.",
    })))
}
