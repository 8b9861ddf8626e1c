use crate::commands::auth::ensure_admin;
use crate::error::{RukunError, RukunResult};
use crate::middleware::auth::Claims;
use crate::models::{Pengurus, Role};
use crate::state::AppState;
use crate::store::{self, tables};
use axum::{extract::State, Extension, Json};
use bcrypt::{hash, DEFAULT_COST};
use serde::Deserialize;
use serde_json::{json, Value};

/// Staff listing is for Admin and Pengawas. Hashes never leave the server.
pub async fn get_pengurus_list(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> RukunResult<Json<Vec<Pengurus>>> {
    if !matches!(claims.peran, Role::Admin | Role::Pengawas) {
        return Err(RukunError::Forbidden(
            "Hanya admin dan pengawas yang dapat melihat daftar pengurus.".to_string(),
        ));
    }
    let mut daftar: Vec<Pengurus> =
        store::fetch_all(state.store.as_ref(), tables::PENGURUS).await?;
    for p in &mut daftar {
        p.password_hash = None;
    }
    Ok(Json(daftar))
}

#[derive(Deserialize)]
pub struct PengurusInput {
    pub id: Option<String>,
    #[serde(default)]
    pub warga_id: String,
    pub nama: String,
    pub email: String,
    #[serde(default)]
    pub jabatan: String,
    pub peran: Role,
    pub blok: Option<String>,
    pub password: Option<String>,
}

fn validate_pengurus(input: &PengurusInput) -> RukunResult<()> {
    if input.nama.trim().is_empty() || input.email.trim().is_empty() {
        return Err(RukunError::Validation(
            "Nama dan email wajib diisi.".to_string(),
        ));
    }
    if input.peran == Role::Unknown {
        return Err(RukunError::Validation("Peran tidak dikenali.".to_string()));
    }
    let blok_kosong = input
        .blok
        .as_deref()
        .map(|b| b.trim().is_empty())
        .unwrap_or(true);
    if input.peran == Role::Koordinator && blok_kosong {
        return Err(RukunError::Validation(
            "Koordinator harus memiliki blok binaan.".to_string(),
        ));
    }
    Ok(())
}

fn email_taken(daftar: &[Pengurus], email: &str, kecuali_id: Option<&str>) -> bool {
    daftar.iter().any(|p| {
        p.email.trim().eq_ignore_ascii_case(email) && Some(p.id.as_str()) != kecuali_id
    })
}

pub async fn save_pengurus(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(input): Json<PengurusInput>,
) -> RukunResult<Json<Value>> {
    ensure_admin(&claims)?;
    validate_pengurus(&input)?;

    let email = input.email.trim().to_string();
    let daftar: Vec<Pengurus> = store::fetch_all(state.store.as_ref(), tables::PENGURUS).await?;

    let mut fields = json!({
        "warga_id": input.warga_id.trim(),
        "nama": input.nama.trim(),
        "email": email,
        "jabatan": input.jabatan.trim(),
        "peran": input.peran,
        "blok": input.blok.as_deref().unwrap_or("").trim(),
    });

    match input.id.as_deref().filter(|id| !id.trim().is_empty()) {
        Some(id) => {
            if email_taken(&daftar, &email, Some(id)) {
                return Err(RukunError::Validation(
                    "Email sudah digunakan akun lain.".to_string(),
                ));
            }
            if let Some(password) = input.password.as_deref() {
                if !password.trim().is_empty() {
                    let hashed = hash(password, DEFAULT_COST)?;
                    if let Some(obj) = fields.as_object_mut() {
                        obj.insert("password_hash".to_string(), json!(hashed));
                    }
                }
            }
            let row = state
                .store
                .update_by_id(tables::PENGURUS, id, fields)
                .await?;
            Ok(Json(json!({
                "success": true,
                "message": "Akun pengurus diperbarui.",
                "data": strip_hash(row),
            })))
        }
        None => {
            if email_taken(&daftar, &email, None) {
                return Err(RukunError::Validation(
                    "Email sudah digunakan akun lain.".to_string(),
                ));
            }
            let password = input
                .password
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .ok_or_else(|| {
                    RukunError::Validation("Kata sandi wajib diisi untuk akun baru.".to_string())
                })?;
            let hashed = hash(password, DEFAULT_COST)?;
            if let Some(obj) = fields.as_object_mut() {
                obj.insert(
                    "id".to_string(),
                    json!(format!(
                        "P-{}",
                        uuid::Uuid::new_v4().to_string()[..8].to_uppercase()
                    )),
                );
                obj.insert("password_hash".to_string(), json!(hashed));
                obj.insert(
                    "created_at".to_string(),
                    json!(chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()),
                );
            }
            let row = state.store.append(tables::PENGURUS, fields).await?;
            Ok(Json(json!({
                "success": true,
                "message": "Akun pengurus dibuat.",
                "data": strip_hash(row),
            })))
        }
    }
}

fn strip_hash(mut row: Value) -> Value {
    if let Some(obj) = row.as_object_mut() {
        obj.remove("password_hash");
    }
    row
}

#[derive(Deserialize)]
pub struct PengurusDeleteInput {
    pub id: String,
}

pub async fn delete_pengurus(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(input): Json<PengurusDeleteInput>,
) -> RukunResult<Json<Value>> {
    ensure_admin(&claims)?;

    let daftar: Vec<Pengurus> = store::fetch_all(state.store.as_ref(), tables::PENGURUS).await?;
    let target = daftar.iter().find(|p| p.id == input.id);
    if let Some(target) = target {
        let sisa_admin = daftar
            .iter()
            .filter(|p| p.peran == Role::Admin && p.id != target.id)
            .count();
        if target.peran == Role::Admin && sisa_admin == 0 {
            return Err(RukunError::Validation(
                "Tidak dapat menghapus admin terakhir.".to_string(),
            ));
        }
    }

    state
        .store
        .delete_by_id(tables::PENGURUS, &input.id)
        .await?;
    Ok(Json(json!({
        "success": true,
        "message": "Akun pengurus dihapus.",
    })))
}
