use crate::error::{RukunError, RukunResult};
use crate::middleware::auth::{get_jwt_secret, Claims};
use crate::models::{Pengurus, Role};
use crate::state::AppState;
use crate::store::{self, tables};
use axum::{extract::State, Extension, Json};
use bcrypt::verify;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub async fn ping() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub token: Option<String>,
    pub pengurus: Option<Pengurus>,
}

impl LoginResponse {
    fn failed(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            token: None,
            pengurus: None,
        }
    }
}

fn issue_token(pengurus: &Pengurus) -> RukunResult<String> {
    let warga_id = if pengurus.warga_id.trim().is_empty() {
        None
    } else {
        Some(pengurus.warga_id.clone())
    };
    let claims = Claims {
        sub: pengurus.email.clone(),
        nama: pengurus.nama.clone(),
        peran: pengurus.peran,
        warga_id,
        blok: pengurus.blok.clone(),
        exp: (chrono::Utc::now() + chrono::Duration::hours(24)).timestamp() as usize,
    };
    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(&get_jwt_secret()),
    )?)
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> RukunResult<Json<LoginResponse>> {
    let email = payload.email.trim().to_string();
    let password = payload.password;

    if email.is_empty() || password.trim().is_empty() {
        return Ok(Json(LoginResponse::failed(
            "Email dan kata sandi harus diisi.",
        )));
    }

    let semua: Vec<Pengurus> = store::fetch_all(state.store.as_ref(), tables::PENGURUS).await?;
    let akun = semua
        .into_iter()
        .find(|p| p.email.trim().eq_ignore_ascii_case(&email));

    let mut akun = match akun {
        Some(akun) => akun,
        None => {
            return Ok(Json(LoginResponse::failed("Akun tidak ditemukan.")));
        }
    };

    let hash = match akun.password_hash.take() {
        Some(hash) if !hash.is_empty() => hash,
        _ => {
            tracing::warn!("Login attempt for account without password hash: {}", email);
            return Ok(Json(LoginResponse::failed("Akun tidak dapat digunakan.")));
        }
    };

    match verify(&password, &hash) {
        Ok(true) => {
            if akun.peran == Role::Unknown {
                return Ok(Json(LoginResponse::failed(
                    "Peran akun tidak dikenali. Hubungi admin.",
                )));
            }
            let token = issue_token(&akun)?;
            Ok(Json(LoginResponse {
                success: true,
                message: "Login berhasil.".to_string(),
                token: Some(token),
                pengurus: Some(akun),
            }))
        }
        Ok(false) => Ok(Json(LoginResponse::failed("Kata sandi salah."))),
        Err(e) => {
            tracing::error!("Bcrypt verify failed: {}", e);
            Ok(Json(LoginResponse::failed(
                "Gagal memeriksa kata sandi. Coba lagi.",
            )))
        }
    }
}

#[derive(Serialize)]
pub struct SessionInfo {
    pub email: String,
    pub nama: String,
    pub peran: Role,
    pub warga_id: Option<String>,
    pub blok: Option<String>,
}

/// Echoes the verified claims so the client can rebuild its session after a
/// reload without re-authenticating.
pub async fn check_session(Extension(claims): Extension<Claims>) -> Json<SessionInfo> {
    Json(SessionInfo {
        email: claims.sub,
        nama: claims.nama,
        peran: claims.peran,
        warga_id: claims.warga_id,
        blok: claims.blok,
    })
}

/// Every mutation goes through this gate before the first store call.
pub fn ensure_admin(claims: &Claims) -> RukunResult<()> {
    if claims.is_admin() {
        Ok(())
    } else {
        Err(RukunError::Forbidden(
            "Hanya admin yang dapat mengubah data.".to_string(),
        ))
    }
}
