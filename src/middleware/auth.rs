use crate::error::RukunError;
use crate::logic::scope::ScopeContext;
use crate::models::Role;
use axum::{extract::Request, http::header, middleware::Next, response::Response};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Staff account email.
    pub sub: String,
    pub nama: String,
    pub peran: Role,
    pub warga_id: Option<String>,
    pub blok: Option<String>,
    pub exp: usize,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.peran == Role::Admin
    }

    pub fn scope(&self) -> ScopeContext {
        ScopeContext::new(self.peran, self.warga_id.clone(), self.blok.clone())
    }
}

pub fn get_jwt_secret() -> Vec<u8> {
    std::env::var("JWT_SECRET")
        .unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, using insecure default!");
            "insecure-development-secret-key-replace-me-immediately".to_string()
        })
        .into_bytes()
}

pub async fn auth_middleware(mut request: Request, next: Next) -> Result<Response, RukunError> {
    let path = request.uri().path();
    let public_routes = vec!["/api/auth/login", "/api/warga/register", "/api/ping"];

    if !path.starts_with("/api/") || public_routes.contains(&path) {
        return Ok(next.run(request).await);
    }

    let auth_header = request.headers().get(header::AUTHORIZATION);

    let auth_header = match auth_header {
        Some(header) => header
            .to_str()
            .map_err(|_| RukunError::Auth("Token tidak valid.".to_string()))?,
        None => {
            return Err(RukunError::Auth(
                "Token otorisasi tidak ditemukan.".to_string(),
            ))
        }
    };

    if !auth_header.starts_with("Bearer ") {
        return Err(RukunError::Auth("Token tidak valid.".to_string()));
    }

    let token = &auth_header["Bearer ".len()..];

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(&get_jwt_secret()),
        &Validation::default(),
    )
    .map_err(|_| RukunError::Auth("Token tidak valid atau kedaluwarsa.".to_string()))?;

    request.extensions_mut().insert(token_data.claims);

    Ok(next.run(request).await)
}
