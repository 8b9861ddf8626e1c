use crate::models::{Role, Warga};
use std::collections::HashMap;

/// Who is asking. Built from JWT claims by the handlers; the engine itself
/// never reads ambient session state.
#[derive(Debug, Clone)]
pub struct ScopeContext {
    pub role: Role,
    pub warga_id: Option<String>,
    pub blok: Option<String>,
}

impl ScopeContext {
    pub fn new(role: Role, warga_id: Option<String>, blok: Option<String>) -> Self {
        Self {
            role,
            warga_id,
            blok,
        }
    }
}

/// Whether `warga` is visible to the caller. Unrecognized roles see nothing.
pub fn warga_visible(ctx: &ScopeContext, warga: &Warga) -> bool {
    match ctx.role {
        Role::Admin | Role::Pengawas => true,
        Role::Koordinator => match &ctx.blok {
            Some(blok) => warga.blok == *blok,
            None => false,
        },
        Role::User => match &ctx.warga_id {
            Some(id) => warga.id == *id,
            None => false,
        },
        Role::Unknown => false,
    }
}

pub fn scope_warga(ctx: &ScopeContext, warga: Vec<Warga>) -> Vec<Warga> {
    warga
        .into_iter()
        .filter(|w| warga_visible(ctx, w))
        .collect()
}

/// Scopes records that belong to a resident through a `warga_id` foreign
/// key (dues, household members). A User matches on the key itself, so
/// their records survive even if the owning row was later deleted; a
/// Koordinator needs the owner resolved to compare the blok.
pub fn scope_by_owner<T>(
    ctx: &ScopeContext,
    items: Vec<T>,
    warga_by_id: &HashMap<&str, &Warga>,
    owner_id: impl Fn(&T) -> &str,
) -> Vec<T> {
    match ctx.role {
        Role::Admin | Role::Pengawas => items,
        Role::Koordinator => {
            let blok = match &ctx.blok {
                Some(blok) => blok.clone(),
                None => return Vec::new(),
            };
            items
                .into_iter()
                .filter(|item| {
                    warga_by_id
                        .get(owner_id(item))
                        .map(|w| w.blok == blok)
                        .unwrap_or(false)
                })
                .collect()
        }
        Role::User => {
            let warga_id = match &ctx.warga_id {
                Some(id) => id.clone(),
                None => return Vec::new(),
            };
            items
                .into_iter()
                .filter(|item| owner_id(item) == warga_id)
                .collect()
        }
        Role::Unknown => Vec::new(),
    }
}

/// Community-wide records (ledgers, inventory, announcements) are visible
/// to every recognized role.
pub fn community_visible(role: Role) -> bool {
    !matches!(role, Role::Unknown)
}
