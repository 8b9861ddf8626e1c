use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::error::{RukunError, RukunResult};

/// Sheet tab names. One tab per entity.
pub mod tables {
    pub const WARGA: &str = "warga";
    pub const ANGGOTA: &str = "anggota_keluarga";
    pub const IURAN: &str = "iuran";
    pub const PENGELUARAN: &str = "pengeluaran";
    pub const PEMASUKAN: &str = "pemasukan_lain";
    pub const INVENTARIS: &str = "inventaris";
    pub const PENGUMUMAN: &str = "pengumuman";
    pub const PENGURUS: &str = "pengurus";
}

/// The four operations the spreadsheet API exposes per tab. Rows are flat
/// JSON objects keyed by a string `id`. `update_by_id` merges the partial
/// into the existing row; fields absent from the partial keep their values.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_all(&self, table: &str) -> RukunResult<Vec<Value>>;

    async fn append(&self, table: &str, row: Value) -> RukunResult<Value>;

    async fn update_by_id(&self, table: &str, id: &str, partial: Value) -> RukunResult<Value>;

    async fn delete_by_id(&self, table: &str, id: &str) -> RukunResult<()>;
}

/// Remote spreadsheet over its JSON HTTP bridge:
/// `GET/POST {base}/{table}`, `PATCH/DELETE {base}/{table}/{id}`.
/// The sheet is the sole source of truth, so every call goes to the wire;
/// there is no cache and no retry.
pub struct SheetStore {
    base_url: String,
    client: reqwest::Client,
    headers: HeaderMap,
}

impl SheetStore {
    pub fn new(base_url: String, token: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let mut headers = HeaderMap::new();
        if let Some(token) = token {
            if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", token)) {
                headers.insert(AUTHORIZATION, value);
            } else {
                tracing::warn!("SHEET_API_TOKEN contains invalid header characters, ignoring");
            }
        }

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            headers,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.base_url, table)
    }

    fn row_url(&self, table: &str, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, table, id)
    }

    async fn check_status(
        &self,
        resp: reqwest::Response,
        table: &str,
        id: Option<&str>,
    ) -> RukunResult<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        if status.as_u16() == 404 {
            let id = id.unwrap_or("?");
            return Err(RukunError::NotFound(format!(
                "Data {} dengan id {} tidak ditemukan.",
                table, id
            )));
        }
        Err(RukunError::Store(format!(
            "sheet api returned {} for table {}",
            status, table
        )))
    }
}

#[async_trait]
impl RecordStore for SheetStore {
    async fn list_all(&self, table: &str) -> RukunResult<Vec<Value>> {
        let resp = self
            .client
            .get(self.table_url(table))
            .headers(self.headers.clone())
            .send()
            .await?;
        let resp = self.check_status(resp, table, None).await?;
        let body: Value = resp.json().await?;

        // Some bridge deployments wrap the rows in {"data": [...]}.
        match body {
            Value::Array(rows) => Ok(rows),
            Value::Object(mut map) => match map.remove("data") {
                Some(Value::Array(rows)) => Ok(rows),
                _ => Err(RukunError::Store(format!(
                    "unexpected list payload for table {}",
                    table
                ))),
            },
            _ => Err(RukunError::Store(format!(
                "unexpected list payload for table {}",
                table
            ))),
        }
    }

    async fn append(&self, table: &str, row: Value) -> RukunResult<Value> {
        let resp = self
            .client
            .post(self.table_url(table))
            .headers(self.headers.clone())
            .json(&row)
            .send()
            .await?;
        let resp = self.check_status(resp, table, None).await?;
        let body: Value = resp.json().await.unwrap_or(Value::Null);
        if body.is_object() {
            Ok(body)
        } else {
            Ok(row)
        }
    }

    async fn update_by_id(&self, table: &str, id: &str, partial: Value) -> RukunResult<Value> {
        let resp = self
            .client
            .patch(self.row_url(table, id))
            .headers(self.headers.clone())
            .json(&partial)
            .send()
            .await?;
        let resp = self.check_status(resp, table, Some(id)).await?;
        let body: Value = resp.json().await.unwrap_or(Value::Null);
        if body.is_object() {
            Ok(body)
        } else {
            Ok(partial)
        }
    }

    async fn delete_by_id(&self, table: &str, id: &str) -> RukunResult<()> {
        let resp = self
            .client
            .delete(self.row_url(table, id))
            .headers(self.headers.clone())
            .send()
            .await?;
        self.check_status(resp, table, Some(id)).await?;
        Ok(())
    }
}

/// In-process store with the same merge/delete semantics as the sheet
/// bridge. Serves development runs without a configured sheet, and every
/// test.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, Vec<Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn row_id_matches(row: &Value, id: &str) -> bool {
    row.get("id").and_then(Value::as_str) == Some(id)
}

fn merge_row(target: &mut Value, partial: &Value) {
    if let (Value::Object(target), Value::Object(partial)) = (target, partial) {
        for (key, value) in partial {
            target.insert(key.clone(), value.clone());
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_all(&self, table: &str) -> RukunResult<Vec<Value>> {
        let tables = self.tables.lock().await;
        Ok(tables.get(table).cloned().unwrap_or_default())
    }

    async fn append(&self, table: &str, row: Value) -> RukunResult<Value> {
        if !row.is_object() {
            return Err(RukunError::Store(format!(
                "append to {} expects a JSON object",
                table
            )));
        }
        let mut tables = self.tables.lock().await;
        tables.entry(table.to_string()).or_default().push(row.clone());
        Ok(row)
    }

    async fn update_by_id(&self, table: &str, id: &str, partial: Value) -> RukunResult<Value> {
        let mut tables = self.tables.lock().await;
        let rows = tables.entry(table.to_string()).or_default();
        match rows.iter_mut().find(|row| row_id_matches(row, id)) {
            Some(row) => {
                merge_row(row, &partial);
                Ok(row.clone())
            }
            None => Err(RukunError::NotFound(format!(
                "Data {} dengan id {} tidak ditemukan.",
                table, id
            ))),
        }
    }

    async fn delete_by_id(&self, table: &str, id: &str) -> RukunResult<()> {
        let mut tables = self.tables.lock().await;
        let rows = tables.entry(table.to_string()).or_default();
        let before = rows.len();
        rows.retain(|row| !row_id_matches(row, id));
        if rows.len() == before {
            return Err(RukunError::NotFound(format!(
                "Data {} dengan id {} tidak ditemukan.",
                table, id
            )));
        }
        Ok(())
    }
}

/// Pick the backend from the environment. Without SHEET_API_URL the server
/// still comes up, on a volatile in-memory store.
pub fn init_store() -> Arc<dyn RecordStore> {
    match std::env::var("SHEET_API_URL") {
        Ok(url) if !url.trim().is_empty() => {
            let token = std::env::var("SHEET_API_TOKEN").ok();
            tracing::info!("Store: sheet bridge at {}", url);
            Arc::new(SheetStore::new(url, token))
        }
        _ => {
            tracing::warn!("SHEET_API_URL not set. Using in-memory store; data will not survive a restart.");
            Arc::new(MemoryStore::new())
        }
    }
}

/// Deserialize every row of a table, skipping rows that do not parse.
/// A hand-edited sheet must never take a whole listing down with it.
pub async fn fetch_all<T: DeserializeOwned>(
    store: &dyn RecordStore,
    table: &str,
) -> RukunResult<Vec<T>> {
    let rows = store.list_all(table).await?;
    let mut parsed = Vec::with_capacity(rows.len());
    for row in rows {
        match serde_json::from_value::<T>(row) {
            Ok(record) => parsed.push(record),
            Err(e) => tracing::warn!("Skipping malformed {} row: {}", table, e),
        }
    }
    Ok(parsed)
}

/// Variant for multi-source aggregations: a failed fetch degrades to an
/// empty set for that source instead of failing the whole response.
pub async fn fetch_all_or_empty<T: DeserializeOwned>(
    store: &dyn RecordStore,
    table: &str,
) -> Vec<T> {
    match fetch_all(store, table).await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!("Fetch {} failed: {}", table, e);
            Vec::new()
        }
    }
}

/// First-run seed: without a single staff account nobody could ever log in.
pub async fn ensure_seed_admin(store: &dyn RecordStore) -> RukunResult<()> {
    let existing = store.list_all(tables::PENGURUS).await?;
    if !existing.is_empty() {
        return Ok(());
    }

    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@rukun.local".to_string());
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        tracing::warn!("ADMIN_PASSWORD not set. Seeding admin with the default password.");
        "admin".to_string()
    });
    let hash = bcrypt::hash(&password, bcrypt::DEFAULT_COST)?;

    let row = serde_json::json!({
        "id": format!("P-{}", &uuid::Uuid::new_v4().to_string()[..8].to_uppercase()),
        "warga_id": "",
        "nama": "Administrator",
        "email": email,
        "jabatan": "Admin Sistem",
        "peran": "admin",
        "password_hash": hash,
        "created_at": chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    });
    store.append(tables::PENGURUS, row).await?;
    tracing::info!("Seeded initial admin account");
    Ok(())
}
