use crate::models::{AnggotaKeluarga, Iuran, Warga};
use serde::Serialize;
use std::collections::HashMap;

/// Shown when a record points at a resident that no longer exists.
pub const PEMILIK_TIDAK_DIKETAHUI: &str = "Tidak Diketahui";

/// One lookup table per request; O(n) once instead of a scan per record.
pub fn index_warga(warga: &[Warga]) -> HashMap<&str, &Warga> {
    warga.iter().map(|w| (w.id.as_str(), w)).collect()
}

/// Dues row joined with its owner. The blok is carried as its own field so
/// downstream grouping never has to take the address apart again.
#[derive(Debug, Clone, Serialize)]
pub struct IuranView {
    #[serde(flatten)]
    pub iuran: Iuran,
    pub nama_warga: String,
    pub alamat: String,
    pub blok: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnggotaView {
    #[serde(flatten)]
    pub anggota: AnggotaKeluarga,
    pub nama_kepala: String,
    pub alamat: String,
    pub blok: String,
}

fn owner_fields(warga_by_id: &HashMap<&str, &Warga>, warga_id: &str) -> (String, String, String) {
    match warga_by_id.get(warga_id) {
        Some(w) => (w.nama.clone(), w.alamat(), w.blok.clone()),
        None => (
            PEMILIK_TIDAK_DIKETAHUI.to_string(),
            PEMILIK_TIDAK_DIKETAHUI.to_string(),
            String::new(),
        ),
    }
}

pub fn enrich_iuran(iuran: Vec<Iuran>, warga_by_id: &HashMap<&str, &Warga>) -> Vec<IuranView> {
    iuran
        .into_iter()
        .map(|record| {
            let (nama_warga, alamat, blok) = owner_fields(warga_by_id, &record.warga_id);
            IuranView {
                iuran: record,
                nama_warga,
                alamat,
                blok,
            }
        })
        .collect()
}

pub fn enrich_anggota(
    anggota: Vec<AnggotaKeluarga>,
    warga_by_id: &HashMap<&str, &Warga>,
) -> Vec<AnggotaView> {
    anggota
        .into_iter()
        .map(|record| {
            let (nama_kepala, alamat, blok) = owner_fields(warga_by_id, &record.warga_id);
            AnggotaView {
                anggota: record,
                nama_kepala,
                alamat,
                blok,
            }
        })
        .collect()
}
