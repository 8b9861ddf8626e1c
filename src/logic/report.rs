use crate::logic::dates::parse_date_safe;
use crate::logic::enrich::{AnggotaView, IuranView};
use crate::models::{Bulan, Pengeluaran, Warga};
use chrono::Datelike;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

const BLOK_TIDAK_DIKETAHUI: &str = "N/A";
const TANPA_TANGGAL: &str = "Tanpa Tanggal";

// Group orders are fixed (months newest first, blok ascending, rows by a
// total order with the id as final tiebreak), so the same rows always
// produce the same report regardless of sheet order.

#[derive(Debug, Serialize)]
pub struct LaporanIuran {
    pub grup: Vec<GrupBulanIuran>,
    pub total: i64,
}

#[derive(Debug, Serialize)]
pub struct GrupBulanIuran {
    pub bulan: String,
    pub tahun: i32,
    pub grup_blok: Vec<GrupBlokIuran>,
    pub subtotal: i64,
}

#[derive(Debug, Serialize)]
pub struct GrupBlokIuran {
    pub blok: String,
    pub daftar: Vec<IuranView>,
    pub subtotal: i64,
}

/// Collection report over paid dues: month (newest first), then blok.
pub fn laporan_iuran(iuran: Vec<IuranView>) -> LaporanIuran {
    let mut per_bulan: BTreeMap<(i32, usize), BTreeMap<String, Vec<IuranView>>> = BTreeMap::new();

    for view in iuran {
        if !view.iuran.is_lunas() {
            continue;
        }
        let blok = if view.blok.trim().is_empty() {
            BLOK_TIDAK_DIKETAHUI.to_string()
        } else {
            view.blok.clone()
        };
        per_bulan
            .entry((view.iuran.tahun, view.iuran.bulan.index()))
            .or_default()
            .entry(blok)
            .or_default()
            .push(view);
    }

    let mut grup = Vec::new();
    let mut total = 0i64;

    for ((tahun, bulan_idx), per_blok) in per_bulan.into_iter().rev() {
        let mut grup_blok = Vec::new();
        let mut subtotal_bulan = 0i64;

        for (blok, mut daftar) in per_blok {
            daftar.sort_by(|a, b| {
                a.nama_warga
                    .cmp(&b.nama_warga)
                    .then_with(|| a.iuran.id.cmp(&b.iuran.id))
            });
            let subtotal: i64 = daftar.iter().map(|v| v.iuran.total()).sum();
            subtotal_bulan += subtotal;
            grup_blok.push(GrupBlokIuran {
                blok,
                daftar,
                subtotal,
            });
        }

        total += subtotal_bulan;
        grup.push(GrupBulanIuran {
            bulan: Bulan::from_index(bulan_idx).nama().to_string(),
            tahun,
            grup_blok,
            subtotal: subtotal_bulan,
        });
    }

    LaporanIuran { grup, total }
}

#[derive(Debug, Serialize)]
pub struct LaporanPengeluaran {
    pub grup: Vec<GrupBulanPengeluaran>,
    pub total: i64,
}

#[derive(Debug, Serialize)]
pub struct GrupBulanPengeluaran {
    pub label: String,
    pub daftar: Vec<Pengeluaran>,
    pub subtotal: i64,
}

/// Expense report grouped by calendar month of the expense date, newest
/// first. Rows whose date does not parse are kept, in a trailing bucket.
pub fn laporan_pengeluaran(pengeluaran: Vec<Pengeluaran>) -> LaporanPengeluaran {
    let mut per_bulan: BTreeMap<(i32, u32), Vec<Pengeluaran>> = BTreeMap::new();
    let mut tanpa_tanggal: Vec<Pengeluaran> = Vec::new();

    for p in pengeluaran {
        match parse_date_safe(&p.tanggal) {
            Some(d) => per_bulan.entry((d.year(), d.month())).or_default().push(p),
            None => tanpa_tanggal.push(p),
        }
    }

    let mut grup = Vec::new();
    let mut total = 0i64;

    for ((tahun, bulan), mut daftar) in per_bulan.into_iter().rev() {
        daftar.sort_by(|a, b| a.tanggal.cmp(&b.tanggal).then_with(|| a.id.cmp(&b.id)));
        let subtotal: i64 = daftar.iter().map(|p| p.jumlah).sum();
        total += subtotal;
        grup.push(GrupBulanPengeluaran {
            label: format!("{} {}", Bulan::from_month_number(bulan).nama(), tahun),
            daftar,
            subtotal,
        });
    }

    if !tanpa_tanggal.is_empty() {
        tanpa_tanggal.sort_by(|a, b| a.id.cmp(&b.id));
        let subtotal: i64 = tanpa_tanggal.iter().map(|p| p.jumlah).sum();
        total += subtotal;
        grup.push(GrupBulanPengeluaran {
            label: TANPA_TANGGAL.to_string(),
            daftar: tanpa_tanggal,
            subtotal,
        });
    }

    LaporanPengeluaran { grup, total }
}

#[derive(Debug, Serialize)]
pub struct LaporanWarga {
    pub grup: Vec<GrupBlokWarga>,
    pub total: i64,
}

#[derive(Debug, Serialize)]
pub struct GrupBlokWarga {
    pub blok: String,
    pub daftar: Vec<Warga>,
    pub jumlah: i64,
}

/// House numbers are usually numeric but the sheet does not enforce it.
/// Compare as integers when both sides parse, otherwise as text.
fn cmp_nomor_rumah(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<i64>(), b.trim().parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}

/// Registry report: every unit, vacant ones included, grouped by blok.
pub fn laporan_warga(warga: Vec<Warga>) -> LaporanWarga {
    let mut per_blok: BTreeMap<String, Vec<Warga>> = BTreeMap::new();

    for w in warga {
        let blok = if w.blok.trim().is_empty() {
            BLOK_TIDAK_DIKETAHUI.to_string()
        } else {
            w.blok.clone()
        };
        per_blok.entry(blok).or_default().push(w);
    }

    let mut grup = Vec::new();
    let mut total = 0i64;

    for (blok, mut daftar) in per_blok {
        daftar.sort_by(|a, b| {
            cmp_nomor_rumah(&a.nomor_rumah, &b.nomor_rumah).then_with(|| a.id.cmp(&b.id))
        });
        let jumlah = daftar.len() as i64;
        total += jumlah;
        grup.push(GrupBlokWarga {
            blok,
            daftar,
            jumlah,
        });
    }

    LaporanWarga { grup, total }
}

#[derive(Debug, Serialize)]
pub struct LaporanAnggota {
    pub grup: Vec<GrupBlokAnggota>,
    pub total: i64,
}

#[derive(Debug, Serialize)]
pub struct GrupBlokAnggota {
    pub blok: String,
    pub daftar: Vec<AnggotaView>,
    pub jumlah: i64,
}

/// Household members by the blok of the unit they belong to; members whose
/// unit cannot be resolved land in the "N/A" group.
pub fn laporan_anggota(anggota: Vec<AnggotaView>) -> LaporanAnggota {
    let mut per_blok: BTreeMap<String, Vec<AnggotaView>> = BTreeMap::new();

    for view in anggota {
        let blok = if view.blok.trim().is_empty() {
            BLOK_TIDAK_DIKETAHUI.to_string()
        } else {
            view.blok.clone()
        };
        per_blok.entry(blok).or_default().push(view);
    }

    let mut grup = Vec::new();
    let mut total = 0i64;

    for (blok, mut daftar) in per_blok {
        daftar.sort_by(|a, b| {
            a.anggota
                .nama
                .cmp(&b.anggota.nama)
                .then_with(|| a.anggota.id.cmp(&b.anggota.id))
        });
        let jumlah = daftar.len() as i64;
        total += jumlah;
        grup.push(GrupBlokAnggota {
            blok,
            daftar,
            jumlah,
        });
    }

    LaporanAnggota { grup, total }
}
