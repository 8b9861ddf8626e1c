use crate::logic::dates::{in_month, month_label, parse_date_safe, trailing_months};
use crate::logic::enrich::index_warga;
use crate::models::{
    AnggotaKeluarga, BlokCount, Bulan, DashboardStats, DemografiStats, Iuran, IuranBulanIni,
    KategoriCount, PemasukanLain, Pengeluaran, PengeluaranBulanIni, SaldoStats, StatusCount,
    TrenBulan, Warga, WargaStats,
};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

const BLOK_TIDAK_DIKETAHUI: &str = "N/A";

pub fn warga_stats(warga: &[Warga]) -> WargaStats {
    let total_unit = warga.len() as i64;
    let mut total_aktif = 0i64;
    let mut per_status: BTreeMap<String, i64> = BTreeMap::new();

    for w in warga {
        if w.is_vacant() {
            continue;
        }
        total_aktif += 1;
        *per_status.entry(w.status_tinggal.clone()).or_insert(0) += 1;
    }

    WargaStats {
        total_unit,
        total_aktif,
        per_status: per_status
            .into_iter()
            .map(|(status, jumlah)| StatusCount { status, jumlah })
            .collect(),
    }
}

/// Population view: household heads plus registered members. Vacant units
/// and placeholder member rows do not count as people.
pub fn demografi_stats(warga: &[Warga], anggota: &[AnggotaKeluarga]) -> DemografiStats {
    let warga_by_id = index_warga(warga);

    let mut total_jiwa = 0i64;
    let mut laki_laki = 0i64;
    let mut perempuan = 0i64;
    let mut per_blok: BTreeMap<String, i64> = BTreeMap::new();

    let mut hitung = |jenis_kelamin: &str, blok: &str| {
        total_jiwa += 1;
        match jenis_kelamin.trim() {
            "L" => laki_laki += 1,
            "P" => perempuan += 1,
            _ => {}
        }
        let blok = if blok.trim().is_empty() {
            BLOK_TIDAK_DIKETAHUI.to_string()
        } else {
            blok.to_string()
        };
        *per_blok.entry(blok).or_insert(0) += 1;
    };

    for w in warga {
        if w.is_vacant() {
            continue;
        }
        hitung(&w.jenis_kelamin, &w.blok);
    }

    for a in anggota {
        if a.is_placeholder() {
            continue;
        }
        let blok = warga_by_id
            .get(a.warga_id.as_str())
            .map(|w| w.blok.as_str())
            .unwrap_or("");
        hitung(&a.jenis_kelamin, blok);
    }

    DemografiStats {
        total_jiwa,
        laki_laki,
        perempuan,
        per_blok: per_blok
            .into_iter()
            .map(|(blok, jumlah)| BlokCount { blok, jumlah })
            .collect(),
    }
}

/// Collection picture for the calendar month `today` falls in, matched on
/// the dues record's own month/year fields. Only paid records count toward
/// the sums.
pub fn iuran_bulan_ini(iuran: &[Iuran], total_aktif: i64, today: NaiveDate) -> IuranBulanIni {
    let bulan = Bulan::from_month_number(today.month());
    let tahun = today.year();

    let mut jumlah_lunas = 0i64;
    let mut total_lingkungan = 0i64;
    let mut total_sosial = 0i64;
    let mut total_masjid = 0i64;

    for record in iuran {
        if record.bulan != bulan || record.tahun != tahun || !record.is_lunas() {
            continue;
        }
        jumlah_lunas += 1;
        total_lingkungan += record.iuran_lingkungan;
        total_sosial += record.iuran_sosial;
        total_masjid += record.iuran_masjid;
    }

    let persentase = if total_aktif > 0 {
        ((jumlah_lunas as f64 / total_aktif as f64) * 100.0).round() as i64
    } else {
        0
    };

    IuranBulanIni {
        bulan: bulan.nama().to_string(),
        tahun,
        jumlah_lunas,
        persentase,
        total_lingkungan,
        total_sosial,
        total_masjid,
        total: total_lingkungan + total_sosial + total_masjid,
    }
}

pub fn pengeluaran_bulan_ini(pengeluaran: &[Pengeluaran], today: NaiveDate) -> PengeluaranBulanIni {
    let mut total = 0i64;
    let mut per_kategori: BTreeMap<String, i64> = BTreeMap::new();

    for p in pengeluaran {
        if !in_month(&p.tanggal, today.year(), today.month()) {
            continue;
        }
        total += p.jumlah;
        *per_kategori.entry(p.kategori.clone()).or_insert(0) += p.jumlah;
    }

    PengeluaranBulanIni {
        total,
        per_kategori: per_kategori
            .into_iter()
            .map(|(kategori, jumlah)| KategoriCount { kategori, jumlah })
            .collect(),
    }
}

/// All-time cash position: paid dues plus other income, against all
/// recorded expenses.
pub fn saldo_stats(
    iuran: &[Iuran],
    pemasukan: &[PemasukanLain],
    pengeluaran: &[Pengeluaran],
) -> SaldoStats {
    let dari_iuran: i64 = iuran
        .iter()
        .filter(|i| i.is_lunas())
        .map(|i| i.total())
        .sum();
    let dari_lain: i64 = pemasukan.iter().map(|p| p.jumlah).sum();
    let total_pemasukan = dari_iuran + dari_lain;
    let total_pengeluaran: i64 = pengeluaran.iter().map(|p| p.jumlah).sum();

    SaldoStats {
        total_pemasukan,
        total_pengeluaran,
        saldo: total_pemasukan - total_pengeluaran,
    }
}

/// Six-month cash-flow series, oldest first, current month last. Dues land
/// in the month they were paid, so an unpaid or undated record never moves
/// the chart.
pub fn tren_enam_bulan(
    iuran: &[Iuran],
    pemasukan: &[PemasukanLain],
    pengeluaran: &[Pengeluaran],
    today: NaiveDate,
) -> Vec<TrenBulan> {
    let falls_in = |tanggal: &str, bulan: Bulan, tahun: i32| -> bool {
        parse_date_safe(tanggal)
            .map(|d| d.year() == tahun && d.month0() as usize == bulan.index())
            .unwrap_or(false)
    };

    trailing_months(today, 6)
        .into_iter()
        .map(|(bulan, tahun)| {
            let dari_iuran: i64 = iuran
                .iter()
                .filter(|i| i.is_lunas())
                .filter(|i| {
                    i.tanggal_bayar
                        .as_deref()
                        .map(|t| falls_in(t, bulan, tahun))
                        .unwrap_or(false)
                })
                .map(|i| i.total())
                .sum();
            let dari_lain: i64 = pemasukan
                .iter()
                .filter(|p| falls_in(&p.tanggal, bulan, tahun))
                .map(|p| p.jumlah)
                .sum();
            let keluar: i64 = pengeluaran
                .iter()
                .filter(|p| falls_in(&p.tanggal, bulan, tahun))
                .map(|p| p.jumlah)
                .sum();

            TrenBulan {
                label: month_label(bulan, tahun),
                pemasukan: dari_iuran + dari_lain,
                pengeluaran: keluar,
            }
        })
        .collect()
}

pub fn compute_dashboard_stats(
    warga: &[Warga],
    anggota: &[AnggotaKeluarga],
    iuran: &[Iuran],
    pengeluaran: &[Pengeluaran],
    pemasukan: &[PemasukanLain],
    today: NaiveDate,
) -> DashboardStats {
    let warga_stat = warga_stats(warga);
    let total_aktif = warga_stat.total_aktif;

    DashboardStats {
        warga: warga_stat,
        demografi: demografi_stats(warga, anggota),
        iuran_bulan_ini: iuran_bulan_ini(iuran, total_aktif, today),
        pengeluaran_bulan_ini: pengeluaran_bulan_ini(pengeluaran, today),
        saldo: saldo_stats(iuran, pemasukan, pengeluaran),
        tren: tren_enam_bulan(iuran, pemasukan, pengeluaran, today),
    }
}
