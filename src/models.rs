use serde::{Deserialize, Deserializer, Serialize};

/// Staff roles. Anything the sheet holds that we do not recognize maps to
/// `Unknown`, which is denied everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Pengawas,
    Koordinator,
    User,
    #[serde(other)]
    Unknown,
}

/// Calendar months as the sheet stores them: full Indonesian names.
/// A row with an unrecognized month fails to deserialize and is skipped
/// (and logged) by the typed fetch helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Bulan {
    Januari,
    Februari,
    Maret,
    April,
    Mei,
    Juni,
    Juli,
    Agustus,
    September,
    Oktober,
    November,
    Desember,
}

impl Bulan {
    pub const ALL: [Bulan; 12] = [
        Bulan::Januari,
        Bulan::Februari,
        Bulan::Maret,
        Bulan::April,
        Bulan::Mei,
        Bulan::Juni,
        Bulan::Juli,
        Bulan::Agustus,
        Bulan::September,
        Bulan::Oktober,
        Bulan::November,
        Bulan::Desember,
    ];

    /// 0-based position in the calendar year.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Inverse of `index`, wrapping modulo 12.
    pub fn from_index(idx: usize) -> Bulan {
        Bulan::ALL[idx % 12]
    }

    /// From a chrono 1-based month number.
    pub fn from_month_number(month: u32) -> Bulan {
        Bulan::from_index(month.saturating_sub(1) as usize)
    }

    pub fn nama(&self) -> &'static str {
        match self {
            Bulan::Januari => "Januari",
            Bulan::Februari => "Februari",
            Bulan::Maret => "Maret",
            Bulan::April => "April",
            Bulan::Mei => "Mei",
            Bulan::Juni => "Juni",
            Bulan::Juli => "Juli",
            Bulan::Agustus => "Agustus",
            Bulan::September => "September",
            Bulan::Oktober => "Oktober",
            Bulan::November => "November",
            Bulan::Desember => "Desember",
        }
    }

    /// Short label used on chart axes ("Jan", "Agu", ...).
    pub fn singkat(&self) -> &'static str {
        match self {
            Bulan::Januari => "Jan",
            Bulan::Februari => "Feb",
            Bulan::Maret => "Mar",
            Bulan::April => "Apr",
            Bulan::Mei => "Mei",
            Bulan::Juni => "Jun",
            Bulan::Juli => "Jul",
            Bulan::Agustus => "Agu",
            Bulan::September => "Sep",
            Bulan::Oktober => "Okt",
            Bulan::November => "Nov",
            Bulan::Desember => "Des",
        }
    }
}

/// Dues payment status. The sheet is hand-edited; any value that is not
/// exactly "Lunas" reads as unpaid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IuranStatus {
    Lunas,
    #[serde(rename = "Belum Lunas")]
    #[serde(other)]
    BelumLunas,
}

impl Default for IuranStatus {
    fn default() -> Self {
        IuranStatus::BelumLunas
    }
}

/// Sheet cells typed as numbers arrive as numbers, numeric strings or blanks
/// depending on who last edited the row. Anything unparseable reads as 0.
fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_i64().unwrap_or_else(|| {
            n.as_f64().map(|f| f.round() as i64).unwrap_or(0)
        }),
        serde_json::Value::String(s) => s.trim().parse::<i64>().unwrap_or_else(|_| {
            s.trim().parse::<f64>().map(|f| f.round() as i64).unwrap_or(0)
        }),
        _ => 0,
    })
}

fn lenient_i32<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_i64(deserializer).map(|n| n as i32)
}

/// Resident record: one row per housing unit, keyed by the household head.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Warga {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub nama: String,
    #[serde(default)]
    pub jenis_kelamin: String,
    #[serde(default)]
    pub blok: String,
    #[serde(default)]
    pub nomor_rumah: String,
    #[serde(default)]
    pub status_tinggal: String,
    #[serde(default)]
    pub status_ktp: String,
    #[serde(default)]
    pub no_hp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Warga {
    /// A unit with no occupant. The registry keeps one row per house, so an
    /// empty unit is a row whose name is blank or the placeholder "Kosong".
    pub fn is_vacant(&self) -> bool {
        let nama = self.nama.trim();
        nama.is_empty() || nama == "Kosong"
    }

    pub fn alamat(&self) -> String {
        format!("Blok {}/{}", self.blok, self.nomor_rumah)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AnggotaKeluarga {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub warga_id: String,
    #[serde(default)]
    pub no_kk: String,
    #[serde(default)]
    pub nama: String,
    #[serde(default)]
    pub hubungan: String,
    #[serde(default)]
    pub jenis_kelamin: String,
    #[serde(default)]
    pub tanggal_lahir: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dokumen_url: Option<String>,
}

impl AnggotaKeluarga {
    /// A member row that holds no person, same convention as a vacant unit:
    /// blank name or the placeholder "Kosong".
    pub fn is_placeholder(&self) -> bool {
        let nama = self.nama.trim();
        nama.is_empty() || nama == "Kosong"
    }
}

/// Monthly dues. The per-component amounts are stored; the total never is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Iuran {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub warga_id: String,
    pub bulan: Bulan,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub tahun: i32,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub iuran_lingkungan: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub iuran_sosial: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub iuran_masjid: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tanggal_bayar: Option<String>,
    #[serde(default)]
    pub status: IuranStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metode_bayar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dicatat_oleh: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bukti_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catatan: Option<String>,
}

impl Iuran {
    pub fn total(&self) -> i64 {
        self.iuran_lingkungan + self.iuran_sosial + self.iuran_masjid
    }

    pub fn is_lunas(&self) -> bool {
        self.status == IuranStatus::Lunas
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Pengeluaran {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub tanggal: String,
    #[serde(default)]
    pub kategori: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_kategori: Option<String>,
    #[serde(default)]
    pub deskripsi: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub jumlah: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metode_bayar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bukti_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dicatat_oleh: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PemasukanLain {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub tanggal: String,
    #[serde(default)]
    pub deskripsi: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub jumlah: i64,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Inventaris {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub nama_barang: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub jumlah: i64,
    #[serde(default)]
    pub lokasi: String,
    #[serde(default)]
    pub penanggung_jawab: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catatan: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Pengumuman {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub judul: String,
    #[serde(default)]
    pub isi: String,
    #[serde(default)]
    pub tanggal_terbit: String,
    #[serde(default)]
    pub penulis: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

/// Staff account. `password_hash` stays in the row for store round-trips;
/// list handlers blank it before responding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pengurus {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub warga_id: String,
    #[serde(default)]
    pub nama: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub jabatan: String,
    #[serde(default = "default_role")]
    pub peran: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blok: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

fn default_role() -> Role {
    Role::Unknown
}

// ---- Dashboard statistics DTOs ----

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WargaStats {
    pub total_unit: i64,
    pub total_aktif: i64,
    /// Active residents per residency status ("Tetap", "Kontrak", ...).
    pub per_status: Vec<StatusCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StatusCount {
    pub status: String,
    pub jumlah: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DemografiStats {
    pub total_jiwa: i64,
    pub laki_laki: i64,
    pub perempuan: i64,
    pub per_blok: Vec<BlokCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BlokCount {
    pub blok: String,
    pub jumlah: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IuranBulanIni {
    pub bulan: String,
    pub tahun: i32,
    pub jumlah_lunas: i64,
    /// round(lunas / active residents * 100), 0 when there are no residents.
    pub persentase: i64,
    pub total_lingkungan: i64,
    pub total_sosial: i64,
    pub total_masjid: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PengeluaranBulanIni {
    pub total: i64,
    pub per_kategori: Vec<KategoriCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KategoriCount {
    pub kategori: String,
    pub jumlah: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SaldoStats {
    pub total_pemasukan: i64,
    pub total_pengeluaran: i64,
    pub saldo: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TrenBulan {
    /// Short month + 2-digit year, e.g. "Agu 25".
    pub label: String,
    pub pemasukan: i64,
    pub pengeluaran: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DashboardStats {
    pub warga: WargaStats,
    pub demografi: DemografiStats,
    pub iuran_bulan_ini: IuranBulanIni,
    pub pengeluaran_bulan_ini: PengeluaranBulanIni,
    pub saldo: SaldoStats,
    pub tren: Vec<TrenBulan>,
}
