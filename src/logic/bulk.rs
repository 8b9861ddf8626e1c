use crate::error::{RukunError, RukunResult};
use crate::models::Bulan;

/// Hard ceiling on one generation run. Catches a mistyped year before it
/// floods the sheet with rows.
pub const MAKS_RENTANG_BULAN: i32 = 24;

/// Years the generator accepts. Anything outside this window is a typo.
pub const TAHUN_MIN: i32 = 1900;
pub const TAHUN_MAX: i32 = 9999;

/// Expands an inclusive month range into (month, year) pairs.
///
/// Without an explicit end year, an end month earlier in the calendar than
/// the start month means the range crosses into the next year: November to
/// Februari starting 2024 yields Nov 2024 through Feb 2025. The target year
/// is fixed before expansion; it never shifts per iteration. Both years must
/// sit inside the supported window; they are checked before any arithmetic.
pub fn expand_month_range(
    mulai: Bulan,
    selesai: Bulan,
    tahun: i32,
    tahun_selesai: Option<i32>,
) -> RukunResult<Vec<(Bulan, i32)>> {
    if !(TAHUN_MIN..=TAHUN_MAX).contains(&tahun) {
        return Err(RukunError::Validation(format!(
            "Tahun {} di luar rentang {}-{}.",
            tahun, TAHUN_MIN, TAHUN_MAX
        )));
    }
    if let Some(t) = tahun_selesai {
        if !(TAHUN_MIN..=TAHUN_MAX).contains(&t) {
            return Err(RukunError::Validation(format!(
                "Tahun {} di luar rentang {}-{}.",
                t, TAHUN_MIN, TAHUN_MAX
            )));
        }
    }

    let tahun_akhir = match tahun_selesai {
        Some(t) if t < tahun => {
            return Err(RukunError::Validation(
                "Tahun selesai tidak boleh sebelum tahun mulai.".to_string(),
            ));
        }
        Some(t) => t,
        None => {
            if selesai.index() < mulai.index() {
                tahun + 1
            } else {
                tahun
            }
        }
    };

    let jumlah =
        (tahun_akhir - tahun) * 12 + (selesai.index() as i32 - mulai.index() as i32) + 1;

    if jumlah < 1 {
        return Err(RukunError::Validation(
            "Rentang bulan tidak valid.".to_string(),
        ));
    }
    if jumlah > MAKS_RENTANG_BULAN {
        return Err(RukunError::Validation(format!(
            "Rentang melebihi batas {} bulan ({} bulan diminta).",
            MAKS_RENTANG_BULAN, jumlah
        )));
    }

    let awal = tahun * 12 + mulai.index() as i32;
    Ok((awal..awal + jumlah)
        .map(|total| {
            (
                Bulan::from_index(total.rem_euclid(12) as usize),
                total.div_euclid(12),
            )
        })
        .collect())
}
