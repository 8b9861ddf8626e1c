use crate::models::Bulan;
use chrono::{Datelike, NaiveDate};

/// The sheet stores dates as text. Blank or unparseable cells read as None.
pub fn parse_date_safe(date_str: &str) -> Option<NaiveDate> {
    if date_str.trim().is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date_str, "%Y%m%d"))
        .ok()
}

/// True when `date_str` falls in the given calendar month.
pub fn in_month(date_str: &str, year: i32, month: u32) -> bool {
    match parse_date_safe(date_str) {
        Some(d) => d.year() == year && d.month() == month,
        None => false,
    }
}

/// Chart label: short month name plus two-digit year, "Agu 25".
pub fn month_label(bulan: Bulan, tahun: i32) -> String {
    format!("{} {:02}", bulan.singkat(), tahun.rem_euclid(100))
}

/// The trailing `n` calendar months ending at (and including) `today`,
/// oldest first. Crossing a year boundary rolls the year back.
pub fn trailing_months(today: NaiveDate, n: usize) -> Vec<(Bulan, i32)> {
    let current = today.year() * 12 + today.month0() as i32;
    let start = current - (n as i32 - 1);
    (start..=current)
        .map(|total| {
            (
                Bulan::from_index(total.rem_euclid(12) as usize),
                total.div_euclid(12),
            )
        })
        .collect()
}
