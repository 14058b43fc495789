//! Report serialization: CSV, XLSX and PDF table layout
//!
//! This layer formats what the reporting service already computed; it never
//! derives a new number.

pub mod csv;
pub mod pdf;
pub mod xlsx;

use chrono::NaiveDate;

/// `reporte-maricultura-<ISO-date>.csv`
pub fn csv_filename(date: NaiveDate) -> String {
    format!("reporte-maricultura-{}.csv", date.format("%Y-%m-%d"))
}

/// `reporte_maricultura_<ISO-date>.pdf`
pub fn pdf_filename(date: NaiveDate) -> String {
    format!("reporte_maricultura_{}.pdf", date.format("%Y-%m-%d"))
}

/// `reporte_siembras_<ISO-date>.xlsx`
pub fn xlsx_filename(date: NaiveDate) -> String {
    format!("reporte_siembras_{}.xlsx", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filenames_carry_iso_date() {
        let d = NaiveDate::from_ymd_opt(2025, 5, 12).unwrap();
        assert_eq!(csv_filename(d), "reporte-maricultura-2025-05-12.csv");
        assert_eq!(pdf_filename(d), "reporte_maricultura_2025-05-12.pdf");
        assert_eq!(xlsx_filename(d), "reporte_siembras_2025-05-12.xlsx");
    }
}
