//! XLSX serialization of the harvest report
//!
//! One worksheet per export, a header row and one row per record.

use rust_xlsxwriter::{Format, Workbook};

use crate::error::{AppError, AppResult};
use crate::services::reporting::HarvestReportRow;
use shared::format::{format_currency_pen, format_date_pe};

const HEADERS: [&str; 8] = [
    "Fecha",
    "Sector",
    "Origen",
    "Estado",
    "Cantidad estimada",
    "Cantidad real",
    "Ingreso",
    "Costo de cosecha",
];

/// Serialize the harvest rows into an XLSX workbook buffer
pub fn write_harvest_xlsx(rows: &[HarvestReportRow]) -> AppResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Siembras").map_err(xlsx_error)?;

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(xlsx_error)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        let date = row.actual_date.unwrap_or(row.planned_date);
        worksheet
            .write_string(r, 0, format_date_pe(date))
            .map_err(xlsx_error)?;
        worksheet
            .write_string(r, 1, &row.sector_name)
            .map_err(xlsx_error)?;
        worksheet
            .write_string(r, 2, &row.lot_origin)
            .map_err(xlsx_error)?;
        worksheet
            .write_string(r, 3, row.status.as_str())
            .map_err(xlsx_error)?;
        worksheet
            .write_number(r, 4, row.estimated_quantity as f64)
            .map_err(xlsx_error)?;
        match row.actual_quantity {
            Some(q) => {
                worksheet
                    .write_number(r, 5, q as f64)
                    .map_err(xlsx_error)?;
            }
            None => {
                worksheet.write_string(r, 5, "").map_err(xlsx_error)?;
            }
        }
        worksheet
            .write_string(r, 6, format_currency_pen(row.revenue))
            .map_err(xlsx_error)?;
        worksheet
            .write_string(r, 7, format_currency_pen(row.harvest_cost))
            .map_err(xlsx_error)?;
    }

    workbook.save_to_buffer().map_err(xlsx_error)
}

fn xlsx_error(e: rust_xlsxwriter::XlsxError) -> AppError {
    AppError::ExportError(format!("XLSX error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use shared::models::HarvestStatus;
    use uuid::Uuid;

    fn row() -> HarvestReportRow {
        HarvestReportRow {
            id: Uuid::new_v4(),
            lot_id: Uuid::new_v4(),
            sector_id: Uuid::new_v4(),
            lot_origin: "hatchery Casma".to_string(),
            sector_name: "Samanco".to_string(),
            planned_date: NaiveDate::from_ymd_opt(2025, 5, 10).unwrap(),
            actual_date: None,
            status: HarvestStatus::Planned,
            estimated_quantity: 20000,
            actual_quantity: None,
            revenue: Decimal::ZERO,
            harvest_cost: Decimal::ZERO,
        }
    }

    #[test]
    fn test_xlsx_buffer_is_a_zip() {
        let bytes = write_harvest_xlsx(&[row()]).unwrap();
        // XLSX is a zip container
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[test]
    fn test_xlsx_empty_report_still_writes_headers() {
        let bytes = write_harvest_xlsx(&[]).unwrap();
        assert!(!bytes.is_empty());
    }
}
