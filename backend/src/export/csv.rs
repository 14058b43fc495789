//! CSV serialization of the assembled report
//!
//! Flat UTF-8 rows; sections open with a plain header row, followed by
//! their records.

use crate::error::{AppError, AppResult};
use crate::services::reporting::FullReport;
use shared::format::{format_currency_pen, format_date_pe, format_percent};

/// Serialize the full report as CSV text
pub fn write_report_csv(report: &FullReport) -> AppResult<String> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(vec![]);

    write_row(&mut wtr, &["REPORTE MARICULTURA", &format_date_pe(report.report_date)])?;
    write_row(&mut wtr, &[""])?;

    // Financial summary section
    let financial = &report.financial;
    write_row(&mut wtr, &["RESUMEN FINANCIERO"])?;
    write_row(
        &mut wtr,
        &[
            "Ingresos totales",
            &format_currency_pen(financial.summary.total_revenue),
        ],
    )?;
    write_row(
        &mut wtr,
        &[
            "Costos totales",
            &format_currency_pen(financial.summary.total_cost),
        ],
    )?;
    write_row(
        &mut wtr,
        &[
            "Costos de cosecha",
            &format_currency_pen(financial.costs.harvest_costs),
        ],
    )?;
    write_row(
        &mut wtr,
        &[
            "Gastos operativos",
            &format_currency_pen(financial.costs.operational_expenses),
        ],
    )?;
    write_row(
        &mut wtr,
        &[
            "Inversión inicial",
            &format_currency_pen(financial.costs.initial_investment),
        ],
    )?;
    write_row(
        &mut wtr,
        &[
            "Utilidad bruta",
            &format_currency_pen(financial.summary.gross_profit),
        ],
    )?;
    write_row(
        &mut wtr,
        &[
            "Utilidad neta",
            &format_currency_pen(financial.summary.net_profit),
        ],
    )?;
    write_row(
        &mut wtr,
        &["Margen", &format_percent(financial.summary.profit_margin)],
    )?;
    write_row(&mut wtr, &["ROI", &format_percent(financial.summary.roi)])?;
    write_row(&mut wtr, &[""])?;

    // Quantities section
    write_row(&mut wtr, &["CANTIDADES"])?;
    write_row(
        &mut wtr,
        &[
            "Unidades",
            &financial.quantities.total_units.to_string(),
        ],
    )?;
    write_row(&mut wtr, &["Manojos", &financial.quantities.manojos.to_string()])?;
    write_row(&mut wtr, &["Mallas", &financial.quantities.mallas.to_string()])?;
    write_row(&mut wtr, &[""])?;

    // Harvest section
    write_row(&mut wtr, &["COSECHAS"])?;
    write_row(
        &mut wtr,
        &[
            "Fecha",
            "Sector",
            "Origen",
            "Estado",
            "Cantidad estimada",
            "Cantidad real",
            "Ingreso",
            "Costo de cosecha",
        ],
    )?;
    for row in &report.harvests {
        let date = row.actual_date.unwrap_or(row.planned_date);
        write_row(
            &mut wtr,
            &[
                &format_date_pe(date),
                &row.sector_name,
                &row.lot_origin,
                row.status.as_str(),
                &row.estimated_quantity.to_string(),
                &row
                    .actual_quantity
                    .map(|q| q.to_string())
                    .unwrap_or_default(),
                &format_currency_pen(row.revenue),
                &format_currency_pen(row.harvest_cost),
            ],
        )?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::ExportError(format!("CSV writer error: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| AppError::ExportError(format!("UTF-8 conversion error: {}", e)))
}

fn write_row<W: std::io::Write>(wtr: &mut csv::Writer<W>, cells: &[&str]) -> AppResult<()> {
    wtr.write_record(cells)
        .map_err(|e| AppError::ExportError(format!("CSV serialization error: {}", e)))
}
