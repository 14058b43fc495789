//! Reporting handlers for financial aggregation and data export

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::error::AppResult;
use crate::export::{self, csv::write_report_csv, pdf, xlsx::write_harvest_xlsx};
use crate::services::reporting::{ReportQuery, ReportingService};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Get dashboard metrics
pub async fn get_dashboard(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let service = ReportingService::new(state.db.clone());
    let metrics = service.get_dashboard_metrics().await?;
    Ok(Json(metrics))
}

/// Get the financial summary for a scope
pub async fn get_financial_summary(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<impl IntoResponse> {
    let service = ReportingService::new(state.db.clone());
    let report = service.financial_summary(&query).await?;
    Ok(Json(report))
}

/// Get the harvest report; `format` selects json (default), csv, xlsx or a
/// paginated plain-text print preview.
pub async fn get_harvest_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<impl IntoResponse> {
    let service = ReportingService::new(state.db.clone());
    let today = Utc::now().date_naive();

    match query.format.as_deref() {
        Some("csv") => {
            let report = service.full_report(&query, today).await?;
            let csv = write_report_csv(&report)?;
            let disposition = format!(
                "attachment; filename=\"{}\"",
                export::csv_filename(today)
            );
            Ok((
                [
                    (header::CONTENT_TYPE, "text/csv".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                csv,
            )
                .into_response())
        }
        Some("xlsx") => {
            let rows = service.harvest_report(&query).await?;
            let bytes = write_harvest_xlsx(&rows)?;
            let disposition = format!(
                "attachment; filename=\"{}\"",
                export::xlsx_filename(today)
            );
            Ok((
                [
                    (
                        header::CONTENT_TYPE,
                        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
                            .to_string(),
                    ),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                bytes,
            )
                .into_response())
        }
        Some("print") => {
            // Paginated the way the PDF export lays it out
            let report = service.full_report(&query, today).await?;
            let mut sink = pdf::PlainTextSink::default();
            pdf::render_report(&report, &mut sink);
            let text = sink
                .pages
                .iter()
                .map(|page| page.join("\n"))
                .collect::<Vec<_>>()
                .join("\n\u{0c}\n");
            Ok((
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string())],
                text,
            )
                .into_response())
        }
        _ => {
            let rows = service.harvest_report(&query).await?;
            Ok((StatusCode::OK, Json(serde_json::json!({ "harvests": rows }))).into_response())
        }
    }
}

/// Get the income statement for a period
pub async fn get_income_statement(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> AppResult<impl IntoResponse> {
    let service = ReportingService::new(state.db.clone());
    let statement = service
        .income_statement(query.start_date, query.end_date)
        .await?;
    Ok(Json(statement))
}
