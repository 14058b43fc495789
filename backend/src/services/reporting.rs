//! Reporting service for financial aggregation and data export
//!
//! Fetches the stored collections and runs the shared aggregation pipeline
//! over them; the export layer consumes the assembled report without
//! recomputing anything.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::finance::{
    aggregate_costs, build_summary, realized_or_estimated, CostBreakdown, CostScope,
    FinancialSummary,
};
use shared::models::{
    Expense, HarvestPlan, HarvestStatus, IncomeRecord, Lot, Pricing,
};
use shared::query::{
    apply_filter, sort_records, FieldValue, Queryable, RecordFilter, SortDirection, SortSpec,
};
use shared::units::{convert, convert_dp, convert_rounded, QuantityUnit, RoundingMode};

use super::expense::{ExpenseQuery, ExpenseService};
use super::harvest::HarvestService;
use super::income::IncomeService;
use super::lot::LotService;
use super::pricing::PricingService;
use super::sector::SectorService;

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    db: PgPool,
}

/// Scope and filter parameters accepted by the report endpoints
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub lot_id: Option<Uuid>,
    pub sector_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub search: Option<String>,
    pub sort_field: Option<String>,
    pub sort_direction: Option<SortDirection>,
    /// "json", "csv" or "xlsx"
    pub format: Option<String>,
}

impl ReportQuery {
    /// Resolve the cost scope: a lot beats a sector beats a date range; with
    /// nothing given, the open-ended range covers everything.
    pub fn scope(&self) -> CostScope {
        if let Some(lot_id) = self.lot_id {
            return CostScope::Lot(lot_id);
        }
        if let Some(sector_id) = self.sector_id {
            return CostScope::Sector(sector_id);
        }
        let start = self
            .start_date
            .unwrap_or(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default());
        let end = self
            .end_date
            .unwrap_or(NaiveDate::from_ymd_opt(2100, 12, 31).unwrap_or_default());
        CostScope::dates(start, end)
    }

    fn record_filter(&self) -> RecordFilter {
        RecordFilter {
            date_from: self.start_date,
            date_to: self.end_date,
            sector_id: self.sector_id,
            search: self.search.clone(),
            ..Default::default()
        }
    }

    fn sort_spec(&self) -> Option<SortSpec> {
        self.sort_field.as_ref().map(|field| SortSpec {
            field: field.clone(),
            direction: self.sort_direction.unwrap_or(SortDirection::Asc),
        })
    }
}

/// Landed quantity expressed in every counting unit
#[derive(Debug, Clone, Serialize)]
pub struct QuantitySummary {
    pub total_units: i64,
    /// Whole manojos, rounded to nearest
    pub manojos: Decimal,
    /// Whole mallas, rounded down (a partial mesh-bag does not ship)
    pub mallas_enteras: Decimal,
    /// Fractional mallas with two decimals, for display
    pub mallas: Decimal,
    pub kilograms: Decimal,
}

impl QuantitySummary {
    pub fn from_units(total_units: i64) -> Self {
        let units = Decimal::from(total_units.max(0));
        Self {
            total_units: total_units.max(0),
            manojos: convert_rounded(
                units,
                QuantityUnit::Unidad,
                QuantityUnit::Manojo,
                RoundingMode::Nearest,
            ),
            mallas_enteras: convert_rounded(
                units,
                QuantityUnit::Unidad,
                QuantityUnit::Malla,
                RoundingMode::Down,
            ),
            mallas: convert_dp(
                units,
                QuantityUnit::Unidad,
                QuantityUnit::Malla,
                2,
                RoundingMode::Nearest,
            ),
            kilograms: convert(units, QuantityUnit::Unidad, QuantityUnit::Kilogramo),
        }
    }
}

/// The assembled financial report for a scope
#[derive(Debug, Clone, Serialize)]
pub struct FinancialReport {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub summary: FinancialSummary,
    pub costs: CostBreakdown,
    pub quantities: QuantitySummary,
    pub harvest_count: usize,
}

/// One row of the harvest report
#[derive(Debug, Clone, Serialize)]
pub struct HarvestReportRow {
    pub id: Uuid,
    pub lot_id: Uuid,
    pub sector_id: Uuid,
    pub lot_origin: String,
    pub sector_name: String,
    pub planned_date: NaiveDate,
    pub actual_date: Option<NaiveDate>,
    pub status: HarvestStatus,
    pub estimated_quantity: i64,
    pub actual_quantity: Option<i64>,
    pub revenue: Decimal,
    pub harvest_cost: Decimal,
}

impl Queryable for HarvestReportRow {
    fn primary_date(&self) -> NaiveDateTime {
        self.actual_date
            .unwrap_or(self.planned_date)
            .and_hms_opt(12, 0, 0)
            .unwrap_or_default()
    }

    fn sector_ref(&self) -> Option<Uuid> {
        Some(self.sector_id)
    }

    fn primary_amount(&self) -> Decimal {
        self.revenue
    }

    fn search_text(&self) -> Vec<String> {
        vec![
            self.lot_origin.clone(),
            self.sector_name.clone(),
            self.status.to_string(),
        ]
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "date" => Some(FieldValue::Date(self.primary_date())),
            "revenue" => Some(FieldValue::Number(self.revenue)),
            "cost" => Some(FieldValue::Number(self.harvest_cost)),
            "quantity" => Some(FieldValue::Number(Decimal::from(
                self.actual_quantity.unwrap_or(self.estimated_quantity),
            ))),
            "sector" => Some(FieldValue::Text(self.sector_name.clone())),
            "status" => Some(FieldValue::Text(self.status.to_string())),
            _ => None,
        }
    }
}

/// Income statement for a period, the pre-closure view
#[derive(Debug, Clone, Serialize)]
pub struct IncomeStatementReport {
    pub period_start_date: NaiveDate,
    pub period_end_date: NaiveDate,
    pub total_revenues: Decimal,
    pub total_expenses: Decimal,
    pub expenses_by_category: Vec<CategoryTotal>,
    pub gross_profit: Decimal,
    pub net_profit: Decimal,
    pub profit_margin: Decimal,
    pub included_harvest_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
}

/// Dashboard metrics
#[derive(Debug, Serialize)]
pub struct DashboardMetrics {
    pub total_sectors: i64,
    pub active_lots: i64,
    pub units_in_water: i64,
    pub upcoming_harvests: i64,
    pub pending_distributions: i64,
}

/// Everything the CSV/PDF exporters render: the summary plus the row set
#[derive(Debug, Clone, Serialize)]
pub struct FullReport {
    pub report_date: NaiveDate,
    pub financial: FinancialReport,
    pub harvests: Vec<HarvestReportRow>,
}

struct Collections {
    lots: Vec<Lot>,
    plans: Vec<HarvestPlan>,
    expenses: Vec<Expense>,
    pricing: Vec<Pricing>,
    income_records: Vec<IncomeRecord>,
}

impl ReportingService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    async fn fetch_collections(&self) -> AppResult<Collections> {
        let lots = LotService::new(self.db.clone()).get_lots().await?;
        let plans = HarvestService::new(self.db.clone()).get_plans().await?;
        let expenses = ExpenseService::new(self.db.clone())
            .get_expenses(&ExpenseQuery::default())
            .await?;
        let pricing = PricingService::new(self.db.clone()).get_pricing().await?;
        let income_records = IncomeService::new(self.db.clone()).get_income_records().await?;
        Ok(Collections {
            lots,
            plans,
            expenses,
            pricing,
            income_records,
        })
    }

    /// Build the financial summary for a scope
    pub async fn financial_summary(&self, query: &ReportQuery) -> AppResult<FinancialReport> {
        let collections = self.fetch_collections().await?;
        Ok(assemble_financial_report(query, &collections))
    }

    /// Build the harvest report rows, filtered and sorted per the query
    pub async fn harvest_report(&self, query: &ReportQuery) -> AppResult<Vec<HarvestReportRow>> {
        let collections = self.fetch_collections().await?;
        let sectors = SectorService::new(self.db.clone()).get_sectors().await?;

        let rows: Vec<HarvestReportRow> = collections
            .plans
            .iter()
            .map(|plan| {
                let lot_origin = collections
                    .lots
                    .iter()
                    .find(|l| l.id == plan.lot_id)
                    .map(|l| l.origin.clone())
                    .unwrap_or_default();
                let sector_name = sectors
                    .iter()
                    .find(|s| s.id == plan.sector_id)
                    .map(|s| s.name.clone())
                    .unwrap_or_default();
                let revenue = if plan.status == HarvestStatus::Completed {
                    realized_or_estimated(plan, &collections.income_records, &collections.pricing)
                } else {
                    plan.distribution
                        .as_ref()
                        .map(|d| shared::finance::estimate_revenue(d, &collections.pricing))
                        .unwrap_or(Decimal::ZERO)
                };
                HarvestReportRow {
                    id: plan.id,
                    lot_id: plan.lot_id,
                    sector_id: plan.sector_id,
                    lot_origin,
                    sector_name,
                    planned_date: plan.planned_date,
                    actual_date: plan.actual_date,
                    status: plan.status,
                    estimated_quantity: plan.estimated_quantity,
                    actual_quantity: plan.actual_quantity,
                    revenue,
                    harvest_cost: plan.total_actual_cost.unwrap_or(Decimal::ZERO),
                }
            })
            .collect();

        let mut rows = apply_filter(rows, &query.record_filter());
        if let Some(lot_id) = query.lot_id {
            rows.retain(|r| r.lot_id == lot_id);
        }
        if let Some(spec) = query.sort_spec() {
            sort_records(&mut rows, &spec);
        }
        Ok(rows)
    }

    /// Assemble the full export payload: financial summary plus harvest rows
    pub async fn full_report(
        &self,
        query: &ReportQuery,
        report_date: NaiveDate,
    ) -> AppResult<FullReport> {
        let financial = self.financial_summary(query).await?;
        let harvests = self.harvest_report(query).await?;
        Ok(FullReport {
            report_date,
            financial,
            harvests,
        })
    }

    /// Income statement for a period: realized revenues of the period's
    /// completed harvests against its expenses.
    pub async fn income_statement(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<IncomeStatementReport> {
        if start > end {
            return Err(AppError::Validation {
                field: "period".to_string(),
                message: "Period start must not be after its end".to_string(),
                message_es: "El inicio del periodo no puede ser posterior al fin".to_string(),
            });
        }

        let collections = self.fetch_collections().await?;
        let scope = CostScope::dates(start, end);

        let included: Vec<&HarvestPlan> = collections
            .plans
            .iter()
            .filter(|p| p.status == HarvestStatus::Completed && scope.includes_plan(p))
            .collect();

        let total_revenues: Decimal = included
            .iter()
            .map(|p| realized_or_estimated(p, &collections.income_records, &collections.pricing))
            .sum();

        let period_expenses: Vec<&Expense> = collections
            .expenses
            .iter()
            .filter(|e| scope.includes_expense(e))
            .collect();
        let total_expenses: Decimal = period_expenses
            .iter()
            .map(|e| e.amount.max(Decimal::ZERO))
            .sum();

        let mut expenses_by_category: Vec<CategoryTotal> = Vec::new();
        for expense in &period_expenses {
            let name = expense.category.to_string();
            match expenses_by_category.iter_mut().find(|c| c.category == name) {
                Some(entry) => entry.amount += expense.amount.max(Decimal::ZERO),
                None => expenses_by_category.push(CategoryTotal {
                    category: name,
                    amount: expense.amount.max(Decimal::ZERO),
                }),
            }
        }

        let gross_profit = total_revenues - total_expenses;
        let net_profit = gross_profit;
        let profit_margin = shared::finance::pct_or_zero(net_profit, total_revenues);

        Ok(IncomeStatementReport {
            period_start_date: start,
            period_end_date: end,
            total_revenues,
            total_expenses,
            expenses_by_category,
            gross_profit,
            net_profit,
            profit_margin,
            included_harvest_ids: included.iter().map(|p| p.id).collect(),
        })
    }

    /// Get dashboard metrics
    pub async fn get_dashboard_metrics(&self) -> AppResult<DashboardMetrics> {
        let total_sectors: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sectors")
            .fetch_one(&self.db)
            .await?;

        let active_lots: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM lots WHERE status NOT IN ('harvested', 'empty')",
        )
        .fetch_one(&self.db)
        .await?;

        let units_in_water: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(current_quantity), 0) FROM lots WHERE status NOT IN ('harvested', 'empty')",
        )
        .fetch_one(&self.db)
        .await?;

        let upcoming_harvests: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM harvest_plans
            WHERE status IN ('planned', 'in_progress')
              AND planned_date <= CURRENT_DATE + INTERVAL '30 days'
            "#,
        )
        .fetch_one(&self.db)
        .await?;

        let pending_distributions: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM distributions WHERE status = 'pending'")
                .fetch_one(&self.db)
                .await?;

        Ok(DashboardMetrics {
            total_sectors,
            active_lots,
            units_in_water,
            upcoming_harvests,
            pending_distributions,
        })
    }
}

/// Pure assembly of the financial report from fetched collections
fn assemble_financial_report(query: &ReportQuery, collections: &Collections) -> FinancialReport {
    let scope = query.scope();

    let completed: Vec<&HarvestPlan> = collections
        .plans
        .iter()
        .filter(|p| p.status == HarvestStatus::Completed && scope.includes_plan(p))
        .collect();

    let revenue: Decimal = completed
        .iter()
        .map(|p| realized_or_estimated(p, &collections.income_records, &collections.pricing))
        .sum();

    let costs = aggregate_costs(
        scope,
        &collections.plans,
        &collections.expenses,
        &collections.lots,
    );

    let total_units: i64 = completed
        .iter()
        .map(|p| {
            p.distribution
                .as_ref()
                .map(|d| d.total_units())
                .unwrap_or(p.effective_quantity())
        })
        .sum();

    FinancialReport {
        start_date: query.start_date,
        end_date: query.end_date,
        summary: build_summary(revenue, &costs, total_units),
        costs,
        quantities: QuantitySummary::from_units(total_units),
        harvest_count: completed.len(),
    }
}
