//! Route definitions for the Maricultura Management Platform

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Sector management
        .nest("/sectors", sector_routes())
        // Lot management
        .nest("/lots", lot_routes())
        // Harvest plan management
        .nest("/harvest-plans", harvest_routes())
        // Price list
        .nest("/pricing", pricing_routes())
        // Expenses
        .nest("/expenses", expense_routes())
        // Income records and closures
        .nest("/income-records", income_record_routes())
        .nest("/income-closures", closure_routes())
        // Investments and distributions
        .nest("/investments", investment_routes())
        .nest("/distributions", distribution_routes())
        // Growth monitoring
        .nest("/monitorings", monitoring_routes())
        // Presentation templates
        .nest("/presentations", presentation_routes())
        // Users
        .nest("/users", user_routes())
        // Reports
        .nest("/reports", report_routes())
}

/// Sector management routes
fn sector_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_sectors).post(handlers::create_sector))
        .route(
            "/:sector_id",
            get(handlers::get_sector)
                .put(handlers::update_sector)
                .delete(handlers::delete_sector),
        )
}

/// Lot management routes
fn lot_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_lots).post(handlers::create_lot))
        .route(
            "/:lot_id",
            get(handlers::get_lot).put(handlers::update_lot),
        )
        .route("/:lot_id/harvest-plans", get(handlers::get_plans_by_lot))
        .route("/:lot_id/monitorings", get(handlers::get_monitorings_by_lot))
}

/// Harvest plan routes
fn harvest_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_harvest_plans).post(handlers::create_harvest_plan),
        )
        .route(
            "/:plan_id",
            get(handlers::get_harvest_plan).put(handlers::update_harvest_plan),
        )
        .route("/:plan_id/start", post(handlers::start_harvest_plan))
        .route("/:plan_id/complete", post(handlers::complete_harvest_plan))
        .route("/:plan_id/cancel", post(handlers::cancel_harvest_plan))
}

/// Price list routes
fn pricing_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_pricing).post(handlers::create_price))
        .route("/active", get(handlers::list_active_pricing))
        .route("/:price_id", delete(handlers::delete_price))
        .route("/:price_id/activate", post(handlers::activate_price))
}

/// Expense routes
fn expense_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_expenses).post(handlers::create_expense))
        .route("/:expense_id", delete(handlers::delete_expense))
}

/// Income record routes
fn income_record_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_income_records).post(handlers::create_income_record),
        )
        .route("/:record_id", get(handlers::get_income_record))
        .route("/:record_id/cancel", post(handlers::cancel_income_record))
}

/// Income statement closure routes
fn closure_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_closures).post(handlers::create_closure))
        .route(
            "/:closure_id",
            get(handlers::get_closure).delete(handlers::delete_closure),
        )
        .route("/:closure_id/finalize", post(handlers::finalize_closure))
}

/// Investment routes
fn investment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_investments).post(handlers::create_investment),
        )
        .route("/:investment_id", get(handlers::get_investment))
        .route("/:investment_id/cancel", post(handlers::cancel_investment))
        .route(
            "/:investment_id/distributions",
            get(handlers::get_distributions_by_investment),
        )
}

/// Distribution routes
fn distribution_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_distributions).post(handlers::create_distribution),
        )
        .route("/:distribution_id/paid", put(handlers::mark_distribution_paid))
}

/// Monitoring routes
fn monitoring_routes() -> Router<AppState> {
    Router::new().route("/", post(handlers::create_monitoring))
}

/// Presentation template routes
fn presentation_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(handlers::get_presentations).put(handlers::save_presentations),
    )
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_users).post(handlers::create_user))
        .route("/:user_id", delete(handlers::delete_user))
}

/// Report routes
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/financial-summary", get(handlers::get_financial_summary))
        .route("/harvests", get(handlers::get_harvest_report))
        .route("/income-statement", get(handlers::get_income_statement))
}
