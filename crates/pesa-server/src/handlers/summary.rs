//! Spending summary handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState, MAX_PAGE_LIMIT};
use pesa_core::summary::{category_report, category_totals, RECENT_LIMIT};
use pesa_core::{CategoryReport, SpendingSummary};

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub limit: Option<usize>,
}

/// GET /api/summary - Totals per category
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SpendingSummary>, AppError> {
    let categories = &state.bot.config().categories;
    Ok(Json(category_totals(&state.db, categories)?))
}

/// GET /api/summary/:category - Recent transactions in one category
pub async fn get_category_summary(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<CategoryReport>, AppError> {
    let categories = &state.bot.config().categories;
    if !categories.is_valid(&category) {
        return Err(AppError::bad_request(&format!(
            "Invalid category: {}. Use: {}",
            category, categories
        )));
    }

    let limit = query.limit.unwrap_or(RECENT_LIMIT).min(MAX_PAGE_LIMIT);
    Ok(Json(category_report(&state.db, &category, limit)?))
}
