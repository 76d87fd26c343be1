use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use shared_models::error::AppError;

use crate::error::AvailabilityError;
use crate::models::{SlotQuery, SlotStat};
use crate::services::SlotAggregator;

/// Raw query string. All fields are optional here and checked in
/// [`AvailableSlotsQuery::validate`].
#[derive(Debug, Default, Deserialize)]
pub struct AvailableSlotsQuery {
    pub clinic_id: Option<String>,
    pub service_id: Option<String>,
    pub date: Option<String>,
}

impl AvailableSlotsQuery {
    pub fn validate(self) -> Result<SlotQuery, AvailabilityError> {
        let clinic_id = required(self.clinic_id, "clinic_id")?;
        let service_id = required(self.service_id, "service_id")?;
        let raw_date = required(self.date, "date")?;

        let date = NaiveDate::parse_from_str(&raw_date, "%Y-%m-%d").map_err(|_| {
            AvailabilityError::InvalidRequest(format!(
                "date must be an ISO calendar date (YYYY-MM-DD), got {:?}",
                raw_date
            ))
        })?;

        Ok(SlotQuery { clinic_id, service_id, date })
    }
}

fn required(value: Option<String>, name: &str) -> Result<String, AvailabilityError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AvailabilityError::InvalidRequest(format!("{} is required", name))),
    }
}

#[axum::debug_handler]
pub async fn get_available_slots(
    State(aggregator): State<Arc<SlotAggregator>>,
    Query(query): Query<AvailableSlotsQuery>,
) -> Result<Json<Vec<SlotStat>>, AppError> {
    let query = query.validate()?;

    let slots = aggregator
        .compute_available_slots(&query.clinic_id, &query.service_id, query.date)
        .await?;

    Ok(Json(slots))
}
