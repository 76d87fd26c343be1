use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::services::time::{deserialize_booking_timestamp, TimeOfDay};

/// Duration row for a service; the only column availability needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceDuration {
    #[serde(deserialize_with = "deserialize_opaque_id")]
    pub id: String,
    pub duration_minutes: Option<i32>,
}

/// Doctor at the clinic, available and qualified for the requested service.
#[derive(Debug, Clone, Deserialize)]
pub struct EligibleDoctor {
    #[serde(deserialize_with = "deserialize_opaque_id")]
    pub id: String,
}

/// One available shift of a doctor on the queried date.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleShift {
    #[serde(deserialize_with = "deserialize_opaque_id")]
    pub doctor_id: String,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    /// Capacity of every slot generated inside this shift.
    pub max_patients: i32,
}

/// A pending or paid booking on the queried date.
#[derive(Debug, Clone, Deserialize)]
pub struct ActiveBooking {
    #[serde(deserialize_with = "deserialize_booking_timestamp")]
    pub booking_time: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Paid,
    Expired,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl BookingStatus {
    /// Statuses that hold a reservation and therefore consume capacity.
    pub const ACTIVE: [BookingStatus; 2] = [BookingStatus::Pending, BookingStatus::Paid];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Paid => "paid",
            BookingStatus::Expired => "expired",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Unknown => "unknown",
        }
    }

    pub fn counts_against_capacity(&self) -> bool {
        Self::ACTIVE.contains(self)
    }

    /// PostgREST `in.(...)` operand for the active statuses.
    pub fn active_filter() -> String {
        let statuses: Vec<&str> = Self::ACTIVE.iter().map(BookingStatus::as_str).collect();
        format!("in.({})", statuses.join(","))
    }
}

/// Derived per-request availability of one time-of-day slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotStat {
    pub time: TimeOfDay,
    pub capacity: u32,
    pub booked: u32,
    pub available: u32,
}

impl SlotStat {
    pub fn new(time: TimeOfDay, capacity: u32, booked: u32) -> Self {
        Self {
            time,
            capacity,
            booked,
            available: capacity.saturating_sub(booked),
        }
    }
}

/// Validated availability query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotQuery {
    pub clinic_id: String,
    pub service_id: String,
    pub date: NaiveDate,
}

/// Row ids come back as uuid strings or bigint numbers depending on the table.
pub fn deserialize_opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or numeric id, got {}",
            other
        ))),
    }
}
