use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use reqwest::Method;
use tracing::debug;
use urlencoding::encode;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{ActiveBooking, BookingStatus, EligibleDoctor, ScheduleShift, ServiceDuration};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceLookup: Send + Sync {
    /// `Ok(None)` when the service does not exist.
    async fn get_service_duration(&self, service_id: &str) -> Result<Option<ServiceDuration>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduleLookup: Send + Sync {
    /// Available doctors at the clinic qualified for the service.
    async fn list_eligible_doctors(&self, clinic_id: &str, service_id: &str) -> Result<Vec<EligibleDoctor>>;

    /// Available shifts of the given doctors on `date`.
    async fn list_schedules(&self, doctor_ids: &[String], date: NaiveDate) -> Result<Vec<ScheduleShift>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingLookup: Send + Sync {
    /// Pending or paid bookings for the clinic and service on `date`.
    async fn list_active_bookings(
        &self,
        clinic_id: &str,
        service_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<ActiveBooking>>;
}

pub struct SupabaseAvailabilityRepository {
    supabase: SupabaseClient,
}

impl SupabaseAvailabilityRepository {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }
}

#[async_trait]
impl ServiceLookup for SupabaseAvailabilityRepository {
    async fn get_service_duration(&self, service_id: &str) -> Result<Option<ServiceDuration>> {
        debug!("Fetching duration for service {}", service_id);

        let path = format!(
            "/rest/v1/services?select=id,duration_minutes&id=eq.{}&limit=1",
            encode(service_id)
        );
        let rows: Vec<ServiceDuration> = self.supabase
            .request(Method::GET, &path, None, None)
            .await
            .context("Failed to fetch service")?;

        Ok(rows.into_iter().next())
    }
}

#[async_trait]
impl ScheduleLookup for SupabaseAvailabilityRepository {
    async fn list_eligible_doctors(&self, clinic_id: &str, service_id: &str) -> Result<Vec<EligibleDoctor>> {
        debug!("Fetching eligible doctors for clinic {} and service {}", clinic_id, service_id);

        let path = format!(
            "/rest/v1/doctors?select=id,doctor_services!inner(service_id)&clinic_id=eq.{}&is_available=eq.true&doctor_services.service_id=eq.{}",
            encode(clinic_id),
            encode(service_id)
        );
        let doctors: Vec<EligibleDoctor> = self.supabase
            .request(Method::GET, &path, None, None)
            .await
            .context("Failed to fetch eligible doctors")?;

        Ok(doctors)
    }

    async fn list_schedules(&self, doctor_ids: &[String], date: NaiveDate) -> Result<Vec<ScheduleShift>> {
        if doctor_ids.is_empty() {
            return Ok(vec![]);
        }
        debug!("Fetching schedules of {} doctors on {}", doctor_ids.len(), date);

        let ids: Vec<String> = doctor_ids.iter().map(|id| quote_in_operand(id)).collect();
        let path = format!(
            "/rest/v1/doctor_schedules?select=doctor_id,start_time,end_time,max_patients&doctor_id=in.({})&date=eq.{}&is_available=eq.true&order=start_time.asc",
            ids.join(","),
            date
        );
        let shifts: Vec<ScheduleShift> = self.supabase
            .request(Method::GET, &path, None, None)
            .await
            .context("Failed to fetch doctor schedules")?;

        Ok(shifts)
    }
}

#[async_trait]
impl BookingLookup for SupabaseAvailabilityRepository {
    async fn list_active_bookings(
        &self,
        clinic_id: &str,
        service_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<ActiveBooking>> {
        debug!("Fetching active bookings for clinic {} service {} on {}", clinic_id, service_id, date);

        let next_day = date
            .checked_add_days(Days::new(1))
            .context("Date out of range")?;
        let path = format!(
            "/rest/v1/bookings?select=booking_time&clinic_id=eq.{}&service_id=eq.{}&booking_time=gte.{}T00:00:00&booking_time=lt.{}T00:00:00&status={}",
            encode(clinic_id),
            encode(service_id),
            date,
            next_day,
            BookingStatus::active_filter()
        );
        let bookings: Vec<ActiveBooking> = self.supabase
            .request(Method::GET, &path, None, None)
            .await
            .context("Failed to fetch bookings")?;

        Ok(bookings)
    }
}

/// Double-quotes an id for a PostgREST `in.(...)` list and percent-encodes it.
fn quote_in_operand(id: &str) -> String {
    let escaped = id.replace('\\', "\\\\").replace('"', "\\\"");
    encode(&format!("\"{}\"", escaped)).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_operands_are_quoted_and_encoded() {
        assert_eq!(quote_in_operand("doc-1"), "%22doc-1%22");
        assert_eq!(quote_in_operand("a,b"), "%22a%2Cb%22");
    }
}
