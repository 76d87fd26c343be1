use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, warn};

use shared_config::{AppConfig, DEFAULT_SLOT_DURATION_MINUTES};

use crate::error::AvailabilityError;
use crate::models::SlotStat;
use crate::services::grid::{booked_index, capacity_index, merge_slots};
use crate::services::repository::{
    BookingLookup, ScheduleLookup, ServiceLookup, SupabaseAvailabilityRepository,
};

/// Computes bookable slots for a clinic, service and date from the
/// service duration, doctor shifts and existing bookings.
///
/// Holds no state between calls and never writes.
pub struct SlotAggregator {
    services: Arc<dyn ServiceLookup>,
    schedules: Arc<dyn ScheduleLookup>,
    bookings: Arc<dyn BookingLookup>,
    default_duration_minutes: u32,
}

impl SlotAggregator {
    pub fn new(
        services: Arc<dyn ServiceLookup>,
        schedules: Arc<dyn ScheduleLookup>,
        bookings: Arc<dyn BookingLookup>,
    ) -> Self {
        Self {
            services,
            schedules,
            bookings,
            default_duration_minutes: DEFAULT_SLOT_DURATION_MINUTES,
        }
    }

    /// Aggregator backed by the Supabase tables.
    pub fn from_config(config: &AppConfig) -> Self {
        let repository = Arc::new(SupabaseAvailabilityRepository::new(config));
        Self::new(repository.clone(), repository.clone(), repository)
            .with_default_duration(config.default_slot_duration_minutes)
    }

    /// Duration used for services without a positive `duration_minutes`.
    /// Zero is ignored.
    pub fn with_default_duration(mut self, minutes: u32) -> Self {
        if minutes > 0 {
            self.default_duration_minutes = minutes;
        } else {
            warn!("Ignoring zero default slot duration");
        }
        self
    }

    pub async fn compute_available_slots(
        &self,
        clinic_id: &str,
        service_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<SlotStat>, AvailabilityError> {
        let clinic_id = clinic_id.trim();
        let service_id = service_id.trim();
        if clinic_id.is_empty() {
            return Err(AvailabilityError::InvalidRequest("clinic_id is required".to_string()));
        }
        if service_id.is_empty() {
            return Err(AvailabilityError::InvalidRequest("service_id is required".to_string()));
        }

        debug!("Computing available slots for clinic {} service {} on {}", clinic_id, service_id, date);

        let service = self.services
            .get_service_duration(service_id)
            .await?
            .ok_or_else(|| AvailabilityError::ServiceNotFound(service_id.to_string()))?;
        let duration = self.resolve_duration(service_id, service.duration_minutes);

        let doctors = self.schedules.list_eligible_doctors(clinic_id, service_id).await?;
        if doctors.is_empty() {
            debug!("No eligible doctors for service {} at clinic {}", service_id, clinic_id);
            return Ok(vec![]);
        }
        let doctor_ids: Vec<String> = doctors.into_iter().map(|doctor| doctor.id).collect();

        let (shifts, bookings) = futures::try_join!(
            self.schedules.list_schedules(&doctor_ids, date),
            self.bookings.list_active_bookings(clinic_id, service_id, date),
        )?;
        if shifts.is_empty() {
            debug!("No available shifts on {} for {} doctors", date, doctor_ids.len());
            return Ok(vec![]);
        }

        let capacity = capacity_index(&shifts, duration);
        let booked = booked_index(&bookings);
        let slots = merge_slots(&capacity, &booked);

        debug!(
            "Found {} available slots from {} shifts and {} active bookings",
            slots.len(),
            shifts.len(),
            bookings.len()
        );
        Ok(slots)
    }

    fn resolve_duration(&self, service_id: &str, stored: Option<i32>) -> u32 {
        match stored {
            Some(minutes) if minutes > 0 => minutes as u32,
            Some(minutes) => {
                warn!(
                    "Service {} has non-positive duration {}, using {} minutes",
                    service_id, minutes, self.default_duration_minutes
                );
                self.default_duration_minutes
            }
            None => self.default_duration_minutes,
        }
    }
}
