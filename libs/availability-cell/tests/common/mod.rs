#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use availability_cell::models::{
    ActiveBooking, BookingStatus, EligibleDoctor, ScheduleShift, ServiceDuration,
};
use availability_cell::services::{BookingLookup, ScheduleLookup, ServiceLookup, SlotAggregator};

pub const CLINIC: &str = "clinic-1";
pub const SERVICE: &str = "svc-consult";

pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

pub fn at(date: NaiveDate, hhmm: &str) -> NaiveDateTime {
    let (hour, minute) = hhmm.split_once(':').unwrap();
    date.and_hms_opt(hour.parse().unwrap(), minute.parse().unwrap(), 0).unwrap()
}

#[derive(Clone)]
pub struct FakeDoctor {
    pub id: String,
    pub clinic_id: String,
    pub is_available: bool,
    pub services: HashSet<String>,
}

#[derive(Clone)]
pub struct FakeShift {
    pub doctor_id: String,
    pub date: NaiveDate,
    pub start: String,
    pub end: String,
    pub max_patients: i32,
    pub is_available: bool,
}

#[derive(Clone)]
pub struct FakeBooking {
    pub clinic_id: String,
    pub service_id: String,
    pub booking_time: NaiveDateTime,
    pub status: BookingStatus,
}

/// In-memory clinic that applies the same filters as the PostgREST queries.
#[derive(Clone, Default)]
pub struct InMemoryClinic {
    pub services: HashMap<String, Option<i32>>,
    pub doctors: Vec<FakeDoctor>,
    pub shifts: Vec<FakeShift>,
    pub bookings: Vec<FakeBooking>,
    pub fail_bookings: bool,
}

impl InMemoryClinic {
    pub fn with_service(mut self, service_id: &str, duration_minutes: Option<i32>) -> Self {
        self.services.insert(service_id.to_string(), duration_minutes);
        self
    }

    pub fn with_doctor(mut self, doctor_id: &str, clinic_id: &str, services: &[&str]) -> Self {
        self.doctors.push(FakeDoctor {
            id: doctor_id.to_string(),
            clinic_id: clinic_id.to_string(),
            is_available: true,
            services: services.iter().map(|s| s.to_string()).collect(),
        });
        self
    }

    pub fn with_unavailable_doctor(mut self, doctor_id: &str, clinic_id: &str, services: &[&str]) -> Self {
        self = self.with_doctor(doctor_id, clinic_id, services);
        if let Some(doctor) = self.doctors.last_mut() {
            doctor.is_available = false;
        }
        self
    }

    pub fn with_shift(mut self, doctor_id: &str, date: NaiveDate, start: &str, end: &str, max_patients: i32) -> Self {
        self.shifts.push(FakeShift {
            doctor_id: doctor_id.to_string(),
            date,
            start: start.to_string(),
            end: end.to_string(),
            max_patients,
            is_available: true,
        });
        self
    }

    pub fn with_closed_shift(mut self, doctor_id: &str, date: NaiveDate, start: &str, end: &str, max_patients: i32) -> Self {
        self = self.with_shift(doctor_id, date, start, end, max_patients);
        if let Some(shift) = self.shifts.last_mut() {
            shift.is_available = false;
        }
        self
    }

    pub fn with_booking(mut self, clinic_id: &str, service_id: &str, booking_time: NaiveDateTime, status: BookingStatus) -> Self {
        self.bookings.push(FakeBooking {
            clinic_id: clinic_id.to_string(),
            service_id: service_id.to_string(),
            booking_time,
            status,
        });
        self
    }

    pub fn failing_bookings(mut self) -> Self {
        self.fail_bookings = true;
        self
    }

    pub fn aggregator(self) -> SlotAggregator {
        let clinic = Arc::new(self);
        SlotAggregator::new(clinic.clone(), clinic.clone(), clinic)
    }
}

#[async_trait]
impl ServiceLookup for InMemoryClinic {
    async fn get_service_duration(&self, service_id: &str) -> Result<Option<ServiceDuration>> {
        Ok(self.services.get(service_id).map(|duration_minutes| ServiceDuration {
            id: service_id.to_string(),
            duration_minutes: *duration_minutes,
        }))
    }
}

#[async_trait]
impl ScheduleLookup for InMemoryClinic {
    async fn list_eligible_doctors(&self, clinic_id: &str, service_id: &str) -> Result<Vec<EligibleDoctor>> {
        Ok(self
            .doctors
            .iter()
            .filter(|d| d.clinic_id == clinic_id && d.is_available && d.services.contains(service_id))
            .map(|d| EligibleDoctor { id: d.id.clone() })
            .collect())
    }

    async fn list_schedules(&self, doctor_ids: &[String], date: NaiveDate) -> Result<Vec<ScheduleShift>> {
        self.shifts
            .iter()
            .filter(|s| s.date == date && s.is_available && doctor_ids.contains(&s.doctor_id))
            .map(|s| -> Result<ScheduleShift> {
                Ok(ScheduleShift {
                    doctor_id: s.doctor_id.clone(),
                    start_time: s.start.parse()?,
                    end_time: s.end.parse()?,
                    max_patients: s.max_patients,
                })
            })
            .collect()
    }
}

#[async_trait]
impl BookingLookup for InMemoryClinic {
    async fn list_active_bookings(
        &self,
        clinic_id: &str,
        service_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<ActiveBooking>> {
        if self.fail_bookings {
            return Err(anyhow!("API error (503 Service Unavailable): upstream timeout"));
        }
        Ok(self
            .bookings
            .iter()
            .filter(|b| {
                b.clinic_id == clinic_id
                    && b.service_id == service_id
                    && b.booking_time.date() == date
                    && b.status.counts_against_capacity()
            })
            .map(|b| ActiveBooking { booking_time: b.booking_time })
            .collect())
    }
}

/// Clinic with one doctor qualified for [`SERVICE`] and a 30 minute service.
pub fn single_doctor_clinic() -> InMemoryClinic {
    InMemoryClinic::default()
        .with_service(SERVICE, Some(30))
        .with_doctor("doc-1", CLINIC, &[SERVICE])
}
