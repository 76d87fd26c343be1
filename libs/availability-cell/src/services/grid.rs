use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::models::{ActiveBooking, ScheduleShift, SlotStat};
use crate::services::time::TimeOfDay;

/// Counts active bookings per exact time-of-day label.
///
/// Matching is by label equality, not by slot interval: a booking at 07:10
/// never counts against a 07:00 slot.
pub fn booked_index(bookings: &[ActiveBooking]) -> HashMap<TimeOfDay, u32> {
    let mut booked = HashMap::new();
    for booking in bookings {
        *booked.entry(TimeOfDay::from(booking.booking_time.time())).or_insert(0) += 1;
    }
    booked
}

/// Walks every shift in `duration_minutes` steps and pools `max_patients`
/// per generated label across doctors and shifts.
///
/// A slot is emitted only while its full duration fits before the shift end.
/// Pooled capacity saturates at `u32::MAX`.
pub fn capacity_index(shifts: &[ScheduleShift], duration_minutes: u32) -> BTreeMap<TimeOfDay, u32> {
    let mut capacity = BTreeMap::new();
    if duration_minutes == 0 {
        return capacity;
    }

    for shift in shifts {
        let per_slot = u32::try_from(shift.max_patients).unwrap_or(0);
        let end = shift.end_time.minutes();
        let mut cursor = shift.start_time.minutes();
        let mut emitted = 0usize;

        while cursor + duration_minutes <= end {
            if let Ok(label) = TimeOfDay::from_minutes(cursor) {
                let pooled = capacity.entry(label).or_insert(0u32);
                *pooled = pooled.saturating_add(per_slot);
                emitted += 1;
            }
            cursor += duration_minutes;
        }

        debug!(
            "Shift {}-{} of doctor {} yields {} slots of {} minutes",
            shift.start_time, shift.end_time, shift.doctor_id, emitted, duration_minutes
        );
    }

    capacity
}

/// Joins capacity with bookings, drops exhausted labels and returns the
/// remaining slots ordered by minutes since midnight.
pub fn merge_slots(
    capacity: &BTreeMap<TimeOfDay, u32>,
    booked: &HashMap<TimeOfDay, u32>,
) -> Vec<SlotStat> {
    let mut slots: Vec<SlotStat> = capacity
        .iter()
        .map(|(time, capacity)| {
            SlotStat::new(*time, *capacity, booked.get(time).copied().unwrap_or(0))
        })
        .filter(|slot| slot.available > 0)
        .collect();

    slots.sort_by_key(|slot| slot.time.minutes());
    slots
}
