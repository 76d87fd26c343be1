pub mod time;
pub mod grid;
pub mod repository;
pub mod aggregator;

pub use aggregator::SlotAggregator;
pub use repository::{BookingLookup, ScheduleLookup, ServiceLookup, SupabaseAvailabilityRepository};
