pub mod handlers;
pub mod router;
pub mod models;
pub mod services;
pub mod error;

pub use models::*;
pub use error::AvailabilityError;
pub use services::*;
pub use router::availability_routes;
