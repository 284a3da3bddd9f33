pub mod job;
pub mod part;
pub mod vehicle;

pub use job::{now_rfc3339, CustomerType, Job};
pub use part::{CalibrationType, GlassType, Part, ServiceType};
pub use vehicle::{BodyClass, Vehicle};
