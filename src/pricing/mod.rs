//! Quote and pricing calculation engine.
//!
//! Five pieces, leaf first: the legacy-record classification shim
//! ([`classify`]), the labor pricing rule ([`labor`]), the line-item totals
//! calculator ([`totals`]), the job-level aggregator ([`aggregate`]), and the
//! recalculation cascade ([`cascade`]) that maps a field edit onto the
//! re-pricing scope it requires. Everything here is a pure function over the
//! job/vehicle/part records plus a [`RateSchedule`]; the engine performs no
//! I/O and holds no state of its own.

pub mod aggregate;
pub mod cascade;
pub mod classify;
pub mod labor;
pub mod schedule;
pub mod totals;

pub use cascade::{recalculate, FieldChange};
pub use schedule::RateSchedule;

/// Internal error type for rate-schedule failures.
/// The IPC layer maps these to AppError::RateConfig at the boundary.
#[derive(Debug, thiserror::Error)]
pub enum RateScheduleError {
    #[error("rate config error: {0}")]
    Config(String),
    #[error("rate schedule io error: {0}")]
    Io(String),
}
