//! Tauri IPC command handlers.
//!
//! Sub-modules are grouped by concern:
//! - [`job`]     — job lifecycle, customer type, payment fields
//! - [`vehicle`] — vehicle list and vehicle attribute edits
//! - [`part`]    — part list, classification, and cost edits
//! - [`rates`]   — rate schedule loading
//!
//! All handlers follow the `_inner` + `#[tauri::command]` wrapper pattern:
//! - `_inner` functions take the state locks directly and contain the
//!   business logic. They are synchronous and directly testable without
//!   Tauri.
//! - `#[tauri::command]` wrappers extract managed state and delegate to
//!   `_inner`.
//!
//! Every mutating handler writes the new value, dispatches a
//! [`crate::pricing::FieldChange`] through [`crate::pricing::recalculate`],
//! and stamps `modified_at` before releasing the job lock, so no stored
//! record ever carries stale derived totals.

pub mod job;
pub mod part;
pub mod rates;
pub mod vehicle;

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use crate::error::AppError;
use crate::models::Job;
use crate::pricing::RateSchedule;

/// Acquire the job read lock, mapping a poisoned lock to [`AppError::Io`].
pub(crate) fn read_job(lock: &RwLock<Job>) -> Result<RwLockReadGuard<'_, Job>, AppError> {
    lock.read()
        .map_err(|e| AppError::Io(format!("job lock poisoned: {e}")))
}

/// Acquire the job write lock, mapping a poisoned lock to [`AppError::Io`].
pub(crate) fn write_job(lock: &RwLock<Job>) -> Result<RwLockWriteGuard<'_, Job>, AppError> {
    lock.write()
        .map_err(|e| AppError::Io(format!("job lock poisoned: {e}")))
}

/// Acquire the rates read lock, mapping a poisoned lock to [`AppError::Io`].
pub(crate) fn read_rates(
    lock: &RwLock<RateSchedule>,
) -> Result<RwLockReadGuard<'_, RateSchedule>, AppError> {
    lock.read()
        .map_err(|e| AppError::Io(format!("rate schedule lock poisoned: {e}")))
}

/// Acquire the rates write lock, mapping a poisoned lock to [`AppError::Io`].
pub(crate) fn write_rates(
    lock: &RwLock<RateSchedule>,
) -> Result<RwLockWriteGuard<'_, RateSchedule>, AppError> {
    lock.write()
        .map_err(|e| AppError::Io(format!("rate schedule lock poisoned: {e}")))
}

/// Parse a string entity id into a [`Uuid`].
///
/// Invalid ids map to [`AppError::NotFound`] — from the frontend's point of
/// view a malformed id and an unknown id are the same failure.
pub(crate) fn parse_entity_id(id: &str, entity: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id)
        .map_err(|_| AppError::NotFound(format!("{entity} id '{id}' is not a valid UUID")))
}
