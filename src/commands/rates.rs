//! Rate schedule IPC command handler.

use std::path::Path;
use std::sync::RwLock;

use crate::error::AppError;
use crate::models::Job;
use crate::pricing::{recalculate, schedule, FieldChange, RateSchedule};
#[cfg(feature = "tauri-app")]
use crate::state::AppState;

use super::{write_job, write_rates};

/// Testable inner logic for [`load_rate_schedule`].
///
/// Parses and validates the file before touching shared state, so a bad file
/// leaves the active schedule untouched. On success the new schedule replaces
/// the managed one and every line total is refreshed against it; suggested
/// labor prices already on the job are treated as operator input and kept.
pub(crate) fn load_rate_schedule_inner(
    path: &str,
    job_lock: &RwLock<Job>,
    rates_lock: &RwLock<RateSchedule>,
) -> Result<RateSchedule, AppError> {
    let schedule = schedule::load(Path::new(path))?;

    let mut rates = write_rates(rates_lock)?;
    let mut job = write_job(job_lock)?;
    *rates = schedule;

    recalculate(&mut job, &FieldChange::RatesChanged, &rates);
    job.touch();

    tracing::info!(path, "rate schedule loaded");
    Ok(rates.clone())
}

/// Load a rate schedule from a TOML file and reprice the active job with it.
///
/// Returns the schedule now in effect, or [`AppError::RateConfig`] when the
/// file is missing, malformed, or fails validation.
#[cfg(feature = "tauri-app")]
#[tauri::command]
pub async fn load_rate_schedule(
    path: String,
    state: tauri::State<'_, AppState>,
) -> Result<RateSchedule, AppError> {
    load_rate_schedule_inner(&path, &state.job, &state.rates)
}
