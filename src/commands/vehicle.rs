//! Vehicle IPC command handlers.
//!
//! Vehicle year and body style feed the labor rule for every part on the
//! vehicle, so edits here dispatch a vehicle-scoped recalculation.

use std::sync::RwLock;

use crate::error::AppError;
use crate::models::{Job, Vehicle};
use crate::pricing::{recalculate, FieldChange, RateSchedule};
#[cfg(feature = "tauri-app")]
use crate::state::AppState;

use super::job::JobSnapshot;
use super::{parse_entity_id, read_job, read_rates, write_job};

// ── add_vehicle ───────────────────────────────────────────────────────────────

/// Testable inner logic for [`add_vehicle`].
///
/// Appends an empty vehicle and returns it. A new vehicle carries no parts,
/// so job totals are unchanged until parts are added.
pub(crate) fn add_vehicle_inner(
    job_lock: &RwLock<Job>,
    rates_lock: &RwLock<RateSchedule>,
) -> Result<Vehicle, AppError> {
    let rates = read_rates(rates_lock)?;
    let mut job = write_job(job_lock)?;
    let vehicle = Vehicle::new();
    let created = vehicle.clone();
    job.vehicles.push(vehicle);
    recalculate(
        &mut job,
        &FieldChange::VehicleAdded {
            vehicle_id: created.id,
        },
        &rates,
    );
    job.touch();
    Ok(created)
}

// ── remove_vehicle ────────────────────────────────────────────────────────────

/// Testable inner logic for [`remove_vehicle`].
///
/// Removes the vehicle and all its parts, then re-aggregates the job.
/// Returns [`AppError::NotFound`] if no vehicle with that ID exists.
pub(crate) fn remove_vehicle_inner(
    id: &str,
    job_lock: &RwLock<Job>,
    rates_lock: &RwLock<RateSchedule>,
) -> Result<JobSnapshot, AppError> {
    let uuid = parse_entity_id(id, "vehicle")?;

    let rates = read_rates(rates_lock)?;
    let mut job = write_job(job_lock)?;

    let before = job.vehicles.len();
    job.vehicles.retain(|v| v.id != uuid);
    if job.vehicles.len() == before {
        return Err(AppError::NotFound(format!("vehicle {id} not found")));
    }

    recalculate(&mut job, &FieldChange::VehicleRemoved, &rates);
    job.touch();
    Ok(JobSnapshot::from(&*job))
}

// ── set_vehicle_year ──────────────────────────────────────────────────────────

/// Testable inner logic for [`set_vehicle_year`].
///
/// The year is stored as entered; the labor rule parses it on demand.
/// Returns the vehicle with its parts repriced.
pub(crate) fn set_vehicle_year_inner(
    id: &str,
    year: String,
    job_lock: &RwLock<Job>,
    rates_lock: &RwLock<RateSchedule>,
) -> Result<Vehicle, AppError> {
    let uuid = parse_entity_id(id, "vehicle")?;

    let rates = read_rates(rates_lock)?;
    let mut job = write_job(job_lock)?;

    let vehicle = job
        .vehicles
        .iter_mut()
        .find(|v| v.id == uuid)
        .ok_or_else(|| AppError::NotFound(format!("vehicle {id} not found")))?;
    vehicle.vehicle_year = year;

    recalculate(&mut job, &FieldChange::VehicleYear { vehicle_id: uuid }, &rates);
    job.touch();

    find_vehicle(&job, uuid, id)
}

// ── set_body_style ────────────────────────────────────────────────────────────

/// Testable inner logic for [`set_body_style`].
///
/// The style is stored as entered; classification happens on demand through
/// [`crate::models::BodyClass::parse`]. Returns the vehicle with its parts
/// repriced.
pub(crate) fn set_body_style_inner(
    id: &str,
    body_style: String,
    job_lock: &RwLock<Job>,
    rates_lock: &RwLock<RateSchedule>,
) -> Result<Vehicle, AppError> {
    let uuid = parse_entity_id(id, "vehicle")?;

    let rates = read_rates(rates_lock)?;
    let mut job = write_job(job_lock)?;

    let vehicle = job
        .vehicles
        .iter_mut()
        .find(|v| v.id == uuid)
        .ok_or_else(|| AppError::NotFound(format!("vehicle {id} not found")))?;
    vehicle.body_style = body_style;

    recalculate(&mut job, &FieldChange::BodyStyle { vehicle_id: uuid }, &rates);
    job.touch();

    find_vehicle(&job, uuid, id)
}

// ── list_vehicles ─────────────────────────────────────────────────────────────

/// Testable inner logic for [`list_vehicles`].
///
/// Returns a snapshot of the job's vehicles (cloned to release the lock).
pub(crate) fn list_vehicles_inner(job_lock: &RwLock<Job>) -> Result<Vec<Vehicle>, AppError> {
    let job = read_job(job_lock)?;
    Ok(job.vehicles.clone())
}

/// Clone a vehicle back out of the job after a recalculation pass.
fn find_vehicle(job: &Job, uuid: uuid::Uuid, id: &str) -> Result<Vehicle, AppError> {
    job.vehicles
        .iter()
        .find(|v| v.id == uuid)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("vehicle {id} not found")))
}

// ── Tauri command wrappers ────────────────────────────────────────────────────

/// Add an empty vehicle to the active job.
///
/// The vehicle ID is generated server-side. Returns the created [`Vehicle`]
/// so the frontend can immediately display it with its assigned ID.
#[cfg(feature = "tauri-app")]
#[tauri::command]
pub async fn add_vehicle(state: tauri::State<'_, AppState>) -> Result<Vehicle, AppError> {
    add_vehicle_inner(&state.job, &state.rates)
}

/// Remove a vehicle (and its parts) from the active job.
///
/// Returns the refreshed [`JobSnapshot`], or [`AppError::NotFound`] if `id`
/// does not match any vehicle.
#[cfg(feature = "tauri-app")]
#[tauri::command]
pub async fn remove_vehicle(
    id: String,
    state: tauri::State<'_, AppState>,
) -> Result<JobSnapshot, AppError> {
    remove_vehicle_inner(&id, &state.job, &state.rates)
}

/// Set a vehicle's model year and reprice its parts.
#[cfg(feature = "tauri-app")]
#[tauri::command]
pub async fn set_vehicle_year(
    id: String,
    year: String,
    state: tauri::State<'_, AppState>,
) -> Result<Vehicle, AppError> {
    set_vehicle_year_inner(&id, year, &state.job, &state.rates)
}

/// Set a vehicle's body style and reprice its parts.
#[cfg(feature = "tauri-app")]
#[tauri::command]
pub async fn set_body_style(
    id: String,
    body_style: String,
    state: tauri::State<'_, AppState>,
) -> Result<Vehicle, AppError> {
    set_body_style_inner(&id, body_style, &state.job, &state.rates)
}

/// Return all vehicles on the active job.
#[cfg(feature = "tauri-app")]
#[tauri::command]
pub async fn list_vehicles(state: tauri::State<'_, AppState>) -> Result<Vec<Vehicle>, AppError> {
    list_vehicles_inner(&state.job)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
