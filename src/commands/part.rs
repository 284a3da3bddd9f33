//! Part IPC command handlers.
//!
//! Parts carry the money fields, so nearly every edit here ends in a
//! recalculation dispatch. The three classification/price commands re-derive
//! labor; [`update_part_cost`] deliberately does not, because the labor field
//! it can write is an operator override that must survive later edits.

use std::sync::RwLock;

use uuid::Uuid;

use crate::error::AppError;
use crate::models::{CalibrationType, GlassType, Job, Part, ServiceType};
use crate::pricing::{recalculate, FieldChange, RateSchedule};
#[cfg(feature = "tauri-app")]
use crate::state::AppState;

use super::job::JobSnapshot;
use super::{parse_entity_id, read_job, read_rates, write_job};

// ── Input types ───────────────────────────────────────────────────────────────

/// Money fields editable through [`update_part_cost`].
///
/// The glass price is deliberately absent — it re-derives labor through its
/// own command, [`set_part_price`] — and so are the derived outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostField {
    Markup,
    AccessoriesPrice,
    UrethanePrice,
    SalesTaxPercent,
    /// Operator override of the suggested labor price.
    LaborPrice,
    CalibrationPrice,
    MobileFee,
    SubcontractorCost,
}

/// Descriptive (non-money) part fields editable through
/// [`update_part_details`]. Replaces all of them at once.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartDetailsInput {
    pub glass_part_number: String,
    pub distributor: String,
    pub accessories: String,
    pub is_aftermarket: bool,
    pub order_date: String,
    pub arrival_date: String,
    pub calibration_type: CalibrationType,
}

// ── lookup helpers ────────────────────────────────────────────────────────────

/// Locate a part for editing.
///
/// Returns [`AppError::NotFound`] when either the vehicle or the part is
/// missing from the active job.
fn find_part_mut<'a>(
    job: &'a mut Job,
    vehicle_uuid: Uuid,
    part_uuid: Uuid,
) -> Result<&'a mut Part, AppError> {
    let vehicle = job
        .vehicles
        .iter_mut()
        .find(|v| v.id == vehicle_uuid)
        .ok_or_else(|| AppError::NotFound(format!("vehicle {vehicle_uuid} not found")))?;
    vehicle
        .parts
        .iter_mut()
        .find(|p| p.id == part_uuid)
        .ok_or_else(|| AppError::NotFound(format!("part {part_uuid} not found")))
}

/// Clone a part back out of the job after a recalculation pass.
fn find_part(job: &Job, vehicle_uuid: Uuid, part_uuid: Uuid) -> Result<Part, AppError> {
    job.vehicles
        .iter()
        .find(|v| v.id == vehicle_uuid)
        .and_then(|v| v.parts.iter().find(|p| p.id == part_uuid))
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("part {part_uuid} not found")))
}

// ── add_part ──────────────────────────────────────────────────────────────────

/// Testable inner logic for [`add_part`].
///
/// Appends an empty windshield-replacement part to the vehicle and runs the
/// cascade so the returned [`Part`] already carries its initial labor
/// suggestion and totals.
pub(crate) fn add_part_inner(
    vehicle_id: &str,
    job_lock: &RwLock<Job>,
    rates_lock: &RwLock<RateSchedule>,
) -> Result<Part, AppError> {
    let vehicle_uuid = parse_entity_id(vehicle_id, "vehicle")?;

    let rates = read_rates(rates_lock)?;
    let mut job = write_job(job_lock)?;

    let vehicle = job
        .vehicles
        .iter_mut()
        .find(|v| v.id == vehicle_uuid)
        .ok_or_else(|| AppError::NotFound(format!("vehicle {vehicle_id} not found")))?;
    let part = Part::new();
    let part_uuid = part.id;
    vehicle.parts.push(part);

    recalculate(
        &mut job,
        &FieldChange::PartAdded {
            vehicle_id: vehicle_uuid,
            part_id: part_uuid,
        },
        &rates,
    );
    job.touch();

    find_part(&job, vehicle_uuid, part_uuid)
}

// ── remove_part ───────────────────────────────────────────────────────────────

/// Testable inner logic for [`remove_part`].
///
/// Removes the part and re-aggregates the job. Returns
/// [`AppError::NotFound`] if the vehicle or part does not exist.
pub(crate) fn remove_part_inner(
    vehicle_id: &str,
    part_id: &str,
    job_lock: &RwLock<Job>,
    rates_lock: &RwLock<RateSchedule>,
) -> Result<JobSnapshot, AppError> {
    let vehicle_uuid = parse_entity_id(vehicle_id, "vehicle")?;
    let part_uuid = parse_entity_id(part_id, "part")?;

    let rates = read_rates(rates_lock)?;
    let mut job = write_job(job_lock)?;

    let vehicle = job
        .vehicles
        .iter_mut()
        .find(|v| v.id == vehicle_uuid)
        .ok_or_else(|| AppError::NotFound(format!("vehicle {vehicle_id} not found")))?;
    let before = vehicle.parts.len();
    vehicle.parts.retain(|p| p.id != part_uuid);
    if vehicle.parts.len() == before {
        return Err(AppError::NotFound(format!("part {part_id} not found")));
    }

    recalculate(&mut job, &FieldChange::PartRemoved, &rates);
    job.touch();
    Ok(JobSnapshot::from(&*job))
}

// ── classification edits ──────────────────────────────────────────────────────

/// Testable inner logic for [`set_part_service_type`].
///
/// Re-derives the part's labor suggestion and totals.
pub(crate) fn set_part_service_type_inner(
    vehicle_id: &str,
    part_id: &str,
    service_type: ServiceType,
    job_lock: &RwLock<Job>,
    rates_lock: &RwLock<RateSchedule>,
) -> Result<Part, AppError> {
    let vehicle_uuid = parse_entity_id(vehicle_id, "vehicle")?;
    let part_uuid = parse_entity_id(part_id, "part")?;

    let rates = read_rates(rates_lock)?;
    let mut job = write_job(job_lock)?;

    find_part_mut(&mut job, vehicle_uuid, part_uuid)?.service_type = service_type;
    recalculate(
        &mut job,
        &FieldChange::ServiceType {
            vehicle_id: vehicle_uuid,
            part_id: part_uuid,
        },
        &rates,
    );
    job.touch();

    find_part(&job, vehicle_uuid, part_uuid)
}

/// Testable inner logic for [`set_part_glass_type`].
///
/// Re-derives the part's labor suggestion and totals.
pub(crate) fn set_part_glass_type_inner(
    vehicle_id: &str,
    part_id: &str,
    glass_type: GlassType,
    job_lock: &RwLock<Job>,
    rates_lock: &RwLock<RateSchedule>,
) -> Result<Part, AppError> {
    let vehicle_uuid = parse_entity_id(vehicle_id, "vehicle")?;
    let part_uuid = parse_entity_id(part_id, "part")?;

    let rates = read_rates(rates_lock)?;
    let mut job = write_job(job_lock)?;

    find_part_mut(&mut job, vehicle_uuid, part_uuid)?.glass_type = glass_type;
    recalculate(
        &mut job,
        &FieldChange::GlassType {
            vehicle_id: vehicle_uuid,
            part_id: part_uuid,
        },
        &rates,
    );
    job.touch();

    find_part(&job, vehicle_uuid, part_uuid)
}

// ── money edits ───────────────────────────────────────────────────────────────

/// Testable inner logic for [`set_part_price`].
///
/// The glass price feeds the expensive-glass labor rule, so this edit
/// re-derives labor as well as totals.
pub(crate) fn set_part_price_inner(
    vehicle_id: &str,
    part_id: &str,
    amount: f64,
    job_lock: &RwLock<Job>,
    rates_lock: &RwLock<RateSchedule>,
) -> Result<Part, AppError> {
    let vehicle_uuid = parse_entity_id(vehicle_id, "vehicle")?;
    let part_uuid = parse_entity_id(part_id, "part")?;

    let rates = read_rates(rates_lock)?;
    let mut job = write_job(job_lock)?;

    find_part_mut(&mut job, vehicle_uuid, part_uuid)?.part_price = amount;
    recalculate(
        &mut job,
        &FieldChange::PartPrice {
            vehicle_id: vehicle_uuid,
            part_id: part_uuid,
        },
        &rates,
    );
    job.touch();

    find_part(&job, vehicle_uuid, part_uuid)
}

/// Testable inner logic for [`update_part_cost`].
///
/// Writes one money field and refreshes the part's totals. Labor is not
/// re-derived: a write to [`CostField::LaborPrice`] is itself an operator
/// override, and the other fields have no bearing on the labor rule.
pub(crate) fn update_part_cost_inner(
    vehicle_id: &str,
    part_id: &str,
    field: CostField,
    amount: f64,
    job_lock: &RwLock<Job>,
    rates_lock: &RwLock<RateSchedule>,
) -> Result<Part, AppError> {
    let vehicle_uuid = parse_entity_id(vehicle_id, "vehicle")?;
    let part_uuid = parse_entity_id(part_id, "part")?;

    let rates = read_rates(rates_lock)?;
    let mut job = write_job(job_lock)?;

    let part = find_part_mut(&mut job, vehicle_uuid, part_uuid)?;
    match field {
        CostField::Markup => part.markup = amount,
        CostField::AccessoriesPrice => part.accessories_price = amount,
        CostField::UrethanePrice => part.urethane_price = amount,
        CostField::SalesTaxPercent => part.sales_tax_percent = amount,
        CostField::LaborPrice => part.labor_price = amount,
        CostField::CalibrationPrice => part.calibration_price = amount,
        CostField::MobileFee => part.mobile_fee = amount,
        CostField::SubcontractorCost => part.subcontractor_cost = amount,
    }

    recalculate(
        &mut job,
        &FieldChange::CostComponent {
            vehicle_id: vehicle_uuid,
            part_id: part_uuid,
        },
        &rates,
    );
    job.touch();

    find_part(&job, vehicle_uuid, part_uuid)
}

// ── update_part_details ───────────────────────────────────────────────────────

/// Testable inner logic for [`update_part_details`].
///
/// Replaces the descriptive fields. None of them participate in pricing, so
/// no recalculation is dispatched.
pub(crate) fn update_part_details_inner(
    vehicle_id: &str,
    part_id: &str,
    input: PartDetailsInput,
    job_lock: &RwLock<Job>,
) -> Result<Part, AppError> {
    let vehicle_uuid = parse_entity_id(vehicle_id, "vehicle")?;
    let part_uuid = parse_entity_id(part_id, "part")?;

    let mut job = write_job(job_lock)?;

    let part = find_part_mut(&mut job, vehicle_uuid, part_uuid)?;
    part.glass_part_number = input.glass_part_number;
    part.distributor = input.distributor;
    part.accessories = input.accessories;
    part.is_aftermarket = input.is_aftermarket;
    part.order_date = input.order_date;
    part.arrival_date = input.arrival_date;
    part.calibration_type = input.calibration_type;
    let updated = part.clone();

    job.touch();
    Ok(updated)
}

// ── list_parts ────────────────────────────────────────────────────────────────

/// Testable inner logic for [`list_parts`].
///
/// Returns a snapshot of one vehicle's parts (cloned to release the lock).
pub(crate) fn list_parts_inner(
    vehicle_id: &str,
    job_lock: &RwLock<Job>,
) -> Result<Vec<Part>, AppError> {
    let vehicle_uuid = parse_entity_id(vehicle_id, "vehicle")?;

    let job = read_job(job_lock)?;
    let vehicle = job
        .vehicles
        .iter()
        .find(|v| v.id == vehicle_uuid)
        .ok_or_else(|| AppError::NotFound(format!("vehicle {vehicle_id} not found")))?;
    Ok(vehicle.parts.clone())
}

// ── Tauri command wrappers ────────────────────────────────────────────────────

/// Add an empty part to a vehicle.
///
/// The part ID is generated server-side. Returns the created [`Part`] with
/// its initial labor suggestion and totals already applied.
#[cfg(feature = "tauri-app")]
#[tauri::command]
pub async fn add_part(
    vehicle_id: String,
    state: tauri::State<'_, AppState>,
) -> Result<Part, AppError> {
    add_part_inner(&vehicle_id, &state.job, &state.rates)
}

/// Remove a part from a vehicle.
///
/// Returns the refreshed [`JobSnapshot`], or [`AppError::NotFound`] if the
/// vehicle or part does not exist.
#[cfg(feature = "tauri-app")]
#[tauri::command]
pub async fn remove_part(
    vehicle_id: String,
    part_id: String,
    state: tauri::State<'_, AppState>,
) -> Result<JobSnapshot, AppError> {
    remove_part_inner(&vehicle_id, &part_id, &state.job, &state.rates)
}

/// Set a part's service type and reprice it.
#[cfg(feature = "tauri-app")]
#[tauri::command]
pub async fn set_part_service_type(
    vehicle_id: String,
    part_id: String,
    service_type: ServiceType,
    state: tauri::State<'_, AppState>,
) -> Result<Part, AppError> {
    set_part_service_type_inner(&vehicle_id, &part_id, service_type, &state.job, &state.rates)
}

/// Set a part's glass type and reprice it.
#[cfg(feature = "tauri-app")]
#[tauri::command]
pub async fn set_part_glass_type(
    vehicle_id: String,
    part_id: String,
    glass_type: GlassType,
    state: tauri::State<'_, AppState>,
) -> Result<Part, AppError> {
    set_part_glass_type_inner(&vehicle_id, &part_id, glass_type, &state.job, &state.rates)
}

/// Set a part's glass price; labor is re-derived through the pricing rule.
#[cfg(feature = "tauri-app")]
#[tauri::command]
pub async fn set_part_price(
    vehicle_id: String,
    part_id: String,
    amount: f64,
    state: tauri::State<'_, AppState>,
) -> Result<Part, AppError> {
    set_part_price_inner(&vehicle_id, &part_id, amount, &state.job, &state.rates)
}

/// Write one money field on a part and refresh its totals.
#[cfg(feature = "tauri-app")]
#[tauri::command]
pub async fn update_part_cost(
    vehicle_id: String,
    part_id: String,
    field: CostField,
    amount: f64,
    state: tauri::State<'_, AppState>,
) -> Result<Part, AppError> {
    update_part_cost_inner(&vehicle_id, &part_id, field, amount, &state.job, &state.rates)
}

/// Replace a part's descriptive fields.
#[cfg(feature = "tauri-app")]
#[tauri::command]
pub async fn update_part_details(
    vehicle_id: String,
    part_id: String,
    input: PartDetailsInput,
    state: tauri::State<'_, AppState>,
) -> Result<Part, AppError> {
    update_part_details_inner(&vehicle_id, &part_id, input, &state.job)
}

/// Return all parts on one vehicle.
#[cfg(feature = "tauri-app")]
#[tauri::command]
pub async fn list_parts(
    vehicle_id: String,
    state: tauri::State<'_, AppState>,
) -> Result<Vec<Part>, AppError> {
    list_parts_inner(&vehicle_id, &state.job)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
