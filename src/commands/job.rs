//! Job lifecycle and job-level field IPC command handlers.
//!
//! `load_job` is the ingest boundary: records arrive from the persistence
//! collaborator in a tolerant wire form ([`JobRecord`]) that accepts missing
//! fields and the legacy `jobType` classification, and leave it as fully
//! repriced canonical [`Job`]s.

use std::sync::RwLock;

use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{
    now_rfc3339, CalibrationType, CustomerType, GlassType, Job, Part, ServiceType, Vehicle,
};
use crate::pricing::{classify, labor, recalculate, FieldChange, RateSchedule};
#[cfg(feature = "tauri-app")]
use crate::state::AppState;

use super::{read_job, read_rates, write_job};

// ── Snapshot type ─────────────────────────────────────────────────────────────

/// Lightweight view of the active job for the frontend header.
///
/// Mutating commands return this so the UI can refresh its money display
/// without re-fetching the whole record; [`get_job`] returns the full [`Job`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSnapshot {
    pub job_id: Uuid,
    pub job_number: String,
    pub customer_type: CustomerType,
    pub vehicle_count: usize,
    pub part_count: usize,
    pub subtotal: f64,
    pub total_due: f64,
    pub amount_paid: f64,
    pub balance_due: f64,
    pub modified_at: String,
}

impl From<&Job> for JobSnapshot {
    fn from(job: &Job) -> Self {
        Self {
            job_id: job.id,
            job_number: job.job_number.clone(),
            customer_type: job.customer_type,
            vehicle_count: job.vehicles.len(),
            part_count: job.vehicles.iter().map(|v| v.parts.len()).sum(),
            subtotal: job.subtotal,
            total_due: job.total_due,
            amount_paid: job.amount_paid,
            balance_due: job.balance_due,
            modified_at: job.modified_at.clone(),
        }
    }
}

// ── Wire records ──────────────────────────────────────────────────────────────

/// Tolerant wire form of a part.
///
/// Every field is optional or defaulted — intake data is frequently
/// incomplete — and the legacy `jobType` key is accepted alongside the
/// canonical classification pair.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartRecord {
    pub id: Option<Uuid>,
    pub service_type: Option<ServiceType>,
    pub glass_type: Option<GlassType>,
    /// Legacy single-field classification from before the service/glass split.
    pub job_type: Option<String>,
    #[serde(default)]
    pub glass_part_number: String,
    #[serde(default)]
    pub distributor: String,
    #[serde(default)]
    pub accessories: String,
    #[serde(default)]
    pub is_aftermarket: bool,
    #[serde(default)]
    pub order_date: String,
    #[serde(default)]
    pub arrival_date: String,
    #[serde(default)]
    pub calibration_type: CalibrationType,
    #[serde(default)]
    pub part_price: f64,
    #[serde(default)]
    pub markup: f64,
    #[serde(default)]
    pub accessories_price: f64,
    #[serde(default)]
    pub urethane_price: f64,
    #[serde(default)]
    pub sales_tax_percent: f64,
    /// Kept when present — it may be an operator override — and derived from
    /// the labor rule when absent.
    pub labor_price: Option<f64>,
    #[serde(default)]
    pub calibration_price: f64,
    #[serde(default)]
    pub mobile_fee: f64,
    #[serde(default)]
    pub subcontractor_cost: f64,
}

/// Tolerant wire form of a vehicle.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    pub id: Option<Uuid>,
    #[serde(default)]
    pub vehicle_year: String,
    #[serde(default)]
    pub body_style: String,
    #[serde(default)]
    pub parts: Vec<PartRecord>,
}

/// Tolerant wire form of a whole job.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: Option<Uuid>,
    #[serde(default)]
    pub job_number: String,
    pub customer_type: Option<CustomerType>,
    #[serde(default)]
    pub vehicles: Vec<VehicleRecord>,
    #[serde(default)]
    pub deductible: f64,
    #[serde(default)]
    pub rebate: f64,
    #[serde(default)]
    pub amount_paid: f64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub modified_at: String,
}

/// Build the canonical in-memory [`Job`] from a wire record.
///
/// Classification is resolved here — the one place legacy `jobType` records
/// enter the system — missing labor prices get the rule-derived suggestion,
/// and every derived total is recomputed from scratch. Stored totals on the
/// record are ignored.
fn job_from_record(record: JobRecord, rates: &RateSchedule) -> Job {
    let now = now_rfc3339();
    let customer_type = record.customer_type.unwrap_or_default();

    let mut job = Job {
        id: record.id.unwrap_or_else(Uuid::new_v4),
        job_number: record.job_number,
        customer_type,
        vehicles: Vec::with_capacity(record.vehicles.len()),
        subtotal: 0.0,
        total_due: 0.0,
        deductible: record.deductible,
        rebate: record.rebate,
        amount_paid: record.amount_paid,
        balance_due: 0.0,
        created_at: if record.created_at.is_empty() {
            now.clone()
        } else {
            record.created_at
        },
        modified_at: if record.modified_at.is_empty() {
            now
        } else {
            record.modified_at
        },
    };

    for vehicle_record in record.vehicles {
        let mut vehicle = Vehicle {
            id: vehicle_record.id.unwrap_or_else(Uuid::new_v4),
            vehicle_year: vehicle_record.vehicle_year,
            body_style: vehicle_record.body_style,
            parts: Vec::with_capacity(vehicle_record.parts.len()),
        };
        let body_class = vehicle.body_class();
        let year = vehicle.year_or_current();

        for part_record in vehicle_record.parts {
            let (service_type, glass_type) = classify::resolve(
                part_record.service_type,
                part_record.glass_type,
                part_record.job_type.as_deref(),
            );
            let labor_price = part_record.labor_price.unwrap_or_else(|| {
                labor::labor_price(
                    service_type,
                    glass_type,
                    body_class,
                    year,
                    part_record.part_price,
                    customer_type,
                    &rates.labor,
                )
            });
            vehicle.parts.push(Part {
                id: part_record.id.unwrap_or_else(Uuid::new_v4),
                service_type,
                glass_type,
                glass_part_number: part_record.glass_part_number,
                distributor: part_record.distributor,
                accessories: part_record.accessories,
                is_aftermarket: part_record.is_aftermarket,
                order_date: part_record.order_date,
                arrival_date: part_record.arrival_date,
                calibration_type: part_record.calibration_type,
                part_price: part_record.part_price,
                markup: part_record.markup,
                accessories_price: part_record.accessories_price,
                urethane_price: part_record.urethane_price,
                sales_tax_percent: part_record.sales_tax_percent,
                labor_price,
                calibration_price: part_record.calibration_price,
                mobile_fee: part_record.mobile_fee,
                subcontractor_cost: part_record.subcontractor_cost,
                parts_subtotal: 0.0,
                part_total: 0.0,
            });
        }
        job.vehicles.push(vehicle);
    }

    recalculate(&mut job, &FieldChange::JobLoaded, rates);
    job
}

// ── new_job ───────────────────────────────────────────────────────────────────

/// Testable inner logic for [`new_job`].
///
/// Replaces the active job with a fresh empty one and returns its snapshot.
pub(crate) fn new_job_inner(job_lock: &RwLock<Job>) -> Result<JobSnapshot, AppError> {
    let fresh = Job::new();
    tracing::info!(job_id = %fresh.id, "starting new job");
    let snapshot = JobSnapshot::from(&fresh);
    let mut job = write_job(job_lock)?;
    *job = fresh;
    Ok(snapshot)
}

// ── load_job ──────────────────────────────────────────────────────────────────

/// Testable inner logic for [`load_job`].
///
/// Ingests a [`JobRecord`], resolves classification, fills in missing labor
/// suggestions, recomputes every derived total, and replaces the active job.
pub(crate) fn load_job_inner(
    record: JobRecord,
    job_lock: &RwLock<Job>,
    rates_lock: &RwLock<RateSchedule>,
) -> Result<JobSnapshot, AppError> {
    let rates = read_rates(rates_lock)?;
    let loaded = job_from_record(record, &rates);
    tracing::info!(job_id = %loaded.id, job_number = %loaded.job_number, "loaded job record");
    let snapshot = JobSnapshot::from(&loaded);
    let mut job = write_job(job_lock)?;
    *job = loaded;
    Ok(snapshot)
}

// ── get_job ───────────────────────────────────────────────────────────────────

/// Testable inner logic for [`get_job`].
///
/// Returns a clone of the full active job, derived totals included, for the
/// persistence collaborator and for full-record UI refreshes.
pub(crate) fn get_job_inner(job_lock: &RwLock<Job>) -> Result<Job, AppError> {
    let job = read_job(job_lock)?;
    Ok(job.clone())
}

// ── get_job_snapshot ──────────────────────────────────────────────────────────

/// Testable inner logic for [`get_job_snapshot`].
pub(crate) fn get_job_snapshot_inner(job_lock: &RwLock<Job>) -> Result<JobSnapshot, AppError> {
    let job = read_job(job_lock)?;
    Ok(JobSnapshot::from(&*job))
}

// ── set_job_number ────────────────────────────────────────────────────────────

/// Testable inner logic for [`set_job_number`].
///
/// Pure bookkeeping — the job number plays no pricing role, so no
/// recalculation is dispatched.
pub(crate) fn set_job_number_inner(
    number: String,
    job_lock: &RwLock<Job>,
) -> Result<JobSnapshot, AppError> {
    let mut job = write_job(job_lock)?;
    job.job_number = number;
    job.touch();
    Ok(JobSnapshot::from(&*job))
}

// ── set_customer_type ─────────────────────────────────────────────────────────

/// Testable inner logic for [`set_customer_type`].
///
/// The customer category steers every pricing branch, so this dispatches the
/// widest cascade: labor and totals for every part of every vehicle, plus the
/// materials zeroing when switching to subcontractor.
pub(crate) fn set_customer_type_inner(
    customer_type: CustomerType,
    job_lock: &RwLock<Job>,
    rates_lock: &RwLock<RateSchedule>,
) -> Result<JobSnapshot, AppError> {
    let rates = read_rates(rates_lock)?;
    let mut job = write_job(job_lock)?;
    job.customer_type = customer_type;
    recalculate(&mut job, &FieldChange::CustomerType, &rates);
    job.touch();
    Ok(JobSnapshot::from(&*job))
}

// ── payment fields ────────────────────────────────────────────────────────────

/// Testable inner logic for [`set_amount_paid`].
pub(crate) fn set_amount_paid_inner(
    amount: f64,
    job_lock: &RwLock<Job>,
    rates_lock: &RwLock<RateSchedule>,
) -> Result<JobSnapshot, AppError> {
    let rates = read_rates(rates_lock)?;
    let mut job = write_job(job_lock)?;
    job.amount_paid = amount;
    recalculate(&mut job, &FieldChange::AmountPaid, &rates);
    job.touch();
    Ok(JobSnapshot::from(&*job))
}

/// Testable inner logic for [`set_deductible`].
pub(crate) fn set_deductible_inner(
    amount: f64,
    job_lock: &RwLock<Job>,
    rates_lock: &RwLock<RateSchedule>,
) -> Result<JobSnapshot, AppError> {
    let rates = read_rates(rates_lock)?;
    let mut job = write_job(job_lock)?;
    job.deductible = amount;
    recalculate(&mut job, &FieldChange::Deductible, &rates);
    job.touch();
    Ok(JobSnapshot::from(&*job))
}

/// Testable inner logic for [`set_rebate`].
pub(crate) fn set_rebate_inner(
    amount: f64,
    job_lock: &RwLock<Job>,
    rates_lock: &RwLock<RateSchedule>,
) -> Result<JobSnapshot, AppError> {
    let rates = read_rates(rates_lock)?;
    let mut job = write_job(job_lock)?;
    job.rebate = amount;
    recalculate(&mut job, &FieldChange::Rebate, &rates);
    job.touch();
    Ok(JobSnapshot::from(&*job))
}

// ── Tauri command wrappers ────────────────────────────────────────────────────

/// Replace the active job with a fresh empty one.
#[cfg(feature = "tauri-app")]
#[tauri::command]
pub async fn new_job(state: tauri::State<'_, AppState>) -> Result<JobSnapshot, AppError> {
    new_job_inner(&state.job)
}

/// Load a job record supplied by the persistence collaborator.
///
/// Tolerates missing fields and legacy `jobType` classification; every
/// derived total is recomputed on ingest.
#[cfg(feature = "tauri-app")]
#[tauri::command]
pub async fn load_job(
    record: JobRecord,
    state: tauri::State<'_, AppState>,
) -> Result<JobSnapshot, AppError> {
    load_job_inner(record, &state.job, &state.rates)
}

/// Return the full active job record, derived totals included.
#[cfg(feature = "tauri-app")]
#[tauri::command]
pub async fn get_job(state: tauri::State<'_, AppState>) -> Result<Job, AppError> {
    get_job_inner(&state.job)
}

/// Return the lightweight money snapshot of the active job.
#[cfg(feature = "tauri-app")]
#[tauri::command]
pub async fn get_job_snapshot(
    state: tauri::State<'_, AppState>,
) -> Result<JobSnapshot, AppError> {
    get_job_snapshot_inner(&state.job)
}

/// Set the shop-assigned job number.
#[cfg(feature = "tauri-app")]
#[tauri::command]
pub async fn set_job_number(
    number: String,
    state: tauri::State<'_, AppState>,
) -> Result<JobSnapshot, AppError> {
    set_job_number_inner(number, &state.job)
}

/// Change the job's customer category and reprice everything under it.
#[cfg(feature = "tauri-app")]
#[tauri::command]
pub async fn set_customer_type(
    customer_type: CustomerType,
    state: tauri::State<'_, AppState>,
) -> Result<JobSnapshot, AppError> {
    set_customer_type_inner(customer_type, &state.job, &state.rates)
}

/// Record the amount the customer has paid so far.
#[cfg(feature = "tauri-app")]
#[tauri::command]
pub async fn set_amount_paid(
    amount: f64,
    state: tauri::State<'_, AppState>,
) -> Result<JobSnapshot, AppError> {
    set_amount_paid_inner(amount, &state.job, &state.rates)
}

/// Record the insurance deductible for the job.
#[cfg(feature = "tauri-app")]
#[tauri::command]
pub async fn set_deductible(
    amount: f64,
    state: tauri::State<'_, AppState>,
) -> Result<JobSnapshot, AppError> {
    set_deductible_inner(amount, &state.job, &state.rates)
}

/// Record the rebate for the job.
#[cfg(feature = "tauri-app")]
#[tauri::command]
pub async fn set_rebate(
    amount: f64,
    state: tauri::State<'_, AppState>,
) -> Result<JobSnapshot, AppError> {
    set_rebate_inner(amount, &state.job, &state.rates)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
