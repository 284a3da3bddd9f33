//! Recalculation cascade.
//!
//! Every mutation to a job flows through [`recalculate`], which maps the
//! changed field onto the re-pricing scope it requires and always finishes by
//! re-running the job aggregator. The scoping policy lives in this one
//! dispatcher instead of being scattered across the edit handlers:
//!
//! - customer type: labor and totals for every part of every vehicle
//! - vehicle year / body style: labor and totals for that vehicle's parts
//! - part service type / glass type / glass price: labor and totals for that
//!   part alone
//! - any other money field on a part: totals only, labor untouched
//! - structural edits, payment edits, record loads, rate swaps: totals-only
//!   or aggregate-only scopes
//!
//! There is no pending or dirty state. A dispatch completes every derived
//! value synchronously before the caller releases the job record.

use uuid::Uuid;

use crate::models::{BodyClass, CustomerType, Job, Part, Vehicle};

use super::aggregate::job_totals;
use super::labor::labor_price;
use super::schedule::RateSchedule;
use super::totals::line_totals;

/// A single edit to a job, tagged with where it happened.
///
/// Carries just enough addressing to scope the re-pricing. The new value has
/// already been written to the record by the time the change is dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    /// The job's customer category changed.
    CustomerType,
    /// A vehicle's model year changed.
    VehicleYear { vehicle_id: Uuid },
    /// A vehicle's body style changed.
    BodyStyle { vehicle_id: Uuid },
    /// A part's service type changed.
    ServiceType { vehicle_id: Uuid, part_id: Uuid },
    /// A part's glass type changed.
    GlassType { vehicle_id: Uuid, part_id: Uuid },
    /// A part's glass price changed. It may have crossed the expensive-glass
    /// threshold, so labor is re-derived.
    PartPrice { vehicle_id: Uuid, part_id: Uuid },
    /// Any other money field on a part changed (markup, accessories,
    /// urethane, tax, labor override, calibration, mobile fee, subcontractor
    /// cost). Labor is not re-derived — it may be an operator override.
    CostComponent { vehicle_id: Uuid, part_id: Uuid },
    /// A new empty part was added and needs its initial labor suggestion.
    PartAdded { vehicle_id: Uuid, part_id: Uuid },
    /// A part was removed.
    PartRemoved,
    /// A new empty vehicle was added.
    VehicleAdded { vehicle_id: Uuid },
    /// A vehicle was removed.
    VehicleRemoved,
    /// The amount-paid input changed.
    AmountPaid,
    /// The deductible input changed.
    Deductible,
    /// The rebate input changed.
    Rebate,
    /// A whole job record was (re)loaded.
    JobLoaded,
    /// The rate schedule was replaced.
    RatesChanged,
}

/// Re-derive every value affected by `change`, then re-aggregate the job.
///
/// Unknown vehicle or part ids scope to nothing; the aggregation pass still
/// runs, so the job-level totals are correct either way.
pub fn recalculate(job: &mut Job, change: &FieldChange, rates: &RateSchedule) {
    tracing::debug!(?change, "recalculating job");

    let customer = job.customer_type;
    match change {
        FieldChange::CustomerType => {
            for vehicle in &mut job.vehicles {
                let body_class = vehicle.body_class();
                let year = vehicle.year_or_current();
                for part in &mut vehicle.parts {
                    derive_labor(part, body_class, year, customer, rates);
                    // The subcontractor supplies the glass; materials no
                    // longer apply to the job.
                    if customer == CustomerType::Subcontractor {
                        clear_material_fields(part);
                    }
                    apply_totals(part, customer, rates);
                }
            }
        }
        FieldChange::VehicleYear { vehicle_id }
        | FieldChange::BodyStyle { vehicle_id }
        | FieldChange::VehicleAdded { vehicle_id } => {
            if let Some(vehicle) = job.vehicles.iter_mut().find(|v| v.id == *vehicle_id) {
                reprice_vehicle(vehicle, customer, rates);
            }
        }
        FieldChange::ServiceType { vehicle_id, part_id }
        | FieldChange::GlassType { vehicle_id, part_id }
        | FieldChange::PartPrice { vehicle_id, part_id }
        | FieldChange::PartAdded { vehicle_id, part_id } => {
            if let Some(vehicle) = job.vehicles.iter_mut().find(|v| v.id == *vehicle_id) {
                let body_class = vehicle.body_class();
                let year = vehicle.year_or_current();
                if let Some(part) = vehicle.parts.iter_mut().find(|p| p.id == *part_id) {
                    derive_labor(part, body_class, year, customer, rates);
                    apply_totals(part, customer, rates);
                }
            }
        }
        FieldChange::CostComponent { vehicle_id, part_id } => {
            if let Some(vehicle) = job.vehicles.iter_mut().find(|v| v.id == *vehicle_id) {
                if let Some(part) = vehicle.parts.iter_mut().find(|p| p.id == *part_id) {
                    apply_totals(part, customer, rates);
                }
            }
        }
        // Stored labor prices may be operator overrides, so loads and rate
        // swaps refresh the totals math only.
        FieldChange::JobLoaded | FieldChange::RatesChanged => {
            for vehicle in &mut job.vehicles {
                for part in &mut vehicle.parts {
                    apply_totals(part, customer, rates);
                }
            }
        }
        FieldChange::PartRemoved
        | FieldChange::VehicleRemoved
        | FieldChange::AmountPaid
        | FieldChange::Deductible
        | FieldChange::Rebate => {}
    }

    let totals = job_totals(&job.vehicles, customer, job.amount_paid, &rates.fees);
    job.subtotal = totals.subtotal;
    job.total_due = totals.total_due;
    job.balance_due = totals.balance_due;
}

/// Re-derive labor and totals for every part on one vehicle.
fn reprice_vehicle(vehicle: &mut Vehicle, customer: CustomerType, rates: &RateSchedule) {
    let body_class = vehicle.body_class();
    let year = vehicle.year_or_current();
    for part in &mut vehicle.parts {
        derive_labor(part, body_class, year, customer, rates);
        apply_totals(part, customer, rates);
    }
}

/// Overwrite the part's labor price with the rule-derived suggestion.
fn derive_labor(
    part: &mut Part,
    body_class: BodyClass,
    vehicle_year: i32,
    customer: CustomerType,
    rates: &RateSchedule,
) {
    part.labor_price = labor_price(
        part.service_type,
        part.glass_type,
        body_class,
        vehicle_year,
        part.part_price,
        customer,
        &rates.labor,
    );
}

/// Recompute and store the part's derived totals.
fn apply_totals(part: &mut Part, customer: CustomerType, rates: &RateSchedule) {
    let line = line_totals(part, customer, &rates.fees);
    part.parts_subtotal = line.parts_subtotal;
    part.part_total = line.part_total;
}

/// Zero the materials fields that do not apply to subcontractor billing.
/// Labor, mobile fee, and subcontractor cost are exactly what such a job
/// bills, so they are kept.
fn clear_material_fields(part: &mut Part) {
    part.part_price = 0.0;
    part.markup = 0.0;
    part.accessories_price = 0.0;
    part.urethane_price = 0.0;
    part.sales_tax_percent = 0.0;
    part.calibration_price = 0.0;
}
