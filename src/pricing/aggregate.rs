//! Job-level aggregation.

use crate::models::{CustomerType, Vehicle};

use super::schedule::FeeRates;
use super::totals::line_totals;

/// Aggregated money outputs for a whole job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JobTotals {
    /// Sum of line parts subtotals, vehicle order then part order.
    pub subtotal: f64,
    /// Sum of line part totals, vehicle order then part order.
    pub total_due: f64,
    /// `max(0, total_due - amount_paid)`; never negative, even overpaid.
    pub balance_due: f64,
}

/// Sum line-item totals across every part of every vehicle.
///
/// Each line is re-derived from the part's input fields; stored
/// `parts_subtotal` / `part_total` values are never trusted. A job with no
/// parts aggregates to zeros.
pub fn job_totals(
    vehicles: &[Vehicle],
    customer_type: CustomerType,
    amount_paid: f64,
    fees: &FeeRates,
) -> JobTotals {
    let mut subtotal = 0.0;
    let mut total_due = 0.0;
    for vehicle in vehicles {
        for part in &vehicle.parts {
            let line = line_totals(part, customer_type, fees);
            subtotal += line.parts_subtotal;
            total_due += line.part_total;
        }
    }
    JobTotals {
        subtotal,
        total_due,
        balance_due: (total_due - amount_paid).max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Part;

    fn make_vehicle(labor_prices: &[f64]) -> Vehicle {
        let mut vehicle = Vehicle::new();
        for labor in labor_prices {
            let mut part = Part::new();
            part.labor_price = *labor;
            vehicle.parts.push(part);
        }
        vehicle
    }

    #[test]
    fn empty_job_aggregates_to_zero() {
        let totals = job_totals(&[], CustomerType::Retail, 0.0, &FeeRates::default());
        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.total_due, 0.0);
        assert_eq!(totals.balance_due, 0.0);
    }

    #[test]
    fn totals_sum_across_vehicles_and_parts() {
        // Dealer lines with bare labor so the expected sums stay whole.
        let vehicles = vec![make_vehicle(&[100.0, 200.0]), make_vehicle(&[50.0])];
        let totals = job_totals(&vehicles, CustomerType::Dealer, 0.0, &FeeRates::default());
        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.total_due, 350.0);
        assert_eq!(totals.balance_due, 350.0);
    }

    #[test]
    fn subtotal_sums_taxed_materials() {
        let mut vehicle = Vehicle::new();
        let mut part = Part::new();
        part.part_price = 100.0;
        part.sales_tax_percent = 10.0;
        vehicle.parts.push(part.clone());
        vehicle.parts.push(part);

        let totals = job_totals(
            std::slice::from_ref(&vehicle),
            CustomerType::Dealer,
            0.0,
            &FeeRates::default(),
        );
        assert!((totals.subtotal - 220.0).abs() < 1e-9);
        assert_eq!(totals.total_due, 220.0);
    }

    #[test]
    fn amount_paid_reduces_balance() {
        let vehicles = vec![make_vehicle(&[300.0])];
        let totals = job_totals(&vehicles, CustomerType::Dealer, 120.0, &FeeRates::default());
        assert_eq!(totals.total_due, 300.0);
        assert_eq!(totals.balance_due, 180.0);
    }

    #[test]
    fn overpayment_floors_balance_at_zero() {
        let vehicles = vec![make_vehicle(&[300.0])];
        let totals = job_totals(&vehicles, CustomerType::Dealer, 500.0, &FeeRates::default());
        assert_eq!(totals.balance_due, 0.0);
    }

    #[test]
    fn stored_part_totals_are_ignored() {
        let mut vehicle = make_vehicle(&[100.0]);
        vehicle.parts[0].part_total = 9999.0;
        vehicle.parts[0].parts_subtotal = 9999.0;
        let totals = job_totals(
            std::slice::from_ref(&vehicle),
            CustomerType::Dealer,
            0.0,
            &FeeRates::default(),
        );
        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.total_due, 100.0);
    }

    #[test]
    fn subcontractor_jobs_aggregate_labor_and_fees() {
        let mut vehicle = Vehicle::new();
        let mut part = Part::new();
        part.labor_price = 100.0;
        part.mobile_fee = 25.0;
        part.subcontractor_cost = 10.0;
        part.part_price = 500.0; // must not contribute
        vehicle.parts.push(part);

        let totals = job_totals(
            std::slice::from_ref(&vehicle),
            CustomerType::Subcontractor,
            0.0,
            &FeeRates::default(),
        );
        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.total_due, 135.0);
    }
}
