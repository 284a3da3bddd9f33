//! Line-item totals calculator.

use crate::models::{CustomerType, Part};

use super::schedule::FeeRates;

/// Computed money outputs for one line item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineTotals {
    /// Taxed materials subtotal. Zero on subcontractor jobs.
    pub parts_subtotal: f64,
    /// Final line total, rounded up to the next whole currency unit.
    pub part_total: f64,
}

/// Compute the derived totals for one part.
///
/// Reads only the part's input fields, never its stored derived fields, so
/// it must be re-invoked — not cached — whenever any contributing field
/// changes.
///
/// Subcontractor jobs bill labor, mobile fee, and subcontractor cost only;
/// the subcontractor supplies the glass, so no materials or tax are charged.
/// Every other category bills taxed materials plus labor, calibration, and
/// the mobile fee, and non-dealer categories additionally carry the
/// payment-processing surcharge. Line totals always round up, never down.
pub fn line_totals(part: &Part, customer_type: CustomerType, fees: &FeeRates) -> LineTotals {
    if customer_type == CustomerType::Subcontractor {
        let total = part.labor_price + part.mobile_fee + part.subcontractor_cost;
        return LineTotals {
            parts_subtotal: 0.0,
            part_total: total.ceil(),
        };
    }

    let materials = part.part_price + part.markup + part.accessories_price + part.urethane_price;
    let parts_subtotal = materials * (1.0 + part.sales_tax_percent / 100.0);
    let pre_fee_total =
        parts_subtotal + part.labor_price + part.calibration_price + part.mobile_fee;

    let part_total = match customer_type {
        // Dealer accounts settle by check; no processing surcharge.
        CustomerType::Dealer => pre_fee_total.ceil(),
        _ => (pre_fee_total * (1.0 + fees.processing_surcharge_percent / 100.0)).ceil(),
    };

    LineTotals {
        parts_subtotal,
        part_total,
    }
}
