//! Labor pricing rule.
//!
//! Pure and total: defined for every input combination, no side effects.
//! Rules are evaluated in a fixed order and the first match wins:
//!
//! 1. Dealer jobs pay the dealer flat rate.
//! 2. Subcontractor jobs start from the subcontractor flat suggestion (the
//!    operator may override it afterward, from the rate menu or freely).
//! 3. Expensive glass — part cost at or above the threshold — is charged a
//!    share of the part cost, rounded half-up to a whole currency unit.
//! 4. Chip/crack repairs pay the repair flat rate.
//! 5. Calibration-only lines carry no labor; calibration money flows through
//!    the part's calibration price instead.
//! 6. Side glass (door, quarter, mirror) is priced by truck class.
//! 7. Opening glass (windshield, back glass, powerslide, sunroof) is priced
//!    by body class and model year.

use crate::models::{BodyClass, CustomerType, GlassType, ServiceType};

use super::schedule::LaborRates;

/// Compute the suggested labor price for one part.
///
/// `part_cost` is the part's glass price; it drives the expensive-glass rule.
pub fn labor_price(
    service_type: ServiceType,
    glass_type: GlassType,
    body_class: BodyClass,
    vehicle_year: i32,
    part_cost: f64,
    customer_type: CustomerType,
    rates: &LaborRates,
) -> f64 {
    match customer_type {
        CustomerType::Dealer => return rates.dealer_flat,
        CustomerType::Subcontractor => return rates.subcontractor_flat,
        CustomerType::Retail | CustomerType::Fleet => {}
    }

    // Expensive glass overrides every service- and glass-based rule.
    if part_cost >= rates.cost_threshold {
        return (part_cost * rates.cost_markup_rate).round();
    }

    match service_type {
        ServiceType::Repair => return rates.repair_flat,
        ServiceType::Calibration => return 0.0,
        ServiceType::Replace => {}
    }

    match glass_type {
        GlassType::DoorGlass | GlassType::QuarterGlass | GlassType::SideMirror => {
            if body_class == BodyClass::HeavyTruck {
                rates.side_glass_heavy_truck
            } else {
                rates.side_glass
            }
        }
        GlassType::Windshield
        | GlassType::BackGlass
        | GlassType::BackGlassPowerslide
        | GlassType::Sunroof => opening_price(glass_type, body_class, vehicle_year, rates),
    }
}

/// Rate for glass set into a body opening (the windshield family).
fn opening_price(
    glass_type: GlassType,
    body_class: BodyClass,
    vehicle_year: i32,
    rates: &LaborRates,
) -> f64 {
    if body_class == BodyClass::HeavyTruck {
        return rates.opening_heavy_truck;
    }
    if glass_type == GlassType::BackGlassPowerslide {
        return rates.powerslide;
    }
    if vehicle_year <= rates.older_year_cutoff && body_class != BodyClass::Utility {
        return rates.older_year_rate;
    }
    match body_class {
        BodyClass::Sedan => rates.sedan,
        BodyClass::MiniSuv => rates.mini_suv,
        BodyClass::Utility => rates.utility,
        // SuvPickup doubles as the class for unmatched body styles.
        BodyClass::SuvPickup => rates.suv_pickup,
        // Returned above; kept for exhaustiveness.
        BodyClass::HeavyTruck => rates.opening_heavy_truck,
    }
}
