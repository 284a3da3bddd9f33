//! Part data model — one priced line item on a vehicle.
//!
//! [`Part`] is the in-memory and wire representation of a single piece of
//! glass work. The money fields split into operator inputs (prices, fees,
//! tax) and derived outputs (`parts_subtotal`, `part_total`); the derived
//! fields are recomputed by the pricing engine after every edit and are never
//! authoritative on their own.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of work performed on a part.
///
/// Serialized as a snake_case string (e.g. `"replace"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    /// Chip/crack repair of existing glass.
    Repair,
    /// Removal and replacement of the glass.
    Replace,
    /// ADAS camera calibration with no glass work on this line.
    Calibration,
}

/// Which piece of glass the line item covers.
///
/// Serialized as a snake_case string (e.g. `"back_glass_powerslide"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlassType {
    Windshield,
    DoorGlass,
    BackGlass,
    /// Sliding rear window on pickup trucks.
    BackGlassPowerslide,
    QuarterGlass,
    Sunroof,
    SideMirror,
}

/// ADAS calibration status recorded on a part.
///
/// Purely descriptive — calibration money flows through the part's
/// `calibration_price` field, not through this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationType {
    #[default]
    None,
    Static,
    Dynamic,
    Dual,
    Approve,
    Declined,
}

/// A priced line item on a vehicle.
///
/// Fields are serialized with camelCase keys so the TypeScript frontend
/// receives a consistent naming convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Unique identifier for this line item.
    pub id: Uuid,
    /// Kind of work performed.
    pub service_type: ServiceType,
    /// Which piece of glass is worked on.
    pub glass_type: GlassType,
    /// Distributor part number for the glass (e.g. `"FW03382 GBN"`).
    pub glass_part_number: String,
    /// Supplier the glass is ordered from.
    pub distributor: String,
    /// Free-text accessories note (moldings, clips, rain sensor pads).
    pub accessories: String,
    /// True when aftermarket glass is quoted instead of OEM.
    pub is_aftermarket: bool,
    /// Date the glass was ordered, as entered.
    pub order_date: String,
    /// Date the glass arrived, as entered.
    pub arrival_date: String,
    /// ADAS calibration status for this line.
    pub calibration_type: CalibrationType,
    /// Cost of the glass itself. Doubles as the part cost that drives the
    /// expensive-glass labor rule.
    pub part_price: f64,
    /// Markup added on top of the glass price.
    pub markup: f64,
    /// Price of billed accessories.
    pub accessories_price: f64,
    /// Price of urethane/adhesive kit.
    pub urethane_price: f64,
    /// Sales tax applied to materials, in percent (e.g. `8.25`).
    pub sales_tax_percent: f64,
    /// Labor price. Suggested by the labor rule, overridable by the operator.
    pub labor_price: f64,
    /// Price billed for ADAS calibration.
    pub calibration_price: f64,
    /// Fee for mobile service at the customer's location.
    pub mobile_fee: f64,
    /// Cost owed to the subcontractor on subcontractor jobs.
    pub subcontractor_cost: f64,
    /// Taxed materials subtotal (derived).
    pub parts_subtotal: f64,
    /// Final line total, rounded up to a whole currency unit (derived).
    pub part_total: f64,
}

impl Part {
    /// Create an empty part with a fresh id.
    ///
    /// Classification defaults to a windshield replacement — the shop's most
    /// common line item — and every money field starts at zero.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            service_type: ServiceType::Replace,
            glass_type: GlassType::Windshield,
            glass_part_number: String::new(),
            distributor: String::new(),
            accessories: String::new(),
            is_aftermarket: false,
            order_date: String::new(),
            arrival_date: String::new(),
            calibration_type: CalibrationType::None,
            part_price: 0.0,
            markup: 0.0,
            accessories_price: 0.0,
            urethane_price: 0.0,
            sales_tax_percent: 0.0,
            labor_price: 0.0,
            calibration_price: 0.0,
            mobile_fee: 0.0,
            subcontractor_cost: 0.0,
            parts_subtotal: 0.0,
            part_total: 0.0,
        }
    }
}

impl Default for Part {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_part() -> Part {
        Part {
            id: Uuid::parse_str("5d2e9b00-0000-0000-0000-000000000001").unwrap(),
            service_type: ServiceType::Replace,
            glass_type: GlassType::Windshield,
            glass_part_number: "FW03382 GBN".to_string(),
            distributor: "Pilkington".to_string(),
            accessories: "top molding".to_string(),
            is_aftermarket: false,
            order_date: "2025-03-14".to_string(),
            arrival_date: "2025-03-16".to_string(),
            calibration_type: CalibrationType::Dynamic,
            part_price: 150.0,
            markup: 20.0,
            accessories_price: 0.0,
            urethane_price: 15.0,
            sales_tax_percent: 8.25,
            labor_price: 175.0,
            calibration_price: 0.0,
            mobile_fee: 0.0,
            subcontractor_cost: 0.0,
            parts_subtotal: 0.0,
            part_total: 0.0,
        }
    }

    #[test]
    fn part_serde_round_trip() {
        let original = make_part();
        let json = serde_json::to_string(&original).expect("serialize Part");
        let recovered: Part = serde_json::from_str(&json).expect("deserialize Part");
        assert_eq!(original, recovered);
    }

    #[test]
    fn part_fields_are_camel_case() {
        let part = make_part();
        let value = serde_json::to_value(&part).expect("to_value");
        assert!(value.get("glassPartNumber").is_some());
        assert!(value.get("glass_part_number").is_none());
        assert!(value.get("salesTaxPercent").is_some());
        assert!(value.get("isAftermarket").is_some());
        assert!(value.get("partsSubtotal").is_some());
        assert!(value.get("partTotal").is_some());
    }

    #[test]
    fn enums_serialize_as_snake_case_strings() {
        let part = make_part();
        let value = serde_json::to_value(&part).expect("to_value");
        assert_eq!(value["serviceType"], "replace");
        assert_eq!(value["glassType"], "windshield");
        assert_eq!(value["calibrationType"], "dynamic");

        let powerslide = serde_json::to_value(GlassType::BackGlassPowerslide).expect("to_value");
        assert_eq!(powerslide, "back_glass_powerslide");
    }

    #[test]
    fn all_glass_types_round_trip() {
        let types = [
            GlassType::Windshield,
            GlassType::DoorGlass,
            GlassType::BackGlass,
            GlassType::BackGlassPowerslide,
            GlassType::QuarterGlass,
            GlassType::Sunroof,
            GlassType::SideMirror,
        ];
        for gt in &types {
            let json = serde_json::to_string(gt).expect("serialize GlassType");
            let recovered: GlassType = serde_json::from_str(&json).expect("deserialize GlassType");
            assert_eq!(gt, &recovered);
        }
    }

    #[test]
    fn new_part_defaults_to_windshield_replacement() {
        let part = Part::new();
        assert_eq!(part.service_type, ServiceType::Replace);
        assert_eq!(part.glass_type, GlassType::Windshield);
        assert_eq!(part.calibration_type, CalibrationType::None);
        assert_eq!(part.part_price, 0.0);
        assert_eq!(part.labor_price, 0.0);
        assert_eq!(part.parts_subtotal, 0.0);
        assert_eq!(part.part_total, 0.0);
        assert!(!part.is_aftermarket);
    }

    #[test]
    fn new_parts_get_distinct_ids() {
        assert_ne!(Part::new().id, Part::new().id);
    }
}
