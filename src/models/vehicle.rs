//! Vehicle data model and body-style classification.
//!
//! A vehicle owns an ordered list of [`Part`]s that share its model year and
//! body class for labor-pricing purposes. `bodyStyle` arrives as free text
//! from intake forms, so it is normalized into the closed [`BodyClass`] enum
//! here at the model boundary; the pricing rules never see the raw string.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Part;

/// Normalized body-style category used by the labor pricing rules.
///
/// Derived from the free-text `bodyStyle` field by keyword matching (see
/// [`BodyClass::parse`]). Not serialized — the raw string stays on the
/// record and the class is re-derived wherever it is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyClass {
    Sedan,
    MiniSuv,
    Utility,
    SuvPickup,
    HeavyTruck,
}

impl BodyClass {
    /// Classify a free-text body style, case-insensitively.
    ///
    /// More specific keywords win: `"MINI SUV"` classifies as
    /// [`BodyClass::MiniSuv`] even though it contains `"SUV"`, and
    /// `"SEMI TRUCK"` classifies as [`BodyClass::HeavyTruck`] rather than as
    /// a pickup. Styles matching no keyword fall back to
    /// [`BodyClass::SuvPickup`].
    pub fn parse(body_style: &str) -> Self {
        let style = body_style.to_uppercase();
        let has = |keyword: &str| style.contains(keyword);

        if has("18 WHEELER") || has("SEMI") {
            BodyClass::HeavyTruck
        } else if has("MINI SUV") || has("CROSSOVER") {
            BodyClass::MiniSuv
        } else if has("UTILITY") {
            BodyClass::Utility
        } else if has("SEDAN") || has("COUPE") || has("HATCHBACK") || has("CONVERTIBLE") {
            BodyClass::Sedan
        } else {
            // SUV / PICKUP / TRUCK / VAN / WAGON, and anything unrecognized.
            BodyClass::SuvPickup
        }
    }
}

/// A vehicle on a job, carrying its own ordered list of priced parts.
///
/// Fields are serialized with camelCase keys so the TypeScript frontend
/// receives a consistent naming convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    /// Unique identifier for this vehicle.
    pub id: Uuid,
    /// Model year as entered; free text (see [`Vehicle::year_or_current`]).
    pub vehicle_year: String,
    /// Body style as entered; free text (see [`BodyClass::parse`]).
    pub body_style: String,
    /// Priced line items, in display order.
    pub parts: Vec<Part>,
}

impl Vehicle {
    /// Create an empty vehicle with a fresh id.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            vehicle_year: String::new(),
            body_style: String::new(),
            parts: Vec::new(),
        }
    }

    /// The model year as an integer.
    ///
    /// Intake data is frequently incomplete, so an empty or unparseable year
    /// falls back to the current calendar year rather than failing.
    pub fn year_or_current(&self) -> i32 {
        self.vehicle_year
            .trim()
            .parse()
            .unwrap_or_else(|_| chrono::Utc::now().year())
    }

    /// The normalized body class for labor pricing.
    pub fn body_class(&self) -> BodyClass {
        BodyClass::parse(&self.body_style)
    }
}

impl Default for Vehicle {
    fn default() -> Self {
        Self::new()
    }
}
