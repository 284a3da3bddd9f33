//! Rate schedule — every rate and threshold the pricing engine uses.
//!
//! Loaded from a TOML file; the built-in [`Default`] is the shop's standard
//! rate card, so the application prices correctly with no file present.

use std::path::Path;

use super::RateScheduleError;

/// `[labor]` — labor rates and thresholds, in currency units.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LaborRates {
    /// Flat labor for dealer jobs.
    pub dealer_flat: f64,
    /// Initial labor suggestion for subcontractor jobs.
    pub subcontractor_flat: f64,
    /// Fixed rates the operator may pick a subcontractor override from.
    pub subcontractor_rate_menu: Vec<f64>,
    /// Part cost at or above which labor switches to a share of the cost.
    pub cost_threshold: f64,
    /// Share of the part cost charged as labor above the threshold.
    pub cost_markup_rate: f64,
    /// Flat labor for chip/crack repairs.
    pub repair_flat: f64,
    /// Door, quarter, and mirror glass.
    pub side_glass: f64,
    /// Door, quarter, and mirror glass on heavy trucks.
    pub side_glass_heavy_truck: f64,
    /// Windshield-family glass on heavy trucks.
    pub opening_heavy_truck: f64,
    /// Power-slide back glass.
    pub powerslide: f64,
    /// Model years at or below this use the older-vehicle rate.
    pub older_year_cutoff: i32,
    /// Windshield-family rate for older vehicles.
    pub older_year_rate: f64,
    /// Windshield-family rate for sedans.
    pub sedan: f64,
    /// Windshield-family rate for mini SUVs / crossovers.
    pub mini_suv: f64,
    /// Windshield-family rate for utility vehicles.
    pub utility: f64,
    /// Windshield-family rate for SUVs, pickups, vans, and wagons.
    pub suv_pickup: f64,
}

/// `[fees]` — fees applied on top of the pre-fee line total.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FeeRates {
    /// Payment-processing surcharge on non-dealer totals, in percent.
    pub processing_surcharge_percent: f64,
}

/// The complete set of rates the engine prices against.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RateSchedule {
    pub labor: LaborRates,
    pub fees: FeeRates,
}

impl Default for LaborRates {
    fn default() -> Self {
        Self {
            dealer_flat: 90.0,
            subcontractor_flat: 100.0,
            subcontractor_rate_menu: vec![100.0, 110.0, 125.0],
            cost_threshold: 250.0,
            cost_markup_rate: 0.75,
            repair_flat: 50.0,
            side_glass: 145.0,
            side_glass_heavy_truck: 150.0,
            opening_heavy_truck: 250.0,
            powerslide: 185.0,
            older_year_cutoff: 2016,
            older_year_rate: 140.0,
            sedan: 150.0,
            mini_suv: 165.0,
            utility: 225.0,
            suv_pickup: 175.0,
        }
    }
}

impl Default for FeeRates {
    fn default() -> Self {
        Self {
            processing_surcharge_percent: 3.5,
        }
    }
}

impl Default for RateSchedule {
    fn default() -> Self {
        Self {
            labor: LaborRates::default(),
            fees: FeeRates::default(),
        }
    }
}

/// Parse a TOML string into a [`RateSchedule`], running validation.
pub fn parse(toml_str: &str) -> Result<RateSchedule, RateScheduleError> {
    let schedule: RateSchedule =
        toml::from_str(toml_str).map_err(|e| RateScheduleError::Config(e.to_string()))?;
    validate(&schedule)?;
    Ok(schedule)
}

fn validate(schedule: &RateSchedule) -> Result<(), RateScheduleError> {
    let labor = &schedule.labor;

    // Every plain rate must be a non-negative finite number.
    let rates = [
        ("labor.dealer_flat", labor.dealer_flat),
        ("labor.subcontractor_flat", labor.subcontractor_flat),
        ("labor.cost_threshold", labor.cost_threshold),
        ("labor.repair_flat", labor.repair_flat),
        ("labor.side_glass", labor.side_glass),
        ("labor.side_glass_heavy_truck", labor.side_glass_heavy_truck),
        ("labor.opening_heavy_truck", labor.opening_heavy_truck),
        ("labor.powerslide", labor.powerslide),
        ("labor.older_year_rate", labor.older_year_rate),
        ("labor.sedan", labor.sedan),
        ("labor.mini_suv", labor.mini_suv),
        ("labor.utility", labor.utility),
        ("labor.suv_pickup", labor.suv_pickup),
        (
            "fees.processing_surcharge_percent",
            schedule.fees.processing_surcharge_percent,
        ),
    ];
    for (name, value) in rates {
        if !value.is_finite() || value < 0.0 {
            return Err(RateScheduleError::Config(format!(
                "{name} must be a non-negative finite number, got {value}"
            )));
        }
    }

    // The markup rate is a share of the part cost.
    if !labor.cost_markup_rate.is_finite()
        || labor.cost_markup_rate <= 0.0
        || labor.cost_markup_rate > 1.0
    {
        return Err(RateScheduleError::Config(format!(
            "labor.cost_markup_rate must be in (0, 1], got {}",
            labor.cost_markup_rate
        )));
    }

    if labor.subcontractor_rate_menu.is_empty() {
        return Err(RateScheduleError::Config(
            "labor.subcontractor_rate_menu must not be empty".to_string(),
        ));
    }
    for rate in &labor.subcontractor_rate_menu {
        if !rate.is_finite() || *rate < 0.0 {
            return Err(RateScheduleError::Config(format!(
                "labor.subcontractor_rate_menu entries must be non-negative finite numbers, got {rate}"
            )));
        }
    }

    Ok(())
}

/// Load and validate a rate schedule from a TOML file.
pub fn load(path: &Path) -> Result<RateSchedule, RateScheduleError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| RateScheduleError::Io(format!("cannot read {}: {e}", path.display())))?;
    parse(&text)
}

/// Load `path` when it exists, otherwise fall back to the built-in rate card.
///
/// A file that exists but fails to parse or validate is an error, not a
/// fallback.
pub fn load_or_default(path: &Path) -> Result<RateSchedule, RateScheduleError> {
    if path.exists() {
        load(path)
    } else {
        Ok(RateSchedule::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal valid TOML mirroring the built-in rate card.
    fn minimal_valid_toml() -> String {
        r#"
[labor]
dealer_flat = 90.0
subcontractor_flat = 100.0
subcontractor_rate_menu = [100.0, 110.0, 125.0]
cost_threshold = 250.0
cost_markup_rate = 0.75
repair_flat = 50.0
side_glass = 145.0
side_glass_heavy_truck = 150.0
opening_heavy_truck = 250.0
powerslide = 185.0
older_year_cutoff = 2016
older_year_rate = 140.0
sedan = 150.0
mini_suv = 165.0
utility = 225.0
suv_pickup = 175.0

[fees]
processing_surcharge_percent = 3.5
"#
        .to_string()
    }

    #[test]
    fn valid_schedule_parses_successfully() {
        let schedule = parse(&minimal_valid_toml()).expect("parse rate schedule");
        assert_eq!(schedule, RateSchedule::default());
    }

    #[test]
    fn default_matches_standard_rate_card() {
        let rates = RateSchedule::default();
        assert_eq!(rates.labor.dealer_flat, 90.0);
        assert_eq!(rates.labor.subcontractor_flat, 100.0);
        assert_eq!(rates.labor.subcontractor_rate_menu, vec![100.0, 110.0, 125.0]);
        assert_eq!(rates.labor.cost_threshold, 250.0);
        assert_eq!(rates.labor.cost_markup_rate, 0.75);
        assert_eq!(rates.labor.repair_flat, 50.0);
        assert_eq!(rates.labor.older_year_cutoff, 2016);
        assert_eq!(rates.labor.utility, 225.0);
        assert_eq!(rates.fees.processing_surcharge_percent, 3.5);
    }

    #[test]
    fn schedule_serialises_for_the_frontend() {
        // The rate menu reaches the frontend through this JSON shape.
        let schedule = RateSchedule::default();
        let json = serde_json::to_value(&schedule).expect("serialise schedule");
        assert_eq!(json["labor"]["dealer_flat"], 90.0);
        assert_eq!(json["labor"]["subcontractor_rate_menu"][1], 110.0);
        assert_eq!(json["fees"]["processing_surcharge_percent"], 3.5);

        let back: RateSchedule = serde_json::from_value(json).expect("deserialise schedule");
        assert_eq!(back, schedule);
    }

    #[test]
    fn invalid_toml_returns_config_error() {
        let result = parse("this is not valid toml ::::");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), RateScheduleError::Config(_)));
    }

    #[test]
    fn missing_section_returns_config_error() {
        let toml = minimal_valid_toml().replace("[fees]", "[feez]");
        let result = parse(&toml);
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), RateScheduleError::Config(_)));
    }

    #[test]
    fn negative_rate_returns_config_error() {
        let toml = minimal_valid_toml().replace("side_glass = 145.0", "side_glass = -5.0");
        let result = parse(&toml);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, RateScheduleError::Config(_)));
        assert!(err.to_string().contains("side_glass"));
    }

    #[test]
    fn markup_rate_above_one_returns_config_error() {
        let toml =
            minimal_valid_toml().replace("cost_markup_rate = 0.75", "cost_markup_rate = 1.5");
        let result = parse(&toml);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("cost_markup_rate"));
    }

    #[test]
    fn zero_markup_rate_returns_config_error() {
        let toml =
            minimal_valid_toml().replace("cost_markup_rate = 0.75", "cost_markup_rate = 0.0");
        assert!(parse(&toml).is_err());
    }

    #[test]
    fn empty_rate_menu_returns_config_error() {
        let toml = minimal_valid_toml().replace(
            "subcontractor_rate_menu = [100.0, 110.0, 125.0]",
            "subcontractor_rate_menu = []",
        );
        let result = parse(&toml);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("subcontractor_rate_menu"));
    }

    #[test]
    fn negative_menu_entry_returns_config_error() {
        let toml = minimal_valid_toml().replace(
            "subcontractor_rate_menu = [100.0, 110.0, 125.0]",
            "subcontractor_rate_menu = [100.0, -110.0]",
        );
        assert!(parse(&toml).is_err());
    }

    #[test]
    fn load_reads_file_from_disk() {
        let path = std::env::temp_dir().join("glassquote_schedule_load_test.toml");
        std::fs::write(&path, minimal_valid_toml()).expect("write schedule file");
        let schedule = load(&path).expect("load schedule");
        assert_eq!(schedule, RateSchedule::default());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn load_missing_file_returns_io_error() {
        let path = std::env::temp_dir().join("glassquote_schedule_missing.toml");
        let result = load(&path);
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), RateScheduleError::Io(_)));
    }

    #[test]
    fn load_or_default_falls_back_when_file_absent() {
        let path = std::env::temp_dir().join("glassquote_schedule_absent.toml");
        let schedule = load_or_default(&path).expect("load_or_default");
        assert_eq!(schedule, RateSchedule::default());
    }

    #[test]
    fn load_or_default_rejects_malformed_file() {
        let path = std::env::temp_dir().join("glassquote_schedule_malformed.toml");
        std::fs::write(&path, "not toml ::::").expect("write schedule file");
        assert!(load_or_default(&path).is_err());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn custom_rates_override_defaults() {
        let toml = minimal_valid_toml().replace("dealer_flat = 90.0", "dealer_flat = 95.0");
        let schedule = parse(&toml).expect("parse rate schedule");
        assert_eq!(schedule.labor.dealer_flat, 95.0);
        assert_eq!(schedule.labor.sedan, 150.0);
    }
}
