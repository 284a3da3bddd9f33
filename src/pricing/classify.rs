//! Legacy-record classification shim.
//!
//! Older job records carried a single `jobType` string instead of the
//! canonical (service type, glass type) pair. [`resolve`] maps those records
//! onto the canonical pair once, when a record is ingested; the pricing hot
//! path never calls it, and records written by this application never need it.

use crate::models::{GlassType, ServiceType};

/// Derive the canonical `(ServiceType, GlassType)` pair for a record.
///
/// When both halves are already present they are returned unchanged.
/// Otherwise the legacy `job_type` string is mapped through a fixed table,
/// and anything absent or unrecognized degrades to a windshield replacement.
///
/// Never errors — quoting must go on even for records from before the
/// classification split.
pub fn resolve(
    service_type: Option<ServiceType>,
    glass_type: Option<GlassType>,
    job_type: Option<&str>,
) -> (ServiceType, GlassType) {
    if let (Some(service), Some(glass)) = (service_type, glass_type) {
        return (service, glass);
    }

    match job_type {
        Some("windshield_repair") => (ServiceType::Repair, GlassType::Windshield),
        Some("windshield_replacement") => (ServiceType::Replace, GlassType::Windshield),
        Some("door_glass") => (ServiceType::Replace, GlassType::DoorGlass),
        Some("back_glass") => (ServiceType::Replace, GlassType::BackGlass),
        Some("back_glass_powerslide") => (ServiceType::Replace, GlassType::BackGlassPowerslide),
        Some("quarter_glass") => (ServiceType::Replace, GlassType::QuarterGlass),
        Some("sunroof") => (ServiceType::Replace, GlassType::Sunroof),
        Some("side_mirror") => (ServiceType::Replace, GlassType::SideMirror),
        _ => (ServiceType::Replace, GlassType::Windshield),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_pair_passes_through_unchanged() {
        let (service, glass) = resolve(
            Some(ServiceType::Calibration),
            Some(GlassType::Sunroof),
            Some("door_glass"),
        );
        assert_eq!(service, ServiceType::Calibration);
        assert_eq!(glass, GlassType::Sunroof);
    }

    #[test]
    fn legacy_job_type_maps_through_table() {
        let cases = [
            ("windshield_repair", ServiceType::Repair, GlassType::Windshield),
            ("windshield_replacement", ServiceType::Replace, GlassType::Windshield),
            ("door_glass", ServiceType::Replace, GlassType::DoorGlass),
            ("back_glass", ServiceType::Replace, GlassType::BackGlass),
            (
                "back_glass_powerslide",
                ServiceType::Replace,
                GlassType::BackGlassPowerslide,
            ),
            ("quarter_glass", ServiceType::Replace, GlassType::QuarterGlass),
            ("sunroof", ServiceType::Replace, GlassType::Sunroof),
            ("side_mirror", ServiceType::Replace, GlassType::SideMirror),
        ];
        for (job_type, expected_service, expected_glass) in cases {
            let (service, glass) = resolve(None, None, Some(job_type));
            assert_eq!(service, expected_service, "jobType {job_type}");
            assert_eq!(glass, expected_glass, "jobType {job_type}");
        }
    }

    #[test]
    fn partial_pair_falls_back_to_legacy_table() {
        // Only one half present: the record predates the split, so the
        // legacy string wins over the lone half.
        let (service, glass) = resolve(Some(ServiceType::Repair), None, Some("back_glass"));
        assert_eq!(service, ServiceType::Replace);
        assert_eq!(glass, GlassType::BackGlass);

        let (service, glass) = resolve(None, Some(GlassType::DoorGlass), Some("sunroof"));
        assert_eq!(service, ServiceType::Replace);
        assert_eq!(glass, GlassType::Sunroof);
    }

    #[test]
    fn unknown_job_type_degrades_to_windshield_replacement() {
        let (service, glass) = resolve(None, None, Some("mystery_glass"));
        assert_eq!(service, ServiceType::Replace);
        assert_eq!(glass, GlassType::Windshield);
    }

    #[test]
    fn absent_classification_degrades_to_windshield_replacement() {
        let (service, glass) = resolve(None, None, None);
        assert_eq!(service, ServiceType::Replace);
        assert_eq!(glass, GlassType::Windshield);
    }
}
