//! Reinforcing steel.
//!
//! Steel is modelled as bilinear elastic / perfectly-plastic with
//! Es = 200 000 MPa. Only tensile strain is resisted: bars on the
//! compression side of the neutral axis are given zero stress, so the
//! compression resultant is carried by the concrete stress block alone.

use std::f64::consts::PI;

/// Elastic modulus of reinforcing steel (MPa)
pub const STEEL_MODULUS_MPA: f64 = 200_000.0;

/// Bar diameters (mm) commonly stocked in New Zealand.
pub const STANDARD_BAR_DIAMETERS_MM: [f64; 8] = [10.0, 12.0, 16.0, 20.0, 25.0, 32.0, 36.0, 40.0];

/// Steel stress (MPa) for a tensile strain.
///
/// ```text
///  fs
///  fy ┤      ┌──────────
///     │     /
///     │    /  Es
///     │   /
///   0 ┼──┘───────────── εs
/// ```
///
/// Non-positive strain returns zero.
pub fn steel_stress(strain: f64, f_y: f64) -> f64 {
    if strain <= 0.0 {
        return 0.0;
    }
    (strain * STEEL_MODULUS_MPA).min(f_y)
}

/// Cross-sectional area of one bar, π·d²/4 (mm²).
pub fn bar_area_mm2(diameter_mm: f64) -> f64 {
    PI * diameter_mm.powi(2) / 4.0
}

/// Whether a diameter matches one of the standard bar sizes.
pub fn is_standard_bar(diameter_mm: f64) -> bool {
    STANDARD_BAR_DIAMETERS_MM
        .iter()
        .any(|d| (d - diameter_mm).abs() < 1e-6)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elastic_range() {
        // 0.001 * 200000 = 200 MPa
        assert!((steel_stress(0.001, 500.0) - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_capped_at_yield() {
        assert_eq!(steel_stress(0.0025, 500.0), 500.0);
        assert_eq!(steel_stress(0.05, 500.0), 500.0);
    }

    #[test]
    fn test_compression_strain_ignored() {
        assert_eq!(steel_stress(0.0, 500.0), 0.0);
        assert_eq!(steel_stress(-0.002, 500.0), 0.0);
    }

    #[test]
    fn test_monotonic_non_decreasing() {
        let mut last = f64::MIN;
        for i in 0..=400 {
            let strain = -0.002 + i as f64 * 0.00005;
            let stress = steel_stress(strain, 300.0);
            assert!(stress >= last);
            assert!(stress <= 300.0);
            last = stress;
        }
    }

    #[test]
    fn test_bar_area() {
        // 20 mm bar = 314.16 mm²
        assert!((bar_area_mm2(20.0) - 314.159).abs() < 0.01);
    }

    #[test]
    fn test_standard_bars() {
        assert!(is_standard_bar(16.0));
        assert!(is_standard_bar(25.0));
        assert!(!is_standard_bar(22.0));
    }
}
