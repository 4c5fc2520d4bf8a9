//! # Shear Wall P–M Check
//!
//! Runs the whole procedure for one wall: detailing validation, flexural
//! capacity at the design axial load, and the interaction curve.
//!
//! ## Example
//!
//! ```rust
//! use shearwall_core::calculations::shear_wall::{calculate, ShearWallInput};
//! use shearwall_core::calculations::{DesignLoads, DuctilityClass, SectionSpec, SweepConfig};
//!
//! let input = ShearWallInput {
//!     label: "W-1".to_string(),
//!     section: SectionSpec {
//!         thickness_mm: 200.0,
//!         length_mm: 3000.0,
//!         f_c_mpa: 40.0,
//!         f_y_mpa: 500.0,
//!         f_yt_mpa: None,
//!         f_ys_mpa: None,
//!         bar_diameter_mm: 20.0,
//!         stirrup_diameter_mm: 8.0,
//!         bar_spacing_mm: 300.0,
//!         layers: 2,
//!         end_cover_mm: 40.0,
//!         height_mm: 2800.0,
//!         clear_height_mm: None,
//!         ductility: DuctilityClass::LimitedDuctile,
//!     },
//!     loads: DesignLoads::axial(1500.0),
//!     design_moment_knm: Some(2100.0),
//! };
//!
//! let result = calculate(&input, &SweepConfig::default()).unwrap();
//!
//! println!("N_max: {:.0} kN", result.curve.axial_capacity_kn);
//! if let Ok(capacity) = &result.design_capacity {
//!     println!("φMn at N*: {:.0} kNm", capacity.design_moment_knm);
//! }
//! for error in &result.validation.errors {
//!     println!("{}", error.cited());
//! }
//! ```

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::calculations::capacity::{design_strength, SectionCapacity};
use crate::calculations::interaction::{sweep, InteractionCurve, SweepConfig};
use crate::calculations::neutral_axis::SolveFailure;
use crate::calculations::validation::{validate, ValidationResult};
use crate::calculations::wall_section::{DesignLoads, SectionSpec};
use crate::errors::{require_finite, CalcResult};

/// One wall to check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "W-1",
///   "section": { "thickness_mm": 200.0, "length_mm": 3000.0, "...": "..." },
///   "loads": { "axial_kn": 1500.0 },
///   "design_moment_knm": 2100.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShearWallInput {
    /// User label (e.g. "W-1", "Core wall grid C")
    #[serde(default)]
    pub label: String,

    /// Wall section
    pub section: SectionSpec,

    /// Design axial actions
    #[serde(default)]
    pub loads: DesignLoads,

    /// Design moment M* (kNm), carried for plotting against the curve
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_moment_knm: Option<f64>,
}

impl ShearWallInput {
    /// Parse from JSON.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        self.section.validate()?;
        self.loads.validate()?;
        if let Some(m) = self.design_moment_knm {
            require_finite("design_moment_knm", m)?;
        }
        Ok(())
    }

    /// Design point (M*, N*) when a design moment is given
    pub fn design_point(&self) -> Option<(f64, f64)> {
        self.design_moment_knm.map(|m| (m, self.loads.axial_kn))
    }
}

/// Everything computed for one wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShearWallResult {
    /// Echo of the input label
    pub label: String,

    /// Detailing checks and the adjusted section
    pub validation: ValidationResult,

    /// Flexural capacity at the design axial load N*
    pub design_capacity: Result<SectionCapacity, SolveFailure>,

    /// P–M interaction diagram
    pub curve: InteractionCurve,
}

impl ShearWallResult {
    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> CalcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Validate the wall, evaluate φM_n at N* and build the interaction curve.
///
/// The curve is swept over the adjusted section returned by validation, so
/// it reflects any bar diameter or spacing corrections.
pub fn calculate(input: &ShearWallInput, config: &SweepConfig) -> CalcResult<ShearWallResult> {
    input.validate()?;
    config.validate()?;

    let validation = validate(&input.section, &input.loads)?;
    let section = &validation.section;

    let design_capacity = design_strength(section, input.loads.axial_kn, None, &config.solver);
    let curve = sweep(section, config)?;

    info!(
        label = %input.label,
        complies = validation.complies(),
        warnings = validation.warnings.len(),
        errors = validation.errors.len(),
        points = curve.points.len(),
        "shear wall calculated"
    );

    Ok(ShearWallResult {
        label: input.label.clone(),
        validation,
        design_capacity,
        curve,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::validation::CheckKind;
    use crate::calculations::wall_section::tests::test_section;

    fn test_input() -> ShearWallInput {
        ShearWallInput {
            label: "W-1".to_string(),
            section: test_section(),
            loads: DesignLoads::axial(1500.0),
            design_moment_knm: Some(2100.0),
        }
    }

    #[test]
    fn test_worked_example() {
        let result = calculate(&test_input(), &SweepConfig::default()).unwrap();

        assert_eq!(result.label, "W-1");
        // ρ_l ≈ 0.0105 is below the minimum-ratio expression, nothing else fails
        assert!(result.validation.has_error(CheckKind::MinReinforcement));
        assert_eq!(result.validation.errors.len(), 1);

        let capacity = result.design_capacity.as_ref().unwrap();
        assert_eq!(capacity.axial_load_kn, 1500.0);
        assert!(capacity.design_moment_knm > 2100.0);

        assert!((result.curve.axial_capacity_kn - 6120.0).abs() < 1e-6);
        assert_eq!(result.curve.points.len(), 52);
    }

    #[test]
    fn test_design_capacity_on_curve() {
        // N* = 1530 kN = 5 · 306, an exact sweep step
        let mut input = test_input();
        input.loads = DesignLoads::axial(1530.0);
        let result = calculate(&input, &SweepConfig::default()).unwrap();

        let capacity = result.design_capacity.unwrap();
        let point = result.curve.points[5];
        assert_eq!(point.axial_load_kn, 1530.0);
        assert!((point.design_moment_knm - capacity.design_moment_knm).abs() < 1e-3);
        let interpolated = result.curve.moment_capacity_at(1530.0).unwrap();
        assert!((interpolated - capacity.design_moment_knm).abs() < 1e-3);
    }

    #[test]
    fn test_overloaded_wall_still_returns_curve() {
        let mut input = test_input();
        input.loads = DesignLoads::axial(20_000.0);
        let result = calculate(&input, &SweepConfig::default()).unwrap();

        assert!(result.validation.has_error(CheckKind::AxialLoad));
        assert!(result.design_capacity.is_err());
        assert!(!result.curve.points.is_empty());
    }

    #[test]
    fn test_invalid_input_rejected() {
        let mut input = test_input();
        input.design_moment_knm = Some(f64::NAN);
        assert!(calculate(&input, &SweepConfig::default()).is_err());

        let mut input = test_input();
        input.section.layers = 0;
        assert!(calculate(&input, &SweepConfig::default()).is_err());
    }

    #[test]
    fn test_design_point() {
        let input = test_input();
        assert_eq!(input.design_point(), Some((2100.0, 1500.0)));

        let mut input = test_input();
        input.design_moment_knm = None;
        assert_eq!(input.design_point(), None);
    }

    #[test]
    fn test_input_from_json() {
        let json = r#"{
            "label": "W-2",
            "section": {
                "thickness_mm": 200.0,
                "length_mm": 3000.0,
                "f_c_mpa": 40.0,
                "f_y_mpa": 500.0,
                "bar_diameter_mm": 20.0,
                "stirrup_diameter_mm": 8.0,
                "bar_spacing_mm": 300.0,
                "layers": 2,
                "end_cover_mm": 40.0,
                "height_mm": 2800.0,
                "ductility": "LimitedDuctile"
            },
            "loads": { "axial_kn": 1500.0 }
        }"#;
        let input = ShearWallInput::from_json(json).unwrap();
        assert_eq!(input.label, "W-2");
        assert_eq!(input.section, test_section());
        assert_eq!(input.design_moment_knm, None);

        let err = ShearWallInput::from_json("{ not json").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_result_json() {
        let result = calculate(&test_input(), &SweepConfig::default()).unwrap();
        let json = result.to_json_pretty().unwrap();
        assert!(json.contains("\"design_capacity\""));
        assert!(json.contains("\"Ok\""));
        assert!(json.contains("\"termination\""));
    }
}
