//! # Wall Section Input
//!
//! Geometry, materials and reinforcement of a rectangular reinforced concrete
//! wall, plus the axial actions it is checked against.
//!
//! ```text
//!            l_w (length)
//!  ├──────────────────────────────┤
//!  ┌──────────────────────────────┐ ┬
//!  │ ●    ●    ●    ●    ●    ●   │ │ t
//!  │ ●    ●    ●    ●    ●    ●   │ │
//!  └──────────────────────────────┘ ┴
//!    ├────┤ s_v          n_l = 2 layers
//!  x = 0 (compression edge)
//! ```
//!
//! All lengths in mm, strengths in MPa, loads in kN.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{require_finite, require_positive, CalcError, CalcResult};
use crate::units::{Millimeters, SquareMillimeters};

/// Smallest accepted vertical bar spacing (mm), one minimum bar diameter
pub const MIN_BAR_SPACING_MM: f64 = 10.0;

/// Reject a bar spacing that is non-finite or below [`MIN_BAR_SPACING_MM`].
pub(crate) fn check_spacing_floor(bar_spacing_mm: f64) -> CalcResult<f64> {
    require_finite("bar_spacing_mm", bar_spacing_mm)?;
    if bar_spacing_mm < MIN_BAR_SPACING_MM {
        return Err(CalcError::invalid_input(
            "bar_spacing_mm",
            bar_spacing_mm.to_string(),
            format!("Bar spacing must be at least {} mm", MIN_BAR_SPACING_MM),
        ));
    }
    Ok(bar_spacing_mm)
}

/// Ductility class assumed in the seismic analysis.
///
/// Governs detailing strictness: bar size limits, the overstrength axial check
/// and the minimum thickness against buckling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DuctilityClass {
    /// Elastically responding wall
    Elastic,
    /// Limited ductile wall
    LimitedDuctile,
    /// Fully ductile wall
    FullyDuctile,
}

impl DuctilityClass {
    /// All classes for iteration
    pub const ALL: [DuctilityClass; 3] = [
        DuctilityClass::Elastic,
        DuctilityClass::LimitedDuctile,
        DuctilityClass::FullyDuctile,
    ];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            DuctilityClass::Elastic => "Elastic",
            DuctilityClass::LimitedDuctile => "Limited ductile",
            DuctilityClass::FullyDuctile => "Fully ductile",
        }
    }

    /// Longitudinal bar diameter may not exceed `t / divisor` (cl 11.3.12.2(b)).
    pub fn bar_diameter_divisor(&self) -> f64 {
        match self {
            DuctilityClass::Elastic => 7.0,
            DuctilityClass::LimitedDuctile => 8.0,
            DuctilityClass::FullyDuctile => 10.0,
        }
    }

    /// Whether ductile detailing provisions (cl 11.4) apply.
    pub fn is_ductile(&self) -> bool {
        !matches!(self, DuctilityClass::Elastic)
    }
}

impl fmt::Display for DuctilityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for DuctilityClass {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_', ' '], "");
        match normalized.as_str() {
            "elastic" | "e" => Ok(DuctilityClass::Elastic),
            "limitedductile" | "limited" | "ld" => Ok(DuctilityClass::LimitedDuctile),
            "fullyductile" | "ductile" | "fd" => Ok(DuctilityClass::FullyDuctile),
            _ => Err(CalcError::invalid_input(
                "ductility",
                s,
                "Expected elastic, limited-ductile or fully-ductile",
            )),
        }
    }
}

/// Wall cross-section definition.
///
/// ## JSON Example
///
/// ```json
/// {
///   "thickness_mm": 200.0,
///   "length_mm": 3000.0,
///   "f_c_mpa": 40.0,
///   "f_y_mpa": 500.0,
///   "bar_diameter_mm": 20.0,
///   "stirrup_diameter_mm": 8.0,
///   "bar_spacing_mm": 300.0,
///   "layers": 2,
///   "end_cover_mm": 40.0,
///   "height_mm": 2800.0,
///   "ductility": "LimitedDuctile"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSpec {
    /// Wall thickness t (mm)
    pub thickness_mm: f64,

    /// Horizontal wall length l_w (mm)
    pub length_mm: f64,

    /// Concrete compressive strength f'c (MPa)
    pub f_c_mpa: f64,

    /// Yield strength of longitudinal (vertical) reinforcement f_y (MPa)
    pub f_y_mpa: f64,

    /// Yield strength of transverse reinforcement f_yt (MPa), defaults to f_y
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f_yt_mpa: Option<f64>,

    /// Yield strength of stirrups f_ys (MPa), defaults to f_y
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f_ys_mpa: Option<f64>,

    /// Longitudinal bar diameter d_bl (mm)
    pub bar_diameter_mm: f64,

    /// Stirrup diameter d_s (mm)
    pub stirrup_diameter_mm: f64,

    /// Centre-to-centre spacing of vertical bars s_v (mm)
    pub bar_spacing_mm: f64,

    /// Number of layers of vertical reinforcement n_l
    pub layers: u32,

    /// Cover at the wall ends c_end (mm)
    pub end_cover_mm: f64,

    /// Total wall height h_w (mm)
    pub height_mm: f64,

    /// Clear vertical height h_n (mm), defaults to h_w
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clear_height_mm: Option<f64>,

    /// Ductility class of the analysis
    pub ductility: DuctilityClass,
}

impl SectionSpec {
    /// Validate input parameters.
    ///
    /// These are preconditions for analysis, not code checks: a wall that fails
    /// here has no meaningful capacity. Code conformance is reported by
    /// [`validate`](crate::calculations::validation::validate).
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("thickness_mm", self.thickness_mm)?;
        require_positive("length_mm", self.length_mm)?;
        require_positive("f_c_mpa", self.f_c_mpa)?;
        require_positive("f_y_mpa", self.f_y_mpa)?;
        if let Some(f_yt) = self.f_yt_mpa {
            require_positive("f_yt_mpa", f_yt)?;
        }
        if let Some(f_ys) = self.f_ys_mpa {
            require_positive("f_ys_mpa", f_ys)?;
        }
        require_positive("bar_diameter_mm", self.bar_diameter_mm)?;
        require_finite("stirrup_diameter_mm", self.stirrup_diameter_mm)?;
        if self.stirrup_diameter_mm < 0.0 {
            return Err(CalcError::invalid_input(
                "stirrup_diameter_mm",
                self.stirrup_diameter_mm.to_string(),
                "Stirrup diameter cannot be negative",
            ));
        }
        check_spacing_floor(self.bar_spacing_mm)?;
        if self.layers == 0 {
            return Err(CalcError::invalid_input(
                "layers",
                "0",
                "At least one layer of vertical reinforcement is required",
            ));
        }
        require_finite("end_cover_mm", self.end_cover_mm)?;
        if self.end_cover_mm < 0.0 {
            return Err(CalcError::invalid_input(
                "end_cover_mm",
                self.end_cover_mm.to_string(),
                "Cover cannot be negative",
            ));
        }
        require_positive("height_mm", self.height_mm)?;
        if let Some(h_n) = self.clear_height_mm {
            require_positive("clear_height_mm", h_n)?;
        }
        Ok(())
    }

    /// Transverse reinforcement yield strength, f_y when not given
    pub fn f_yt(&self) -> f64 {
        self.f_yt_mpa.unwrap_or(self.f_y_mpa)
    }

    /// Stirrup yield strength, f_y when not given
    pub fn f_ys(&self) -> f64 {
        self.f_ys_mpa.unwrap_or(self.f_y_mpa)
    }

    /// Clear height h_n, h_w when not given
    pub fn clear_height(&self) -> f64 {
        self.clear_height_mm.unwrap_or(self.height_mm)
    }

    /// Gross concrete area A_g = t · l_w (mm²)
    pub fn gross_area_mm2(&self) -> f64 {
        let area: SquareMillimeters = Millimeters(self.thickness_mm) * Millimeters(self.length_mm);
        area.value()
    }

    /// Wall aspect ratio A_r = h_w / l_w
    pub fn aspect_ratio(&self) -> f64 {
        self.height_mm / self.length_mm
    }

    /// Copy of this section with a different vertical bar spacing
    pub fn with_bar_spacing(&self, bar_spacing_mm: f64) -> Self {
        SectionSpec {
            bar_spacing_mm,
            ..self.clone()
        }
    }
}

/// Factored axial actions on the wall.
///
/// Compression is positive. Tension (negative) is accepted, though the
/// procedure targets compression-dominated walls.
///
/// ## JSON Example
///
/// ```json
/// { "axial_kn": 1500.0, "overstrength_axial_kn": 2100.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DesignLoads {
    /// Design ULS axial load N* (kN)
    pub axial_kn: f64,

    /// Design axial load at overstrength N*_o (kN)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overstrength_axial_kn: Option<f64>,
}

impl DesignLoads {
    /// ULS axial load only, no overstrength action.
    pub fn axial(axial_kn: f64) -> Self {
        DesignLoads {
            axial_kn,
            overstrength_axial_kn: None,
        }
    }

    /// Add an overstrength axial load.
    pub fn with_overstrength(mut self, overstrength_axial_kn: f64) -> Self {
        self.overstrength_axial_kn = Some(overstrength_axial_kn);
        self
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_finite("axial_kn", self.axial_kn)?;
        if let Some(n_o) = self.overstrength_axial_kn {
            require_finite("overstrength_axial_kn", n_o)?;
        }
        Ok(())
    }
}
