//! # Section Validation
//!
//! Applies the NZS 3101 wall detailing rules to a [`SectionSpec`] and derives
//! the quantities the capacity analysis needs.
//!
//! ## Checks (in order)
//!
//! | Step | Check                                   | On failure           |
//! |------|-----------------------------------------|----------------------|
//! | a    | d_bl ≥ 10 mm                            | clamp up, warning    |
//! | b    | d_bl ≤ t/7, t/8, t/10 by ductility      | clamp down, warning  |
//! | c    | s_v ≤ max(3t, 300)                      | clamp down, warning  |
//! | d    | bar layout                              | (derived)            |
//! | e, f | A_s and ρ_l                             | (derived)            |
//! | g    | ρ_l ≥ ρ_min                             | error                |
//! | h    | ρ_l ≤ 16/f_y                            | error                |
//! | i    | N* ≤ 0.3 φ f'c A_g                      | error                |
//! | j    | N*_o ≤ 0.3 t l_w (ductile only)         | error / warning      |
//! | k    | t ≥ t_min (ductile only)                | error                |
//!
//! Every check runs regardless of earlier failures. Nothing here returns `Err`
//! for a code failure: the result carries `warnings`, `logs` and `errors`, and
//! a caller must treat any error as "this section does not comply". `Err` is
//! reserved for inputs that cannot be analysed at all (see
//! [`SectionSpec::validate`]).
//!
//! ## Example
//!
//! ```rust
//! use shearwall_core::calculations::validation::validate;
//! use shearwall_core::calculations::wall_section::{DesignLoads, DuctilityClass, SectionSpec};
//!
//! let spec = SectionSpec {
//!     thickness_mm: 200.0,
//!     length_mm: 3000.0,
//!     f_c_mpa: 40.0,
//!     f_y_mpa: 500.0,
//!     f_yt_mpa: None,
//!     f_ys_mpa: None,
//!     bar_diameter_mm: 32.0, // too large for a 200 mm limited ductile wall
//!     stirrup_diameter_mm: 8.0,
//!     bar_spacing_mm: 300.0,
//!     layers: 2,
//!     end_cover_mm: 40.0,
//!     height_mm: 2800.0,
//!     clear_height_mm: None,
//!     ductility: DuctilityClass::LimitedDuctile,
//! };
//!
//! let result = validate(&spec, &DesignLoads::axial(0.0)).unwrap();
//! assert_eq!(result.section.spec.bar_diameter_mm, 25.0);
//! assert!(!result.warnings.is_empty());
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::wall_section::{check_spacing_floor, DesignLoads, DuctilityClass, SectionSpec};
use crate::errors::{CalcError, CalcResult};
use crate::materials::{bar_area_mm2, is_standard_bar, stress_block_factors, StressBlock};
use crate::nzs3101::{axial_phi, clause};
use crate::units::{Kilonewtons, Megapascals, Newtons, SquareMillimeters};

/// Smallest permitted longitudinal bar (cl 11.3.12.2(b))
pub const MIN_BAR_DIAMETER_MM: f64 = 10.0;

/// Absolute floor of the vertical bar spacing limit (cl 11.3.12.2(c))
pub const SPACING_LIMIT_FLOOR_MM: f64 = 300.0;

/// Which detailing rule a diagnostic came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckKind {
    /// Longitudinal bar diameter limits
    BarDiameter,
    /// Maximum vertical bar spacing
    BarSpacing,
    /// Bar positions along the wall
    BarLayout,
    /// Area of vertical steel
    SteelArea,
    /// Vertical reinforcement ratio
    ReinforcementRatio,
    /// Minimum reinforcement ratio
    MinReinforcement,
    /// Maximum reinforcement ratio
    MaxReinforcement,
    /// ULS axial load limit
    AxialLoad,
    /// Overstrength axial load limit for ductile walls
    OverstrengthAxial,
    /// Minimum thickness against buckling
    MinThickness,
    /// Stress block factors used by the analysis
    StressBlock,
}

impl CheckKind {
    /// Governing NZS 3101 clause
    pub fn clause(&self) -> &'static str {
        match self {
            CheckKind::BarDiameter => clause::BAR_DIAMETER,
            CheckKind::BarSpacing | CheckKind::BarLayout => clause::BAR_SPACING,
            CheckKind::SteelArea
            | CheckKind::ReinforcementRatio
            | CheckKind::MinReinforcement
            | CheckKind::MaxReinforcement => clause::REINFORCEMENT_RATIO,
            CheckKind::AxialLoad => clause::AXIAL_LOAD_LIMIT,
            CheckKind::OverstrengthAxial => clause::OVERSTRENGTH_AXIAL,
            CheckKind::MinThickness => clause::MIN_THICKNESS,
            CheckKind::StressBlock => clause::STRESS_BLOCK,
        }
    }
}

/// A single validation message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Rule that produced the message
    pub kind: CheckKind,
    /// Human-readable message
    pub message: String,
}

impl Diagnostic {
    /// Message prefixed with its clause reference
    pub fn cited(&self) -> String {
        format!("{}: {}", self.kind.clause(), self.message)
    }
}

/// Section after detailing adjustments, ready for analysis.
///
/// `spec` holds the corrected values: feeding it back into [`validate`]
/// produces no further adjustments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedSection {
    /// Section with bar diameter and spacing adjusted to comply
    pub spec: SectionSpec,

    /// Bar centroid positions from the compression edge (mm), ascending
    pub bar_positions_mm: Vec<f64>,

    /// Total vertical steel area A_s (mm²)
    pub steel_area_mm2: f64,

    /// Vertical reinforcement ratio ρ_l = A_s / (t · l_w)
    pub reinforcement_ratio: f64,

    /// Minimum reinforcement ratio ρ_min
    pub min_reinforcement_ratio: f64,

    /// Maximum reinforcement ratio ρ_max
    pub max_reinforcement_ratio: f64,

    /// Axial load ceiling N_max (kN)
    pub axial_capacity_kn: f64,

    /// Stress block factors for f'c
    pub stress_block: StressBlock,
}

impl ValidatedSection {
    /// Number of bar positions along the wall
    pub fn bar_count(&self) -> usize {
        self.bar_positions_mm.len()
    }

    /// Steel area at one bar position across all layers (mm²)
    pub fn area_per_position_mm2(&self) -> f64 {
        bar_area_mm2(self.spec.bar_diameter_mm) * self.spec.layers as f64
    }
}

/// Output of [`validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// The adjusted section and derived quantities
    pub section: ValidatedSection,

    /// Inputs that were changed to satisfy the code
    pub warnings: Vec<Diagnostic>,

    /// Informational trace of computed values
    pub logs: Vec<Diagnostic>,

    /// Failed code checks
    pub errors: Vec<Diagnostic>,
}

impl ValidationResult {
    /// True when no check failed
    pub fn complies(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether any diagnostic of the given kind was raised as a warning
    pub fn has_warning(&self, kind: CheckKind) -> bool {
        self.warnings.iter().any(|d| d.kind == kind)
    }

    /// Whether any diagnostic of the given kind was raised as an error
    pub fn has_error(&self, kind: CheckKind) -> bool {
        self.errors.iter().any(|d| d.kind == kind)
    }
}

/// Accumulates diagnostics while the checks run and mirrors each one to the log.
#[derive(Default)]
struct Diagnostics {
    warnings: Vec<Diagnostic>,
    logs: Vec<Diagnostic>,
    errors: Vec<Diagnostic>,
}

impl Diagnostics {
    fn log(&mut self, kind: CheckKind, message: impl Into<String>) {
        let message = message.into();
        debug!(clause = kind.clause(), "{}", message);
        self.logs.push(Diagnostic { kind, message });
    }

    fn warn(&mut self, kind: CheckKind, message: impl Into<String>) {
        let message = message.into();
        warn!(clause = kind.clause(), "{}", message);
        self.warnings.push(Diagnostic { kind, message });
    }

    fn error(&mut self, kind: CheckKind, message: impl Into<String>) {
        let message = message.into();
        warn!(clause = kind.clause(), "check failed: {}", message);
        self.errors.push(Diagnostic { kind, message });
    }
}

/// Validate a wall section against the detailing rules.
///
/// # Returns
///
/// * `Ok(ValidationResult)` - Adjusted section plus diagnostics; inspect
///   `errors` before relying on the section
/// * `Err(CalcError)` - Inputs are non-physical, or the spacing leaves room
///   for fewer than two bar positions
pub fn validate(spec: &SectionSpec, loads: &DesignLoads) -> CalcResult<ValidationResult> {
    spec.validate()?;
    loads.validate()?;

    let mut diag = Diagnostics::default();
    let mut spec = spec.clone();

    spec.bar_diameter_mm = check_bar_diameter(&spec, &mut diag);
    spec.bar_spacing_mm = check_bar_spacing(&spec, &mut diag);

    let bar_positions_mm = bar_positions(&spec)?;
    diag.log(
        CheckKind::BarLayout,
        format!(
            "{} bar positions at {} mm centres, first bar {:.1} mm from the end",
            bar_positions_mm.len(),
            spec.bar_spacing_mm,
            bar_positions_mm[0]
        ),
    );

    let steel_area_mm2 = steel_area(&spec);
    diag.log(
        CheckKind::SteelArea,
        format!("Area of vertical steel A_s = {:.0} mm²", steel_area_mm2),
    );

    let reinforcement_ratio = steel_area_mm2 / spec.gross_area_mm2();
    diag.log(
        CheckKind::ReinforcementRatio,
        format!("Vertical reinforcement ratio ρ_l = {:.5}", reinforcement_ratio),
    );

    let min_reinforcement_ratio = check_min_reinforcement(&spec, reinforcement_ratio, &mut diag);
    let max_reinforcement_ratio = check_max_reinforcement(&spec, reinforcement_ratio, &mut diag);
    let axial_capacity_kn = check_axial_load(&spec, loads, &mut diag);
    check_overstrength_axial(&spec, loads, &mut diag);
    check_min_thickness(&spec, reinforcement_ratio, &mut diag);

    let stress_block = stress_block_factors(spec.f_c_mpa);
    diag.log(
        CheckKind::StressBlock,
        format!("α1 = {:.3}, β1 = {:.3}", stress_block.alpha1, stress_block.beta1),
    );

    Ok(ValidationResult {
        section: ValidatedSection {
            spec,
            bar_positions_mm,
            steel_area_mm2,
            reinforcement_ratio,
            min_reinforcement_ratio,
            max_reinforcement_ratio,
            axial_capacity_kn,
            stress_block,
        },
        warnings: diag.warnings,
        logs: diag.logs,
        errors: diag.errors,
    })
}

/// Steps (a) and (b): clamp the bar diameter into the permitted range.
///
/// A wall thinner than the minimum bar allows is an error; the diameter is
/// then pinned at the minimum so the corrected section validates to itself.
fn check_bar_diameter(spec: &SectionSpec, diag: &mut Diagnostics) -> f64 {
    let mut d_bl = spec.bar_diameter_mm;
    let divisor = spec.ductility.bar_diameter_divisor();
    let max_d = (spec.thickness_mm / divisor).floor();

    if max_d < MIN_BAR_DIAMETER_MM {
        diag.error(
            CheckKind::BarDiameter,
            format!(
                "Wall too thin for the minimum bar: {} walls limit bar diameter to t/{} = {} mm, below {} mm",
                spec.ductility.display_name(),
                divisor,
                max_d,
                MIN_BAR_DIAMETER_MM
            ),
        );
        if d_bl != MIN_BAR_DIAMETER_MM {
            diag.warn(
                CheckKind::BarDiameter,
                format!("Bar diameter set to {} mm from {} mm", MIN_BAR_DIAMETER_MM, d_bl),
            );
        }
        return MIN_BAR_DIAMETER_MM;
    }

    if d_bl < MIN_BAR_DIAMETER_MM {
        diag.warn(
            CheckKind::BarDiameter,
            format!(
                "Longitudinal bars cannot be smaller than {} mm; diameter increased from {} mm",
                MIN_BAR_DIAMETER_MM, d_bl
            ),
        );
        d_bl = MIN_BAR_DIAMETER_MM;
    }

    let rule = format!(
        "{} walls limit bar diameter to t/{}, {} mm here",
        spec.ductility.display_name(),
        divisor,
        max_d
    );

    if d_bl > max_d {
        diag.warn(
            CheckKind::BarDiameter,
            format!("Bar diameter {} mm exceeds limit. {}; diameter reduced", d_bl, rule),
        );
        d_bl = max_d;
    } else {
        diag.log(
            CheckKind::BarDiameter,
            format!("Bar diameter {} mm okay. {}", d_bl, rule),
        );
    }

    if !is_standard_bar(d_bl) {
        diag.log(
            CheckKind::BarDiameter,
            format!("{} mm is not a standard bar size", d_bl),
        );
    }

    d_bl
}

/// Step (c): clamp the vertical bar spacing.
fn check_bar_spacing(spec: &SectionSpec, diag: &mut Diagnostics) -> f64 {
    let s_max = (3.0 * spec.thickness_mm).max(SPACING_LIMIT_FLOOR_MM);
    if spec.bar_spacing_mm > s_max {
        diag.warn(
            CheckKind::BarSpacing,
            format!(
                "Vertical spacing limited to max(3t, {} mm); spacing reduced from {} mm to {} mm",
                SPACING_LIMIT_FLOOR_MM, spec.bar_spacing_mm, s_max
            ),
        );
        return s_max;
    }
    spec.bar_spacing_mm
}

/// Step (d): bar centroid positions measured from the end of the wall.
///
/// The bars occupy `s_v · (n − 1)` and are centred in the wall length, so the
/// layout is symmetric: `x[i] + x[n−1−i] = l_w`.
pub fn bar_positions(spec: &SectionSpec) -> CalcResult<Vec<f64>> {
    check_spacing_floor(spec.bar_spacing_mm)?;
    let l_avail = spec.length_mm
        - (2.0 * (spec.end_cover_mm + spec.stirrup_diameter_mm) + spec.bar_diameter_mm);
    if l_avail < spec.bar_spacing_mm {
        return Err(CalcError::calculation_failed(
            "bar layout",
            format!(
                "available length {:.0} mm is less than the bar spacing {} mm; at least two bar positions are required",
                l_avail, spec.bar_spacing_mm
            ),
        ));
    }

    let n_bars = (l_avail / spec.bar_spacing_mm).floor() as usize + 1;
    let l_occupied = spec.bar_spacing_mm * (n_bars - 1) as f64;
    let x_first = (spec.length_mm - l_occupied) / 2.0;

    Ok((0..n_bars)
        .map(|i| x_first + spec.bar_spacing_mm * i as f64)
        .collect())
}

/// Step (e): A_s = n_l · π d_bl²/4 · l_w / s_v
fn steel_area(spec: &SectionSpec) -> f64 {
    spec.layers as f64 * bar_area_mm2(spec.bar_diameter_mm) * spec.length_mm / spec.bar_spacing_mm
}

/// Step (g). Returns ρ_min.
fn check_min_reinforcement(spec: &SectionSpec, p_l: f64, diag: &mut Diagnostics) -> f64 {
    let r1 = (spec.f_c_mpa / (4.0 * spec.f_y_mpa)).sqrt();
    let r2 = 0.7 / spec.f_y_mpa;
    let r3 = 0.0014;
    let rho_min = r1.max(r2).max(r3);

    if p_l <= 0.0 {
        diag.error(
            CheckKind::MinReinforcement,
            format!("Reinforcement ratio {} is not positive", p_l),
        );
    } else if p_l < rho_min {
        diag.error(
            CheckKind::MinReinforcement,
            format!(
                "Vertical reinforcement ratio {:.5} is less than the minimum {:.5}",
                p_l, rho_min
            ),
        );
    } else {
        diag.log(
            CheckKind::MinReinforcement,
            format!("Vertical reinforcement ratio {:.5} ≥ minimum {:.5}. ok.", p_l, rho_min),
        );
    }
    rho_min
}

/// Step (h). Returns ρ_max.
fn check_max_reinforcement(spec: &SectionSpec, p_l: f64, diag: &mut Diagnostics) -> f64 {
    let rho_max = 16.0 / spec.f_y_mpa;
    if p_l > rho_max {
        diag.error(
            CheckKind::MaxReinforcement,
            format!(
                "Vertical reinforcement ratio {:.5} exceeds the maximum {:.5}",
                p_l, rho_max
            ),
        );
    } else {
        diag.log(
            CheckKind::MaxReinforcement,
            format!("Vertical reinforcement ratio {:.5} ≤ maximum {:.5}. ok.", p_l, rho_max),
        );
    }
    rho_max
}

/// Step (i). Returns N_max = 0.3 φ f'c A_g in kN.
fn check_axial_load(spec: &SectionSpec, loads: &DesignLoads, diag: &mut Diagnostics) -> f64 {
    let phi = axial_phi(spec.layers);
    let squash: Newtons = Megapascals(spec.f_c_mpa) * SquareMillimeters(spec.gross_area_mm2());
    let n_max = Kilonewtons::from(squash * (0.3 * phi)).value();

    if loads.axial_kn > n_max {
        diag.error(
            CheckKind::AxialLoad,
            format!(
                "ULS axial load {:.0} kN exceeds the permissible limit {:.0} kN (φ = {})",
                loads.axial_kn, n_max, phi
            ),
        );
    } else {
        diag.log(
            CheckKind::AxialLoad,
            format!(
                "ULS axial load {:.0} kN within limit {:.0} kN (φ = {})",
                loads.axial_kn, n_max, phi
            ),
        );
    }
    n_max
}

/// Step (j). Ductile walls only.
fn check_overstrength_axial(spec: &SectionSpec, loads: &DesignLoads, diag: &mut Diagnostics) {
    if !spec.ductility.is_ductile() {
        diag.log(
            CheckKind::OverstrengthAxial,
            "Overstrength axial check not required for elastic walls",
        );
        return;
    }

    let limit = 0.3 * spec.thickness_mm * spec.length_mm;
    match loads.overstrength_axial_kn {
        None => diag.warn(
            CheckKind::OverstrengthAxial,
            "Maximum axial load of ductile wall could not be checked as N*_o is not set",
        ),
        Some(n_o) if n_o > limit => diag.error(
            CheckKind::OverstrengthAxial,
            format!("Overstrength axial load {:.0} kN exceeds limit {:.0}", n_o, limit),
        ),
        Some(n_o) => diag.log(
            CheckKind::OverstrengthAxial,
            format!("Overstrength axial load {:.0} kN within limit {:.0}", n_o, limit),
        ),
    }
}

/// Minimum wall thickness t_m against buckling of the plastic region.
///
/// ```text
/// A_r = h_w / l_w
/// k_m = min(1, h_n / ((0.25 + 0.055 A_r) l_w))
/// ξ   = max(0.1, 0.3 − ρ_l f_y / (2.5 f'c))
/// t_m = α_r k_m β (A_r + 2) l_w / (1700 √ξ)
/// ```
///
/// with α_r = 1 and β = 5 (limited ductile) or 7 (fully ductile). Returns
/// `None` for elastic walls.
pub fn min_thickness_mm(spec: &SectionSpec, reinforcement_ratio: f64) -> Option<f64> {
    let beta = match spec.ductility {
        DuctilityClass::Elastic => return None,
        DuctilityClass::LimitedDuctile => 5.0,
        DuctilityClass::FullyDuctile => 7.0,
    };
    let alpha_r = 1.0;
    let a_r = spec.aspect_ratio();
    let k_m = (spec.clear_height() / ((0.25 + 0.055 * a_r) * spec.length_mm)).min(1.0);
    let xi = (0.3 - reinforcement_ratio * spec.f_y_mpa / (2.5 * spec.f_c_mpa)).max(0.1);

    Some(alpha_r * k_m * beta * (a_r + 2.0) * spec.length_mm / (1700.0 * xi.sqrt()))
}

/// Step (k). Ductile walls only.
fn check_min_thickness(spec: &SectionSpec, p_l: f64, diag: &mut Diagnostics) {
    let Some(t_min) = min_thickness_mm(spec, p_l) else {
        diag.log(
            CheckKind::MinThickness,
            "Minimum thickness check not required for elastic walls",
        );
        return;
    };

    if spec.thickness_mm < t_min {
        diag.error(
            CheckKind::MinThickness,
            format!(
                "Wall thickness {} mm is less than t_m = {:.0} mm",
                spec.thickness_mm, t_min
            ),
        );
    } else {
        diag.log(
            CheckKind::MinThickness,
            format!("Wall thickness {} mm ≥ t_m = {:.0} mm. ok.", spec.thickness_mm, t_min),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::wall_section::tests::{compliant_section, test_section};
    use std::f64::consts::PI;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_worked_example() {
        let spec = test_section();
        let result = validate(&spec, &DesignLoads::axial(0.0)).unwrap();
        let section = &result.section;

        // A_s = 2 · π·20²/4 · 3000/300
        let a_s = 2.0 * PI * 400.0 / 4.0 * 10.0;
        assert!(approx_eq(section.steel_area_mm2, a_s, 1e-6));
        assert!(approx_eq(section.steel_area_mm2, 6283.2, 0.1));

        // ρ_l = A_s / (200 · 3000)
        assert!(approx_eq(section.reinforcement_ratio, a_s / 600_000.0, 1e-12));

        // ρ_min = max(√(40/2000), 0.7/500, 0.0014) = 0.1414
        assert!(approx_eq(section.min_reinforcement_ratio, 0.02_f64.sqrt(), 1e-12));
        assert!(result.has_error(CheckKind::MinReinforcement));
        assert!(!result.has_error(CheckKind::MaxReinforcement));

        // N_max = 0.3 · 0.85 · 40 · 3000 · 200 / 1000
        assert!(approx_eq(section.axial_capacity_kn, 6120.0, 1e-6));

        // D20 is within t/8 = 25 mm, spacing within 600 mm
        assert!(!result.has_warning(CheckKind::BarDiameter));
        assert!(!result.has_warning(CheckKind::BarSpacing));
        assert_eq!(section.spec.bar_diameter_mm, 20.0);
    }

    #[test]
    fn test_bar_positions_symmetric() {
        let spec = test_section();
        let result = validate(&spec, &DesignLoads::axial(0.0)).unwrap();
        let x = &result.section.bar_positions_mm;

        // l_avail = 3000 - (2·(40 + 8) + 20) = 2884, floor(2884/300) + 1 = 10
        assert_eq!(x.len(), 10);
        // occupied 2700, first bar at 150
        assert!(approx_eq(x[0], 150.0, 1e-9));
        for i in 0..x.len() {
            assert!(approx_eq(x[i] + x[x.len() - 1 - i], 3000.0, 1e-9));
            assert!(x[i] >= 0.0 && x[i] <= 3000.0);
        }
        assert!(x.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_bar_positions_many_layouts() {
        for (l_w, s_v, d_bl) in [
            (1000.0, 200.0, 12.0),
            (2500.0, 250.0, 16.0),
            (4150.0, 300.0, 20.0),
            (6000.0, 450.0, 25.0),
        ] {
            let mut spec = test_section();
            spec.length_mm = l_w;
            spec.bar_spacing_mm = s_v;
            spec.bar_diameter_mm = d_bl;
            let x = bar_positions(&spec).unwrap();

            let l_avail = l_w - (2.0 * (40.0 + 8.0) + d_bl);
            assert_eq!(x.len(), (l_avail / s_v).floor() as usize + 1);
            assert!(x.len() >= 2);
            for i in 0..x.len() {
                assert!(approx_eq(x[i] + x[x.len() - 1 - i], l_w, 1e-9));
            }
        }
    }

    #[test]
    fn test_wall_too_short_for_two_bars() {
        let mut spec = test_section();
        spec.length_mm = 300.0;
        let err = validate(&spec, &DesignLoads::axial(0.0)).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
    }

    #[test]
    fn test_small_bar_clamped_up() {
        let mut spec = test_section();
        spec.bar_diameter_mm = 8.0;
        let result = validate(&spec, &DesignLoads::axial(0.0)).unwrap();
        assert_eq!(result.section.spec.bar_diameter_mm, 10.0);
        assert!(result.has_warning(CheckKind::BarDiameter));
    }

    #[test]
    fn test_large_bar_clamped_by_ductility() {
        for (ductility, expected) in [
            (DuctilityClass::Elastic, 28.0),        // floor(200/7)
            (DuctilityClass::LimitedDuctile, 25.0), // 200/8
            (DuctilityClass::FullyDuctile, 20.0),   // 200/10
        ] {
            let mut spec = test_section();
            spec.bar_diameter_mm = 32.0;
            spec.ductility = ductility;
            let result = validate(&spec, &DesignLoads::axial(0.0)).unwrap();
            assert_eq!(result.section.spec.bar_diameter_mm, expected);
            assert!(result.has_warning(CheckKind::BarDiameter));
        }
    }

    #[test]
    fn test_corrected_spec_has_no_further_bar_warning() {
        let mut spec = test_section();
        spec.bar_diameter_mm = 32.0;
        let first = validate(&spec, &DesignLoads::axial(0.0)).unwrap();
        assert!(first.has_warning(CheckKind::BarDiameter));

        let second = validate(&first.section.spec, &DesignLoads::axial(0.0)).unwrap();
        assert!(!second.has_warning(CheckKind::BarDiameter));
        assert_eq!(second.section.spec.bar_diameter_mm, 25.0);
    }

    #[test]
    fn test_wall_too_thin_for_minimum_bar() {
        // floor(60/8) = 7 mm, below the 10 mm minimum
        let mut spec = test_section();
        spec.thickness_mm = 60.0;
        spec.bar_diameter_mm = 12.0;
        let first = validate(&spec, &DesignLoads::axial(0.0)).unwrap();
        assert_eq!(first.section.spec.bar_diameter_mm, MIN_BAR_DIAMETER_MM);
        assert!(first.has_error(CheckKind::BarDiameter));
        assert!(first.has_warning(CheckKind::BarDiameter));

        let second = validate(&first.section.spec, &DesignLoads::axial(0.0)).unwrap();
        assert_eq!(second.section.spec, first.section.spec);
        assert!(second.has_error(CheckKind::BarDiameter));
        assert!(!second.has_warning(CheckKind::BarDiameter));
    }

    #[test]
    fn test_bar_positions_rejects_tiny_spacing() {
        let mut spec = test_section();
        spec.bar_spacing_mm = 1e-9;
        let err = bar_positions(&spec).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_spacing_clamped() {
        let spec = test_section().with_bar_spacing(800.0);
        let result = validate(&spec, &DesignLoads::axial(0.0)).unwrap();
        // max(3 · 200, 300) = 600
        assert_eq!(result.section.spec.bar_spacing_mm, 600.0);
        assert!(result.has_warning(CheckKind::BarSpacing));

        let thin = SectionSpec {
            thickness_mm: 80.0,
            bar_diameter_mm: 10.0,
            ..test_section().with_bar_spacing(350.0)
        };
        let result = validate(&thin, &DesignLoads::axial(0.0)).unwrap();
        assert_eq!(result.section.spec.bar_spacing_mm, 300.0);
    }

    #[test]
    fn test_validate_is_idempotent() {
        let mut spec = test_section();
        spec.bar_diameter_mm = 32.0;
        let loads = DesignLoads::axial(2500.0);
        let a = validate(&spec, &loads).unwrap();
        let b = validate(&spec, &loads).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_axial_limit_exceeded() {
        let spec = test_section();
        let result = validate(&spec, &DesignLoads::axial(7000.0)).unwrap();
        assert!(result.has_error(CheckKind::AxialLoad));

        let result = validate(&spec, &DesignLoads::axial(6000.0)).unwrap();
        assert!(!result.has_error(CheckKind::AxialLoad));
    }

    #[test]
    fn test_single_layer_uses_reduced_phi() {
        let mut spec = test_section();
        spec.layers = 1;
        let result = validate(&spec, &DesignLoads::axial(0.0)).unwrap();
        // 0.3 · 0.70 · 40 · 600000 / 1000
        assert!(approx_eq(result.section.axial_capacity_kn, 5040.0, 1e-6));
    }

    #[test]
    fn test_overstrength_check() {
        let spec = test_section();

        let unset = validate(&spec, &DesignLoads::axial(0.0)).unwrap();
        assert!(unset.has_warning(CheckKind::OverstrengthAxial));

        // limit 0.3 · 200 · 3000 = 180000
        let ok = validate(&spec, &DesignLoads::axial(0.0).with_overstrength(5000.0)).unwrap();
        assert!(!ok.has_warning(CheckKind::OverstrengthAxial));
        assert!(!ok.has_error(CheckKind::OverstrengthAxial));

        let over = validate(&spec, &DesignLoads::axial(0.0).with_overstrength(200_000.0)).unwrap();
        assert!(over.has_error(CheckKind::OverstrengthAxial));

        let mut elastic = spec.clone();
        elastic.ductility = DuctilityClass::Elastic;
        let skipped = validate(&elastic, &DesignLoads::axial(0.0)).unwrap();
        assert!(!skipped.has_warning(CheckKind::OverstrengthAxial));
    }

    #[test]
    fn test_min_thickness() {
        let spec = test_section();
        let p_l = 6283.185 / 600_000.0;
        let t_min = min_thickness_mm(&spec, p_l).unwrap();
        // A_r = 0.9333, k_m = 1, ξ = 0.3 - 0.01047·500/100 = 0.2476
        // t_m = 5 · 2.9333 · 3000 / (1700 · 0.4976) = 52.0
        assert!(approx_eq(t_min, 52.0, 0.2));

        let mut thin = spec.clone();
        thin.thickness_mm = 40.0;
        thin.bar_diameter_mm = 10.0;
        thin.bar_spacing_mm = 120.0;
        let result = validate(&thin, &DesignLoads::axial(0.0)).unwrap();
        assert!(result.has_error(CheckKind::MinThickness));

        let mut elastic = spec.clone();
        elastic.ductility = DuctilityClass::Elastic;
        assert!(min_thickness_mm(&elastic, p_l).is_none());
    }

    #[test]
    fn test_min_thickness_short_wall_reduction() {
        let mut spec = test_section();
        // k_m = 400 / ((0.25 + 0.055 · 0.4) · 3000) = 0.49
        spec.height_mm = 1200.0;
        spec.clear_height_mm = Some(400.0);
        let full = min_thickness_mm(&test_section(), 0.01).unwrap();
        let reduced = min_thickness_mm(&spec, 0.01).unwrap();
        assert!(reduced < full);
    }

    #[test]
    fn test_checks_do_not_short_circuit() {
        let mut spec = test_section();
        spec.bar_diameter_mm = 40.0;
        spec.bar_spacing_mm = 900.0;
        let result = validate(&spec, &DesignLoads::axial(9000.0)).unwrap();

        assert!(result.has_warning(CheckKind::BarDiameter));
        assert!(result.has_warning(CheckKind::BarSpacing));
        assert!(result.has_error(CheckKind::MinReinforcement));
        assert!(result.has_error(CheckKind::AxialLoad));
        assert!(result.logs.iter().any(|d| d.kind == CheckKind::StressBlock));
        assert!(result.logs.iter().any(|d| d.kind == CheckKind::MinThickness));
    }

    #[test]
    fn test_compliant_section() {
        let result = validate(&compliant_section(), &DesignLoads::axial(0.0)).unwrap();
        assert!(result.complies(), "errors: {:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_max_reinforcement_exceeded() {
        let mut spec = compliant_section();
        // ρ_l = 0.479 > 16/40
        spec.bar_spacing_mm = 35.0;
        let result = validate(&spec, &DesignLoads::axial(0.0)).unwrap();
        assert!(result.has_error(CheckKind::MaxReinforcement));
    }

    #[test]
    fn test_diagnostic_citation() {
        let d = Diagnostic {
            kind: CheckKind::AxialLoad,
            message: "too much".to_string(),
        };
        assert_eq!(d.cited(), "cl 11.3.1.6: too much");
    }

    #[test]
    fn test_result_serialization() {
        let result = validate(&test_section(), &DesignLoads::axial(100.0)).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("bar_positions_mm"));
        assert!(json.contains("\"MinReinforcement\""));
        let roundtrip: ValidationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result.errors, roundtrip.errors);
    }
}
