//! # Section Capacity
//!
//! Nominal and design flexural strength of a wall section at a solved
//! neutral axis.
//!
//! Moments are taken about the centroid of the concrete stress block, which
//! sits `β1·c / 2` from the compression edge:
//!
//! ```text
//! M_s  = Σ F_i (x_i − β1·c/2)              steel tension
//! M_N  = N* (l_w/2 − β1·c/2)               axial load at mid-length
//! M_n  = M_s + M_N
//! φM_n = 0.85 M_n
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::neutral_axis::{self, BarState, NeutralAxisSolution, SolveFailure};
use crate::calculations::validation::ValidatedSection;
use crate::nzs3101::PHI;
use crate::root_finding::SolverSettings;
use crate::units::{KilonewtonMeters, Kilonewtons, Millimeters};

/// Flexural capacity of a section under one axial load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionCapacity {
    /// Applied axial load N* (kN, compression positive)
    pub axial_load_kn: f64,

    /// Neutral axis depth from the compression edge (mm)
    pub neutral_axis_mm: f64,

    /// Axial equilibrium residual at the neutral axis (kN)
    pub residual_kn: f64,

    /// Root-finding iterations
    pub iterations: u32,

    /// Per-bar strains, stresses, forces and moments
    pub bars: Vec<BarState>,

    /// Steel tension resultant Ts (kN)
    pub tension_kn: f64,

    /// Concrete compression resultant Cc (kN)
    pub compression_kn: f64,

    /// Moment of the steel forces, M_s (kNm)
    pub steel_moment_knm: f64,

    /// Moment of the axial load, M_N (kNm)
    pub axial_moment_knm: f64,

    /// Nominal moment M_n (kNm)
    pub nominal_moment_knm: f64,

    /// Design moment φM_n (kNm)
    pub design_moment_knm: f64,
}

impl SectionCapacity {
    /// Bars beyond the neutral axis
    pub fn tension_bars(&self) -> impl Iterator<Item = &BarState> {
        self.bars.iter().filter(|b| b.in_tension)
    }

    /// Whether at least one tension bar has reached f_y
    pub fn any_bar_yielded(&self, f_y_mpa: f64) -> bool {
        self.tension_bars().any(|b| b.stress_mpa >= f_y_mpa)
    }
}

/// Evaluate nominal and design moment at a solved neutral axis.
pub fn evaluate(
    section: &ValidatedSection,
    axial_load_kn: f64,
    solution: &NeutralAxisSolution,
) -> SectionCapacity {
    let c = solution.depth_mm;
    let bars: Vec<BarState> = section
        .bar_positions_mm
        .iter()
        .map(|&x| neutral_axis::bar_state(section, x, c))
        .collect();

    let tension_kn: f64 = bars.iter().map(|b| b.force_kn).sum();
    let compression_kn = neutral_axis::concrete_compression_kn(section, c);
    let steel_moment_knm: f64 = bars.iter().map(|b| b.moment_knm).sum();

    let lever_arm = Millimeters(0.5 * section.spec.length_mm - section.stress_block.centroid_depth_mm(c));
    let axial_moment_knm = KilonewtonMeters::from(Kilonewtons(axial_load_kn) * lever_arm).value();

    let nominal_moment_knm = steel_moment_knm + axial_moment_knm;
    let design_moment_knm = PHI * nominal_moment_knm;

    debug!(
        axial_load_kn,
        neutral_axis_mm = c,
        nominal_moment_knm,
        design_moment_knm,
        "section capacity"
    );

    SectionCapacity {
        axial_load_kn,
        neutral_axis_mm: c,
        residual_kn: solution.residual_kn,
        iterations: solution.iterations,
        bars,
        tension_kn,
        compression_kn,
        steel_moment_knm,
        axial_moment_knm,
        nominal_moment_knm,
        design_moment_knm,
    }
}

/// Solve for the neutral axis under `axial_load_kn` and evaluate the design
/// moment there.
///
/// # Returns
///
/// * `Ok(SectionCapacity)` - Neutral axis found inside the section
/// * `Err(SolveFailure)` - No equilibrium inside the section, or no convergence
pub fn design_strength(
    section: &ValidatedSection,
    axial_load_kn: f64,
    hint: Option<f64>,
    settings: &SolverSettings,
) -> Result<SectionCapacity, SolveFailure> {
    let solution = neutral_axis::solve(section, axial_load_kn, hint, settings)?;
    Ok(evaluate(section, axial_load_kn, &solution))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::validation::validate;
    use crate::calculations::wall_section::tests::test_section;
    use crate::calculations::wall_section::DesignLoads;

    fn test_validated() -> ValidatedSection {
        validate(&test_section(), &DesignLoads::axial(0.0)).unwrap().section
    }

    #[test]
    fn test_zero_axial_hand_calculation() {
        let section = test_validated();
        let capacity = design_strength(&section, 0.0, None, &SolverSettings::default()).unwrap();

        // c ≈ 464.3 mm, β1·c/2 ≈ 178.8 mm
        // Bar at 750: fs ≈ 369.6 MPa → 232.2 kN, lever 571.2 mm → 132.6 kNm
        // Seven yielded bars: 314.16 · (13650 − 7 · 178.8) / 1000 = 3895.1 kNm
        // φMn = 0.85 · 4027.7 ≈ 3423.5 kNm
        assert!((capacity.neutral_axis_mm - 464.3).abs() < 1.0);
        assert!(capacity.axial_moment_knm.abs() < 1e-12);
        assert!(
            (capacity.design_moment_knm - 3423.5).abs() < 5.0,
            "φMn = {}",
            capacity.design_moment_knm
        );
    }

    #[test]
    fn test_equilibrium_at_solution() {
        let section = test_validated();
        for n in [-1000.0, 0.0, 2500.0, 8000.0] {
            let capacity = design_strength(&section, n, None, &SolverSettings::default()).unwrap();
            let imbalance = capacity.tension_kn + n - capacity.compression_kn;
            assert!(imbalance.abs() <= 1e-6, "N = {}: {}", n, imbalance);
        }
    }

    #[test]
    fn test_moment_components_sum() {
        let section = test_validated();
        let capacity = design_strength(&section, 2500.0, None, &SolverSettings::default()).unwrap();
        let bar_sum: f64 = capacity.bars.iter().map(|b| b.moment_knm).sum();
        assert!((bar_sum - capacity.steel_moment_knm).abs() < 1e-9);
        assert!(
            (capacity.steel_moment_knm + capacity.axial_moment_knm - capacity.nominal_moment_knm).abs()
                < 1e-9
        );
        assert!((capacity.design_moment_knm - PHI * capacity.nominal_moment_knm).abs() < 1e-9);
    }

    #[test]
    fn test_compression_bars_carry_nothing() {
        let section = test_validated();
        let capacity = design_strength(&section, 2500.0, None, &SolverSettings::default()).unwrap();
        for bar in capacity.bars.iter().filter(|b| !b.in_tension) {
            assert_eq!(bar.force_kn, 0.0);
            assert!(bar.position_mm <= capacity.neutral_axis_mm);
        }
        assert!(capacity.any_bar_yielded(500.0));
    }

    #[test]
    fn test_moderate_axial_raises_capacity() {
        let section = test_validated();
        let settings = SolverSettings::default();
        let m0 = design_strength(&section, 0.0, None, &settings).unwrap().design_moment_knm;
        let m1 = design_strength(&section, 3000.0, None, &settings).unwrap().design_moment_knm;
        assert!(m1 > m0);
    }

    #[test]
    fn test_failure_passes_through() {
        let section = test_validated();
        let result = design_strength(&section, 20_000.0, None, &SolverSettings::default());
        assert!(matches!(result, Err(SolveFailure::OutsideSection { .. })));
    }
}
