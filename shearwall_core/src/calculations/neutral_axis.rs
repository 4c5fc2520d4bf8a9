//! # Neutral Axis Solver
//!
//! Finds the neutral axis depth at which a wall section is in axial
//! equilibrium under an applied axial load, by strain compatibility.
//!
//! ## Assumptions
//!
//! - Plane sections remain plane; extreme concrete fibre strain 0.003
//! - Concrete carries compression through the equivalent stress block
//! - Bars beyond the neutral axis carry tension, `εs = 0.003 (x_i − c) / c`
//! - Bars on the compression side carry nothing
//! - f'c and f_y enter unfactored
//!
//! ```text
//!  compression edge                              tension edge
//!  x = 0                                         x = l_w
//!  ├──── c ────┤
//!  ┌───────────┬────────────────────────────────┐
//!  │///////////│  ●      ●      ●      ●      ● │
//!  └───────────┴────────────────────────────────┘
//!   Cc = α1 β1 f'c t c        Ts = Σ fs As
//!
//!  f(c) = (Ts + N*) − Cc = 0
//! ```
//!
//! The residual is strictly decreasing in `c`, so there is at most one root.
//! When it falls at or beyond either face of the wall the section cannot
//! equilibrate the load, which is reported as [`SolveFailure::OutsideSection`].

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::validation::ValidatedSection;
use crate::materials::{steel_stress, ULTIMATE_CONCRETE_STRAIN};
use crate::root_finding::{bracket_root, brent, SolverSettings};
use crate::units::{KilonewtonMeters, Kilonewtons, Megapascals, Millimeters, Newtons, SquareMillimeters};

/// Smallest trial depth as a fraction of the wall length. The strain
/// expression divides by the depth, so zero is never evaluated.
const MIN_DEPTH_FRACTION: f64 = 1e-9;

/// Initial bracketing half-width as a fraction of the wall length
const BRACKET_STEP_FRACTION: f64 = 0.05;

/// State of one bar position (all layers) for a trial neutral axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarState {
    /// Distance from the compression edge (mm)
    pub position_mm: f64,
    /// Bar lies beyond the neutral axis
    pub in_tension: bool,
    /// Tensile strain (zero on the compression side)
    pub strain: f64,
    /// Steel stress (MPa)
    pub stress_mpa: f64,
    /// Tensile force over all layers (kN)
    pub force_kn: f64,
    /// Moment of the force about the concrete compression resultant (kNm)
    pub moment_knm: f64,
}

/// Bar strain, stress, force and moment for a neutral axis at `depth_mm`.
pub fn bar_state(section: &ValidatedSection, position_mm: f64, depth_mm: f64) -> BarState {
    let in_tension = position_mm > depth_mm;
    let strain = if in_tension {
        ULTIMATE_CONCRETE_STRAIN * (position_mm - depth_mm) / depth_mm
    } else {
        0.0
    };
    let stress_mpa = steel_stress(strain, section.spec.f_y_mpa);

    let force: Newtons = Megapascals(stress_mpa) * SquareMillimeters(section.area_per_position_mm2());
    let force_kn = Kilonewtons::from(force);
    let lever_arm = Millimeters(position_mm - section.stress_block.centroid_depth_mm(depth_mm));
    let moment_knm = KilonewtonMeters::from(force_kn * lever_arm);

    BarState {
        position_mm,
        in_tension,
        strain,
        stress_mpa,
        force_kn: force_kn.value(),
        moment_knm: moment_knm.value(),
    }
}

/// Total steel tension Ts (kN) for a neutral axis at `depth_mm`.
pub fn steel_tension_kn(section: &ValidatedSection, depth_mm: f64) -> f64 {
    section
        .bar_positions_mm
        .iter()
        .map(|&x| bar_state(section, x, depth_mm).force_kn)
        .sum()
}

/// Concrete compression resultant Cc (kN) for a neutral axis at `depth_mm`.
pub fn concrete_compression_kn(section: &ValidatedSection, depth_mm: f64) -> f64 {
    let spec = &section.spec;
    let cc = Newtons(
        section
            .stress_block
            .compression_force_n(depth_mm, spec.f_c_mpa, spec.thickness_mm),
    );
    Kilonewtons::from(cc).value()
}

/// Axial force residual f(c) = (Ts + N*) − Cc in kN.
pub fn axial_residual_kn(section: &ValidatedSection, axial_kn: f64, depth_mm: f64) -> f64 {
    steel_tension_kn(section, depth_mm) + axial_kn - concrete_compression_kn(section, depth_mm)
}

/// Converged neutral axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeutralAxisSolution {
    /// Neutral axis depth from the compression edge (mm), within (0, l_w)
    pub depth_mm: f64,
    /// Axial force residual at the solution (kN)
    pub residual_kn: f64,
    /// Brent iterations used
    pub iterations: u32,
}

/// Face of the wall a non-physical neutral axis fell against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionBound {
    /// Root at or below zero depth: tension exceeds what the steel can carry
    CompressionEdge,
    /// Root at or beyond the wall length: compression exceeds the stress block
    TensionEdge,
}

/// Why no neutral axis was found.
#[derive(Error, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum SolveFailure {
    /// Equilibrium requires a neutral axis outside (0, l_w)
    #[error("Neutral axis at {depth_mm:.1} mm lies outside the section ({bound:?})")]
    OutsideSection {
        depth_mm: f64,
        bound: SectionBound,
        residual_kn: f64,
    },

    /// Root search ran out of iterations
    #[error("Neutral axis search did not converge after {iterations} iterations (c = {depth_mm:.3} mm, residual {residual_kn:.3e} kN)")]
    NotConverged {
        depth_mm: f64,
        residual_kn: f64,
        iterations: u32,
    },
}

/// Solve for the neutral axis depth under axial load `axial_kn`.
///
/// `hint` seeds the search (typically the previous solution in a sweep);
/// without one, or with a hint that is not a positive finite depth, the
/// search starts at `l_w / 2`.
///
/// # Returns
///
/// * `Ok(NeutralAxisSolution)` - Depth strictly inside (0, l_w)
/// * `Err(SolveFailure)` - No physical neutral axis, or no convergence
pub fn solve(
    section: &ValidatedSection,
    axial_kn: f64,
    hint: Option<f64>,
    settings: &SolverSettings,
) -> Result<NeutralAxisSolution, SolveFailure> {
    let l_w = section.spec.length_mm;
    let min_depth = l_w * MIN_DEPTH_FRACTION;
    let seed = hint
        .filter(|x| x.is_finite() && *x > min_depth)
        .unwrap_or(0.5 * l_w);

    let residual = |x: f64| axial_residual_kn(section, axial_kn, x);

    let bracket = match bracket_root(
        residual,
        seed,
        BRACKET_STEP_FRACTION * l_w,
        min_depth,
        settings.max_bracket_expansions,
    ) {
        Ok(bracket) => bracket,
        Err(failure) if failure.at_lower_limit => {
            return Err(SolveFailure::OutsideSection {
                depth_mm: failure.interval.lower,
                bound: SectionBound::CompressionEdge,
                residual_kn: failure.interval.f_lower,
            });
        }
        Err(failure) => {
            return Err(SolveFailure::NotConverged {
                depth_mm: failure.interval.upper,
                residual_kn: failure.interval.f_upper,
                iterations: 0,
            });
        }
    };

    let root = match brent(residual, bracket, settings) {
        Ok(root) => root,
        Err(e) => {
            warn!(axial_kn, error = %e, "brent refinement failed");
            return Err(SolveFailure::NotConverged {
                depth_mm: bracket.upper,
                residual_kn: bracket.f_upper,
                iterations: 0,
            });
        }
    };
    if !root.converged {
        return Err(SolveFailure::NotConverged {
            depth_mm: root.x,
            residual_kn: root.residual,
            iterations: root.iterations,
        });
    }

    if root.x <= min_depth {
        return Err(SolveFailure::OutsideSection {
            depth_mm: root.x,
            bound: SectionBound::CompressionEdge,
            residual_kn: root.residual,
        });
    }
    if root.x >= l_w {
        return Err(SolveFailure::OutsideSection {
            depth_mm: root.x,
            bound: SectionBound::TensionEdge,
            residual_kn: root.residual,
        });
    }

    debug!(
        axial_kn,
        depth_mm = root.x,
        residual_kn = root.residual,
        iterations = root.iterations,
        "neutral axis solved"
    );

    Ok(NeutralAxisSolution {
        depth_mm: root.x,
        residual_kn: root.residual,
        iterations: root.iterations,
    })
}
