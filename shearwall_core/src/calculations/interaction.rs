//! # Interaction Curve
//!
//! Sweeps the axial load upward from a starting value and records the design
//! moment at each step, producing the P–M interaction diagram for a wall.
//!
//! ## Sweep
//!
//! ```text
//! N_k = N_start + k · N_max / divisor        k = 0, 1, 2, ...
//! ```
//!
//! Each step solves the neutral axis (seeded with the previous step's depth)
//! and evaluates φM_n. The sweep stops at the first of:
//!
//! - the iteration ceiling
//! - a negative design moment
//! - no neutral axis inside the section, or no convergence
//!
//! The section is validated once; the only check that depends on the axial
//! load is the N_max ceiling, and every point records that comparison as
//! `within_limit`.
//!
//! ## Output Curves
//!
//! Points are reported twice for plotting:
//!
//! - **within limit**: every point, with the axial load capped at N_max, which
//!   draws the usable envelope with a flat top
//! - **exceeding limit**: only the points above N_max, at their true axial
//!   load, which draws the unusable continuation

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::calculations::capacity::design_strength;
use crate::calculations::neutral_axis::SolveFailure;
use crate::calculations::validation::{validate, ValidatedSection};
use crate::calculations::wall_section::{DesignLoads, SectionSpec};
use crate::errors::{CalcError, CalcResult};
use crate::root_finding::SolverSettings;

/// Sweep configuration.
///
/// ## JSON Example
///
/// ```json
/// {
///   "axial_load_start_kn": 0.0,
///   "step_divisor": 20.0,
///   "iteration_ceiling": 100,
///   "solver": { "max_iterations": 100 }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// First axial load sampled (kN)
    pub axial_load_start_kn: f64,

    /// Axial increment is N_max divided by this
    pub step_divisor: f64,

    /// Maximum number of samples
    pub iteration_ceiling: u32,

    /// Neutral axis solver settings
    pub solver: SolverSettings,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            axial_load_start_kn: 0.0,
            step_divisor: 20.0,
            iteration_ceiling: 100,
            solver: SolverSettings::default(),
        }
    }
}

impl SweepConfig {
    /// Validate configuration.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.axial_load_start_kn.is_finite() {
            return Err(CalcError::invalid_input(
                "axial_load_start_kn",
                self.axial_load_start_kn.to_string(),
                "Starting axial load must be finite",
            ));
        }
        if !self.step_divisor.is_finite() || self.step_divisor <= 0.0 {
            return Err(CalcError::invalid_input(
                "step_divisor",
                self.step_divisor.to_string(),
                "Step divisor must be positive and finite",
            ));
        }
        if self.iteration_ceiling == 0 {
            return Err(CalcError::invalid_input(
                "iteration_ceiling",
                "0",
                "At least one sample is required",
            ));
        }
        self.solver.validate()
    }
}

/// One sample of the interaction diagram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityPoint {
    /// Axial load N* (kN)
    pub axial_load_kn: f64,
    /// Design moment φM_n (kNm)
    pub design_moment_knm: f64,
    /// Neutral axis depth (mm)
    pub neutral_axis_mm: f64,
    /// N* ≤ N_max
    pub within_limit: bool,
}

/// Plotting pair, moment on the horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub moment_knm: f64,
    pub axial_kn: f64,
}

/// Why the sweep stopped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason")]
pub enum SweepTermination {
    /// The configured number of samples was taken
    IterationCeiling,

    /// φM_n went negative; the offending sample is not on the curve
    NegativeMoment {
        axial_load_kn: f64,
        design_moment_knm: f64,
    },

    /// The neutral axis could not be found inside the section
    SolverFailure {
        axial_load_kn: f64,
        failure: SolveFailure,
    },
}

impl SweepTermination {
    pub fn describe(&self) -> String {
        match self {
            SweepTermination::IterationCeiling => "iteration ceiling reached".to_string(),
            SweepTermination::NegativeMoment {
                axial_load_kn,
                design_moment_knm,
            } => format!(
                "design moment {:.1} kNm became negative at N* = {:.1} kN",
                design_moment_knm, axial_load_kn
            ),
            SweepTermination::SolverFailure {
                axial_load_kn,
                failure,
            } => format!("at N* = {:.1} kN: {}", axial_load_kn, failure),
        }
    }
}

/// P–M interaction diagram for one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionCurve {
    /// Samples in sweep order
    pub points: Vec<CapacityPoint>,

    /// Axial load ceiling N_max (kN)
    pub axial_capacity_kn: f64,

    /// Why the sweep stopped
    pub termination: SweepTermination,
}

impl InteractionCurve {
    /// Every point with its axial load capped at N_max.
    pub fn within_limit_curve(&self) -> Vec<CurvePoint> {
        self.points
            .iter()
            .map(|p| CurvePoint {
                moment_knm: p.design_moment_knm,
                axial_kn: p.axial_load_kn.min(self.axial_capacity_kn),
            })
            .collect()
    }

    /// Points above N_max at their actual axial load.
    pub fn exceeds_limit_curve(&self) -> Vec<CurvePoint> {
        self.points
            .iter()
            .filter(|p| !p.within_limit)
            .map(|p| CurvePoint {
                moment_knm: p.design_moment_knm,
                axial_kn: p.axial_load_kn,
            })
            .collect()
    }

    /// Largest design moment on the curve
    pub fn max_design_moment_knm(&self) -> Option<f64> {
        self.points
            .iter()
            .map(|p| p.design_moment_knm)
            .fold(None, |acc, m| Some(acc.map_or(m, |a: f64| a.max(m))))
    }

    /// Design moment at `axial_kn`, interpolated linearly between the
    /// within-limit samples that straddle it.
    ///
    /// Returns `None` outside the sampled within-limit range.
    pub fn moment_capacity_at(&self, axial_kn: f64) -> Option<f64> {
        let usable: Vec<&CapacityPoint> = self.points.iter().filter(|p| p.within_limit).collect();
        usable.windows(2).find_map(|pair| {
            let (a, b) = (pair[0], pair[1]);
            if axial_kn < a.axial_load_kn || axial_kn > b.axial_load_kn {
                return None;
            }
            let span = b.axial_load_kn - a.axial_load_kn;
            if span <= 0.0 {
                return Some(a.design_moment_knm);
            }
            let t = (axial_kn - a.axial_load_kn) / span;
            Some(a.design_moment_knm + t * (b.design_moment_knm - a.design_moment_knm))
        })
    }
}

/// Validate a section and build its interaction curve.
///
/// Validation diagnostics are not returned here; call
/// [`validate`] directly (or use [`shear_wall::calculate`](crate::calculations::shear_wall::calculate))
/// when they are needed.
pub fn interaction_curve(spec: &SectionSpec, config: &SweepConfig) -> CalcResult<InteractionCurve> {
    config.validate()?;
    let validation = validate(spec, &DesignLoads::axial(config.axial_load_start_kn))?;
    sweep(&validation.section, config)
}

/// Sweep the axial load over an already validated section.
pub fn sweep(section: &ValidatedSection, config: &SweepConfig) -> CalcResult<InteractionCurve> {
    config.validate()?;

    let n_max = section.axial_capacity_kn;
    let step = n_max / config.step_divisor;
    if !step.is_finite() || step <= 0.0 {
        return Err(CalcError::calculation_failed(
            "interaction sweep",
            format!("axial step {} kN from N_max {:.1} kN is not positive", step, n_max),
        ));
    }

    let mut points = Vec::with_capacity(config.iteration_ceiling as usize);
    let mut hint = None;
    let mut termination = SweepTermination::IterationCeiling;

    for k in 0..config.iteration_ceiling {
        let axial_load_kn = config.axial_load_start_kn + k as f64 * step;

        let capacity = match design_strength(section, axial_load_kn, hint, &config.solver) {
            Ok(capacity) => capacity,
            Err(failure) => {
                termination = SweepTermination::SolverFailure {
                    axial_load_kn,
                    failure,
                };
                break;
            }
        };

        if capacity.design_moment_knm < 0.0 {
            termination = SweepTermination::NegativeMoment {
                axial_load_kn,
                design_moment_knm: capacity.design_moment_knm,
            };
            break;
        }

        debug!(
            step = k,
            axial_load_kn,
            design_moment_knm = capacity.design_moment_knm,
            "interaction point"
        );

        hint = Some(capacity.neutral_axis_mm);
        points.push(CapacityPoint {
            axial_load_kn,
            design_moment_knm: capacity.design_moment_knm,
            neutral_axis_mm: capacity.neutral_axis_mm,
            within_limit: axial_load_kn <= n_max,
        });
    }

    info!(
        points = points.len(),
        axial_capacity_kn = n_max,
        termination = %termination.describe(),
        "interaction sweep finished"
    );

    Ok(InteractionCurve {
        points,
        axial_capacity_kn: n_max,
        termination,
    })
}
