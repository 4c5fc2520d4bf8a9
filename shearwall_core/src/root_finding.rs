//! # Derivative-Free Root Finding
//!
//! Bracketing search plus Brent's method (via `argmin`) for scalar equations
//! `f(x) = 0`.
//!
//! ## Algorithm Overview
//!
//! 1. Starting from a seed, widen an interval geometrically until `f` changes
//!    sign across it, never going below a strictly positive lower limit
//! 2. Refine the bracket with `argmin`'s `BrentRoot` (inverse quadratic
//!    interpolation with secant and bisection fallbacks)
//! 3. Stop when `|f(x)| ≤ force_tolerance_kn` or the bracket half-width is
//!    within `depth_tolerance_mm`, or give up after `max_iterations`
//!
//! The tolerances are named for the neutral-axis problem they serve (the
//! residual is an axial force in kN, the unknown a depth in mm), but nothing
//! here depends on that.
//!
//! ## References
//!
//! - R.P. Brent, "Algorithms for Minimization without Derivatives" (1973), Ch. 4
//! - Press et al., "Numerical Recipes", 3rd Edition, §9.1

use argmin::core::{CostFunction, Executor, State, TerminationReason};
use argmin::solver::brent::BrentRoot;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::errors::{CalcError, CalcResult};

/// Growth factor applied to the interval on each bracketing step
const BRACKET_GROWTH: f64 = 1.6;

/// Convergence settings for the neutral-axis root find.
///
/// ## JSON Example
///
/// ```json
/// {
///   "force_tolerance_kn": 1e-6,
///   "depth_tolerance_mm": 1e-9,
///   "max_iterations": 100,
///   "max_bracket_expansions": 60
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Converged when the absolute force residual is at or below this (kN)
    pub force_tolerance_kn: f64,

    /// Converged when the bracket half-width is at or below this (mm)
    pub depth_tolerance_mm: f64,

    /// Maximum Brent iterations before reporting non-convergence
    pub max_iterations: u32,

    /// Maximum interval expansions while searching for a sign change
    pub max_bracket_expansions: u32,
}

impl Default for SolverSettings {
    fn default() -> Self {
        SolverSettings {
            force_tolerance_kn: 1e-6,
            depth_tolerance_mm: 1e-9,
            max_iterations: 100,
            max_bracket_expansions: 60,
        }
    }
}

impl SolverSettings {
    /// Validate settings.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.force_tolerance_kn.is_finite() || self.force_tolerance_kn <= 0.0 {
            return Err(CalcError::invalid_input(
                "force_tolerance_kn",
                self.force_tolerance_kn.to_string(),
                "Tolerance must be positive and finite",
            ));
        }
        if !self.depth_tolerance_mm.is_finite() || self.depth_tolerance_mm <= 0.0 {
            return Err(CalcError::invalid_input(
                "depth_tolerance_mm",
                self.depth_tolerance_mm.to_string(),
                "Tolerance must be positive and finite",
            ));
        }
        if self.max_iterations == 0 {
            return Err(CalcError::invalid_input(
                "max_iterations",
                "0",
                "At least one iteration is required",
            ));
        }
        Ok(())
    }
}

/// Interval `[lower, upper]` over which `f` changes sign (or touches zero).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub lower: f64,
    pub upper: f64,
    pub f_lower: f64,
    pub f_upper: f64,
}

/// Last interval tried when no sign change was found.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BracketFailure {
    /// Last interval searched (no sign change across it)
    pub interval: Bracket,
    /// The interval was pinned against the lower limit
    pub at_lower_limit: bool,
}

/// Outcome of a Brent refinement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RootResult {
    /// Best estimate of the root
    pub x: f64,
    /// Function value at `x`
    pub residual: f64,
    /// Iterations used
    pub iterations: u32,
    /// Whether the convergence criterion was met
    pub converged: bool,
}

fn same_sign(a: f64, b: f64) -> bool {
    (a > 0.0 && b > 0.0) || (a < 0.0 && b < 0.0)
}

/// Search outward from `seed` for an interval across which `f` changes sign.
///
/// The interval starts as `seed ± step` and grows by a factor of 1.6 on the side
/// with the smaller `|f|`. It is never allowed below `lower_limit`, so `f` is
/// never evaluated at or below it when `lower_limit` is itself safe.
pub fn bracket_root<F>(
    mut f: F,
    seed: f64,
    step: f64,
    lower_limit: f64,
    max_expansions: u32,
) -> Result<Bracket, BracketFailure>
where
    F: FnMut(f64) -> f64,
{
    let mut lower = (seed - step).max(lower_limit);
    let mut upper = (seed + step).max(lower + step);
    let mut f_lower = f(lower);
    let mut f_upper = f(upper);

    for _ in 0..max_expansions {
        if !same_sign(f_lower, f_upper) {
            return Ok(Bracket {
                lower,
                upper,
                f_lower,
                f_upper,
            });
        }

        let width = upper - lower;
        if f_lower.abs() < f_upper.abs() && lower > lower_limit {
            lower = (lower - BRACKET_GROWTH * width).max(lower_limit);
            f_lower = f(lower);
        } else {
            upper += BRACKET_GROWTH * width;
            f_upper = f(upper);
        }
    }

    let interval = Bracket {
        lower,
        upper,
        f_lower,
        f_upper,
    };
    if !same_sign(f_lower, f_upper) {
        return Ok(interval);
    }
    Err(BracketFailure {
        interval,
        at_lower_limit: lower <= lower_limit,
    })
}

/// Residual wrapped as an argmin cost function.
struct Residual<F> {
    f: F,
}

impl<F> CostFunction for Residual<F>
where
    F: Fn(f64) -> f64,
{
    type Param = f64;
    type Output = f64;

    fn cost(&self, x: &f64) -> Result<f64, argmin::core::Error> {
        let value = (self.f)(*x);
        trace!(x = *x, residual = value, "brent evaluation");
        Ok(value)
    }
}

/// Refine a bracketed root with argmin's Brent solver.
///
/// The solver tracks `|f|` as its cost, so the force tolerance is passed as
/// the target cost and the depth tolerance as Brent's interval tolerance.
/// Running out of iterations is not an error: it comes back as
/// `converged: false`.
pub fn brent<F>(f: F, bracket: Bracket, settings: &SolverSettings) -> CalcResult<RootResult>
where
    F: Fn(f64) -> f64,
{
    for (x, residual) in [(bracket.lower, bracket.f_lower), (bracket.upper, bracket.f_upper)] {
        if residual == 0.0 {
            return Ok(RootResult {
                x,
                residual,
                iterations: 0,
                converged: true,
            });
        }
    }

    let solver = BrentRoot::new(bracket.lower, bracket.upper, settings.depth_tolerance_mm);
    let result = Executor::new(Residual { f: &f }, solver)
        .configure(|state| {
            state
                .max_iters(settings.max_iterations as u64)
                .target_cost(settings.force_tolerance_kn)
        })
        .run()
        .map_err(|e| CalcError::calculation_failed("root refinement", e.to_string()))?;

    let state = result.state();
    let x = state.get_best_param().copied().unwrap_or(bracket.upper);
    let residual = f(x);
    let converged = matches!(
        state.get_termination_reason(),
        Some(TerminationReason::SolverConverged)
    ) || residual.abs() <= settings.force_tolerance_kn;

    Ok(RootResult {
        x,
        residual,
        iterations: state.get_iter() as u32,
        converged,
    })
}
