//! Concrete stress block parameters (NZS 3101 cl 7.4.2.7).
//!
//! The compression zone is replaced by an equivalent rectangular stress block
//! of intensity `α1·f'c` over a depth `β1·c`, where `c` is the neutral axis
//! depth.
//!
//! ```text
//!  α1·f'c
//!  ┌──────┐ ─┬─
//!  │//////│  │ β1·c
//!  │//////│  │
//!  └──────┘ ─┴─      c = neutral axis depth
//! ```

use serde::{Deserialize, Serialize};

/// Ultimate compressive strain at the extreme concrete fibre
pub const ULTIMATE_CONCRETE_STRAIN: f64 = 0.003;

/// Equivalent rectangular stress block factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressBlock {
    /// Stress intensity factor α1
    pub alpha1: f64,
    /// Block depth factor β1
    pub beta1: f64,
}

impl StressBlock {
    /// Concrete compression resultant in newtons for a neutral axis depth
    /// `x_mm` across a wall of thickness `t_mm`.
    ///
    /// Cc = α1 · β1 · x · f'c · t
    pub fn compression_force_n(&self, x_mm: f64, f_c_mpa: f64, t_mm: f64) -> f64 {
        x_mm * self.alpha1 * self.beta1 * f_c_mpa * t_mm
    }

    /// Depth from the compression edge to the centroid of the stress block.
    pub fn centroid_depth_mm(&self, x_mm: f64) -> f64 {
        0.5 * self.beta1 * x_mm
    }
}

/// Stress block factors for a concrete strength `f_c` (MPa).
///
/// # Formula
/// ```text
/// α1 = 0.85                         f'c ≤ 55
///    = 0.85 − 0.004 (f'c − 55)      55 < f'c ≤ 80
///    = 0.75                         f'c > 80
///
/// β1 = 0.85                         f'c < 30
///    = 0.85 − 0.008 (f'c − 30)      30 ≤ f'c < 55
///    = 0.65                         f'c ≥ 55
/// ```
pub fn stress_block_factors(f_c: f64) -> StressBlock {
    let alpha1 = if f_c <= 55.0 {
        0.85
    } else if f_c <= 80.0 {
        0.85 - 0.004 * (f_c - 55.0)
    } else {
        0.75
    };

    let beta1 = if f_c < 30.0 {
        0.85
    } else if f_c < 55.0 {
        0.85 - 0.008 * (f_c - 30.0)
    } else {
        0.65
    };

    StressBlock { alpha1, beta1 }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_low_strength() {
        let block = stress_block_factors(25.0);
        assert_eq!(block.alpha1, 0.85);
        assert_eq!(block.beta1, 0.85);
    }

    #[test]
    fn test_mid_strength() {
        let block = stress_block_factors(40.0);
        assert_eq!(block.alpha1, 0.85);
        // 0.85 - 0.008 * 10
        assert!((block.beta1 - 0.77).abs() < EPS);
    }

    #[test]
    fn test_high_strength() {
        let block = stress_block_factors(70.0);
        // 0.85 - 0.004 * 15
        assert!((block.alpha1 - 0.79).abs() < EPS);
        assert_eq!(block.beta1, 0.65);

        let block = stress_block_factors(100.0);
        assert_eq!(block.alpha1, 0.75);
        assert_eq!(block.beta1, 0.65);
    }

    #[test]
    fn test_continuous_at_breakpoints() {
        for f_c in [30.0, 55.0, 80.0] {
            let below = stress_block_factors(f_c - 1e-9);
            let at = stress_block_factors(f_c);
            let above = stress_block_factors(f_c + 1e-9);
            assert!((below.alpha1 - at.alpha1).abs() < 1e-6, "alpha1 jumps at {}", f_c);
            assert!((above.alpha1 - at.alpha1).abs() < 1e-6, "alpha1 jumps at {}", f_c);
            assert!((below.beta1 - at.beta1).abs() < 1e-6, "beta1 jumps at {}", f_c);
            assert!((above.beta1 - at.beta1).abs() < 1e-6, "beta1 jumps at {}", f_c);
        }
    }

    #[test]
    fn test_branch_formulas_agree_at_boundaries() {
        let beta1_linear = |f_c: f64| 0.85 - 0.008 * (f_c - 30.0);
        let alpha1_linear = |f_c: f64| 0.85 - 0.004 * (f_c - 55.0);

        let at_30 = stress_block_factors(30.0);
        assert!((at_30.beta1 - beta1_linear(30.0)).abs() < EPS);
        assert!((at_30.beta1 - 0.85).abs() < EPS);

        let at_55 = stress_block_factors(55.0);
        assert!((at_55.beta1 - beta1_linear(55.0)).abs() < EPS);
        assert!((at_55.beta1 - 0.65).abs() < EPS);
        assert!((at_55.alpha1 - alpha1_linear(55.0)).abs() < EPS);
        assert!((at_55.alpha1 - 0.85).abs() < EPS);

        let at_80 = stress_block_factors(80.0);
        assert!((at_80.alpha1 - alpha1_linear(80.0)).abs() < EPS);
        assert!((at_80.alpha1 - 0.75).abs() < EPS);
    }

    #[test]
    fn test_compression_force() {
        let block = stress_block_factors(40.0);
        // 500 * 0.85 * 0.77 * 40 * 200 = 2_618_000 N
        let cc = block.compression_force_n(500.0, 40.0, 200.0);
        assert!((cc - 2_618_000.0).abs() < 1e-6);
        assert!((block.centroid_depth_mm(500.0) - 192.5).abs() < EPS);
    }
}
