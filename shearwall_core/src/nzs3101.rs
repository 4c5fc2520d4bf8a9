//! # NZS 3101 Clause References and Factors
//!
//! Clause references and strength reduction factors for reinforced concrete
//! wall design per NZS 3101:2006 (Amendment 3).
//!
//! ## Strength Reduction Factors (cl 2.3.2.2)
//!
//! | Factor           | Applies to                          | Value |
//! |------------------|-------------------------------------|-------|
//! | φ                | Flexure with or without axial load  | 0.85  |
//! | φ (single layer) | Singly reinforced walls, axial cap  | 0.70  |

/// Strength reduction factor for flexure with or without axial load (cl 2.3.2.2)
pub const PHI: f64 = 0.85;

/// Strength reduction factor for singly reinforced walls (cl 2.3.2.2)
pub const PHI_SINGLE_LAYER: f64 = 0.70;

/// Strength reduction factor for the axial load ceiling.
///
/// Walls with more than one layer of vertical reinforcement use φ, singly
/// reinforced walls use the reduced factor.
pub fn axial_phi(layers: u32) -> f64 {
    if layers > 1 {
        PHI
    } else {
        PHI_SINGLE_LAYER
    }
}

/// NZS 3101 clause references for wall detailing and capacity checks.
pub mod clause {
    /// Equivalent rectangular stress block parameters α1 and β1
    pub const STRESS_BLOCK: &str = "cl 7.4.2.7";
    /// Axial load limit for walls designed for flexure and axial load
    pub const AXIAL_LOAD_LIMIT: &str = "cl 11.3.1.6";
    /// Longitudinal bar diameter limits
    pub const BAR_DIAMETER: &str = "cl 11.3.12.2(b)";
    /// Maximum spacing of vertical reinforcement
    pub const BAR_SPACING: &str = "cl 11.3.12.2(c)";
    /// Minimum and maximum area of vertical reinforcement
    pub const REINFORCEMENT_RATIO: &str = "cl 11.3.12.3";
    /// Axial load limit for ductile walls at overstrength
    pub const OVERSTRENGTH_AXIAL: &str = "cl 11.4.1.1";
    /// Minimum wall thickness to prevent buckling in the plastic region
    pub const MIN_THICKNESS: &str = "cl 11.4.3.2";
}
