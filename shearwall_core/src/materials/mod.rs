//! # Materials
//!
//! Material laws used by the section analysis.
//!
//! - **Concrete**: equivalent rectangular stress block factors α1, β1 and the
//!   ultimate compressive strain
//! - **Reinforcement**: bilinear elastic / perfectly-plastic steel stress and
//!   standard bar sizes
//!
//! All functions here are pure: they map a strength or strain to a
//! coefficient or stress and carry no state.
//!
//! ## Example
//!
//! ```rust
//! use shearwall_core::materials::{steel_stress, stress_block_factors};
//!
//! let block = stress_block_factors(40.0);
//! assert_eq!(block.alpha1, 0.85);
//! assert!((block.beta1 - 0.77).abs() < 1e-12);
//!
//! // 500 MPa bar yields at a strain of 0.0025
//! assert_eq!(steel_stress(0.004, 500.0), 500.0);
//! ```

pub mod concrete;
pub mod reinforcement;

pub use concrete::{stress_block_factors, StressBlock, ULTIMATE_CONCRETE_STRAIN};
pub use reinforcement::{
    bar_area_mm2, is_standard_bar, steel_stress, STANDARD_BAR_DIAMETERS_MM, STEEL_MODULUS_MPA,
};
