//! # Wall Calculations
//!
//! The P–M analysis of a reinforced concrete wall, one stage per module:
//!
//! - [`wall_section`] - Section geometry, materials and design loads
//! - [`validation`] - Detailing and capacity checks that adjust the section
//! - [`neutral_axis`] - Strain-compatibility neutral axis solver
//! - [`capacity`] - Nominal and design moment at a neutral axis
//! - [`interaction`] - Axial load sweep producing the interaction curve
//! - [`shear_wall`] - All of the above for one wall
//!
//! Each stage consumes the previous stage's output:
//!
//! ```text
//! SectionSpec ─▶ validate ─▶ ValidatedSection ─▶ solve ─▶ evaluate ─▶ φMn
//!                                   │                                  │
//!                                   └──────────── sweep N* ◀───────────┘
//! ```

pub mod capacity;
pub mod interaction;
pub mod neutral_axis;
pub mod shear_wall;
pub mod validation;
pub mod wall_section;

// Re-export commonly used types
pub use capacity::{design_strength, SectionCapacity};
pub use interaction::{interaction_curve, CapacityPoint, CurvePoint, InteractionCurve, SweepConfig, SweepTermination};
pub use neutral_axis::{BarState, NeutralAxisSolution, SectionBound, SolveFailure};
pub use shear_wall::{ShearWallInput, ShearWallResult};
pub use validation::{validate, CheckKind, Diagnostic, ValidatedSection, ValidationResult};
pub use wall_section::{DesignLoads, DuctilityClass, SectionSpec};
