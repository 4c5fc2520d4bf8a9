//! # shearwall_core - Reinforced Concrete Wall P–M Engine
//!
//! `shearwall_core` computes the axial load / bending moment interaction
//! diagram of a rectangular reinforced concrete wall by strain compatibility,
//! after checking the section against the NZS 3101 wall detailing rules.
//! All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Diagnostics, not panics**: Code-check failures are collected and
//!   returned; only unusable input is an `Err`
//!
//! ## Quick Start
//!
//! ```rust
//! use shearwall_core::calculations::{
//!     interaction_curve, DuctilityClass, SectionSpec, SweepConfig,
//! };
//!
//! let spec = SectionSpec {
//!     thickness_mm: 200.0,
//!     length_mm: 3000.0,
//!     f_c_mpa: 40.0,
//!     f_y_mpa: 500.0,
//!     f_yt_mpa: None,
//!     f_ys_mpa: None,
//!     bar_diameter_mm: 20.0,
//!     stirrup_diameter_mm: 8.0,
//!     bar_spacing_mm: 300.0,
//!     layers: 2,
//!     end_cover_mm: 40.0,
//!     height_mm: 2800.0,
//!     clear_height_mm: None,
//!     ductility: DuctilityClass::LimitedDuctile,
//! };
//!
//! let curve = interaction_curve(&spec, &SweepConfig::default()).unwrap();
//! for point in curve.within_limit_curve() {
//!     println!("{:8.1} kNm  {:8.1} kN", point.moment_knm, point.axial_kn);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Section validation, neutral axis, capacity, interaction curve
//! - [`materials`] - Concrete stress block and reinforcing steel
//! - [`nzs3101`] - Strength reduction factors and clause references
//! - [`root_finding`] - Bracketing and Brent's method
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod materials;
pub mod nzs3101;
pub mod root_finding;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::shear_wall::{calculate, ShearWallInput, ShearWallResult};
pub use errors::{CalcError, CalcResult};
