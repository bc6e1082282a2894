//! # pricer_core: Foundation for the Option Pricer
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the pricer workspace, providing:
//! - Error types: `PricingError`, `SolverError` (`types::error`)
//! - Root-finding: `NewtonRaphsonSolver`, `SolverConfig` (`math::solvers`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
//! use pricer_core::types::PricingError;
//!
//! let solver = NewtonRaphsonSolver::new(SolverConfig::default());
//! let root = solver
//!     .find_root(|x: f64| x * x - 4.0, |x: f64| 2.0 * x, 3.0)
//!     .map_err(PricingError::from)?;
//! assert!((root - 2.0).abs() < 1e-9);
//! # Ok::<(), PricingError>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `SolverError`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
