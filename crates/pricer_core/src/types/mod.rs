//! Core error types shared by every layer.
//!
//! - [`PricingError`]: failure taxonomy of pricing requests
//! - [`SolverError`]: failures of the root-finding solvers

pub mod error;

pub use error::{PricingError, SolverError};
