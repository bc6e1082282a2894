//! Numerical building blocks.
//!
//! - `solvers`: Root-finding (Newton-Raphson) with configurable stopping rules

pub mod solvers;
