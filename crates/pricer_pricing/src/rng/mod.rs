//! Random number generation for Monte Carlo pricing.
//!
//! - [`PricerRng`]: seeded `StdRng` wrapper with normal sampling
//! - [`seed_for_trial`]: per-trial stream derivation for reproducible
//!   parallel simulation

mod prng;

pub use prng::{seed_for_trial, PricerRng};
