//! Lattice methods for options with early exercise.

mod binomial;

pub use binomial::BinomialTree;
