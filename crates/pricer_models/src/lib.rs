//! # Pricer Models (L2: Business Logic)
//!
//! Option definitions and deterministic pricing models.
//!
//! This crate provides:
//! - Option specifications: vanilla, Asian, two-asset basket (`instruments`)
//! - Closed-form pricers: Black-Scholes, geometric Asian, geometric basket,
//!   and Newton-Raphson implied volatility (`analytical`)
//! - Cox-Ross-Rubinstein tree for American exercise (`lattice`)
//!
//! ## Design Principles
//!
//! - **Validated construction**: option records reject bad inputs once, so
//!   pricers only deal with degenerate (not invalid) cases
//! - **Enum-based dispatch** over [`instruments::OptionSpec`]
//! - **One error taxonomy**: every fallible call returns
//!   [`pricer_core::types::PricingError`]

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
pub mod lattice;
