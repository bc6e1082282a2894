//! Option definitions.
//!
//! Every record is validated once at construction and immutable afterwards.
//! Pricers dispatch on [`OptionSpec`] statically rather than through trait
//! objects.
//!
//! # Instrument Types
//!
//! - [`VanillaOption`]: single-asset European/American option with repo rate
//! - [`AsianOption`]: discretely monitored average-price option
//! - [`BasketOption`]: option on the average of two correlated assets
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::{OptionSpec, OptionType, Underlying, VanillaOption};
//!
//! let underlying = Underlying::new(100.0, 0.2).unwrap();
//! let call = VanillaOption::new(underlying, 0.05, 0.0, 1.0, 100.0, OptionType::Call).unwrap();
//! let spec = OptionSpec::European(call);
//! assert!(spec.option_type().is_call());
//! ```

mod asian;
mod basket;
mod exercise;
mod option_spec;
mod params;
mod payoff;
mod vanilla;

pub use asian::AsianOption;
pub use basket::BasketOption;
pub use exercise::ExerciseStyle;
pub use option_spec::OptionSpec;
pub use params::Underlying;
pub use payoff::OptionType;
pub use vanilla::VanillaOption;
