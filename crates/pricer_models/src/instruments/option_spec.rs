//! Static dispatch over the supported option types.

use super::{AsianOption, BasketOption, OptionType, VanillaOption};

/// Any option the pricers accept.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{AsianOption, OptionSpec, OptionType, Underlying};
///
/// let underlying = Underlying::new(100.0, 0.3).unwrap();
/// let asian = AsianOption::new(underlying, 0.05, 3.0, 100.0, 50, OptionType::Put).unwrap();
/// let spec = OptionSpec::from(asian);
///
/// assert_eq!(spec.kind(), "asian");
/// assert_eq!(spec.strike(), 100.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OptionSpec {
    /// European vanilla option.
    European(VanillaOption),
    /// Discretely monitored average-price option.
    Asian(AsianOption),
    /// Two-asset basket option.
    Basket(BasketOption),
}

impl OptionSpec {
    /// Short lowercase name of the option kind.
    pub fn kind(&self) -> &'static str {
        match self {
            OptionSpec::European(_) => "european",
            OptionSpec::Asian(_) => "asian",
            OptionSpec::Basket(_) => "basket",
        }
    }

    /// Call or put.
    pub fn option_type(&self) -> OptionType {
        match self {
            OptionSpec::European(o) => o.option_type(),
            OptionSpec::Asian(o) => o.option_type(),
            OptionSpec::Basket(o) => o.option_type(),
        }
    }

    /// Strike `K`.
    pub fn strike(&self) -> f64 {
        match self {
            OptionSpec::European(o) => o.strike(),
            OptionSpec::Asian(o) => o.strike(),
            OptionSpec::Basket(o) => o.strike(),
        }
    }

    /// Time to expiry `T`.
    pub fn maturity(&self) -> f64 {
        match self {
            OptionSpec::European(o) => o.maturity(),
            OptionSpec::Asian(o) => o.maturity(),
            OptionSpec::Basket(o) => o.maturity(),
        }
    }

    /// Risk-free rate `r`.
    pub fn rate(&self) -> f64 {
        match self {
            OptionSpec::European(o) => o.rate(),
            OptionSpec::Asian(o) => o.rate(),
            OptionSpec::Basket(o) => o.rate(),
        }
    }
}

impl From<VanillaOption> for OptionSpec {
    fn from(option: VanillaOption) -> Self {
        OptionSpec::European(option)
    }
}

impl From<AsianOption> for OptionSpec {
    fn from(option: AsianOption) -> Self {
        OptionSpec::Asian(option)
    }
}

impl From<BasketOption> for OptionSpec {
    fn from(option: BasketOption) -> Self {
        OptionSpec::Basket(option)
    }
}
