//! Rental pricing
//!
//! Every amount is computed in integer minor units so a per-line total and the
//! sum of those totals never drift apart.

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{items::CartItem, rental::RentalDays};

/// A monetary amount in an ISO currency.
pub type Price = Money<'static, Currency>;

/// Security deposit charged, in major units of the item currency, when a
/// listing does not carry its own.
pub const DEFAULT_SECURITY_DEPOSIT: i64 = 5_000;

/// Errors that can occur while pricing rentals.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// No prices were provided, so currency could not be determined.
    #[error("no prices provided; cannot determine currency")]
    NoPrices,

    /// Minor-unit arithmetic overflowed.
    #[error("price arithmetic overflowed")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Rent, deposit and total for a single cart item over a rental period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingBreakdown {
    days: RentalDays,
    rent_total: Price,
    security_deposit: Price,
    total: Price,
}

impl PricingBreakdown {
    /// Number of days the rent was charged for
    pub fn days(&self) -> RentalDays {
        self.days
    }

    /// Unit price multiplied by the rental days
    pub fn rent_total(&self) -> Price {
        self.rent_total
    }

    /// Deposit charged alongside the rent
    pub fn security_deposit(&self) -> Price {
        self.security_deposit
    }

    /// Rent plus deposit
    pub fn total(&self) -> Price {
        self.total
    }
}

/// Returns the fallback security deposit expressed in `currency`.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the currency exponent cannot be represented.
pub fn default_security_deposit(currency: &'static Currency) -> Result<Price, PricingError> {
    let scale = 10_i64
        .checked_pow(currency.exponent)
        .ok_or(PricingError::Overflow)?;

    let minor = DEFAULT_SECURITY_DEPOSIT
        .checked_mul(scale)
        .ok_or(PricingError::Overflow)?;

    Ok(Money::from_minor(minor, currency))
}

/// Prices renting `item` for `days`.
///
/// The result depends only on the item's unit price, its deposit and the number
/// of days, so it can be recomputed at checkout and match what was displayed.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: the rent does not fit in minor units.
/// - [`PricingError::Money`]: the deposit is in a different currency to the unit price.
pub fn price_rental(item: &CartItem, days: RentalDays) -> Result<PricingBreakdown, PricingError> {
    let unit_price = item.unit_price();
    let currency = unit_price.currency();

    let rent_minor = unit_price
        .to_minor_units()
        .checked_mul(i64::from(days.get()))
        .ok_or(PricingError::Overflow)?;

    let rent_total = Money::from_minor(rent_minor, currency);

    let security_deposit = match item.security_deposit() {
        Some(deposit) => *deposit,
        None => default_security_deposit(currency)?,
    };

    let total = rent_total.add(security_deposit)?;

    Ok(PricingBreakdown {
        days,
        rent_total,
        security_deposit,
        total,
    })
}

/// Sums a list of prices.
///
/// # Errors
///
/// - [`PricingError::NoPrices`]: No prices were provided, so currency could not be determined.
/// - [`PricingError::Money`]: Wrapped money arithmetic or currency mismatch error.
pub fn total_price(prices: &[Price]) -> Result<Price, PricingError> {
    let first = prices.first().ok_or(PricingError::NoPrices)?;

    let total = prices
        .iter()
        .try_fold(Money::from_minor(0, first.currency()), |acc, price| {
            acc.add(*price)
        })?;

    Ok(total)
}
