//! Checkout

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    cart::Cart,
    items::CartItem,
    pricing::{Price, PricingBreakdown, PricingError, price_rental, total_price},
    products::ProductId,
    rental::{RentalBook, RentalDetail},
};

/// Products that still need rental dates.
pub type MissingRentals = SmallVec<[ProductId; 8]>;

/// Reasons checkout cannot proceed.
#[derive(Debug, Error, PartialEq)]
pub enum CheckoutError {
    /// The cart has no items.
    #[error("your cart is empty")]
    EmptyCart,

    /// Some items have no saved rental dates.
    #[error("{}", incomplete_message(.missing))]
    IncompleteCart {
        /// Items without rental dates, in cart order
        missing: MissingRentals,
    },

    /// Pricing a line or the order total failed.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

fn incomplete_message(missing: &MissingRentals) -> String {
    match missing.len() {
        1 => "1 item needs rental dates".to_string(),
        n => format!("{n} items need rental dates"),
    }
}

impl CheckoutError {
    /// Number of items that need rental dates before checkout can proceed.
    pub fn missing_count(&self) -> usize {
        match self {
            CheckoutError::IncompleteCart { missing } => missing.len(),
            CheckoutError::EmptyCart | CheckoutError::Pricing(_) => 0,
        }
    }
}

/// One fully-dated, fully-priced cart item.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutLine {
    item: CartItem,
    rental: RentalDetail,
    pricing: PricingBreakdown,
}

impl CheckoutLine {
    /// The cart item
    pub fn item(&self) -> &CartItem {
        &self.item
    }

    /// Saved rental period
    pub fn rental(&self) -> &RentalDetail {
        &self.rental
    }

    /// Price of the rental
    pub fn pricing(&self) -> &PricingBreakdown {
        &self.pricing
    }
}

/// Items whose rental dates have not been saved, in cart order.
pub fn incomplete_items(cart: &Cart, rentals: &RentalBook) -> MissingRentals {
    cart.iter()
        .filter(|item| rentals.get(item.id()).is_none())
        .map(|item| item.id().clone())
        .collect()
}

/// Sums the totals of every line.
///
/// # Errors
///
/// - [`PricingError::NoPrices`]: no lines were provided.
/// - [`PricingError::Money`]: lines are in different currencies.
pub fn compute_grand_total(lines: &[CheckoutLine]) -> Result<Price, PricingError> {
    let first = lines.first().ok_or(PricingError::NoPrices)?;

    let total = lines.iter().try_fold(
        Money::from_minor(0, first.pricing.total().currency()),
        |acc, line| acc.add(line.pricing.total()),
    )?;

    Ok(total)
}

/// Order package handed to order placement.
///
/// Only [`Checkout::prepare`] builds one, so every line has rental dates.
#[derive(Debug, Clone)]
pub struct Checkout {
    lines: Vec<CheckoutLine>,

    /// Sum of every line's rent
    rent_total: Price,

    /// Sum of every line's deposit
    deposit_total: Price,

    /// Sum of every line's total
    grand_total: Price,

    currency: &'static Currency,
}

impl Checkout {
    /// Check every cart item has rental dates and price the order.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`]: nothing to check out.
    /// - [`CheckoutError::IncompleteCart`]: items without saved rental dates.
    /// - [`CheckoutError::Pricing`]: a line could not be priced.
    pub fn prepare(cart: &Cart, rentals: &RentalBook) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let missing = incomplete_items(cart, rentals);

        if !missing.is_empty() {
            warn!(missing = missing.len(), "checkout blocked on missing rental dates");

            return Err(CheckoutError::IncompleteCart { missing });
        }

        let lines = cart
            .iter()
            .filter_map(|item| rentals.get(item.id()).map(|rental| (item, *rental)))
            .map(|(item, rental)| {
                Ok(CheckoutLine {
                    item: item.clone(),
                    rental,
                    pricing: price_rental(item, rental.days())?,
                })
            })
            .collect::<Result<Vec<_>, PricingError>>()?;

        let rents: Vec<Price> = lines.iter().map(|line| line.pricing.rent_total()).collect();
        let deposits: Vec<Price> = lines
            .iter()
            .map(|line| line.pricing.security_deposit())
            .collect();

        let rent_total = total_price(&rents)?;
        let deposit_total = total_price(&deposits)?;
        let grand_total = compute_grand_total(&lines)?;

        debug!(lines = lines.len(), %grand_total, "prepared checkout");

        Ok(Self {
            lines,
            rent_total,
            deposit_total,
            grand_total,
            currency: cart.currency(),
        })
    }

    /// Lines in cart order
    pub fn lines(&self) -> &[CheckoutLine] {
        &self.lines
    }

    /// Total rent across all lines
    pub fn rent_total(&self) -> Price {
        self.rent_total
    }

    /// Total deposits across all lines
    pub fn deposit_total(&self) -> Price {
        self.deposit_total
    }

    /// Amount due for the whole order
    pub fn grand_total(&self) -> Price {
        self.grand_total
    }

    /// Currency of every amount in the order
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always false for a prepared checkout
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
