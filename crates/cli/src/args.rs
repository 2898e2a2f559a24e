//! Cart arguments
//!
//! Items are given as `ID[:QUANTITY]` and rentals as `ID=START+DAYS` or
//! `ID=START..END`, with dates in `YYYY-MM-DD` form.

use std::str::FromStr;

use assetra::prelude::*;
use jiff::civil::Date;
use thiserror::Error;

/// Malformed cart arguments.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ArgError {
    #[error("missing product id in {0:?}")]
    EmptyId(String),

    #[error("invalid quantity in {0:?}; expected ID[:QUANTITY] with QUANTITY of at least 1")]
    InvalidQuantity(String),

    #[error("invalid rental {0:?}; expected ID=START+DAYS or ID=START..END")]
    InvalidRental(String),

    #[error("invalid date {0:?}: {1}")]
    InvalidDate(String, String),
}

/// A product to put in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ItemArg {
    pub id: ProductId,
    pub quantity: u32,
}

impl FromStr for ItemArg {
    type Err = ArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, quantity) = match s.split_once(':') {
            Some((id, quantity)) => {
                let quantity = quantity
                    .parse::<u32>()
                    .ok()
                    .filter(|quantity| *quantity > 0)
                    .ok_or_else(|| ArgError::InvalidQuantity(s.to_string()))?;

                (id, quantity)
            }
            None => (s, 1),
        };

        Ok(Self {
            id: parse_id(id, s)?,
            quantity,
        })
    }
}

/// How long a rental lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RentalLength {
    Days(RentalDays),
    Until(Date),
}

/// Rental dates for a cart item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RentalArg {
    pub id: ProductId,
    pub start: Date,
    pub length: RentalLength,
}

impl RentalArg {
    /// Edit and save the rental for this item, the way a renter would in the
    /// rental editor.
    ///
    /// # Errors
    ///
    /// Returns a [`StorefrontError`] if the item is not in the cart or the
    /// dates cannot be resolved.
    pub(crate) fn apply(&self, store: &mut Storefront) -> Result<RentalDetail, StorefrontError> {
        let mut draft = store.edit_rental(&self.id)?;

        draft.set_start(self.start)?;

        match self.length {
            RentalLength::Days(days) => draft.choose_days(days),
            RentalLength::Until(end) => draft.set_end(end)?,
        }

        store.save_rental(&draft)
    }
}

impl FromStr for RentalArg {
    type Err = ArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ArgError::InvalidRental(s.to_string());

        let (id, period) = s.split_once('=').ok_or_else(invalid)?;

        let (start, length) = if let Some((start, end)) = period.split_once("..") {
            (start, RentalLength::Until(parse_date(end)?))
        } else if let Some((start, days)) = period.split_once('+') {
            let days = days
                .parse::<u32>()
                .ok()
                .and_then(|days| RentalDays::new(days).ok())
                .ok_or_else(invalid)?;

            (start, RentalLength::Days(days))
        } else {
            return Err(invalid());
        };

        Ok(Self {
            id: parse_id(id, s)?,
            start: parse_date(start)?,
            length,
        })
    }
}

fn parse_id(id: &str, arg: &str) -> Result<ProductId, ArgError> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ArgError::EmptyId(arg.to_string()));
    }

    Ok(ProductId::new(id))
}

fn parse_date(value: &str) -> Result<Date, ArgError> {
    value
        .trim()
        .parse::<Date>()
        .map_err(|error| ArgError::InvalidDate(value.to_string(), error.to_string()))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn item_defaults_to_quantity_one() -> TestResult {
        let item: ItemArg = "camera".parse()?;

        assert_eq!(item.id, ProductId::new("camera"));
        assert_eq!(item.quantity, 1);

        Ok(())
    }

    #[test]
    fn item_reads_quantity() -> TestResult {
        let item: ItemArg = "tent:3".parse()?;

        assert_eq!(item.quantity, 3);

        Ok(())
    }

    #[test]
    fn item_rejects_zero_or_garbage_quantity() {
        assert_eq!(
            "tent:0".parse::<ItemArg>(),
            Err(ArgError::InvalidQuantity("tent:0".to_string()))
        );
        assert!(matches!(
            "tent:many".parse::<ItemArg>(),
            Err(ArgError::InvalidQuantity(_))
        ));
        assert_eq!(
            ":2".parse::<ItemArg>(),
            Err(ArgError::EmptyId(":2".to_string()))
        );
    }

    #[test]
    fn rental_reads_start_and_days() -> TestResult {
        let rental: RentalArg = "camera=2024-07-01+3".parse()?;

        assert_eq!(rental.id, ProductId::new("camera"));
        assert_eq!(rental.start, date(2024, 7, 1));
        assert_eq!(rental.length, RentalLength::Days(RentalDays::new(3)?));

        Ok(())
    }

    #[test]
    fn rental_reads_date_range() -> TestResult {
        let rental: RentalArg = "tent=2024-07-01..2024-07-07".parse()?;

        assert_eq!(rental.length, RentalLength::Until(date(2024, 7, 7)));

        Ok(())
    }

    #[test]
    fn rental_rejects_malformed_input() {
        assert!(matches!(
            "camera".parse::<RentalArg>(),
            Err(ArgError::InvalidRental(_))
        ));
        assert!(matches!(
            "camera=2024-07-01".parse::<RentalArg>(),
            Err(ArgError::InvalidRental(_))
        ));
        assert!(matches!(
            "camera=2024-07-01+0".parse::<RentalArg>(),
            Err(ArgError::InvalidRental(_))
        ));
        assert!(matches!(
            "camera=2024-13-01+2".parse::<RentalArg>(),
            Err(ArgError::InvalidDate(..))
        ));
    }

    #[test]
    fn apply_saves_rental_through_editor() -> TestResult {
        let mut store = Storefront::new(rusty_money::iso::INR);
        let product = Product {
            id: ProductId::new("camera"),
            title: "Camera".to_string(),
            image: String::new(),
            unit_price: rusty_money::Money::from_minor(500_00, rusty_money::iso::INR),
            security_deposit: None,
            owner: OwnerInfo::default(),
        };

        store.add_product(&product, 1)?;

        let detail = "camera=2024-07-01..2024-07-03"
            .parse::<RentalArg>()?
            .apply(&mut store)?;

        assert_eq!(detail.days().get(), 3);
        assert_eq!(store.rentals().get(&product.id), Some(&detail));

        Ok(())
    }

    #[test]
    fn apply_for_item_not_in_cart_fails() -> TestResult {
        let mut store = Storefront::new(rusty_money::iso::INR);

        let result = "camera=2024-07-01+1".parse::<RentalArg>()?.apply(&mut store);

        assert_eq!(
            result,
            Err(StorefrontError::NotInCart(ProductId::new("camera")))
        );

        Ok(())
    }
}
