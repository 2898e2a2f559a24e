//! Cart

use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{items::CartItem, products::ProductId};

/// Errors related to cart mutation.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// An item's currency differs from the cart currency (product, item currency, cart currency).
    #[error("Item {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),

    /// An item was not found in the cart.
    #[error("Item {0} not found")]
    ItemNotFound(ProductId),

    /// The requested change would take the quantity below one.
    #[error("Quantity of {id} cannot go below 1 (currently {quantity})")]
    QuantityUnderflow {
        /// Item whose quantity was being changed
        id: ProductId,

        /// Quantity before the refused change
        quantity: u32,
    },

    /// An item was added with a quantity of zero.
    #[error("Quantity of {0} must be at least 1")]
    InvalidQuantity(ProductId),

    /// The requested change does not fit in a quantity.
    #[error("Quantity of {0} is too large")]
    QuantityOverflow(ProductId),
}

/// The renter's in-progress selection of items, in the order they were added.
#[derive(Debug)]
pub struct Cart {
    items: Vec<CartItem>,
    currency: &'static Currency,
}

impl Cart {
    /// Create a new, empty cart in the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            items: Vec::new(),
            currency,
        }
    }

    /// Add an item to the cart.
    ///
    /// If an entry with the same id exists its quantity is increased by the
    /// item's quantity, otherwise the item is appended. Returns the resulting
    /// quantity.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: the item's quantity is zero; the cart is unchanged.
    /// - [`CartError::CurrencyMismatch`]: the item is priced in another currency.
    /// - [`CartError::QuantityOverflow`]: the merged quantity does not fit.
    pub fn add(&mut self, item: CartItem) -> Result<u32, CartError> {
        if item.quantity() == 0 {
            warn!(id = %item.id(), "refused zero quantity add");

            return Err(CartError::InvalidQuantity(item.id().clone()));
        }

        let item_currency = item.unit_price().currency();

        if item_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                item.id().clone(),
                item_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if let Some(existing) = self.items.iter_mut().find(|entry| entry.id() == item.id()) {
            let quantity = existing
                .quantity()
                .checked_add(item.quantity())
                .ok_or_else(|| CartError::QuantityOverflow(item.id().clone()))?;

            existing.set_quantity(quantity);

            debug!(id = %item.id(), quantity, "merged item into cart");

            return Ok(quantity);
        }

        let quantity = item.quantity();

        debug!(id = %item.id(), quantity, "added item to cart");

        self.items.push(item);

        Ok(quantity)
    }

    /// Change an item's quantity by a signed delta. Returns the new quantity.
    ///
    /// # Errors
    ///
    /// - [`CartError::ItemNotFound`]: no entry has that id.
    /// - [`CartError::QuantityUnderflow`]: the result would be below one; the
    ///   entry is left unchanged.
    /// - [`CartError::QuantityOverflow`]: the result does not fit.
    pub fn adjust_quantity(&mut self, id: &ProductId, delta: i64) -> Result<u32, CartError> {
        let entry = self
            .items
            .iter_mut()
            .find(|entry| entry.id() == id)
            .ok_or_else(|| CartError::ItemNotFound(id.clone()))?;

        let current = entry.quantity();

        let next = i64::from(current)
            .checked_add(delta)
            .ok_or_else(|| CartError::QuantityOverflow(id.clone()))?;

        if next < 1 {
            warn!(%id, quantity = current, delta, "refused quantity underflow");

            return Err(CartError::QuantityUnderflow {
                id: id.clone(),
                quantity: current,
            });
        }

        let next = u32::try_from(next).map_err(|_err| CartError::QuantityOverflow(id.clone()))?;

        entry.set_quantity(next);

        debug!(%id, quantity = next, "adjusted item quantity");

        Ok(next)
    }

    /// Increase an item's quantity by one.
    ///
    /// # Errors
    ///
    /// See [`Cart::adjust_quantity`].
    pub fn increment(&mut self, id: &ProductId) -> Result<u32, CartError> {
        self.adjust_quantity(id, 1)
    }

    /// Decrease an item's quantity by one. Refused at quantity one.
    ///
    /// # Errors
    ///
    /// See [`Cart::adjust_quantity`].
    pub fn decrement(&mut self, id: &ProductId) -> Result<u32, CartError> {
        self.adjust_quantity(id, -1)
    }

    /// Whether a decrement control for this item should be enabled.
    pub fn can_decrement(&self, id: &ProductId) -> bool {
        self.get(id).is_some_and(|item| item.quantity() > 1)
    }

    /// Remove an item, returning it if it was present.
    pub fn remove(&mut self, id: &ProductId) -> Option<CartItem> {
        let position = self.items.iter().position(|entry| entry.id() == id)?;

        debug!(%id, "removed item from cart");

        Some(self.items.remove(position))
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Get an item by id.
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|entry| entry.id() == id)
    }

    /// Whether the cart holds an item with this id.
    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Iterate over the items in the cart.
    pub fn iter(&self) -> impl Iterator<Item = &CartItem> {
        self.items.iter()
    }

    /// Get the number of distinct items in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all item quantities.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity())).sum()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
