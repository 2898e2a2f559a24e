//! Storefront
//!
//! The renter's cart and rental details behind one set of named operations.
//! Callers hold a `Storefront` and pass it by reference; there is no shared
//! global cart.

use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    cart::{Cart, CartError},
    checkout::{Checkout, CheckoutError, MissingRentals, incomplete_items},
    items::CartItem,
    orders::{OrderConfirmation, OrderError, OrderPlacement},
    pricing::{PricingBreakdown, PricingError, price_rental},
    products::{Product, ProductId},
    rental::{RentalBook, RentalDetail, RentalDraft, RentalError},
    wishlist::{Wishlist, WishlistEntry},
};

/// Errors surfaced by storefront operations.
#[derive(Debug, Error, PartialEq)]
pub enum StorefrontError {
    /// Cart mutation failed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Rental details were invalid.
    #[error(transparent)]
    Rental(#[from] RentalError),

    /// Checkout could not proceed.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// A rental could not be priced.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The order was not accepted.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// The operation needs an item that is not in the cart.
    #[error("Item {0} is not in the cart")]
    NotInCart(ProductId),
}

/// Pending confirmation to remove an item.
///
/// Pass it to [`Storefront::confirm_removal`] to remove the item; drop it to
/// cancel.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "dropping a removal request cancels it"]
pub struct RemovalRequest {
    id: ProductId,
    name: String,
}

impl RemovalRequest {
    /// Item that would be removed
    pub fn id(&self) -> &ProductId {
        &self.id
    }

    /// Question to put to the renter
    pub fn prompt(&self) -> String {
        format!("Remove {} from your cart?", self.name)
    }
}

/// A renter's cart together with the rental dates chosen for each item.
#[derive(Debug)]
pub struct Storefront {
    cart: Cart,
    rentals: RentalBook,
}

impl Storefront {
    /// Create an empty storefront trading in `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            cart: Cart::new(currency),
            rentals: RentalBook::new(),
        }
    }

    /// Current cart contents
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Saved rental details
    pub fn rentals(&self) -> &RentalBook {
        &self.rentals
    }

    /// Add `quantity` of a catalog product to the cart. Returns the new quantity.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the product cannot be added, including
    /// [`CartError::InvalidQuantity`] for a quantity of zero.
    #[tracing::instrument(skip_all, fields(product = %product.id, quantity = quantity))]
    pub fn add_product(&mut self, product: &Product, quantity: u32) -> Result<u32, StorefrontError> {
        let item = CartItem::from_product(product).with_quantity(quantity);

        Ok(self.cart.add(item)?)
    }

    /// Increase an item's quantity by one.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the item is missing or the quantity overflows.
    pub fn increment(&mut self, id: &ProductId) -> Result<u32, StorefrontError> {
        Ok(self.cart.increment(id)?)
    }

    /// Decrease an item's quantity by one. Refused at quantity one.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::QuantityUnderflow`] at quantity one, or
    /// [`CartError::ItemNotFound`].
    pub fn decrement(&mut self, id: &ProductId) -> Result<u32, StorefrontError> {
        Ok(self.cart.decrement(id)?)
    }

    /// Whether the decrement control for an item should be enabled.
    pub fn can_decrement(&self, id: &ProductId) -> bool {
        self.cart.can_decrement(id)
    }

    /// Ask to remove an item. Returns `None` if the item is not in the cart.
    pub fn request_removal(&self, id: &ProductId) -> Option<RemovalRequest> {
        self.cart.get(id).map(|item| RemovalRequest {
            id: id.clone(),
            name: item.name().to_string(),
        })
    }

    /// Carry out a confirmed removal.
    pub fn confirm_removal(&mut self, request: RemovalRequest) -> Option<CartItem> {
        self.remove(&request.id)
    }

    /// Remove an item and its rental details. No-op if absent.
    pub fn remove(&mut self, id: &ProductId) -> Option<CartItem> {
        self.rentals.remove(id);
        self.cart.remove(id)
    }

    /// Open the rental editor for a cart item.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::NotInCart`] if the item is not in the cart.
    pub fn edit_rental(&self, id: &ProductId) -> Result<RentalDraft, StorefrontError> {
        if !self.cart.contains(id) {
            return Err(StorefrontError::NotInCart(id.clone()));
        }

        Ok(self.rentals.edit(id))
    }

    /// Save rental details edited through [`Storefront::edit_rental`].
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::NotInCart`]: the item left the cart while editing.
    /// - [`RentalError::MissingRentalDates`]: a date is missing; nothing is saved.
    #[tracing::instrument(skip_all, fields(product = %draft.product()))]
    pub fn save_rental(&mut self, draft: &RentalDraft) -> Result<RentalDetail, StorefrontError> {
        if !self.cart.contains(draft.product()) {
            return Err(StorefrontError::NotInCart(draft.product().clone()));
        }

        Ok(self.rentals.save(draft)?)
    }

    /// Price a cart item over its saved rental. `None` until dates are saved.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::NotInCart`]: no such item.
    /// - [`StorefrontError::Pricing`]: the rental cannot be priced.
    pub fn quote(&self, id: &ProductId) -> Result<Option<PricingBreakdown>, StorefrontError> {
        let item = self
            .cart
            .get(id)
            .ok_or_else(|| StorefrontError::NotInCart(id.clone()))?;

        let quote = self
            .rentals
            .get(id)
            .map(|rental| price_rental(item, rental.days()))
            .transpose()?;

        Ok(quote)
    }

    /// Items still waiting for rental dates.
    pub fn incomplete_items(&self) -> MissingRentals {
        incomplete_items(&self.cart, &self.rentals)
    }

    /// Run the checkout gate and build the order package.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] if the cart is empty, incomplete or cannot be priced.
    pub fn proceed_to_checkout(&self) -> Result<Checkout, StorefrontError> {
        Ok(Checkout::prepare(&self.cart, &self.rentals)?)
    }

    /// Check out and hand the order to `placement`, clearing the cart once it
    /// is accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if checkout is blocked or the order is rejected; the
    /// cart is left as it was.
    #[tracing::instrument(skip_all, fields(items = self.cart.len()))]
    pub fn place_order(
        &mut self,
        placement: &impl OrderPlacement,
    ) -> Result<OrderConfirmation, StorefrontError> {
        let checkout = self.proceed_to_checkout()?;
        let confirmation = placement.place(&checkout)?;

        self.cart.clear();
        self.rentals.clear();

        info!(order_id = %confirmation.order_id, "order placed; cart cleared");

        Ok(confirmation)
    }

    /// Copy a cart item to a wishlist. The cart is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::NotInCart`] if the item is not in the cart.
    pub fn save_for_later(
        &self,
        id: &ProductId,
        wishlist: &mut impl Wishlist,
    ) -> Result<(), StorefrontError> {
        let item = self
            .cart
            .get(id)
            .ok_or_else(|| StorefrontError::NotInCart(id.clone()))?;

        debug!(%id, "saving item for later");

        wishlist.save(WishlistEntry::from(item));

        Ok(())
    }
}
