//! Assetra prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError},
    catalog::{Catalog, CatalogError, parse_price},
    checkout::{Checkout, CheckoutError, CheckoutLine, MissingRentals, compute_grand_total},
    items::CartItem,
    orders::{OrderConfirmation, OrderError, OrderId, OrderPlacement, SimulatedOrderPlacement},
    pricing::{DEFAULT_SECURITY_DEPOSIT, Price, PricingBreakdown, PricingError, price_rental},
    products::{OwnerInfo, Product, ProductId},
    rental::{
        MissingDates, RentalBook, RentalDays, RentalDetail, RentalDraft, RentalError,
        RentalPreset,
    },
    storefront::{RemovalRequest, Storefront, StorefrontError},
    wishlist::{InMemoryWishlist, Wishlist, WishlistEntry},
};
