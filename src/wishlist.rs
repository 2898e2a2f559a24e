//! Wishlist

use tracing::debug;

use crate::{items::CartItem, pricing::Price, products::ProductId};

/// Copy of a cart item saved for later.
#[derive(Debug, Clone, PartialEq)]
pub struct WishlistEntry {
    /// Product identifier
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Image reference
    pub image: String,

    /// Daily rent at the time it was saved
    pub price: Price,

    /// Quantity in the cart when it was saved
    pub quantity: u32,
}

impl From<&CartItem> for WishlistEntry {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id().clone(),
            name: item.name().to_string(),
            image: item.image().to_string(),
            price: *item.unit_price(),
            quantity: item.quantity(),
        }
    }
}

/// Receives items the renter wants to keep track of.
pub trait Wishlist {
    /// Save an entry. Deduplication is up to the implementation.
    fn save(&mut self, entry: WishlistEntry);
}

/// Wishlist held in memory, one entry per product.
#[derive(Debug, Default)]
pub struct InMemoryWishlist {
    entries: Vec<WishlistEntry>,
}

impl InMemoryWishlist {
    /// Create an empty wishlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Saved entries, oldest first
    pub fn entries(&self) -> &[WishlistEntry] {
        &self.entries
    }

    /// Whether a product has been saved
    pub fn contains(&self, id: &ProductId) -> bool {
        self.entries.iter().any(|entry| &entry.id == id)
    }

    /// Number of saved products
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been saved
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Wishlist for InMemoryWishlist {
    fn save(&mut self, entry: WishlistEntry) {
        if let Some(existing) = self.entries.iter_mut().find(|saved| saved.id == entry.id) {
            debug!(id = %entry.id, "refreshed wishlist entry");

            *existing = entry;

            return;
        }

        debug!(id = %entry.id, "saved wishlist entry");

        self.entries.push(entry);
    }
}
