//! Products

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::pricing::Price;

/// Identifier of a listed product, unique within a catalog and a cart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a product id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Display-only details about the person listing a product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnerInfo {
    /// Owner display name
    pub name: String,

    /// Where the item can be collected from
    pub location: Option<String>,

    /// Contact details, if the owner shared any
    pub contact: Option<String>,
}

/// A validated product listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product identifier
    pub id: ProductId,

    /// Listing title
    pub title: String,

    /// Image reference (path or URL)
    pub image: String,

    /// Rent charged per day
    pub unit_price: Price,

    /// Refundable deposit, when the owner set one
    pub security_deposit: Option<Price>,

    /// Owner details
    pub owner: OwnerInfo,
}
