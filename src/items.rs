//! Cart items

use crate::{
    pricing::Price,
    products::{OwnerInfo, Product, ProductId},
};

/// A product the renter intends to rent, with the quantity requested.
#[derive(Clone, Debug, PartialEq)]
pub struct CartItem {
    id: ProductId,
    name: String,
    image: String,
    unit_price: Price,
    quantity: u32,
    security_deposit: Option<Price>,
    owner: OwnerInfo,
}

impl CartItem {
    /// Creates a new cart item with a quantity of one.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        image: impl Into<String>,
        unit_price: Price,
        security_deposit: Option<Price>,
        owner: OwnerInfo,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            image: image.into(),
            unit_price,
            quantity: 1,
            security_deposit,
            owner,
        }
    }

    /// Seeds a cart item from a catalog product.
    pub fn from_product(product: &Product) -> Self {
        Self::new(
            product.id.clone(),
            product.title.clone(),
            product.image.clone(),
            product.unit_price,
            product.security_deposit,
            product.owner.clone(),
        )
    }

    /// Sets the quantity. A cart refuses items with a quantity of zero.
    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Returns the product id
    pub fn id(&self) -> &ProductId {
        &self.id
    }

    /// Returns the display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the image reference
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Returns the daily rent
    pub fn unit_price(&self) -> &Price {
        &self.unit_price
    }

    /// Returns the quantity
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the listing's own deposit, if it has one
    pub fn security_deposit(&self) -> Option<&Price> {
        self.security_deposit.as_ref()
    }

    /// Returns the owner details
    pub fn owner(&self) -> &OwnerInfo {
        &self.owner
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::INR};

    use super::*;

    fn product() -> Product {
        Product {
            id: ProductId::new("tent"),
            title: "Four person tent".to_string(),
            image: "images/tent.jpg".to_string(),
            unit_price: Money::from_minor(300_00, INR),
            security_deposit: None,
            owner: OwnerInfo {
                name: "Asha".to_string(),
                location: Some("Pune".to_string()),
                contact: None,
            },
        }
    }

    #[test]
    fn from_product_copies_listing_fields() {
        let product = product();
        let item = CartItem::from_product(&product);

        assert_eq!(item.id(), &product.id);
        assert_eq!(item.name(), "Four person tent");
        assert_eq!(item.image(), "images/tent.jpg");
        assert_eq!(item.unit_price(), &Money::from_minor(300_00, INR));
        assert_eq!(item.quantity(), 1);
        assert!(item.security_deposit().is_none());
        assert_eq!(item.owner().name, "Asha");
    }

    #[test]
    fn with_quantity_keeps_requested_value() {
        let item = CartItem::from_product(&product()).with_quantity(0);

        assert_eq!(item.quantity(), 0);

        let item = item.with_quantity(4);

        assert_eq!(item.quantity(), 4);
    }
}
