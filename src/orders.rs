//! Orders

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use mockall::automock;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::{checkout::Checkout, pricing::Price};

/// Order placement errors.
#[derive(Debug, Error, PartialEq)]
pub enum OrderError {
    /// The placement collaborator refused the order.
    #[error("order rejected: {0}")]
    Rejected(String),
}

/// Order identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Generate a new, time-ordered order id.
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    /// Returns the underlying UUID.
    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for OrderId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

/// Acknowledgement of a placed order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderConfirmation {
    /// Order identifier
    pub order_id: OrderId,

    /// When the order was accepted
    pub placed_at: Timestamp,

    /// Number of distinct items rented
    pub item_count: usize,

    /// Amount charged
    pub grand_total: Price,
}

impl OrderConfirmation {
    /// Message to show the renter once the order is accepted.
    pub fn message(&self) -> String {
        format!(
            "Order {} placed: {} {} for {}",
            self.order_id,
            self.item_count,
            if self.item_count == 1 { "item" } else { "items" },
            self.grand_total
        )
    }
}

/// Accepts a fully-dated, fully-priced order.
#[automock]
pub trait OrderPlacement {
    /// Submit the order.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderError`] if the order was not accepted.
    fn place(&self, checkout: &Checkout) -> Result<OrderConfirmation, OrderError>;
}

/// Accepts every order without contacting a backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedOrderPlacement;

impl OrderPlacement for SimulatedOrderPlacement {
    fn place(&self, checkout: &Checkout) -> Result<OrderConfirmation, OrderError> {
        let confirmation = OrderConfirmation {
            order_id: OrderId::generate(),
            placed_at: Timestamp::now(),
            item_count: checkout.len(),
            grand_total: checkout.grand_total(),
        };

        info!(
            order_id = %confirmation.order_id,
            items = confirmation.item_count,
            grand_total = %confirmation.grand_total,
            "placed simulated order"
        );

        Ok(confirmation)
    }
}
