//! Rental Book

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::{
    products::ProductId,
    rental::{RentalDetail, RentalDraft, RentalError},
};

/// Saved rental details, keyed by product id.
#[derive(Debug, Default)]
pub struct RentalBook {
    details: FxHashMap<ProductId, RentalDetail>,
}

impl RentalBook {
    /// Create an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an editor for a product, pre-filled with its saved rental if any.
    pub fn edit(&self, id: &ProductId) -> RentalDraft {
        match self.details.get(id) {
            Some(detail) => RentalDraft::from_detail(id.clone(), detail),
            None => RentalDraft::new(id.clone()),
        }
    }

    /// Save a draft, replacing any earlier rental for the same product.
    ///
    /// The draft is borrowed so the caller keeps the in-progress edit when
    /// validation fails.
    ///
    /// # Errors
    ///
    /// Returns a [`RentalError`] if the draft is incomplete; nothing is stored.
    pub fn save(&mut self, draft: &RentalDraft) -> Result<RentalDetail, RentalError> {
        let detail = draft.resolve().inspect_err(|error| {
            warn!(product = %draft.product(), %error, "rejected rental details");
        })?;

        debug!(
            product = %draft.product(),
            start = %detail.start(),
            end = %detail.end(),
            days = detail.days().get(),
            "saved rental details"
        );

        self.details.insert(draft.product().clone(), detail);

        Ok(detail)
    }

    /// Saved rental for a product.
    pub fn get(&self, id: &ProductId) -> Option<&RentalDetail> {
        self.details.get(id)
    }

    /// Forget a product's rental.
    pub fn remove(&mut self, id: &ProductId) -> Option<RentalDetail> {
        self.details.remove(id)
    }

    /// Forget every rental.
    pub fn clear(&mut self) {
        self.details.clear();
    }

    /// Number of saved rentals.
    pub fn len(&self) -> usize {
        self.details.len()
    }

    /// Whether no rentals are saved.
    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }
}
