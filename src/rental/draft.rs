//! Rental Draft
//!
//! In-progress edit of a single item's rental dates. A draft never touches
//! saved state; it is committed through [`RentalBook::save`] and discarded by
//! dropping it.
//!
//! [`RentalBook::save`]: crate::rental::RentalBook::save

use jiff::civil::Date;
use tracing::debug;

use crate::{
    items::CartItem,
    pricing::{PricingBreakdown, PricingError, price_rental},
    products::ProductId,
    rental::{
        MissingDates, RentalDays, RentalDetail, RentalError, RentalPreset, end_date,
        inclusive_days,
    },
};

/// Editable rental dates for one cart item.
///
/// Duration and end date are two views of the same fact. The draft keeps the
/// start date and duration and derives the end date, so whichever of "pick a
/// duration" or "pick an end date" happened last decides the period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalDraft {
    product: ProductId,
    start: Option<Date>,
    days: Option<RentalDays>,

    /// End date picked before any start date; folded into `days` once a start arrives.
    pending_end: Option<Date>,
}

impl RentalDraft {
    /// Starts an empty draft for a product.
    pub fn new(product: ProductId) -> Self {
        Self {
            product,
            start: None,
            days: None,
            pending_end: None,
        }
    }

    /// Starts a draft pre-filled from a saved rental.
    pub fn from_detail(product: ProductId, detail: &RentalDetail) -> Self {
        Self {
            product,
            start: Some(detail.start()),
            days: Some(detail.days()),
            pending_end: None,
        }
    }

    /// Product this draft belongs to
    pub fn product(&self) -> &ProductId {
        &self.product
    }

    /// Choose one of the preset durations.
    pub fn choose_preset(&mut self, preset: RentalPreset) {
        self.choose_days(preset.days());
    }

    /// Choose a duration. Any end date picked earlier is superseded.
    pub fn choose_days(&mut self, days: RentalDays) {
        debug!(product = %self.product, days = days.get(), "chose rental duration");

        self.days = Some(days);
        self.pending_end = None;
    }

    /// Set the start date.
    ///
    /// With a duration already chosen the end date moves with the start. With
    /// only an end date chosen, the duration is derived from the two dates.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::DateOutOfRange`] if the derived duration cannot
    /// be computed; the draft is left unchanged.
    pub fn set_start(&mut self, start: Date) -> Result<(), RentalError> {
        if self.days.is_none()
            && let Some(end) = self.pending_end
        {
            self.days = Some(inclusive_days(start, end)?);
        }

        debug!(product = %self.product, %start, "set rental start");

        self.start = Some(start);
        self.pending_end = None;

        Ok(())
    }

    /// Set the end date directly.
    ///
    /// With a start date the duration is recomputed (at least one day).
    /// Without one, the end date is held and the duration left pending.
    ///
    /// Both dates count as rental days: starting 2024-07-01 and ending
    /// 2024-07-07 is a 7 day rental.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::DateOutOfRange`] if the duration cannot be
    /// computed; the draft is left unchanged.
    pub fn set_end(&mut self, end: Date) -> Result<(), RentalError> {
        match self.start {
            Some(start) => {
                let days = inclusive_days(start, end)?;

                debug!(product = %self.product, %end, days = days.get(), "set rental end");

                self.days = Some(days);
                self.pending_end = None;
            }
            None => {
                debug!(product = %self.product, %end, "holding rental end until a start is set");

                self.days = None;
                self.pending_end = Some(end);
            }
        }

        Ok(())
    }

    /// Chosen start date
    pub fn start(&self) -> Option<Date> {
        self.start
    }

    /// Resolved end date, if it can be shown yet
    pub fn end(&self) -> Option<Date> {
        match (self.start, self.days) {
            (Some(start), Some(days)) => end_date(start, days).ok(),
            _ => self.pending_end,
        }
    }

    /// Resolved duration, if known
    pub fn days(&self) -> Option<RentalDays> {
        self.days
    }

    /// Whether both dates are present so the draft can be saved.
    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end().is_some()
    }

    /// Resolve the draft into a rental period.
    ///
    /// # Errors
    ///
    /// - [`RentalError::MissingRentalDates`]: the start or end date is missing.
    /// - [`RentalError::DateOutOfRange`]: the end date cannot be represented.
    pub fn resolve(&self) -> Result<RentalDetail, RentalError> {
        match (self.start, self.days) {
            (Some(start), Some(days)) => RentalDetail::new(start, days),
            (Some(_), None) => Err(RentalError::MissingRentalDates(MissingDates::End)),
            (None, _) if self.days.is_some() || self.pending_end.is_some() => {
                Err(RentalError::MissingRentalDates(MissingDates::Start))
            }
            (None, _) => Err(RentalError::MissingRentalDates(MissingDates::Both)),
        }
    }

    /// Price the draft's duration for `item`, once a duration is known.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the rental cannot be priced.
    pub fn preview(&self, item: &CartItem) -> Result<Option<PricingBreakdown>, PricingError> {
        self.days.map(|days| price_rental(item, days)).transpose()
    }
}
