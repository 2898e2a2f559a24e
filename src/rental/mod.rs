//! Rental details
//!
//! A rental period is stored as a start date plus a whole number of days. The
//! end date is always derived from those two, inclusive of both ends: a three
//! day rental starting on the 1st ends on the 3rd.

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::{Span, civil::Date};
use thiserror::Error;

pub mod book;
pub mod draft;

pub use book::RentalBook;
pub use draft::RentalDraft;

/// Which rental dates were missing when a save was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingDates {
    /// No start date was chosen
    Start,

    /// No end date or duration was chosen
    End,

    /// Neither date was chosen
    Both,
}

/// Errors raised while editing or resolving rental details.
#[derive(Debug, Error, PartialEq)]
pub enum RentalError {
    /// Save attempted without both dates.
    #[error("{}", missing_dates_message(.0))]
    MissingRentalDates(MissingDates),

    /// A duration of zero days was requested.
    #[error("rental duration must be at least one day, got {0}")]
    InvalidDuration(u32),

    /// Date arithmetic left the supported calendar range.
    #[error("rental dates fall outside the supported calendar range")]
    DateOutOfRange,
}

fn missing_dates_message(missing: &MissingDates) -> &'static str {
    match missing {
        MissingDates::Start => "Please select a start date",
        MissingDates::End => "Please select an end date or a rental duration",
        MissingDates::Both => "Please select both start and end dates",
    }
}

/// A rental length in whole days, at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RentalDays(u32);

impl RentalDays {
    /// Creates a rental length.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::InvalidDuration`] for zero days.
    pub fn new(days: u32) -> Result<Self, RentalError> {
        if days == 0 {
            return Err(RentalError::InvalidDuration(days));
        }

        Ok(Self(days))
    }

    /// Number of days
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Display for RentalDays {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let unit = if self.0 == 1 { "day" } else { "days" };

        write!(f, "{} {unit}", self.0)
    }
}

/// Durations offered as one-click choices in the rental editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RentalPreset {
    /// 1 day
    OneDay,

    /// 3 days
    ThreeDays,

    /// 7 days
    OneWeek,

    /// 15 days
    FifteenDays,

    /// 30 days
    OneMonth,
}

impl RentalPreset {
    /// Every preset, shortest first.
    pub const ALL: [RentalPreset; 5] = [
        RentalPreset::OneDay,
        RentalPreset::ThreeDays,
        RentalPreset::OneWeek,
        RentalPreset::FifteenDays,
        RentalPreset::OneMonth,
    ];

    /// Length of the preset
    pub fn days(self) -> RentalDays {
        RentalDays(match self {
            RentalPreset::OneDay => 1,
            RentalPreset::ThreeDays => 3,
            RentalPreset::OneWeek => 7,
            RentalPreset::FifteenDays => 15,
            RentalPreset::OneMonth => 30,
        })
    }

    /// Finds the preset with exactly this many days.
    pub fn from_days(days: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.days().get() == days)
    }
}

impl From<RentalPreset> for RentalDays {
    fn from(preset: RentalPreset) -> Self {
        preset.days()
    }
}

/// Last day of a rental that starts on `start` and lasts `days`.
///
/// # Errors
///
/// Returns [`RentalError::DateOutOfRange`] if the end date cannot be represented.
pub fn end_date(start: Date, days: RentalDays) -> Result<Date, RentalError> {
    let span = Span::new()
        .try_days(i64::from(days.get()) - 1)
        .map_err(|_err| RentalError::DateOutOfRange)?;

    start
        .checked_add(span)
        .map_err(|_err| RentalError::DateOutOfRange)
}

/// Number of rental days covered by `start..=end`, at least one.
///
/// An end date on or before the start date counts as a single day.
///
/// # Errors
///
/// Returns [`RentalError::DateOutOfRange`] if the span between the dates cannot be computed.
pub fn inclusive_days(start: Date, end: Date) -> Result<RentalDays, RentalError> {
    let span = start
        .until(end)
        .map_err(|_err| RentalError::DateOutOfRange)?;

    let days = (i64::from(span.get_days()) + 1).max(1);

    u32::try_from(days)
        .map(RentalDays)
        .map_err(|_err| RentalError::DateOutOfRange)
}

/// A saved rental period for one cart item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentalDetail {
    start: Date,
    end: Date,
    days: RentalDays,
}

impl RentalDetail {
    /// Creates a rental period from its start and length.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::DateOutOfRange`] if the end date cannot be represented.
    pub fn new(start: Date, days: RentalDays) -> Result<Self, RentalError> {
        Ok(Self {
            start,
            end: end_date(start, days)?,
            days,
        })
    }

    /// Creates a rental period from explicit start and end dates.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::DateOutOfRange`] if the dates cannot be compared.
    pub fn from_range(start: Date, end: Date) -> Result<Self, RentalError> {
        Self::new(start, inclusive_days(start, end)?)
    }

    /// First day of the rental
    pub fn start(&self) -> Date {
        self.start
    }

    /// Last day of the rental
    pub fn end(&self) -> Date {
        self.end
    }

    /// Length of the rental
    pub fn days(&self) -> RentalDays {
        self.days
    }
}
