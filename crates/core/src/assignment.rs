//! Scheduling rules for assignments.
//!
//! An assignment reserves an inclusive `[start_date, end_date]` range for a
//! single listing. Two rules gate creation:
//!
//! 1. The range must start strictly after today.
//! 2. The range must not intersect any stored assignment of the same listing.
//!
//! `end_date >= start_date` is deliberately *not* checked here.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::types::{Date, DbId};

/// Message returned when the start date is today or earlier.
pub const START_NOT_IN_FUTURE: &str = "Assignment must start tomorrow or later.";

/// Message returned when the range collides with a stored assignment.
pub const OVERLAPS_EXISTING: &str = "Assignment overlaps with existing assignments.";

// ---------------------------------------------------------------------------
// Date ranges
// ---------------------------------------------------------------------------

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

impl DateRange {
    pub fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    /// Both ends are inclusive, so ranges sharing a single day overlap.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && self.end >= other.start
    }
}

// ---------------------------------------------------------------------------
// Validator
// ---------------------------------------------------------------------------

/// Field values of an assignment that is about to be created.
///
/// Every field is optional here: missing fields are reported by payload
/// validation, and the validator simply skips the checks that need them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AssignmentCandidate {
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub listing_id: Option<DbId>,
}

impl AssignmentCandidate {
    /// The candidate's range, when both bounds are known.
    pub fn range(&self) -> Option<DateRange> {
        Some(DateRange::new(self.start_date?, self.end_date?))
    }
}

/// Read access to stored assignments, as needed by [`AssignmentValidator`].
#[async_trait]
pub trait AssignmentLookup: Send {
    /// Whether any stored assignment of `listing_id` intersects `range`.
    async fn overlapping_exists(
        &mut self,
        listing_id: DbId,
        range: DateRange,
    ) -> Result<bool, CoreError>;
}

/// Applies the assignment scheduling rules against a fixed "today".
#[derive(Debug, Clone, Copy)]
pub struct AssignmentValidator {
    today: Date,
}

impl AssignmentValidator {
    pub fn new(today: Date) -> Self {
        Self { today }
    }

    pub fn today(&self) -> Date {
        self.today
    }

    /// Rule 1: a present start date must be strictly after today.
    pub fn check_future_start(&self, start_date: Option<Date>) -> Result<(), CoreError> {
        match start_date {
            Some(start) if start <= self.today => {
                Err(CoreError::Validation(START_NOT_IN_FUTURE.to_string()))
            }
            _ => Ok(()),
        }
    }

    /// Run both rules and hand the candidate back unchanged on success.
    ///
    /// The lookup is only consulted once the start date has passed, and only
    /// when the listing and both bounds are known.
    pub async fn validate<L>(
        &self,
        lookup: &mut L,
        candidate: AssignmentCandidate,
    ) -> Result<AssignmentCandidate, CoreError>
    where
        L: AssignmentLookup + ?Sized,
    {
        self.check_future_start(candidate.start_date)?;

        if let (Some(listing_id), Some(range)) = (candidate.listing_id, candidate.range()) {
            if lookup.overlapping_exists(listing_id, range).await? {
                return Err(CoreError::Validation(OVERLAPS_EXISTING.to_string()));
            }
        }

        Ok(candidate)
    }
}
