//! The current set of households.

use crate::collate::locale_cmp;
use crate::group::group_households;
use crate::model::Household;
use huji_sheet::RawRow;
use std::borrow::Borrow;

/// Holds the households from the most recent parse.
///
/// Each parse replaces the whole set; nothing is merged across uploads. The
/// store has one writer at a time: callers that share it across tasks wrap it
/// in a lock, and overlapping writers simply leave the last result in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HouseholdStore {
    households: Vec<Household>,
}

impl HouseholdStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Households, sorted by id.
    pub fn households(&self) -> &[Household] {
        &self.households
    }

    pub fn get(&self, index: usize) -> Option<&Household> {
        self.households.get(index)
    }

    pub fn len(&self) -> usize {
        self.households.len()
    }

    pub fn is_empty(&self) -> bool {
        self.households.is_empty()
    }

    /// Replace the contents, returning the previous households.
    ///
    /// The new households are stably sorted by id.
    pub fn replace(&mut self, mut households: Vec<Household>) -> Vec<Household> {
        households.sort_by(|a, b| locale_cmp(&a.household_id, &b.household_id));
        std::mem::replace(&mut self.households, households)
    }

    /// Group `rows` and replace the contents with the result.
    ///
    /// An empty row sequence leaves the store empty.
    pub fn ingest<I>(&mut self, rows: I) -> &[Household]
    where
        I: IntoIterator,
        I::Item: Borrow<RawRow>,
    {
        self.households = group_households(rows);
        tracing::info!(households = self.households.len(), "household data replaced");
        &self.households
    }
}
