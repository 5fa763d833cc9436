//! Grouping rows into households.

use crate::collate::locale_cmp;
use crate::model::Household;
use crate::normalize::normalize_row;
use huji_sheet::RawRow;
use indexmap::IndexMap;
use std::borrow::Borrow;

/// Accumulates rows into households keyed by household id.
///
/// Households keep the address of the first row seen for their id; later
/// rows only contribute members, whatever address they carry.
#[derive(Debug, Default)]
pub struct HouseholdGrouper {
    households: IndexMap<String, Household>,
    rows: usize,
}

impl HouseholdGrouper {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one row.
    pub fn push(&mut self, row: &RawRow) {
        let normalized = normalize_row(row);
        self.rows += 1;

        self.households
            .entry(normalized.household_id)
            .or_insert_with_key(|id| Household::new(id.clone(), normalized.address))
            .members
            .push(normalized.member);
    }

    /// Add every row of an iterator, in order.
    pub fn extend<I>(&mut self, rows: I)
    where
        I: IntoIterator,
        I::Item: Borrow<RawRow>,
    {
        for row in rows {
            self.push(row.borrow());
        }
    }

    /// Number of distinct household ids seen so far.
    pub fn len(&self) -> usize {
        self.households.len()
    }

    pub fn is_empty(&self) -> bool {
        self.households.is_empty()
    }

    /// Finish grouping, returning households sorted by id.
    ///
    /// The sort is stable and uses [`locale_cmp`].
    pub fn finish(self) -> Vec<Household> {
        let mut households: Vec<Household> = self.households.into_values().collect();
        households.sort_by(|a, b| locale_cmp(&a.household_id, &b.household_id));

        tracing::debug!(
            rows = self.rows,
            households = households.len(),
            "grouped rows into households"
        );
        households
    }
}

/// Group a sequence of rows into households sorted by id.
pub fn group_households<I>(rows: I) -> Vec<Household>
where
    I: IntoIterator,
    I::Item: Borrow<RawRow>,
{
    let mut grouper = HouseholdGrouper::new();
    grouper.extend(rows);
    grouper.finish()
}
