//! Row normalization.
//!
//! Every canonical field is looked up through an ordered list of candidate
//! column headers. A candidate is skipped when the column is missing or its
//! value is falsy (null, `false`, zero, NaN or `""`), so an empty `户号` cell
//! falls through to `householdId` just like a missing one.

use crate::model::{Member, MemberField};
use huji_sheet::{CellValue, RawRow};

/// Household id used when no candidate column holds a value.
pub const UNKNOWN_HOUSEHOLD_ID: &str = "未知户号";

/// Column headers for the household id, in fallback order.
pub const HOUSEHOLD_ID_KEYS: [&str; 2] = ["户号", "householdId"];

/// Column headers for the address, in fallback order.
pub const ADDRESS_KEYS: [&str; 2] = ["地址", "address"];

/// Resolve the first truthy value among `candidates`, or `default`.
///
/// Non-string values are carried through by their display form, so a numeric
/// date serial resolves to e.g. `"32874"`.
pub fn resolve(row: &RawRow, candidates: &[&str], default: &str) -> String {
    candidates
        .iter()
        .filter_map(|key| row.get(*key))
        .find(|value| !value.is_falsy())
        .map_or_else(|| default.to_string(), CellValue::as_str)
}

/// A row after normalization: its household key plus the member it describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRow {
    pub household_id: String,
    pub address: String,
    pub member: Member,
}

/// Resolve the household id of a row.
pub fn household_id(row: &RawRow) -> String {
    resolve(row, &HOUSEHOLD_ID_KEYS, UNKNOWN_HOUSEHOLD_ID)
}

/// Resolve the address of a row.
pub fn address(row: &RawRow) -> String {
    resolve(row, &ADDRESS_KEYS, "")
}

/// Build the member described by a row.
pub fn member(row: &RawRow) -> Member {
    let mut member = Member::default();
    for field in MemberField::ALL {
        *member.field_mut(field) = resolve(row, &field.keys(), "");
    }
    member
}

/// Normalize one raw row.
pub fn normalize_row(row: &RawRow) -> NormalizedRow {
    NormalizedRow {
        household_id: household_id(row),
        address: address(row),
        member: member(row),
    }
}
