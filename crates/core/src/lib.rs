//! # huji-core
//!
//! Household grouping for huji.
//!
//! This crate provides:
//! - Member and household records
//! - Row normalization with bilingual column fallbacks
//! - Grouping of rows into households sorted by id
//! - The household store that holds the latest parse
//!
//! Nothing here depends on how households are presented.
//!
//! ```
//! use huji_core::{group_households, RawRow};
//! use huji_sheet::CellValue;
//!
//! let rows: Vec<RawRow> = vec![
//!     [("户号", "1"), ("姓名", "A")].into_iter().map(|(k, v)| (k.to_string(), CellValue::from(v))).collect(),
//!     [("户号", "1"), ("姓名", "B")].into_iter().map(|(k, v)| (k.to_string(), CellValue::from(v))).collect(),
//! ];
//!
//! let households = group_households(&rows);
//! assert_eq!(households.len(), 1);
//! assert_eq!(households[0].members.len(), 2);
//! ```

/// Locale-aware ordering of household ids.
pub mod collate;
/// Grouping rows into households.
pub mod group;
/// Member and household records.
pub mod model;
/// Row normalization.
pub mod normalize;
/// The household store.
pub mod store;

/// Re-export the raw row type from `huji-sheet`.
pub use huji_sheet::RawRow;

pub use collate::locale_cmp;
pub use group::{group_households, HouseholdGrouper};
pub use model::{Household, Member, MemberField};
pub use normalize::{normalize_row, resolve, NormalizedRow, UNKNOWN_HOUSEHOLD_ID};
pub use store::HouseholdStore;
