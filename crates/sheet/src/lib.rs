//! Spreadsheet intake for huji
//!
//! Validates an uploaded file name, reads the workbook, and turns its first
//! sheet into raw row objects keyed by column header. Nothing here knows
//! about households; see `huji-core` for that.
//!
//! # Examples
//!
//! ```
//! use huji_sheet::{check_extension, SheetError};
//!
//! assert!(check_extension("户籍.xlsx").is_ok());
//! assert!(matches!(
//!     check_extension("data.csv"),
//!     Err(SheetError::InvalidExtension { .. })
//! ));
//! ```
//!
//! ```no_run
//! # async fn load() -> huji_sheet::Result<()> {
//! let rows = huji_sheet::read_workbook("户籍.xlsx").await?;
//! println!("{} rows", rows.len());
//! # Ok(())
//! # }
//! ```

mod cell;
mod error;
mod source;
mod xlsx;

use indexmap::IndexMap;

/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export error types and user-facing notices.
pub use error::{Result, SheetError, DECODE_FAILURE_MESSAGE, INVALID_EXTENSION_MESSAGE};
/// Re-export upload intake.
pub use source::{check_extension, decode_upload, read_workbook, ACCEPTED_EXTENSIONS};
/// Re-export first-sheet decoding.
pub use xlsx::{decode_first_sheet, range_to_rows};

/// One undifferentiated sheet row, keyed by column header in column order.
pub type RawRow = IndexMap<String, CellValue>;
