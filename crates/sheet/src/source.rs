//! Upload intake: extension check, asynchronous read, decode.

use crate::error::{Result, SheetError};
use crate::xlsx::decode_first_sheet;
use crate::RawRow;
use std::path::Path;

/// File name suffixes accepted for upload. Matching is case-sensitive, so
/// `data.XLSX` is rejected.
pub const ACCEPTED_EXTENSIONS: [&str; 2] = [".xlsx", ".xls"];

/// Check the file name against [`ACCEPTED_EXTENSIONS`].
///
/// Only the suffix is inspected; the file content is never sniffed here.
///
/// # Errors
///
/// Returns [`SheetError::InvalidExtension`] for any other suffix.
pub fn check_extension(file_name: &str) -> Result<()> {
    if ACCEPTED_EXTENSIONS
        .iter()
        .any(|ext| file_name.ends_with(ext))
    {
        Ok(())
    } else {
        tracing::warn!(file_name, "rejected upload without an Excel extension");
        Err(SheetError::InvalidExtension {
            file_name: file_name.to_string(),
        })
    }
}

/// Decode an uploaded workbook that is already in memory.
///
/// Decoding runs on the blocking pool so the caller's task is not held up.
pub async fn decode_upload(file_name: &str, bytes: Vec<u8>) -> Result<Vec<RawRow>> {
    check_extension(file_name)?;

    let decoded = tokio::task::spawn_blocking(move || decode_first_sheet(&bytes))
        .await
        .map_err(|e| SheetError::Decode(e.to_string()))
        .and_then(|result| result);

    match decoded {
        Ok(rows) => {
            tracing::info!(file_name, rows = rows.len(), "loaded workbook");
            Ok(rows)
        }
        Err(e) => {
            tracing::error!(file_name, error = %e, "解析Excel文件失败");
            Err(e)
        }
    }
}

/// Read and decode a workbook from disk.
///
/// The extension is checked before the file is opened.
pub async fn read_workbook<P: AsRef<Path>>(path: P) -> Result<Vec<RawRow>> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    check_extension(&file_name)?;

    let bytes = tokio::fs::read(path).await.map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "failed to read upload");
        SheetError::Io(e)
    })?;

    decode_upload(&file_name, bytes).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_excel_suffixes() {
        assert!(check_extension("data.xlsx").is_ok());
        assert!(check_extension("户籍.xls").is_ok());
        assert!(check_extension("archive.2024.xlsx").is_ok());
    }

    #[test]
    fn test_rejects_other_suffixes() {
        assert!(matches!(
            check_extension("data.csv"),
            Err(SheetError::InvalidExtension { .. })
        ));
        assert!(check_extension("data").is_err());
        assert!(check_extension("data.xlsx.bak").is_err());
    }

    #[test]
    fn test_suffix_match_is_case_sensitive() {
        assert!(check_extension("data.XLSX").is_err());
        assert!(check_extension("data.Xls").is_err());
    }

    #[tokio::test]
    async fn test_csv_rejected_before_read() {
        // The path does not exist; the extension check must fail first.
        let err = read_workbook("/nonexistent/dir/data.csv").await.unwrap_err();
        assert!(matches!(err, SheetError::InvalidExtension { ref file_name } if file_name == "data.csv"));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let err = read_workbook("/nonexistent/dir/data.xlsx").await.unwrap_err();
        assert!(matches!(err, SheetError::Io(_)));
    }

    #[tokio::test]
    async fn test_decode_upload_bad_bytes() {
        let err = decode_upload("data.xlsx", b"PK\x03\x04broken".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, SheetError::Decode(_)));
    }
}
