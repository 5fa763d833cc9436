use thiserror::Error;

/// Notice shown when the uploaded file does not carry an Excel extension.
pub const INVALID_EXTENSION_MESSAGE: &str = "请上传Excel文件（.xlsx或.xls格式）";

/// Notice shown when the workbook cannot be read or decoded.
pub const DECODE_FAILURE_MESSAGE: &str = "解析Excel文件失败，请检查文件格式是否正确";

/// Errors that can occur while taking in an uploaded spreadsheet
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Not an Excel file: {file_name}")]
    InvalidExtension { file_name: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SheetError {
    /// The blocking notice to show the person who uploaded the file.
    ///
    /// Read failures are reported the same way as decode failures.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            SheetError::InvalidExtension { .. } => INVALID_EXTENSION_MESSAGE,
            SheetError::Decode(_) | SheetError::Io(_) => DECODE_FAILURE_MESSAGE,
        }
    }
}

impl From<calamine::Error> for SheetError {
    fn from(e: calamine::Error) -> Self {
        SheetError::Decode(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;
