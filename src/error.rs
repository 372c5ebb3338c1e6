use thiserror::Error;

/// Main error type for the sheet-ingest crate.
/// Every failure surfaces through this one category; low-level causes from the
/// standard library and dependencies convert in and stay inspectable via `source()`.
#[derive(Error, Debug)]
pub enum IngestError {
    /// Workbook was opened but nothing readable was found in any sheet
    #[error("no content was read from '{0}'; check that the file is not empty")]
    NoContent(String),

    /// A requested sheet exists but holds zero rows
    #[error("sheet '{sheet}' of '{file}' is empty")]
    EmptySheet { file: String, sheet: String },

    /// A requested sheet name does not exist in the workbook
    #[error("sheet '{sheet}' was not found in '{file}'")]
    SheetNotFound { file: String, sheet: String },

    /// A cell's declared type conflicts with its actual content
    #[error("cell {reference} in sheet '{sheet}' holds '{value}' and may contain a formula; please verify")]
    CellRead {
        sheet: String,
        reference: String,
        value: String,
    },

    /// Textual cell content cannot convert to the requested attribute type
    #[error("value '{value}' cannot be converted to {target}")]
    Coercion {
        value: String,
        target: &'static str,
    },

    /// A target record type could not be constructed with no arguments
    #[error("record type '{0}' could not be instantiated")]
    Instantiation(&'static str),

    /// The underlying byte source could not be opened or fully read
    #[error("failed to read source '{name}': {source}")]
    SourceIo {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// A required part of the workbook package is missing
    #[error("missing workbook part '{0}'")]
    MissingPart(String),

    /// An XML entity reference that is neither numeric nor predefined
    #[error("parse entity '{0}' failed")]
    ParseEntity(String),

    /// Free-form message with the optional numeric status callers may attach
    #[error("{message}")]
    Context {
        message: String,
        status: Option<i32>,
    },

    // Standard library errors
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    ParseInt(#[from] std::num::ParseIntError),

    #[error("{0}")]
    ParseFloat(#[from] std::num::ParseFloatError),

    #[error("{0}")]
    StringEncoding(#[from] std::str::Utf8Error),

    // Third-party library errors
    #[error("{0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("{0}")]
    Xml(#[from] quick_xml::Error),

    #[error("{0}")]
    XmlEncoding(#[from] quick_xml::encoding::EncodingError),

    #[error("{0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),
}

impl IngestError {
    /// Numeric status attached to the error, when one was provided.
    pub fn status(&self) -> Option<i32> {
        match self {
            IngestError::Context { status, .. } => *status,
            _ => None,
        }
    }
}

pub trait ResultMessage {
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, IngestError> {
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| IngestError::Context {
            message: format!("{}: {}", message, e),
            status: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coercion_message_names_value_and_target() {
        let error = IngestError::Coercion {
            value: "abc".to_string(),
            target: "Integer",
        };
        let message = error.to_string();
        assert!(message.contains("abc"));
        assert!(message.contains("Integer"));
    }

    #[test]
    fn parse_entity_failure_names_the_entity() {
        let error = IngestError::ParseEntity("nbsp".to_string());
        assert!(error.to_string().contains("nbsp"));
    }

    #[test]
    fn status_defaults_to_none() {
        let error = IngestError::NoContent("test.xlsx".to_string());
        assert_eq!(error.status(), None);

        let error = IngestError::Context {
            message: "bad upload".to_string(),
            status: Some(400),
        };
        assert_eq!(error.status(), Some(400));
    }

    #[test]
    fn with_prefix_keeps_original_message() {
        let result: Result<(), IngestError> =
            Err(IngestError::MissingPart("xl/workbook.xml".to_string()));
        let error = result.with_prefix("opening 'a.xlsx'").unwrap_err();
        assert!(error.to_string().starts_with("opening 'a.xlsx': "));
        assert!(error.to_string().contains("xl/workbook.xml"));
    }
}
