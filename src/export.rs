use serde_json::Value;
use thiserror::Error;

use crate::pdf;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("missing content")]
    MissingContent,
    #[error("serialization failed: {0}")]
    Serialize(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Txt,
    Csv,
    Pdf,
    Json,
}

impl ExportFormat {
    pub fn parse(tag: &str) -> Result<Self, ExportError> {
        match tag.to_lowercase().as_str() {
            "txt" => Ok(Self::Txt),
            "csv" => Ok(Self::Csv),
            "pdf" => Ok(Self::Pdf),
            "json" => Ok(Self::Json),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Csv => "csv",
            Self::Pdf => "pdf",
            Self::Json => "json",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Txt => "text/plain",
            Self::Csv => "text/csv",
            Self::Pdf => "application/pdf",
            Self::Json => "application/json",
        }
    }
}

/// Bytes ready to hand back as a download. Never stored server-side.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    pub filename: String,
}

/// Serialize `content` into the requested format. Format and content are
/// both validated before any format-specific work happens.
pub fn export(
    content: &Value,
    format_tag: &str,
    filename_stem: &str,
) -> Result<ExportArtifact, ExportError> {
    let format = ExportFormat::parse(format_tag)?;
    if content_is_missing(content) {
        return Err(ExportError::MissingContent);
    }

    let bytes = match format {
        ExportFormat::Txt => content_text(content).into_bytes(),
        ExportFormat::Csv => write_csv(&content_text(content))?,
        ExportFormat::Pdf => pdf::render(&content_text(content))?,
        ExportFormat::Json => serde_json::to_string_pretty(content)
            .map_err(|e| ExportError::Serialize(e.to_string()))?
            .into_bytes(),
    };

    Ok(ExportArtifact {
        bytes,
        mime_type: format.mime_type(),
        filename: format!("{filename_stem}.{}", format.extension()),
    })
}

fn content_is_missing(content: &Value) -> bool {
    match content {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// String form of arbitrary content: strings verbatim, anything structured
/// as compact JSON.
fn content_text(content: &Value) -> String {
    match content {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// One row, one field; the writer quotes embedded delimiters, quotes and
/// newlines.
fn write_csv(text: &str) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record([text])
        .map_err(|e| ExportError::Serialize(e.to_string()))?;
    writer
        .into_inner()
        .map_err(|e| ExportError::Serialize(e.to_string()))
}
