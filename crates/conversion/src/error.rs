use dws_core::ParseError;

/// Conversion failures. Every variant aborts the single conversion it came from.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("decode {kind} conversion data: {source}")]
    Decode { kind: &'static str, source: serde_json::Error },
    #[error("encode {kind} conversion data: {source}")]
    Encode { kind: &'static str, source: serde_json::Error },
    #[error("conversion data holds a {found} snapshot, expected {expected}")]
    SnapshotKind { expected: &'static str, found: String },
    #[error("{kind} {field}: {reason}")]
    Translation { kind: &'static str, field: &'static str, reason: String },
    #[error("{method} is not supported on resources of kind \"{resource}\"")]
    MethodNotSupported { resource: String, method: &'static str },
    #[error("unknown representation {0:?}")]
    UnknownVersion(String),
    #[error("unknown resource kind {0:?}")]
    UnknownKind(String),
    #[error("malformed object: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, ConversionError>;

impl From<ParseError> for ConversionError {
    fn from(e: ParseError) -> Self {
        match e {
            ParseError::UnknownVersion(v) => ConversionError::UnknownVersion(v),
            ParseError::UnknownKind(k) => ConversionError::UnknownKind(k),
            other => ConversionError::Malformed(other.to_string()),
        }
    }
}

impl ConversionError {
    /// Error returned by every collection conversion.
    pub fn not_supported(list_kind: &str, method: &'static str) -> Self {
        ConversionError::MethodNotSupported { resource: format!("{}.dws", list_kind), method }
    }
}
