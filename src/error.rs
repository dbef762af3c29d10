use thiserror::Error;

/// Errors raised while decoding the sections of a message.
///
/// Every variant is fatal for the message being decoded; no partially decoded
/// message is ever returned.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParseError {
    #[error("Not GRIB data")]
    NotGrib,
    #[error("Unsupported GRIB edition: {0}")]
    UnsupportedEdition(u8),
    #[error("Unexpected end of data at {offset}: {requested} bytes requested, {available} available")]
    TruncatedInput {
        offset: usize,
        requested: usize,
        available: usize,
    },
    #[error("Malformed {section}: {reason}")]
    MalformedSection {
        section: &'static str,
        reason: String,
    },
    #[error("Total length declared in Indicator Section is {declared} but {actual} bytes were decoded")]
    TotalLengthMismatch { declared: u64, actual: u64 },
}

impl ParseError {
    pub(crate) fn malformed(section: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedSection {
            section,
            reason: reason.into(),
        }
    }
}

/// Errors raised by the derived accessors of a [`Message`](crate::Message).
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GribError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The message is valid GRIB but uses a feature this crate does not decode,
    /// e.g. a Gaussian grid or a complex packing scheme.
    #[error("Not supported: {0}")]
    NotSupported(String),
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}
