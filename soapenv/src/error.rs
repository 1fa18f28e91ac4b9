use thiserror::Error;

/// Errors raised while encoding or decoding an envelope.
///
/// None of them is retryable: they describe a non-compliant sender, a
/// payload that does not fit its destination, or a value the encoder
/// cannot write. A received SOAP Fault is *not* an error, it is returned
/// as data in [`Body::fault`](crate::Body::fault).
#[derive(Debug, Error)]
pub enum SoapError {
    /// The body breaks the single-child rule, or the input ends early.
    #[error("SOAP protocol error: {0}")]
    Protocol(String),

    /// An element does not match the shape of its destination.
    #[error("SOAP decode error: {0}")]
    Decode(String),

    /// A value cannot be written as an element.
    #[error("SOAP serialization error: {0}")]
    Serialization(String),

    /// `Body::content` was left empty before decoding.
    #[error("body content must hold a placeholder of the expected payload type")]
    UnsetDestination,

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
}

impl SoapError {
    pub fn protocol(message: impl Into<String>) -> Self {
        SoapError::Protocol(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        SoapError::Decode(message.into())
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        SoapError::Serialization(message.into())
    }

    pub fn unexpected_eof() -> Self {
        SoapError::protocol("unexpected end of input")
    }
}

impl From<std::str::Utf8Error> for SoapError {
    fn from(err: std::str::Utf8Error) -> Self {
        SoapError::Decode(format!("invalid UTF-8: {}", err))
    }
}

impl From<std::io::Error> for SoapError {
    fn from(err: std::io::Error) -> Self {
        SoapError::Serialization(format!("IO error: {}", err))
    }
}
