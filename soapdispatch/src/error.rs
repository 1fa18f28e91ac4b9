use soapenv::{Fault, SoapError};
use thiserror::Error;

/// Failures of a dispatched action.
///
/// Each error is reported to the caller as a SOAP fault: request problems
/// use the `Client` fault code, everything else `Server`.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("invalid request envelope: {0}")]
    InvalidRequest(#[source] SoapError),

    #[error("unexpected request payload for action {action}")]
    UnexpectedPayload { action: String },

    #[error("action failed: {0}")]
    Handler(String),

    #[error("cannot encode response: {0}")]
    Encode(#[source] SoapError),
}

impl DispatchError {
    pub fn handler(message: impl Into<String>) -> Self {
        DispatchError::Handler(message.into())
    }

    pub fn fault_code(&self) -> &'static str {
        match self {
            DispatchError::InvalidRequest(_) | DispatchError::UnexpectedPayload { .. } => "Client",
            DispatchError::Handler(_) | DispatchError::Encode(_) => "Server",
        }
    }

    pub fn to_fault(&self) -> Fault {
        Fault::new(self.fault_code(), self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_codes() {
        let err = DispatchError::InvalidRequest(SoapError::protocol("missing body"));
        let fault = err.to_fault();
        assert_eq!(fault.code, "Client");
        assert_eq!(
            fault.string,
            "invalid request envelope: SOAP protocol error: missing body"
        );

        assert_eq!(DispatchError::handler("boom").fault_code(), "Server");
    }
}
