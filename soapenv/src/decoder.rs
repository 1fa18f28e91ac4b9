//! Envelope decoding.
//!
//! The caller tells the decoder what to expect by pre-setting a placeholder
//! in `Body::content` (and optionally in the header). The body is then read
//! as a small state machine:
//!
//! ```text
//! Scanning --first child--> Consumed --end of Body--> Done
//!     |                         |
//!     +--end of Body--> Done    +--second child--> protocol error
//! ```
//!
//! The first child is either a SOAP fault, which replaces the content, or
//! the payload, decoded into the placeholder. Text and comments between
//! children are ignored.

use std::str::FromStr;

use crate::envelope::{BODY_NAME, ENVELOPE_NAME, HEADER_NAME};
use crate::fields::{decode_fields, skip_element};
use crate::token::{Token, TokenSource, XmlTokenReader};
use crate::{Body, Envelope, Fault, QualifiedName, SOAP_ENV_NS, SOAP_FAULT_NS, SoapError};

const MULTIPLE_ELEMENTS: &str =
    "multiple elements inside body; not WS-I wrapped-document/literal compliant";

/// Which namespaces mark a body child as a SOAP fault.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FaultNamespace {
    /// Only `http://schemas.xmlsoap.org/soap/envelope/` (with the trailing slash).
    #[default]
    Strict,
    /// Also accept the envelope namespace without the trailing slash.
    Lenient,
}

impl FaultNamespace {
    pub fn is_fault(self, name: &QualifiedName) -> bool {
        if name.local() != "Fault" {
            return false;
        }
        match self {
            FaultNamespace::Strict => name.namespace() == SOAP_FAULT_NS,
            FaultNamespace::Lenient => {
                name.namespace() == SOAP_FAULT_NS || name.namespace() == SOAP_ENV_NS
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FaultNamespace::Strict => "strict",
            FaultNamespace::Lenient => "lenient",
        }
    }
}

impl FromStr for FaultNamespace {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(FaultNamespace::Strict),
            "lenient" => Ok(FaultNamespace::Lenient),
            other => Err(format!(
                "invalid fault namespace policy `{}` (expected strict or lenient)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyState {
    Scanning,
    Consumed,
    Done,
}

/// Decodes envelopes into caller-provided destinations.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    fault_namespace: FaultNamespace,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fault_namespace(mut self, policy: FaultNamespace) -> Self {
        self.fault_namespace = policy;
        self
    }

    /// Decodes `input` into `destination` and returns it.
    pub fn decode(&self, input: &[u8], mut destination: Envelope) -> Result<Envelope, SoapError> {
        self.decode_into(input, &mut destination)?;
        Ok(destination)
    }

    /// Decodes `input` in place.
    ///
    /// Fails with [`SoapError::UnsetDestination`] before reading anything
    /// when the body holds no placeholder.
    pub fn decode_into(&self, input: &[u8], destination: &mut Envelope) -> Result<(), SoapError> {
        if destination.body.content.is_none() {
            return Err(SoapError::UnsetDestination);
        }
        let mut reader = XmlTokenReader::new(input);
        self.decode_envelope(&mut reader, destination)
    }

    /// Reads a whole document from `source`, root element included.
    pub fn decode_envelope(
        &self,
        source: &mut dyn TokenSource,
        destination: &mut Envelope,
    ) -> Result<(), SoapError> {
        if destination.body.content.is_none() {
            return Err(SoapError::UnsetDestination);
        }

        let root = loop {
            match source.next_token()? {
                Some(Token::Start(name)) => break name,
                Some(_) => {}
                None => return Err(SoapError::unexpected_eof()),
            }
        };
        if root != ENVELOPE_NAME {
            return Err(SoapError::decode(format!(
                "expected element {} but found {}",
                ENVELOPE_NAME, root
            )));
        }

        let mut seen_body = false;
        loop {
            match source.next_token()? {
                Some(Token::Start(name)) if name == BODY_NAME => {
                    if seen_body {
                        return Err(SoapError::protocol("multiple Body elements in envelope"));
                    }
                    self.decode_body(source, &mut destination.body)?;
                    seen_body = true;
                }
                Some(Token::Start(name)) if name == HEADER_NAME => {
                    decode_header(source, destination)?;
                }
                Some(Token::Start(_)) => skip_element(source)?,
                Some(Token::End(_)) => break,
                Some(_) => {}
                None => return Err(SoapError::unexpected_eof()),
            }
        }

        if !seen_body {
            return Err(SoapError::protocol("missing body"));
        }
        Ok(())
    }

    /// Runs the body state machine. `source` must be positioned right after
    /// the `Body` start tag; on success it is left right after the end tag.
    ///
    /// An empty body leaves the placeholder untouched.
    pub fn decode_body(&self, source: &mut dyn TokenSource, body: &mut Body) -> Result<(), SoapError> {
        if body.content.is_none() {
            return Err(SoapError::UnsetDestination);
        }

        let mut state = BodyState::Scanning;
        while state != BodyState::Done {
            match source.next_token()? {
                Some(Token::Start(name)) => {
                    if state == BodyState::Consumed {
                        return Err(SoapError::protocol(MULTIPLE_ELEMENTS));
                    }
                    if self.fault_namespace.is_fault(&name) {
                        let mut fault = Fault::default();
                        decode_fields(source, &mut fault)?;
                        body.fault = Some(fault);
                        body.content = None;
                    } else {
                        let content = body.content.as_mut().ok_or(SoapError::UnsetDestination)?;
                        content.decode_element(&name, source)?;
                    }
                    state = BodyState::Consumed;
                }
                Some(Token::End(_)) => state = BodyState::Done,
                Some(Token::Text(_)) | Some(Token::Comment(_)) => {}
                None => return Err(SoapError::unexpected_eof()),
            }
        }
        Ok(())
    }
}

/// Decodes the header entry matching the header placeholder, if any, and
/// skips every other entry.
fn decode_header(source: &mut dyn TokenSource, destination: &mut Envelope) -> Result<(), SoapError> {
    let mut placeholder = destination
        .header
        .as_mut()
        .and_then(|header| header.content.as_mut());
    let mut decoded = false;

    loop {
        match source.next_token()? {
            Some(Token::Start(name)) => match placeholder.as_deref_mut() {
                Some(content) if !decoded && content.name() == name => {
                    content.decode_element(&name, source)?;
                    decoded = true;
                }
                _ => skip_element(source)?,
            },
            Some(Token::End(_)) => return Ok(()),
            Some(_) => {}
            None => return Err(SoapError::unexpected_eof()),
        }
    }
}

/// Decodes `input` into `destination` with the default options.
pub fn decode(input: &[u8], destination: Envelope) -> Result<Envelope, SoapError> {
    Decoder::new().decode(input, destination)
}

/// In-place variant of [`decode`].
pub fn decode_into(input: &[u8], destination: &mut Envelope) -> Result<(), SoapError> {
    Decoder::new().decode_into(input, destination)
}
