//! # soapenv
//!
//! SOAP 1.1 envelope encoding and decoding for a closed set of typed payloads.
//!
//! - [`Envelope`] / [`Header`] / [`Body`] model the wire wrapper; the body
//!   holds either a [`Fault`] or a registered [`Content`] value
//! - [`decode`] walks the body with a single-child state machine and fills a
//!   caller-provided placeholder, or the fault slot
//! - [`encode`] writes namespaced XML, honoring omit-empty fields and
//!   flattening [`CommonResponse`] into the concrete response element
//!
//! The crate is synchronous and does no I/O: it works on byte buffers that
//! the caller has already read.
//!
//! ## Usage
//!
//! ```
//! use soapenv::{decode, encode, CommonResponse, Envelope, ProcessAResponse};
//!
//! let response = ProcessAResponse {
//!     common: CommonResponse::success(),
//!     id: "100".into(),
//!     process: "ProcessAResponse".into(),
//! };
//! let xml = encode(&Envelope::new(response.clone()), "  ")?;
//!
//! let decoded = decode(&xml, Envelope::expecting(ProcessAResponse::default()))?;
//! assert_eq!(decoded.into_content::<ProcessAResponse>(), Some(response));
//! # Ok::<(), soapenv::SoapError>(())
//! ```

mod content;
mod decoder;
mod encoder;
mod envelope;
mod error;
mod fault;
pub mod fields;
mod name;
mod payloads;
mod response;
pub mod token;

pub use content::Content;
pub use decoder::{Decoder, FaultNamespace, decode, decode_into};
pub use encoder::{Encoder, encode};
pub use envelope::{BODY_NAME, Body, ENVELOPE_NAME, Envelope, HEADER_NAME, Header};
pub use error::SoapError;
pub use fault::Fault;
pub use fields::{ElementWriter, FieldReader, Payload, XmlFields};
pub use name::QualifiedName;
pub use payloads::{Auth, Name, Person, ProcessARequest, ProcessBRequest};
pub use response::{CommonResponse, ConcreteResponse, ProcessAResponse, ProcessBResponse};

/// Namespace of `Envelope`, `Header` and `Body`.
pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope";

/// Namespace in which a body child is recognized as a fault. It differs from
/// [`SOAP_ENV_NS`] by its trailing slash; see [`FaultNamespace`].
pub const SOAP_FAULT_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Namespace of the application payloads.
pub const EXAMPLE_NS: &str = "http://example.com/ns";
