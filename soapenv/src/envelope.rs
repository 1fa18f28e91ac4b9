use crate::{Content, Fault, QualifiedName, SOAP_ENV_NS};

pub const ENVELOPE_NAME: QualifiedName = QualifiedName::from_static(SOAP_ENV_NS, "Envelope");
pub const HEADER_NAME: QualifiedName = QualifiedName::from_static(SOAP_ENV_NS, "Header");
pub const BODY_NAME: QualifiedName = QualifiedName::from_static(SOAP_ENV_NS, "Body");

/// A SOAP envelope: an optional header and a body.
///
/// The element names of the envelope, its header and its body are fixed and
/// do not depend on the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Envelope {
    pub header: Option<Header>,
    pub body: Body,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    pub content: Option<Content>,
}

/// Body slot. After a decode at most one of `fault` and `content` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body {
    pub fault: Option<Fault>,
    pub content: Option<Content>,
}

impl Envelope {
    /// An envelope carrying `content` in its body, ready to encode.
    pub fn new(content: impl Into<Content>) -> Self {
        Self {
            header: None,
            body: Body::new(content),
        }
    }

    /// A decode destination expecting a body of the placeholder's type.
    pub fn expecting(placeholder: impl Into<Content>) -> Self {
        Self::new(placeholder)
    }

    /// An envelope whose body holds a fault.
    pub fn fault(fault: Fault) -> Self {
        Self {
            header: None,
            body: Body {
                fault: Some(fault),
                content: None,
            },
        }
    }

    /// Sets the header content, or the header placeholder before decoding.
    pub fn with_header(mut self, content: impl Into<Content>) -> Self {
        self.header = Some(Header {
            content: Some(content.into()),
        });
        self
    }

    pub fn header_content(&self) -> Option<&Content> {
        self.header.as_ref().and_then(|h| h.content.as_ref())
    }

    /// Takes the body content out, converted to its concrete type.
    ///
    /// Returns `None` when the body is empty, holds a fault, or holds a
    /// different payload type.
    pub fn into_content<T: TryFrom<Content>>(self) -> Option<T> {
        self.body.content.and_then(|c| T::try_from(c).ok())
    }
}

impl Body {
    pub fn new(content: impl Into<Content>) -> Self {
        Self {
            fault: None,
            content: Some(content.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fault.is_none() && self.content.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ProcessAResponse, ProcessBResponse};

    #[test]
    fn test_into_content_checks_the_variant() {
        let env = Envelope::new(ProcessAResponse::default());
        assert!(env.clone().into_content::<ProcessBResponse>().is_none());
        assert_eq!(
            env.into_content::<ProcessAResponse>(),
            Some(ProcessAResponse::default())
        );
    }

    #[test]
    fn test_fault_envelope_has_no_content() {
        let env = Envelope::fault(Fault::new("Server", "boom"));
        assert!(env.body.content.is_none());
        assert!(!env.body.is_empty());
        assert!(Body::default().is_empty());
    }
}
