//! Envelope encoding.

use crate::envelope::{BODY_NAME, ENVELOPE_NAME, HEADER_NAME};
use crate::fields::{ElementWriter, Payload};
use crate::{Envelope, Fault, SoapError};

/// Serializes envelopes, compact or indented.
///
/// ```
/// use soapenv::{CommonResponse, Encoder, Envelope, ProcessAResponse};
///
/// let envelope = Envelope::new(ProcessAResponse {
///     common: CommonResponse::success(),
///     id: "100".into(),
///     process: "ProcessAResponse".into(),
/// });
/// let xml = Encoder::new().indent("  ").encode(&envelope)?;
/// assert!(xml.starts_with(b"<Envelope"));
/// # Ok::<(), soapenv::SoapError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    indent: String,
    declaration: bool,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indentation unit, e.g. `"  "` or `"\t"`. Empty means compact output.
    pub fn indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Prefixes the output with `<?xml version="1.0" encoding="UTF-8"?>`.
    pub fn declaration(mut self, enabled: bool) -> Self {
        self.declaration = enabled;
        self
    }

    pub fn encode(&self, envelope: &Envelope) -> Result<Vec<u8>, SoapError> {
        let mut writer = ElementWriter::new(parse_indent(&self.indent)?);
        if self.declaration {
            writer.declaration()?;
        }

        writer.start(&ENVELOPE_NAME)?;

        if let Some(content) = envelope.header_content() {
            writer.start(&HEADER_NAME)?;
            writer.element(&content.name(), content)?;
            writer.end(&HEADER_NAME)?;
        }

        writer.start(&BODY_NAME)?;
        match (&envelope.body.fault, &envelope.body.content) {
            (Some(fault), _) => writer.element(&Fault::NAME, fault)?,
            (None, Some(content)) => writer.element(&content.name(), content)?,
            (None, None) => {}
        }
        writer.end(&BODY_NAME)?;

        writer.end(&ENVELOPE_NAME)?;
        Ok(writer.into_inner())
    }
}

/// Encodes `envelope`, indented with `indent` unless it is empty.
pub fn encode(envelope: &Envelope, indent: &str) -> Result<Vec<u8>, SoapError> {
    Encoder::new().indent(indent).encode(envelope)
}

fn parse_indent(indent: &str) -> Result<Option<(u8, usize)>, SoapError> {
    let bytes = indent.as_bytes();
    let Some(&unit) = bytes.first() else {
        return Ok(None);
    };
    if !matches!(unit, b' ' | b'\t') || bytes.iter().any(|&b| b != unit) {
        return Err(SoapError::serialization(format!(
            "indent {:?} must repeat a single space or tab",
            indent
        )));
    }
    Ok(Some((unit, bytes.len())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Auth, Content, ProcessARequest};

    fn compact(envelope: &Envelope) -> String {
        String::from_utf8(encode(envelope, "").unwrap()).unwrap()
    }

    #[test]
    fn test_empty_body() {
        let envelope = Envelope::default();
        assert_eq!(
            compact(&envelope),
            r#"<Envelope xmlns="http://schemas.xmlsoap.org/soap/envelope"><Body></Body></Envelope>"#
        );
    }

    #[test]
    fn test_header_is_written_only_with_content() {
        let mut envelope = Envelope::new(ProcessARequest {
            request_id: "1".into(),
        });
        envelope.header = Some(Default::default());
        assert!(!compact(&envelope).contains("<Header>"));

        let envelope = envelope.with_header(Auth {
            user_id: "u".into(),
            pass: String::new(),
        });
        assert_eq!(
            compact(&envelope),
            concat!(
                r#"<Envelope xmlns="http://schemas.xmlsoap.org/soap/envelope">"#,
                r#"<Header><Auth xmlns="http://example.com/ns"><UserID>u</UserID><Pass></Pass></Auth></Header>"#,
                r#"<Body><ProcessARequest xmlns="http://example.com/ns"><RequestId>1</RequestId></ProcessARequest></Body>"#,
                r#"</Envelope>"#
            )
        );
    }

    #[test]
    fn test_fault_takes_precedence_and_uses_fault_namespace() {
        let mut envelope = Envelope::fault(Fault::new("Server", "boom"));
        envelope.body.content = Some(Content::from(ProcessARequest::default()));

        assert_eq!(
            compact(&envelope),
            concat!(
                r#"<Envelope xmlns="http://schemas.xmlsoap.org/soap/envelope"><Body>"#,
                r#"<Fault xmlns="http://schemas.xmlsoap.org/soap/envelope/"><faultcode>Server</faultcode><faultstring>boom</faultstring></Fault>"#,
                r#"</Body></Envelope>"#
            )
        );
    }

    #[test]
    fn test_indented_output() {
        let envelope = Envelope::new(ProcessARequest {
            request_id: "7".into(),
        });
        let xml = String::from_utf8(encode(&envelope, "\t").unwrap()).unwrap();
        assert!(xml.contains("\n\t<Body>"), "{xml}");
        assert!(xml.contains("\n\t\t\t<RequestId>7</RequestId>"), "{xml}");
    }

    #[test]
    fn test_declaration() {
        let xml = Encoder::new()
            .declaration(true)
            .encode(&Envelope::default())
            .unwrap();
        assert!(xml.starts_with(br#"<?xml version="1.0" encoding="UTF-8"?>"#));
    }

    #[test]
    fn test_invalid_indent_is_rejected() {
        for indent in [" \t", "-", "  x"] {
            let err = encode(&Envelope::default(), indent).unwrap_err();
            assert!(matches!(err, SoapError::Serialization(_)), "{indent:?}");
        }
    }

    #[test]
    fn test_invalid_character_is_rejected() {
        let envelope = Envelope::new(ProcessARequest {
            request_id: "\u{0}".into(),
        });
        let err = encode(&envelope, "").unwrap_err();
        assert!(matches!(err, SoapError::Serialization(_)));
    }
}
