//! Response payloads built around a shared result header.
//!
//! [`CommonResponse`] is not an element of its own. Types that hold one
//! forward both [`XmlFields`] calls to it first, so `Code` and `Detail`
//! appear as direct children of the concrete element, ahead of its own
//! fields, and are routed back into the composed value on decode.

use crate::fields::{ElementWriter, FieldReader, Payload, XmlFields};
use crate::{EXAMPLE_NS, QualifiedName, SoapError};

/// Result code and detail shared by every response type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonResponse {
    pub code: String,
    pub detail: String,
}

impl CommonResponse {
    pub fn new(code: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            detail: detail.into(),
        }
    }

    pub fn success() -> Self {
        Self::new("200", "success")
    }
}

impl XmlFields for CommonResponse {
    fn write_fields(&self, writer: &mut ElementWriter) -> Result<(), SoapError> {
        writer.leaf("Code", &self.code, true)?;
        writer.leaf("Detail", &self.detail, true)
    }

    fn read_field(&mut self, field: &mut FieldReader<'_>) -> Result<bool, SoapError> {
        match field.local() {
            "Code" => self.code = field.text()?,
            "Detail" => self.detail = field.text()?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConcreteResponse {
    pub common: CommonResponse,
    pub additional_message: String,
}

impl XmlFields for ConcreteResponse {
    fn write_fields(&self, writer: &mut ElementWriter) -> Result<(), SoapError> {
        self.common.write_fields(writer)?;
        writer.leaf("AdditionalMessage", &self.additional_message, true)
    }

    fn read_field(&mut self, field: &mut FieldReader<'_>) -> Result<bool, SoapError> {
        if self.common.read_field(field)? {
            return Ok(true);
        }
        match field.local() {
            "AdditionalMessage" => self.additional_message = field.text()?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

impl Payload for ConcreteResponse {
    const NAME: QualifiedName = QualifiedName::from_static(EXAMPLE_NS, "ConcreteResponse");
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessAResponse {
    pub common: CommonResponse,
    pub id: String,
    pub process: String,
}

impl XmlFields for ProcessAResponse {
    fn write_fields(&self, writer: &mut ElementWriter) -> Result<(), SoapError> {
        self.common.write_fields(writer)?;
        writer.leaf("Id", &self.id, false)?;
        writer.leaf("Process", &self.process, false)
    }

    fn read_field(&mut self, field: &mut FieldReader<'_>) -> Result<bool, SoapError> {
        if self.common.read_field(field)? {
            return Ok(true);
        }
        match field.local() {
            "Id" => self.id = field.text()?,
            "Process" => self.process = field.text()?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

impl Payload for ProcessAResponse {
    const NAME: QualifiedName = QualifiedName::from_static(EXAMPLE_NS, "ProcessAResponse");
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessBResponse {
    pub common: CommonResponse,
    pub id: String,
    pub process: String,
    pub amount: String,
}

impl XmlFields for ProcessBResponse {
    fn write_fields(&self, writer: &mut ElementWriter) -> Result<(), SoapError> {
        self.common.write_fields(writer)?;
        writer.leaf("Id", &self.id, false)?;
        writer.leaf("Process", &self.process, false)?;
        writer.leaf("Amount", &self.amount, false)
    }

    fn read_field(&mut self, field: &mut FieldReader<'_>) -> Result<bool, SoapError> {
        if self.common.read_field(field)? {
            return Ok(true);
        }
        match field.local() {
            "Id" => self.id = field.text()?,
            "Process" => self.process = field.text()?,
            "Amount" => self.amount = field.text()?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

impl Payload for ProcessBResponse {
    const NAME: QualifiedName = QualifiedName::from_static(EXAMPLE_NS, "ProcessBResponse");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::decode_fields;
    use crate::token::XmlTokenReader;
    use crate::token::TokenSource;

    fn write<P: Payload>(payload: &P) -> String {
        let mut writer = ElementWriter::new(None);
        writer.payload(payload).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_common_fields_are_flattened_first() {
        let response = ProcessAResponse {
            common: CommonResponse::success(),
            id: String::new(),
            process: "X".into(),
        };

        assert_eq!(
            write(&response),
            r#"<ProcessAResponse xmlns="http://example.com/ns"><Code>200</Code><Detail>success</Detail><Id></Id><Process>X</Process></ProcessAResponse>"#
        );
    }

    #[test]
    fn test_own_fields_are_always_written() {
        let response = ProcessAResponse {
            common: CommonResponse::success(),
            ..Default::default()
        };
        assert_eq!(
            write(&response),
            r#"<ProcessAResponse xmlns="http://example.com/ns"><Code>200</Code><Detail>success</Detail><Id></Id><Process></Process></ProcessAResponse>"#
        );

        let response = ProcessBResponse::default();
        assert_eq!(
            write(&response),
            r#"<ProcessBResponse xmlns="http://example.com/ns"><Id></Id><Process></Process><Amount></Amount></ProcessBResponse>"#
        );
    }

    #[test]
    fn test_common_fields_are_routed_back() {
        let xml = br#"<ConcreteResponse xmlns="http://example.com/ns">
            <AdditionalMessage>hi</AdditionalMessage>
            <Detail>ok</Detail>
            <Code>201</Code>
        </ConcreteResponse>"#;

        let mut reader = XmlTokenReader::new(xml);
        reader.next_token().unwrap();
        let mut response = ConcreteResponse::default();
        decode_fields(&mut reader, &mut response).unwrap();

        assert_eq!(response.common, CommonResponse::new("201", "ok"));
        assert_eq!(response.additional_message, "hi");
    }
}
