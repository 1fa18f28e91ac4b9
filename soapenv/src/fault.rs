use crate::fields::{ElementWriter, FieldReader, Payload, XmlFields};
use crate::{QualifiedName, SOAP_FAULT_NS, SoapError};

/// A SOAP 1.1 fault report.
///
/// Every part is optional on the wire; an empty string stands for an
/// absent element and is omitted when encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fault {
    pub code: String,
    pub string: String,
    pub actor: String,
    pub detail: String,
}

impl Fault {
    pub fn new(code: impl Into<String>, string: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            string: string.into(),
            ..Default::default()
        }
    }

    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = actor.into();
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }
}

impl XmlFields for Fault {
    fn write_fields(&self, writer: &mut ElementWriter) -> Result<(), SoapError> {
        writer.leaf("faultcode", &self.code, true)?;
        writer.leaf("faultstring", &self.string, true)?;
        writer.leaf("faultactor", &self.actor, true)?;
        writer.leaf("detail", &self.detail, true)
    }

    fn read_field(&mut self, field: &mut FieldReader<'_>) -> Result<bool, SoapError> {
        match field.local() {
            "faultcode" => self.code = field.text()?,
            "faultstring" => self.string = field.text()?,
            "faultactor" => self.actor = field.text()?,
            "detail" => self.detail = field.text()?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

impl Payload for Fault {
    /// Faults are written under the trailing-slash namespace, not the
    /// envelope namespace, so that a `Strict` decoder recognizes them.
    const NAME: QualifiedName = QualifiedName::from_static(SOAP_FAULT_NS, "Fault");
}

impl std::fmt::Display for Fault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.string)?;
        if !self.detail.is_empty() {
            write!(f, " ({})", self.detail)?;
        }
        Ok(())
    }
}
