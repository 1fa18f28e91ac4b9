//! Application payloads of the `http://example.com/ns` namespace.

use crate::fields::{ElementWriter, FieldReader, Payload, XmlFields};
use crate::{EXAMPLE_NS, QualifiedName, SoapError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Name {
    pub first: String,
    pub last: String,
}

impl XmlFields for Name {
    fn write_fields(&self, writer: &mut ElementWriter) -> Result<(), SoapError> {
        writer.leaf("First", &self.first, true)?;
        writer.leaf("Last", &self.last, true)
    }

    fn read_field(&mut self, field: &mut FieldReader<'_>) -> Result<bool, SoapError> {
        match field.local() {
            "First" => self.first = field.text()?,
            "Last" => self.last = field.text()?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

impl Payload for Name {
    const NAME: QualifiedName = QualifiedName::from_static(EXAMPLE_NS, "Name");
}

/// Credentials carried in the envelope header. Both fields are always written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Auth {
    pub user_id: String,
    pub pass: String,
}

impl XmlFields for Auth {
    fn write_fields(&self, writer: &mut ElementWriter) -> Result<(), SoapError> {
        writer.leaf("UserID", &self.user_id, false)?;
        writer.leaf("Pass", &self.pass, false)
    }

    fn read_field(&mut self, field: &mut FieldReader<'_>) -> Result<bool, SoapError> {
        match field.local() {
            "UserID" => self.user_id = field.text()?,
            "Pass" => self.pass = field.text()?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

impl Payload for Auth {
    const NAME: QualifiedName = QualifiedName::from_static(EXAMPLE_NS, "Auth");
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Person {
    pub id: i64,
    pub name: Option<Name>,
    pub age: i64,
}

impl XmlFields for Person {
    fn write_fields(&self, writer: &mut ElementWriter) -> Result<(), SoapError> {
        writer.leaf_int("Id", self.id, true)?;
        writer.optional(self.name.as_ref())?;
        writer.leaf_int("Age", self.age, true)
    }

    fn read_field(&mut self, field: &mut FieldReader<'_>) -> Result<bool, SoapError> {
        match field.local() {
            "Id" => self.id = field.int()?,
            "Name" => {
                let mut name = Name::default();
                field.payload(&mut name)?;
                self.name = Some(name);
            }
            "Age" => self.age = field.int()?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

impl Payload for Person {
    const NAME: QualifiedName = QualifiedName::from_static(EXAMPLE_NS, "Person");
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessARequest {
    pub request_id: String,
}

impl XmlFields for ProcessARequest {
    fn write_fields(&self, writer: &mut ElementWriter) -> Result<(), SoapError> {
        writer.leaf("RequestId", &self.request_id, false)
    }

    fn read_field(&mut self, field: &mut FieldReader<'_>) -> Result<bool, SoapError> {
        if field.local() == "RequestId" {
            self.request_id = field.text()?;
            return Ok(true);
        }
        Ok(false)
    }
}

impl Payload for ProcessARequest {
    const NAME: QualifiedName = QualifiedName::from_static(EXAMPLE_NS, "ProcessARequest");
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessBRequest {
    pub request_id: String,
}

impl XmlFields for ProcessBRequest {
    fn write_fields(&self, writer: &mut ElementWriter) -> Result<(), SoapError> {
        writer.leaf("RequestId", &self.request_id, false)
    }

    fn read_field(&mut self, field: &mut FieldReader<'_>) -> Result<bool, SoapError> {
        if field.local() == "RequestId" {
            self.request_id = field.text()?;
            return Ok(true);
        }
        Ok(false)
    }
}

impl Payload for ProcessBRequest {
    const NAME: QualifiedName = QualifiedName::from_static(EXAMPLE_NS, "ProcessBRequest");
}
