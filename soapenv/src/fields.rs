//! Element codec shared by every payload type.
//!
//! A payload describes its children through [`XmlFields`]: on the write
//! side it pushes leaves and nested elements into an [`ElementWriter`], on
//! the read side it is offered each child element through a
//! [`FieldReader`] and claims the ones it knows.
//!
//! Composition is explicit: a type holding a shared field group (see
//! [`CommonResponse`](crate::CommonResponse)) forwards both calls to it,
//! which places the group's fields directly under the outer element.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::token::{Token, TokenSource};
use crate::{QualifiedName, SoapError};

/// A set of fields written as direct children of an element.
pub trait XmlFields {
    /// Writes the fields in declaration order.
    fn write_fields(&self, writer: &mut ElementWriter) -> Result<(), SoapError>;

    /// Offers one child element. Returns `Ok(true)` if the field was claimed.
    ///
    /// Fields are matched on [`FieldReader::local`]: they carry no namespace
    /// of their own and inherit the enclosing one on the wire.
    fn read_field(&mut self, field: &mut FieldReader<'_>) -> Result<bool, SoapError>;
}

/// A field set that is serialized as a root element with a fixed name.
pub trait Payload: XmlFields {
    const NAME: QualifiedName;
}

/// Streaming writer keeping track of the default namespace in scope.
pub struct ElementWriter {
    writer: Writer<Vec<u8>>,
    scopes: Vec<String>,
}

impl ElementWriter {
    pub(crate) fn new(indent: Option<(u8, usize)>) -> Self {
        let writer = match indent {
            Some((ch, size)) => Writer::new_with_indent(Vec::new(), ch, size),
            None => Writer::new(Vec::new()),
        };
        Self {
            writer,
            scopes: Vec::new(),
        }
    }

    pub(crate) fn into_inner(self) -> Vec<u8> {
        self.writer.into_inner()
    }

    pub(crate) fn declaration(&mut self) -> Result<(), SoapError> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Ok(())
    }

    /// Opens an element, declaring its namespace as the default one when
    /// it differs from the namespace inherited from the parent.
    pub fn start(&mut self, name: &QualifiedName) -> Result<(), SoapError> {
        check_local_name(name.local())?;

        let mut start = BytesStart::new(name.local());
        if name.namespace() != self.default_namespace() {
            start.push_attribute(("xmlns", name.namespace()));
        }
        self.scopes.push(name.namespace().to_string());
        self.writer.write_event(Event::Start(start))?;
        Ok(())
    }

    pub fn end(&mut self, name: &QualifiedName) -> Result<(), SoapError> {
        self.scopes.pop();
        self.writer
            .write_event(Event::End(BytesEnd::new(name.local())))?;
        Ok(())
    }

    /// Writes a whole element: start tag, fields, end tag.
    pub fn element(&mut self, name: &QualifiedName, fields: &dyn XmlFields) -> Result<(), SoapError> {
        self.start(name)?;
        fields.write_fields(self)?;
        self.end(name)
    }

    pub fn payload<P: Payload>(&mut self, payload: &P) -> Result<(), SoapError> {
        self.element(&P::NAME, payload)
    }

    /// Writes a nested payload, or nothing when absent.
    pub fn optional<P: Payload>(&mut self, payload: Option<&P>) -> Result<(), SoapError> {
        match payload {
            Some(p) => self.payload(p),
            None => Ok(()),
        }
    }

    /// Writes `<local>value</local>` in the inherited namespace.
    ///
    /// With `omit_empty`, an empty value produces no element at all.
    pub fn leaf(&mut self, local: &str, value: &str, omit_empty: bool) -> Result<(), SoapError> {
        if omit_empty && value.is_empty() {
            return Ok(());
        }
        check_local_name(local)?;
        check_text(local, value)?;

        self.writer
            .write_event(Event::Start(BytesStart::new(local)))?;
        // An empty text event keeps `<a></a>` on one line when indenting.
        self.writer.write_event(Event::Text(BytesText::new(value)))?;
        self.writer.write_event(Event::End(BytesEnd::new(local)))?;
        Ok(())
    }

    /// Integer leaf; with `omit_empty` a zero value is skipped.
    pub fn leaf_int(&mut self, local: &str, value: i64, omit_empty: bool) -> Result<(), SoapError> {
        if omit_empty && value == 0 {
            return Ok(());
        }
        self.leaf(local, &value.to_string(), false)
    }

    fn default_namespace(&self) -> &str {
        self.scopes.last().map(String::as_str).unwrap_or("")
    }
}

/// Cursor over one child element, positioned right after its start tag.
///
/// Each reader is consumed at most once; whatever the payload leaves
/// unread is skipped once the payload returns.
pub struct FieldReader<'a> {
    source: &'a mut dyn TokenSource,
    name: QualifiedName,
    consumed: bool,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(source: &'a mut dyn TokenSource, name: QualifiedName) -> Self {
        Self {
            source,
            name,
            consumed: false,
        }
    }

    pub fn name(&self) -> &QualifiedName {
        &self.name
    }

    pub fn local(&self) -> &str {
        self.name.local()
    }

    /// Reads the character data directly under the element.
    ///
    /// Nested elements are skipped, comments are ignored.
    pub fn text(&mut self) -> Result<String, SoapError> {
        self.claim()?;

        let mut text = String::new();
        let mut depth = 0usize;
        loop {
            match self.source.next_token()? {
                Some(Token::Text(chunk)) if depth == 0 => text.push_str(&chunk),
                Some(Token::Start(_)) => depth += 1,
                Some(Token::End(_)) => {
                    if depth == 0 {
                        return Ok(text);
                    }
                    depth -= 1;
                }
                Some(_) => {}
                None => return Err(SoapError::unexpected_eof()),
            }
        }
    }

    /// Reads the element text as a base-10 integer.
    pub fn int(&mut self) -> Result<i64, SoapError> {
        let text = self.text()?;
        text.trim().parse::<i64>().map_err(|e| {
            SoapError::decode(format!(
                "invalid integer `{}` in element {}: {}",
                text, self.name, e
            ))
        })
    }

    /// Decodes the element into a nested payload.
    ///
    /// The element name must match `P::NAME` exactly, namespace included.
    pub fn payload<P: Payload>(&mut self, dest: &mut P) -> Result<(), SoapError> {
        if self.name != P::NAME {
            return Err(SoapError::decode(format!(
                "expected element {} but found {}",
                P::NAME,
                self.name
            )));
        }
        self.claim()?;
        decode_fields(&mut *self.source, dest)
    }

    /// Skips the rest of the element if nobody read it.
    pub(crate) fn finish(mut self) -> Result<(), SoapError> {
        if self.consumed {
            return Ok(());
        }
        self.consumed = true;
        skip_element(&mut *self.source)
    }

    fn claim(&mut self) -> Result<(), SoapError> {
        if self.consumed {
            return Err(SoapError::decode(format!(
                "element {} was already consumed",
                self.name
            )));
        }
        self.consumed = true;
        Ok(())
    }
}

/// Feeds every child of the current element to `dest`, up to the end tag.
///
/// The source must be positioned right after the element's start tag.
/// Unclaimed children are skipped, text and comments are ignored.
pub(crate) fn decode_fields(
    source: &mut dyn TokenSource,
    dest: &mut dyn XmlFields,
) -> Result<(), SoapError> {
    loop {
        match source.next_token()? {
            Some(Token::Start(name)) => {
                let mut field = FieldReader::new(&mut *source, name);
                dest.read_field(&mut field)?;
                field.finish()?;
            }
            Some(Token::End(_)) => return Ok(()),
            Some(Token::Text(_)) | Some(Token::Comment(_)) => {}
            None => return Err(SoapError::unexpected_eof()),
        }
    }
}

/// Consumes tokens up to and including the end tag of the current element.
pub(crate) fn skip_element(source: &mut dyn TokenSource) -> Result<(), SoapError> {
    let mut depth = 0usize;
    loop {
        match source.next_token()? {
            Some(Token::Start(_)) => depth += 1,
            Some(Token::End(_)) => {
                if depth == 0 {
                    return Ok(());
                }
                depth -= 1;
            }
            Some(_) => {}
            None => return Err(SoapError::unexpected_eof()),
        }
    }
}

fn check_local_name(local: &str) -> Result<(), SoapError> {
    let mut chars = local.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_alphabetic() || first == '_')
                && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(SoapError::serialization(format!(
            "`{}` is not a valid element name",
            local
        )))
    }
}

fn check_text(local: &str, value: &str) -> Result<(), SoapError> {
    let invalid = value.chars().find(|&c| {
        !matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
    });
    match invalid {
        Some(c) => Err(SoapError::serialization(format!(
            "character U+{:04X} in element `{}` is not allowed in XML 1.0",
            c as u32, local
        ))),
        None => Ok(()),
    }
}
