//! Pull interface over an XML token stream.
//!
//! The decoder never talks to the XML library directly: it pulls
//! [`Token`]s from a [`TokenSource`]. [`XmlTokenReader`] is the quick-xml
//! backed source used for raw bytes, [`TokenList`] replays a prepared
//! sequence.

use std::collections::VecDeque;

use quick_xml::events::{BytesRef, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

use crate::{QualifiedName, SoapError};

/// One unit of the XML stream, with element names already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Start(QualifiedName),
    End(QualifiedName),
    Text(String),
    Comment(String),
}

/// Source of tokens. `Ok(None)` marks the end of the stream.
pub trait TokenSource {
    fn next_token(&mut self) -> Result<Option<Token>, SoapError>;
}

impl<T: TokenSource + ?Sized> TokenSource for &mut T {
    fn next_token(&mut self) -> Result<Option<Token>, SoapError> {
        (**self).next_token()
    }
}

/// Namespace-aware token reader over an in-memory document.
///
/// - `<a/>` is reported as a start token followed by an end token
/// - entity and character references are resolved into text
/// - the XML declaration, processing instructions and doctype are skipped
pub struct XmlTokenReader<'i> {
    reader: NsReader<&'i [u8]>,
}

impl<'i> XmlTokenReader<'i> {
    pub fn new(input: &'i [u8]) -> Self {
        let mut reader = NsReader::from_reader(input);
        let config = reader.config_mut();
        config.expand_empty_elements = true;
        config.trim_text(false);
        Self { reader }
    }
}

impl TokenSource for XmlTokenReader<'_> {
    fn next_token(&mut self) -> Result<Option<Token>, SoapError> {
        loop {
            let (resolved, event) = self.reader.read_resolved_event()?;
            let token = match event {
                Event::Start(start) => Token::Start(qualify(resolved, start.local_name().as_ref())?),
                Event::End(end) => Token::End(qualify(resolved, end.local_name().as_ref())?),
                Event::Text(text) => Token::Text(unescape_text(&text)?),
                Event::CData(data) => Token::Text(std::str::from_utf8(&data)?.to_string()),
                Event::GeneralRef(reference) => Token::Text(resolve_reference(&reference)?),
                Event::Comment(comment) => {
                    Token::Comment(std::str::from_utf8(&comment)?.to_string())
                }
                Event::Eof => return Ok(None),
                _ => continue,
            };
            return Ok(Some(token));
        }
    }
}

/// A prepared token sequence, mostly useful to drive the decoder without XML.
#[derive(Debug, Default, Clone)]
pub struct TokenList {
    tokens: VecDeque<Token>,
}

impl TokenList {
    pub fn new(tokens: impl IntoIterator<Item = Token>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }
}

impl From<Vec<Token>> for TokenList {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}

impl TokenSource for TokenList {
    fn next_token(&mut self) -> Result<Option<Token>, SoapError> {
        Ok(self.tokens.pop_front())
    }
}

fn qualify(resolved: ResolveResult<'_>, local: &[u8]) -> Result<QualifiedName, SoapError> {
    let local = std::str::from_utf8(local)?;
    match resolved {
        ResolveResult::Bound(Namespace(namespace)) => {
            Ok(QualifiedName::new(std::str::from_utf8(namespace)?, local))
        }
        ResolveResult::Unbound => Ok(QualifiedName::unqualified(local)),
        ResolveResult::Unknown(prefix) => Err(SoapError::decode(format!(
            "undeclared namespace prefix `{}` on element `{}`",
            String::from_utf8_lossy(&prefix),
            local
        ))),
    }
}

fn unescape_text(raw: &[u8]) -> Result<String, SoapError> {
    let raw = std::str::from_utf8(raw)?;
    quick_xml::escape::unescape(raw)
        .map(|text| text.into_owned())
        .map_err(|e| SoapError::decode(format!("invalid text content: {}", e)))
}

fn resolve_reference(reference: &BytesRef<'_>) -> Result<String, SoapError> {
    let name = std::str::from_utf8(reference)?;

    match reference.resolve_char_ref() {
        Ok(Some(ch)) => return Ok(ch.to_string()),
        Ok(None) => {}
        Err(e) => {
            return Err(SoapError::decode(format!(
                "invalid character reference `&{};`: {}",
                name, e
            )));
        }
    }

    quick_xml::escape::resolve_predefined_entity(name)
        .map(str::to_string)
        .ok_or_else(|| SoapError::decode(format!("unknown entity `&{};`", name)))
}
