//! The closed set of types that may occupy a header or body slot.
//!
//! Every variant is a [`Payload`] with a fixed qualified name, which is what
//! the decoder checks an incoming element against. Register a new payload
//! type by adding it to the `content_registry!` invocation below.

use crate::fields::{ElementWriter, FieldReader, Payload, XmlFields, decode_fields};
use crate::token::TokenSource;
use crate::{
    Auth, ConcreteResponse, Fault, Name, Person, ProcessARequest, ProcessAResponse,
    ProcessBRequest, ProcessBResponse, QualifiedName, SoapError,
};

macro_rules! content_registry {
    ($($variant:ident),+ $(,)?) => {
        /// A registered payload value.
        ///
        /// Before decoding, a zero-valued variant acts as a placeholder telling
        /// the decoder which shape to expect.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum Content {
            $($variant($variant),)+
        }

        impl Content {
            /// The fixed element name of the held variant.
            pub fn name(&self) -> QualifiedName {
                match self {
                    $(Content::$variant(_) => $variant::NAME,)+
                }
            }

            /// The zero-valued placeholder registered under `name`, if any.
            pub fn placeholder_for(name: &QualifiedName) -> Option<Content> {
                $(
                    if *name == $variant::NAME {
                        return Some(Content::$variant($variant::default()));
                    }
                )+
                None
            }

            pub fn registered_names() -> Vec<QualifiedName> {
                vec![$($variant::NAME),+]
            }

            fn fields(&self) -> &dyn XmlFields {
                match self {
                    $(Content::$variant(value) => value,)+
                }
            }

            fn fields_mut(&mut self) -> &mut dyn XmlFields {
                match self {
                    $(Content::$variant(value) => value,)+
                }
            }
        }

        $(
            impl From<$variant> for Content {
                fn from(value: $variant) -> Self {
                    Content::$variant(value)
                }
            }

            impl TryFrom<Content> for $variant {
                type Error = Content;

                fn try_from(content: Content) -> Result<Self, Content> {
                    match content {
                        Content::$variant(value) => Ok(value),
                        other => Err(other),
                    }
                }
            }
        )+
    };
}

content_registry!(
    Fault,
    Name,
    Auth,
    Person,
    ProcessARequest,
    ProcessBRequest,
    ConcreteResponse,
    ProcessAResponse,
    ProcessBResponse,
);

impl Content {
    /// Decodes the element that just started into this placeholder.
    ///
    /// `name` must equal the placeholder's own name, namespace included.
    pub(crate) fn decode_element(
        &mut self,
        name: &QualifiedName,
        source: &mut dyn TokenSource,
    ) -> Result<(), SoapError> {
        let expected = self.name();
        if *name != expected {
            return Err(SoapError::decode(format!(
                "expected element {} but found {}",
                expected, name
            )));
        }
        decode_fields(source, self.fields_mut())
    }
}

impl XmlFields for Content {
    fn write_fields(&self, writer: &mut ElementWriter) -> Result<(), SoapError> {
        self.fields().write_fields(writer)
    }

    fn read_field(&mut self, field: &mut FieldReader<'_>) -> Result<bool, SoapError> {
        self.fields_mut().read_field(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EXAMPLE_NS, SOAP_ENV_NS, SOAP_FAULT_NS};

    #[test]
    fn test_placeholder_lookup() {
        let name = QualifiedName::new(EXAMPLE_NS, "ProcessBResponse");
        assert_eq!(
            Content::placeholder_for(&name),
            Some(Content::ProcessBResponse(ProcessBResponse::default()))
        );

        let fault = QualifiedName::new(SOAP_FAULT_NS, "Fault");
        assert_eq!(
            Content::placeholder_for(&fault),
            Some(Content::Fault(Fault::default()))
        );
    }

    #[test]
    fn test_lookup_is_namespace_exact() {
        assert_eq!(
            Content::placeholder_for(&QualifiedName::new(SOAP_ENV_NS, "Fault")),
            None
        );
        assert_eq!(
            Content::placeholder_for(&QualifiedName::unqualified("Person")),
            None
        );
    }

    #[test]
    fn test_every_registered_name_has_a_placeholder() {
        let names = Content::registered_names();
        assert_eq!(names.len(), 9);
        for name in names {
            let placeholder = Content::placeholder_for(&name).unwrap();
            assert_eq!(placeholder.name(), name);
        }
    }

    #[test]
    fn test_try_from_returns_other_variants() {
        let content = Content::from(Person::default());
        let back: Result<Auth, Content> = content.try_into();
        assert_eq!(back.unwrap_err(), Content::Person(Person::default()));
    }
}
