//! Namespace-qualified element names.

use std::borrow::Cow;
use std::fmt;

/// A `(namespace, local-name)` pair identifying an XML element.
///
/// Two names are equal iff both parts match exactly: the comparison is
/// case-sensitive and no normalization (trailing slash, scheme case, ...)
/// is applied to the namespace.
///
/// An empty namespace stands for an unqualified element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    namespace: Cow<'static, str>,
    local: Cow<'static, str>,
}

impl QualifiedName {
    /// Builds a name from static parts, usable in `const` items.
    pub const fn from_static(namespace: &'static str, local: &'static str) -> Self {
        Self {
            namespace: Cow::Borrowed(namespace),
            local: Cow::Borrowed(local),
        }
    }

    pub fn new(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            namespace: Cow::Owned(namespace.into()),
            local: Cow::Owned(local.into()),
        }
    }

    /// An element with no namespace.
    pub fn unqualified(local: impl Into<String>) -> Self {
        Self::new(String::new(), local)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn local(&self) -> &str {
        &self.local
    }

    pub fn is_qualified(&self) -> bool {
        !self.namespace.is_empty()
    }

    /// Compares against a borrowed pair without allocating.
    pub fn matches(&self, namespace: &str, local: &str) -> bool {
        self.namespace == namespace && self.local == local
    }
}

impl fmt::Display for QualifiedName {
    /// Clark notation: `{namespace}local`, or just `local` when unqualified.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_qualified() {
            write!(f, "{{{}}}{}", self.namespace, self.local)
        } else {
            f.write_str(&self.local)
        }
    }
}
