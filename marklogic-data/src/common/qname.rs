use std::fmt::{Display, Formatter};

/// Qualified name of an XML element: namespace URI plus local part.
///
/// An empty namespace URI means the element is unqualified. `Display` uses
/// Clark notation, `{namespace}local`, or just `local` when unqualified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct QName {
    namespace_uri: String,
    local_part: String,
}

impl QName {
    pub fn new(namespace_uri: &str, local_part: &str) -> Self {
        QName {
            namespace_uri: namespace_uri.to_string(),
            local_part: local_part.to_string(),
        }
    }

    /// Creates a name without namespace.
    pub fn local(local_part: &str) -> Self {
        QName::new("", local_part)
    }

    pub fn namespace_uri(&self) -> &str {
        &self.namespace_uri
    }

    pub fn local_part(&self) -> &str {
        &self.local_part
    }

    pub fn is_qualified(&self) -> bool {
        !self.namespace_uri.is_empty()
    }
}

impl Display for QName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_qualified() {
            write!(f, "{{{}}}{}", self.namespace_uri, self.local_part)
        } else {
            write!(f, "{}", self.local_part)
        }
    }
}
