use crate::common::QName;
use crate::mapping::{EntityType, PropertyKind};

/// A mapped property with its resolved qualified element name.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistentProperty {
    name: String,
    qname: QName,
    kind: PropertyKind,
    collection_selector: bool,
}

impl PersistentProperty {
    pub(crate) fn new(name: &str, qname: QName, kind: PropertyKind, collection_selector: bool) -> Self {
        PersistentProperty {
            name: name.to_string(),
            qname,
            kind,
            collection_selector,
        }
    }

    /// Field name on the Rust type.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Qualified element name in the stored document.
    pub fn qname(&self) -> &QName {
        &self.qname
    }

    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    pub fn is_collection(&self) -> bool {
        self.kind == PropertyKind::Collection
    }

    pub fn is_entity(&self) -> bool {
        matches!(self.kind, PropertyKind::Entity(_))
    }

    /// Type of the nested entity, for entity properties.
    pub fn entity_type(&self) -> Option<EntityType> {
        match self.kind {
            PropertyKind::Entity(entity_type) => Some(entity_type),
            _ => None,
        }
    }

    pub fn is_collection_selector(&self) -> bool {
        self.collection_selector
    }
}
