use indexmap::IndexMap;

use crate::common::{decapitalize, QName};
use crate::errors::{ErrorKind, MarklogicError, MarklogicResult};
use crate::mapping::{EntityDescriptor, EntityType, MappingConfig, PersistentProperty, PropertyKind};
use crate::query::Template;

/// URI template used when an entity does not declare one.
pub const DEFAULT_URI_TEMPLATE: &str = "/content/#{entityClass}/#{id}.xml";

/// Resolved, immutable mapping metadata of an entity type.
///
/// # Purpose
/// Holds everything the query layer needs about a domain type: qualified
/// names, collection and URI templates, id property and the ordered property
/// list. Built once per type by the
/// [MappingContext](crate::mapping::MappingContext) and shared read-only.
///
/// # Characteristics
/// - Properties keep declaration order; lookup by name is O(1)
/// - Templates are validated when the entity is built, not when used
/// - Property namespaces default to the entity namespace (qualified form)
#[derive(Debug, Clone)]
pub struct PersistentEntity {
    entity_type: EntityType,
    name: String,
    qname: QName,
    default_collection: Option<String>,
    uri_template: String,
    id_property: Option<String>,
    id_in_property_fragment: bool,
    properties: IndexMap<String, PersistentProperty>,
}

impl PersistentEntity {
    /// Builds the entity from its static descriptor.
    ///
    /// # Errors
    /// - `ConfigurationError` for an empty name, a duplicate property, a
    ///   missing or non-scalar id property, or a nested entity marked as
    ///   collection selector
    /// - `ExpressionError` for a malformed collection or URI template
    pub(crate) fn resolve(
        entity_type: EntityType,
        descriptor: EntityDescriptor,
        config: &MappingConfig,
    ) -> MarklogicResult<Self> {
        if descriptor.name().trim().is_empty() {
            log::error!("Entity descriptor of {} has an empty name", entity_type.type_name());
            return Err(MarklogicError::new(
                &format!("Entity descriptor of {} has an empty name", entity_type.type_name()),
                ErrorKind::ConfigurationError,
            ));
        }

        let namespace = descriptor
            .get_namespace()
            .or(config.default_namespace())
            .unwrap_or_default()
            .to_string();
        let root_name = descriptor
            .get_root_name()
            .map(str::to_string)
            .unwrap_or_else(|| decapitalize(descriptor.name()));

        let mut properties = IndexMap::with_capacity(descriptor.properties().len());
        for property in descriptor.properties() {
            if properties.contains_key(property.name()) {
                log::error!("Duplicate property '{}' on entity {}", property.name(), descriptor.name());
                return Err(MarklogicError::new(
                    &format!("Duplicate property '{}' on entity {}", property.name(), descriptor.name()),
                    ErrorKind::ConfigurationError,
                ));
            }

            if property.is_collection_selector() && matches!(property.kind(), PropertyKind::Entity(_)) {
                log::error!("Nested entity property '{}' cannot select collections", property.name());
                return Err(MarklogicError::new(
                    &format!(
                        "Property '{}' of {} is a nested entity and cannot be a collection selector",
                        property.name(),
                        descriptor.name()
                    ),
                    ErrorKind::ConfigurationError,
                ));
            }

            let property_namespace = property.get_namespace().unwrap_or(&namespace);
            let local_name = property.get_xml_name().unwrap_or(property.name());
            let persistent_property = PersistentProperty::new(
                property.name(),
                QName::new(property_namespace, local_name),
                property.kind(),
                property.is_collection_selector(),
            );
            properties.insert(property.name().to_string(), persistent_property);
        }

        if let Some(id_property) = descriptor.get_id_property() {
            match properties.get(id_property) {
                Some(property) if property.kind() == PropertyKind::Scalar => {}
                Some(_) => {
                    log::error!("Id property '{}' of {} is not a scalar", id_property, descriptor.name());
                    return Err(MarklogicError::new(
                        &format!("Id property '{}' of {} must be a scalar property", id_property, descriptor.name()),
                        ErrorKind::ConfigurationError,
                    ));
                }
                None => {
                    log::error!("Id property '{}' not found on {}", id_property, descriptor.name());
                    return Err(MarklogicError::new(
                        &format!("Id property '{}' not found on entity {}", id_property, descriptor.name()),
                        ErrorKind::ConfigurationError,
                    ));
                }
            }
        }

        let uri_template = descriptor
            .get_uri_template()
            .unwrap_or(DEFAULT_URI_TEMPLATE)
            .to_string();
        Template::parse(&uri_template)?;
        if let Some(collection) = descriptor.get_default_collection() {
            Template::parse(collection)?;
        }

        Ok(PersistentEntity {
            entity_type,
            name: descriptor.name().to_string(),
            qname: QName::new(&namespace, &root_name),
            default_collection: descriptor.get_default_collection().map(str::to_string),
            uri_template,
            id_property: descriptor.get_id_property().map(str::to_string),
            id_in_property_fragment: descriptor.is_id_in_property_fragment(),
            properties,
        })
    }

    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    /// Simple type name of the entity (`Person`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Qualified name of the document root element.
    pub fn qname(&self) -> &QName {
        &self.qname
    }

    /// Default collection template, if the entity declares one.
    pub fn default_collection(&self) -> Option<&str> {
        self.default_collection.as_deref()
    }

    pub fn uri_template(&self) -> &str {
        &self.uri_template
    }

    pub fn id_property(&self) -> Option<&PersistentProperty> {
        self.id_property
            .as_deref()
            .and_then(|name| self.properties.get(name))
    }

    pub fn id_in_property_fragment(&self) -> bool {
        self.id_in_property_fragment
    }

    /// Properties in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = &PersistentProperty> {
        self.properties.values()
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    pub fn find_property(&self, name: &str) -> Option<&PersistentProperty> {
        self.properties.get(name)
    }

    /// Returns the property declared as `name`.
    ///
    /// # Errors
    /// `LookupError` if the entity has no such property.
    pub fn get_persistent_property(&self, name: &str) -> MarklogicResult<&PersistentProperty> {
        match self.properties.get(name) {
            Some(property) => Ok(property),
            None => {
                log::error!("No property '{}' found on entity {}", name, self.name);
                Err(MarklogicError::new(
                    &format!("No property '{}' found on entity {}", name, self.name),
                    ErrorKind::LookupError,
                ))
            }
        }
    }
}
