use crate::mapping::EntityType;

/// Kind of a mapped property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// A single literal value.
    Scalar,
    /// A list of literal values; matched as "any of" by example queries.
    Collection,
    /// A nested mapped entity whose own properties are walked.
    Entity(EntityType),
}

/// Static description of one property, as declared on the Rust type.
///
/// Names here are not yet qualified: namespaces are resolved against the
/// owning entity and the mapping configuration when the descriptor becomes a
/// [PersistentProperty](crate::mapping::PersistentProperty).
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    name: String,
    xml_name: Option<String>,
    namespace: Option<String>,
    kind: PropertyKind,
    collection_selector: bool,
}

impl PropertyDescriptor {
    pub fn scalar(name: &str) -> Self {
        PropertyDescriptor::new(name, PropertyKind::Scalar)
    }

    pub fn collection(name: &str) -> Self {
        PropertyDescriptor::new(name, PropertyKind::Collection)
    }

    pub fn entity(name: &str, entity_type: EntityType) -> Self {
        PropertyDescriptor::new(name, PropertyKind::Entity(entity_type))
    }

    fn new(name: &str, kind: PropertyKind) -> Self {
        PropertyDescriptor {
            name: name.to_string(),
            xml_name: None,
            namespace: None,
            kind,
            collection_selector: false,
        }
    }

    /// Element name used in the document when it differs from the field name.
    pub fn xml_name(mut self, xml_name: &str) -> Self {
        self.xml_name = Some(xml_name.to_string());
        self
    }

    pub fn namespace(mut self, namespace: &str) -> Self {
        self.namespace = Some(namespace.to_string());
        self
    }

    /// Marks the property as naming the document collection(s) the document
    /// belongs to, rather than an element of the document.
    pub fn collection_selector(mut self) -> Self {
        self.collection_selector = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    pub(crate) fn get_xml_name(&self) -> Option<&str> {
        self.xml_name.as_deref()
    }

    pub(crate) fn get_namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn is_collection_selector(&self) -> bool {
        self.collection_selector
    }
}

/// Static mapping table of an entity type.
///
/// Produced by `MarklogicEntity::describe` (usually generated by the derive
/// macro) and turned once into a cached
/// [PersistentEntity](crate::mapping::PersistentEntity) by the
/// [MappingContext](crate::mapping::MappingContext).
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDescriptor {
    name: String,
    root_name: Option<String>,
    namespace: Option<String>,
    default_collection: Option<String>,
    uri_template: Option<String>,
    id_property: Option<String>,
    id_in_property_fragment: bool,
    properties: Vec<PropertyDescriptor>,
}

impl EntityDescriptor {
    pub fn new(name: &str) -> Self {
        EntityDescriptor {
            name: name.to_string(),
            root_name: None,
            namespace: None,
            default_collection: None,
            uri_template: None,
            id_property: None,
            id_in_property_fragment: false,
            properties: Vec::new(),
        }
    }

    /// Local name of the document root element.
    pub fn root_name(mut self, root_name: &str) -> Self {
        self.root_name = Some(root_name.to_string());
        self
    }

    pub fn namespace(mut self, namespace: &str) -> Self {
        self.namespace = Some(namespace.to_string());
        self
    }

    /// Collection template new documents go to and queries filter on.
    pub fn default_collection(mut self, template: &str) -> Self {
        self.default_collection = Some(template.to_string());
        self
    }

    /// URI template documents of this type are stored under.
    pub fn uri_template(mut self, template: &str) -> Self {
        self.uri_template = Some(template.to_string());
        self
    }

    pub fn id_property(mut self, property: &str) -> Self {
        self.id_property = Some(property.to_string());
        self
    }

    pub fn id_in_property_fragment(mut self, in_fragment: bool) -> Self {
        self.id_in_property_fragment = in_fragment;
        self
    }

    /// Appends a property; declaration order is preserved.
    pub fn property(mut self, property: PropertyDescriptor) -> Self {
        self.properties.push(property);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    pub(crate) fn get_root_name(&self) -> Option<&str> {
        self.root_name.as_deref()
    }

    pub(crate) fn get_namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub(crate) fn get_default_collection(&self) -> Option<&str> {
        self.default_collection.as_deref()
    }

    pub(crate) fn get_uri_template(&self) -> Option<&str> {
        self.uri_template.as_deref()
    }

    pub(crate) fn get_id_property(&self) -> Option<&str> {
        self.id_property.as_deref()
    }

    pub(crate) fn is_id_in_property_fragment(&self) -> bool {
        self.id_in_property_fragment
    }
}
