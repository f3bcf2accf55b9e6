use marklogic_data::common::{QName, Value};
use marklogic_data::errors::ErrorKind;
use marklogic_data::mapping::{
    EntityType, MappingContext, MarklogicEntity, PropertyKind, PropertyValue, DEFAULT_URI_TEMPLATE,
};
use marklogic_data_int_test::fixtures::{Address, Article, Person, SuperType};

#[test]
fn test_derived_descriptor() {
    let descriptor = Person::describe();
    assert_eq!(descriptor.name(), "Person");

    let names: Vec<&str> = descriptor.properties().iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["id", "lastname", "firstname", "age", "skills", "address", "groups"]);

    let kinds: Vec<PropertyKind> = descriptor.properties().iter().map(|p| p.kind()).collect();
    assert_eq!(kinds[0], PropertyKind::Scalar);
    assert_eq!(kinds[4], PropertyKind::Collection);
    assert_eq!(kinds[5], PropertyKind::Entity(EntityType::of::<Address>()));
    assert_eq!(kinds[6], PropertyKind::Collection);
    assert!(descriptor.properties()[6].is_collection_selector());
}

#[test]
fn test_derived_persistent_entity() {
    let context = MappingContext::new();
    let person = context.persistent_entity::<Person>().unwrap();

    assert_eq!(person.name(), "Person");
    assert_eq!(person.qname(), &QName::local("person"));
    assert_eq!(person.default_collection(), Some("Person"));
    assert_eq!(person.uri_template(), "/contact/person/#{id}.xml");
    assert_eq!(person.id_property().map(|p| p.name()), Some("id"));
    assert!(!person.id_in_property_fragment());
    assert!(person.find_property("note").is_none());

    let address = context.persistent_entity::<Address>().unwrap();
    assert_eq!(address.uri_template(), DEFAULT_URI_TEMPLATE);
    assert!(address.default_collection().is_none());
}

#[test]
fn test_derived_names_and_namespaces() {
    let context = MappingContext::new();
    let entity = context.persistent_entity::<SuperType>().unwrap();

    assert_eq!(entity.qname(), &QName::new("/super/type", "super"));
    assert_eq!(entity.default_collection(), Some("#{entityClass}"));

    let name = entity.get_persistent_property("name").unwrap();
    assert_eq!(name.qname(), &QName::new("/super/type", "name"));

    let description = entity.get_persistent_property("description").unwrap();
    assert_eq!(description.qname(), &QName::new("/super/type", "desc"));

    let code = entity.get_persistent_property("code").unwrap();
    assert_eq!(code.qname(), &QName::new("/other/type", "code"));
}

#[test]
fn test_derived_accessor() {
    let person = Person {
        id: Some("42".to_string()),
        age: Some(38),
        skills: Some(vec!["rust".to_string()]),
        address: Some(Address::default()),
        ..Default::default()
    };

    assert_eq!(person.read_property("id").unwrap().as_scalar(), Some(&Value::from("42")));
    assert_eq!(person.read_property("age").unwrap().as_scalar(), Some(&Value::I32(38)));
    assert!(person.read_property("lastname").unwrap().is_absent());
    assert!(matches!(
        person.read_property("skills").unwrap(),
        PropertyValue::Collection(values) if values == vec![Value::from("rust")]
    ));
    assert!(matches!(person.read_property("address").unwrap(), PropertyValue::Entity(_)));
    assert!(matches!(person.read_property("groups").unwrap(), PropertyValue::Collection(values) if values.is_empty()));
}

#[test]
fn test_skipped_and_unknown_property() {
    let person = Person::named("Toussaint");
    for name in ["note", "nickname"] {
        let err = person.read_property(name).err().unwrap();
        assert_eq!(err.kind(), &ErrorKind::AccessorError);
        assert!(err.message().contains(name));
    }
}

#[test]
fn test_plain_fields_and_raw_identifier() {
    let context = MappingContext::new();
    let entity = context.persistent_entity::<Article>().unwrap();
    assert!(entity.id_in_property_fragment());
    assert_eq!(entity.id_property().map(|p| p.name()), Some("slug"));
    assert!(entity.find_property("type").is_some());
    assert!(entity.get_persistent_property("author").unwrap().is_entity());

    let article = Article {
        slug: "intro".to_string(),
        r#type: Some("howto".to_string()),
        published: true,
        ..Default::default()
    };
    assert_eq!(article.read_property("slug").unwrap().as_scalar(), Some(&Value::from("intro")));
    assert_eq!(article.read_property("type").unwrap().as_scalar(), Some(&Value::from("howto")));
    assert_eq!(article.read_property("published").unwrap().as_scalar(), Some(&Value::Bool(true)));
    assert!(matches!(article.read_property("author").unwrap(), PropertyValue::Entity(_)));
}
