use marklogic_data::common::QName;
use marklogic_data::errors::ErrorKind;
use marklogic_data::mapping::{EntityType, MappingContext, MarklogicEntity};
use marklogic_data_int_test::fixtures::{Address, Article, Person};

#[test]
fn test_registration_walks_nested_entities() {
    let context = MappingContext::new();
    context.register::<Article>().unwrap();

    assert!(context.is_registered(&Article::entity_type()));
    assert!(context.is_registered(&Person::entity_type()));
    assert!(context.is_registered(&Address::entity_type()));
    assert_eq!(context.entities().len(), 3);
}

#[test]
fn test_strict_context() {
    let context = MappingContext::builder()
        .strict(true)
        .register::<Person>()
        .build()
        .unwrap();

    assert!(context.persistent_entity::<Person>().is_ok());
    assert!(context.persistent_entity::<Address>().is_ok());

    let err = context.persistent_entity::<Article>().err().unwrap();
    assert_eq!(err.kind(), &ErrorKind::LookupError);
    assert!(err
        .message()
        .starts_with("No persistent entity information found for type"));
}

#[test]
fn test_default_namespace() {
    let context = MappingContext::builder()
        .default_namespace("/default/ns")
        .build()
        .unwrap();

    let person = context.persistent_entity::<Person>().unwrap();
    assert_eq!(person.qname(), &QName::new("/default/ns", "person"));
    assert_eq!(
        person.get_persistent_property("lastname").unwrap().qname(),
        &QName::new("/default/ns", "lastname")
    );
}

#[test]
fn test_property_path() {
    let context = MappingContext::new();
    let person = context.persistent_entity::<Person>().unwrap();

    let country = context.resolve_property_path(&person, "address.country").unwrap();
    assert_eq!(country.qname(), &QName::local("country"));

    let err = context.resolve_property_path(&person, "lastname.country").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::LookupError);

    let err = context.resolve_property_path(&person, "address.planet").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::LookupError);
}

#[test]
fn test_entity_type_names() {
    let entity_type = EntityType::of::<Person>();
    assert_eq!(entity_type.simple_name(), "Person");
    assert!(entity_type.type_name().ends_with("fixtures::Person"));
}
