use marklogic_data::common::QName;
use marklogic_data::errors::ErrorKind;
use marklogic_data::mapping::MappingContext;
use marklogic_data::query::{Criteria, Example, Operator, QueryBuilder};
use marklogic_data_int_test::fixtures::{Address, Person};

#[test]
fn test_two_properties_make_one_and() {
    let context = MappingContext::new();
    let example = Example::of(Person {
        lastname: Some("Toussaint".to_string()),
        age: Some(38),
        ..Default::default()
    });

    let query = QueryBuilder::new(&context).alike(&example).build().unwrap();
    let criteria = query.criteria().unwrap();
    assert_eq!(criteria.operator(), Some(Operator::And));
    assert_eq!(
        criteria.children(),
        &[
            Criteria::field(QName::local("lastname"), "Toussaint"),
            Criteria::field(QName::local("age"), 38),
        ]
    );
    assert_eq!(criteria.to_string(), "(lastname = Toussaint && age = 38)");
}

#[test]
fn test_many_properties_stay_flat() {
    let context = MappingContext::new();
    let example = Example::of(Person {
        id: Some("1".to_string()),
        lastname: Some("Toussaint".to_string()),
        firstname: Some("Stephane".to_string()),
        age: Some(38),
        ..Default::default()
    });

    let query = QueryBuilder::new(&context).alike(&example).build().unwrap();
    let criteria = query.criteria().unwrap();
    assert_eq!(criteria.operator(), Some(Operator::And));
    assert_eq!(criteria.children().len(), 4);
    assert!(criteria.children().iter().all(Criteria::is_leaf));
}

#[test]
fn test_single_property_is_leaf() {
    let context = MappingContext::new();
    let example = Example::of(Person::named("Toussaint"));

    let query = QueryBuilder::new(&context).alike(&example).build().unwrap();
    assert_eq!(
        query.criteria(),
        Some(&Criteria::field(QName::local("lastname"), "Toussaint"))
    );
}

#[test]
fn test_empty_example_matches_all() {
    let context = MappingContext::new();
    let example = Example::of(Person {
        skills: Some(Vec::new()),
        address: Some(Address::default()),
        note: Some("not mapped".to_string()),
        ..Default::default()
    });

    let query = QueryBuilder::new(&context).alike(&example).build().unwrap();
    assert!(query.criteria().is_none());
    assert_eq!(query.collection(), Some("Person"));
}

#[test]
fn test_collection_values_become_or() {
    let context = MappingContext::new();
    let example = Example::of(Person {
        skills: Some(vec!["a".to_string(), "b".to_string()]),
        ..Default::default()
    });

    let query = QueryBuilder::new(&context).alike(&example).build().unwrap();
    let criteria = query.criteria().unwrap();
    assert_eq!(criteria.operator(), Some(Operator::Or));
    assert_eq!(
        criteria.children(),
        &[
            Criteria::field(QName::local("skills"), "a"),
            Criteria::field(QName::local("skills"), "b"),
        ]
    );
}

#[test]
fn test_nested_entity_joins_conjunction() {
    let context = MappingContext::new();
    let example = Example::of(Person {
        lastname: Some("Toussaint".to_string()),
        address: Some(Address {
            city: Some("Paris".to_string()),
            country: Some("FR".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    });

    let query = QueryBuilder::new(&context).alike(&example).build().unwrap();
    let criteria = query.criteria().unwrap();
    assert_eq!(criteria.operator(), Some(Operator::And));
    assert_eq!(
        criteria.children(),
        &[
            Criteria::field(QName::local("lastname"), "Toussaint"),
            Criteria::field(QName::local("city"), "Paris"),
            Criteria::field(QName::local("country"), "FR"),
        ]
    );
}

#[test]
fn test_collection_selector() {
    let context = MappingContext::new();
    let example = Example::of(Person {
        lastname: Some("Toussaint".to_string()),
        groups: vec!["Staff".to_string(), "Board".to_string()],
        ..Default::default()
    });

    let query = QueryBuilder::new(&context).alike(&example).build().unwrap();
    let criteria = query.criteria().unwrap();
    assert_eq!(criteria.operator(), Some(Operator::And));
    let groups = &criteria.children()[1];
    assert_eq!(groups.operator(), Some(Operator::Or));
    assert_eq!(
        groups.children(),
        &[Criteria::collection("Staff"), Criteria::collection("Board")]
    );
}

#[test]
fn test_type_and_example_are_exclusive() {
    let context = MappingContext::new();
    let example = Example::of(Person::named("Toussaint"));

    let err = QueryBuilder::new(&context)
        .of::<Person>()
        .alike(&example)
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::ConfigurationError);
    assert_eq!(err.message(), "Query by example or by type are mutually exclusive");
}

#[test]
fn test_random_example() {
    let context = MappingContext::new();
    let person = Person::random();
    let lastname = person.lastname.clone().unwrap();
    let example = Example::of(person);

    let query = QueryBuilder::new(&context).alike(&example).build().unwrap();
    let criteria = query.criteria().unwrap();
    assert_eq!(criteria.operator(), Some(Operator::And));
    assert_eq!(criteria.children().len(), 7);
    assert_eq!(criteria.children()[1], Criteria::field(QName::local("lastname"), lastname));
}
