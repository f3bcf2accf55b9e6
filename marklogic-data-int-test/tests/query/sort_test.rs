use marklogic_data::common::{Direction, Order, Pageable, QName, Sort};
use marklogic_data::errors::ErrorKind;
use marklogic_data::mapping::MappingContext;
use marklogic_data::query::{Example, OperationOptions, QueryBuilder, SortCriteria};
use marklogic_data_int_test::fixtures::{Person, SuperType};

#[test]
fn test_single_descending_order() {
    let context = MappingContext::new();
    let query = QueryBuilder::new(&context)
        .of::<Person>()
        .with_sort(Sort::by(Direction::Descending, &["lastname"]))
        .build()
        .unwrap();

    assert_eq!(
        query.sort_criteria(),
        &[SortCriteria::new(QName::local("lastname"), true)]
    );
}

#[test]
fn test_orders_keep_sequence_and_direction() {
    let context = MappingContext::new();
    let query = QueryBuilder::new(&context)
        .of::<Person>()
        .with_sort(Sort::by_orders(vec![Order::desc("age"), Order::asc("lastname")]))
        .build()
        .unwrap();

    assert_eq!(
        query.sort_criteria(),
        &[
            SortCriteria::new(QName::local("age"), true),
            SortCriteria::new(QName::local("lastname"), false),
        ]
    );
    assert_eq!(
        query.to_string(),
        "Query { collection: Person, criteria: *, sort: [age desc, lastname asc] }"
    );
}

#[test]
fn test_sort_by_example_type() {
    let context = MappingContext::new();
    let example = Example::of(Person::named("Toussaint"));
    let query = QueryBuilder::new(&context)
        .alike(&example)
        .with_sort(Sort::by_properties(&["address.city"]))
        .build()
        .unwrap();

    assert_eq!(query.sort_criteria(), &[SortCriteria::new(QName::local("city"), false)]);
}

#[test]
fn test_sort_uses_qualified_names() {
    let context = MappingContext::new();
    let query = QueryBuilder::new(&context)
        .of::<SuperType>()
        .with_sort(Sort::by_properties(&["description", "code"]))
        .build()
        .unwrap();

    assert_eq!(
        query.sort_criteria(),
        &[
            SortCriteria::new(QName::new("/super/type", "desc"), false),
            SortCriteria::new(QName::new("/other/type", "code"), false),
        ]
    );
}

#[test]
fn test_sort_without_type() {
    let context = MappingContext::new();
    let err = QueryBuilder::new(&context)
        .with_sort(Sort::by_properties(&["lastname"]))
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::ConfigurationError);
    assert_eq!(err.message(), "Query needs an explicit type to resolve sort order");

    let query = QueryBuilder::new(&context)
        .with_sort(Sort::by_properties(&["lastname"]))
        .options(OperationOptions::new().entity::<Person>())
        .build()
        .unwrap();
    assert_eq!(query.sort_criteria().len(), 1);
}

#[test]
fn test_unknown_and_entity_sort_properties() {
    let context = MappingContext::new();
    let err = QueryBuilder::new(&context)
        .of::<Person>()
        .with_sort(Sort::by_properties(&["nickname"]))
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::LookupError);

    let err = QueryBuilder::new(&context)
        .of::<Person>()
        .with_sort(Sort::by_properties(&["address"]))
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::ConfigurationError);
}

#[test]
fn test_paging() {
    let context = MappingContext::new();
    let query = QueryBuilder::new(&context)
        .of::<Person>()
        .with_pageable(Pageable::of_sorted(2, 25, Sort::by(Direction::Descending, &["age"])))
        .build()
        .unwrap();

    assert_eq!(query.skip(), Some(50));
    assert_eq!(query.limit(), Some(25));
    assert_eq!(query.sort_criteria(), &[SortCriteria::new(QName::local("age"), true)]);

    let query = QueryBuilder::new(&context)
        .of::<Person>()
        .with_sort(Sort::by_properties(&["lastname"]))
        .with_pageable(Pageable::of_sorted(2, 25, Sort::by(Direction::Descending, &["age"])))
        .build()
        .unwrap();
    assert_eq!(query.sort_criteria(), &[SortCriteria::new(QName::local("lastname"), false)]);
    assert_eq!(query.skip(), Some(50));
}
