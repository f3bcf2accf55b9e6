use marklogic_data::common::{Pageable, QName, Sort, Value};
use marklogic_data::errors::ErrorKind;
use marklogic_data::mapping::{EntityType, MappingContext};
use marklogic_data::query::{Criteria, Operator, SortCriteria};
use marklogic_data::repository::{
    Parameter, Parameters, PartTree, QueryExecution, QueryMethod, QueryMode, RepositoryFactory, SubjectKind,
};
use marklogic_data_int_test::fixtures::Person;

fn person_method(name: &str) -> QueryMethod {
    QueryMethod::new(name, EntityType::of::<Person>()).returns_collection(true)
}

fn search(name: &str, parameters: Parameters) -> (marklogic_data::query::Query, QueryMode) {
    let factory = RepositoryFactory::new(MappingContext::new());
    let query = factory.repository_query(person_method(name)).unwrap();
    match query.prepare(&parameters).unwrap() {
        QueryExecution::Search { query, mode } => (query, mode),
        other => panic!("unexpected execution {:?}", other),
    }
}

#[test]
fn test_parse_full_method_name() {
    let context = MappingContext::new();
    let person = context.persistent_entity::<Person>().unwrap();
    let tree = PartTree::parse(
        "findDistinctTop10ByLastnameAndAgeInOrAddressCityOrderByAgeDesc",
        &person,
        &context,
    )
    .unwrap();

    assert_eq!(tree.subject().kind(), SubjectKind::Find);
    assert!(tree.subject().is_distinct());
    assert_eq!(tree.subject().max_results(), Some(10));
    assert_eq!(tree.predicate().len(), 2);
    assert_eq!(tree.parts().count(), 3);
    assert_eq!(
        tree.to_string(),
        "Find [lastname = ? && age in ? || address.city = ?] order by age desc"
    );
}

#[test]
fn test_derived_search() {
    let (query, mode) = search(
        "findByLastnameAndAge",
        Parameters::of(vec![Parameter::value("Toussaint"), Parameter::value(38)]),
    );

    assert_eq!(mode, QueryMode::FindAll);
    assert_eq!(query.collection(), Some("Person"));
    let criteria = query.criteria().unwrap();
    assert_eq!(criteria.operator(), Some(Operator::And));
    assert_eq!(
        criteria.children(),
        &[
            Criteria::field(QName::local("lastname"), "Toussaint"),
            Criteria::field(QName::local("age"), 38),
        ]
    );
}

#[test]
fn test_derived_any_of_and_nested_path() {
    let (query, _) = search(
        "findByAgeInOrAddressCity",
        Parameters::of(vec![Parameter::values([30, 40]), Parameter::value("Paris")]),
    );

    let criteria = query.criteria().unwrap();
    assert_eq!(criteria.operator(), Some(Operator::Or));
    assert_eq!(criteria.children()[0].operator(), Some(Operator::Or));
    assert_eq!(criteria.children()[0].children()[0].value(), Some(&Value::I32(30)));
    assert_eq!(criteria.children()[1], Criteria::field(QName::local("city"), "Paris"));
}

#[test]
fn test_derived_collection_selector() {
    let (query, _) = search("findByGroups", Parameters::of(vec![Parameter::value("Staff")]));
    assert_eq!(query.criteria(), Some(&Criteria::collection("Staff")));
}

#[test]
fn test_derived_sort_and_paging() {
    let (query, _) = search(
        "findTop5ByLastnameOrderByAgeDesc",
        Parameters::of(vec![Parameter::value("Toussaint")])
            .with_sort(Sort::by_properties(&["firstname"]))
            .with_pageable(Pageable::of(3, 20)),
    );

    assert_eq!(query.sort_criteria(), &[SortCriteria::new(QName::local("age"), true)]);
    assert_eq!(query.skip(), Some(60));
    assert_eq!(query.limit(), Some(5));
}

#[test]
fn test_derived_modes() {
    let parameters = || Parameters::of(vec![Parameter::value("Toussaint")]);
    assert_eq!(search("countByLastname", parameters()).1, QueryMode::Count);
    assert_eq!(search("existsByLastname", parameters()).1, QueryMode::Exists);
    assert_eq!(search("removeByLastname", parameters()).1, QueryMode::Delete);

    let factory = RepositoryFactory::new(MappingContext::new());
    let method = QueryMethod::new("getByLastname", EntityType::of::<Person>());
    let query = factory.repository_query(method).unwrap();
    match query.prepare(&parameters()).unwrap() {
        QueryExecution::Search { mode, .. } => assert_eq!(mode, QueryMode::FindOne),
        other => panic!("unexpected execution {:?}", other),
    }
}

#[test]
fn test_invalid_method_names() {
    let factory = RepositoryFactory::new(MappingContext::new());

    let err = factory.repository_query(person_method("findByNickname")).err().unwrap();
    assert_eq!(err.kind(), &ErrorKind::LookupError);

    let err = factory.repository_query(person_method("findByAgeGreaterThan")).err().unwrap();
    assert_eq!(err.kind(), &ErrorKind::QueryDerivationError);

    let err = factory.repository_query(person_method("findByAddress")).err().unwrap();
    assert_eq!(err.kind(), &ErrorKind::QueryDerivationError);

    let err = factory.repository_query(person_method("persist")).err().unwrap();
    assert_eq!(err.kind(), &ErrorKind::QueryDerivationError);
}

#[test]
fn test_parameter_binding_errors() {
    let factory = RepositoryFactory::new(MappingContext::new());
    let query = factory.repository_query(person_method("findByLastnameAndAge")).unwrap();

    let err = query
        .prepare(&Parameters::of(vec![Parameter::value("Toussaint")]))
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::ConfigurationError);

    let err = query
        .prepare(&Parameters::of(vec![
            Parameter::value("Toussaint"),
            Parameter::optional(None::<i32>),
        ]))
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::ConfigurationError);
}
