use marklogic_data::common::Value;
use marklogic_data::mapping::{EntityType, MappingContext};
use marklogic_data::repository::{
    NamedQueries, Parameter, Parameters, QueryExecution, QueryMethod, RepositoryFactory, RepositoryQuery,
};
use marklogic_data_int_test::fixtures::Person;

fn factory() -> RepositoryFactory {
    let named_queries = NamedQueries::new()
        .add("Person.findByLastname", "/ext/person/by-lastname.sjs")
        .add("Person.adults", "/ext/person/adults.xqy");
    RepositoryFactory::with_named_queries(MappingContext::new(), named_queries)
}

#[test]
fn test_named_query_overrides_derivation() {
    let method = QueryMethod::new("findByLastname", EntityType::of::<Person>())
        .parameter("lastname")
        .returns_collection(true);
    let query = factory().repository_query(method).unwrap();
    assert!(matches!(query, RepositoryQuery::ModuleInvoke(_)));

    match query.prepare(&Parameters::of(vec![Parameter::value("Toussaint")])).unwrap() {
        QueryExecution::InvokeModule {
            module_uri,
            params,
            as_list,
        } => {
            assert_eq!(module_uri, "/ext/person/by-lastname.sjs");
            assert_eq!(params.get("lastname"), Some(&Parameter::Value(Value::from("Toussaint"))));
            assert!(as_list);
        }
        other => panic!("unexpected execution {:?}", other),
    }
}

#[test]
fn test_named_query_without_derivable_name() {
    let method = QueryMethod::new("adults", EntityType::of::<Person>()).parameters(&["minimum", "country"]);
    let query = factory().repository_query(method).unwrap();

    let parameters = Parameters::of(vec![Parameter::value(18), Parameter::values(["FR", "BE"])]);
    match query.prepare(&parameters).unwrap() {
        QueryExecution::InvokeModule { params, as_list, .. } => {
            let names: Vec<&String> = params.keys().collect();
            assert_eq!(names, vec!["minimum", "country"]);
            assert_eq!(
                params["country"],
                Parameter::Values(vec![Value::from("FR"), Value::from("BE")])
            );
            assert!(!as_list);
        }
        other => panic!("unexpected execution {:?}", other),
    }
}

#[test]
fn test_other_methods_are_derived() {
    let method = QueryMethod::new("findByFirstname", EntityType::of::<Person>()).parameter("firstname");
    let query = factory().repository_query(method).unwrap();
    assert!(matches!(query, RepositoryQuery::PartTree(_)));
}
