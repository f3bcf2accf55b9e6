use marklogic_data::common::{Direction, Pageable, Sort};
use marklogic_data::mapping::MappingContext;
use marklogic_data::query::{Example, QueryBuilder};
use marklogic_data_int_test::fixtures::Person;
use serde_json::json;

#[test]
fn test_query_as_json() {
    let context = MappingContext::new();
    let example = Example::of(Person {
        lastname: Some("Toussaint".to_string()),
        age: Some(38),
        ..Default::default()
    });

    let query = QueryBuilder::new(&context)
        .alike(&example)
        .with_pageable(Pageable::of_sorted(1, 10, Sort::by(Direction::Descending, &["age"])))
        .build()
        .unwrap();

    let value = serde_json::to_value(&query).unwrap();
    assert_eq!(
        value,
        json!({
            "collection": "Person",
            "criteria": {
                "type": "group",
                "operator": "and",
                "children": [
                    {
                        "type": "field",
                        "qname": { "namespace_uri": "", "local_part": "lastname" },
                        "value": "Toussaint"
                    },
                    {
                        "type": "field",
                        "qname": { "namespace_uri": "", "local_part": "age" },
                        "value": 38
                    }
                ]
            },
            "sort_criteria": [
                { "qname": { "namespace_uri": "", "local_part": "age" }, "descending": true }
            ],
            "skip": 10,
            "limit": 10
        })
    );
}

#[test]
fn test_match_all_query_as_json() {
    let context = MappingContext::new();
    let query = QueryBuilder::new(&context).of::<Person>().build().unwrap();

    let value = serde_json::to_value(&query).unwrap();
    assert_eq!(value["collection"], "Person");
    assert!(value["criteria"].is_null());
    assert_eq!(value["sort_criteria"], json!([]));
}
