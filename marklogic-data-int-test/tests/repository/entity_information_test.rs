use marklogic_data::common::Value;
use marklogic_data::errors::ErrorKind;
use marklogic_data::mapping::MappingContext;
use marklogic_data::repository::{EntityInformation, RepositoryFactory};
use marklogic_data_int_test::fixtures::{Address, Article, Person};

#[test]
fn test_person_information() {
    let factory = RepositoryFactory::new(MappingContext::new());
    let information = factory.entity_information::<Person>().unwrap();

    let person = Person {
        id: Some("42".to_string()),
        ..Default::default()
    };
    assert_eq!(information.uri_template(), "/contact/person/#{id}.xml");
    assert_eq!(information.uri(&person).unwrap(), "/contact/person/42.xml");
    assert_eq!(information.collection(&person).unwrap().as_deref(), Some("Person"));
    assert_eq!(information.id(&person).unwrap(), Some(Value::from("42")));
    assert!(!information.is_new(&person).unwrap());
    assert!(information.is_new(&Person::default()).unwrap());
}

#[test]
fn test_default_uri_template() {
    let factory = RepositoryFactory::new(MappingContext::new());
    let information = factory.entity_information::<Address>().unwrap();

    assert_eq!(information.uri_template(), "/content/#{entityClass}/#{id}.xml");
    assert!(information.default_collection().is_none());
    assert!(information.id(&Address::default()).unwrap().is_none());

    let err = information.uri(&Address::default()).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::ExpressionError);
}

#[test]
fn test_id_in_property_fragment() {
    let factory = RepositoryFactory::new(MappingContext::new());
    let information = factory.entity_information::<Article>().unwrap();
    assert!(information.id_in_property_fragment());

    let article = Article {
        slug: "release-notes".to_string(),
        ..Default::default()
    };
    assert_eq!(information.uri(&article).unwrap(), "/articles/Article-release-notes.xml");
    assert!(!information.is_new(&article).unwrap());
}
