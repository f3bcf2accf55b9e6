use marklogic_data::errors::ErrorKind;
use marklogic_data::mapping::MappingContext;
use marklogic_data::query::{ExpressionContext, OperationOptions, QueryBuilder, Template};
use marklogic_data_int_test::fixtures::{Article, Person, SuperType};

#[test]
fn test_literal_collection_is_verbatim() {
    let template = Template::parse("Person").unwrap();
    assert!(template.is_literal());
    assert_eq!(template.expand(&ExpressionContext::new()).unwrap(), "Person");

    let context = MappingContext::new();
    let query = QueryBuilder::new(&context).of::<Person>().build().unwrap();
    assert_eq!(query.collection(), Some("Person"));
}

#[test]
fn test_id_placeholder() {
    let template = Template::parse("/contact/person/#{id}.xml").unwrap();
    assert!(!template.is_literal());
    let uri = template.expand(&ExpressionContext::new().id(42)).unwrap();
    assert_eq!(uri, "/contact/person/42.xml");

    let err = template.expand(&ExpressionContext::new()).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::ExpressionError);
}

#[test]
fn test_id_from_instance() {
    let context = MappingContext::new();
    let entity = context.persistent_entity::<Article>().unwrap();
    let article = Article {
        slug: "intro".to_string(),
        ..Default::default()
    };

    let template = Template::parse(entity.uri_template()).unwrap();
    let uri = template
        .expand(&ExpressionContext::for_entity(&entity, Some(&article)))
        .unwrap();
    assert_eq!(uri, "/articles/Article-intro.xml");
}

#[test]
fn test_entity_class_collection() {
    let context = MappingContext::new();
    let query = QueryBuilder::new(&context).of::<SuperType>().build().unwrap();
    assert_eq!(query.collection(), Some("SuperType"));
}

#[test]
fn test_options_collection_wins() {
    let context = MappingContext::new();
    let query = QueryBuilder::new(&context)
        .of::<Person>()
        .options(OperationOptions::new().default_collection("#{entityClass}-archive"))
        .build()
        .unwrap();
    assert_eq!(query.collection(), Some("Person-archive"));

    let query = QueryBuilder::new(&context)
        .of::<Person>()
        .options(
            OperationOptions::new()
                .entity::<SuperType>()
                .default_collection("#{entityClass}"),
        )
        .build()
        .unwrap();
    assert_eq!(query.collection(), Some("SuperType"));
}

#[test]
fn test_invalid_templates() {
    for source in ["/a/#{id", "/a/#{owner}.xml"] {
        let err = Template::parse(source).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::ExpressionError);
    }

    let context = MappingContext::new();
    let err = QueryBuilder::new(&context)
        .of::<Person>()
        .options(OperationOptions::new().default_collection("#{id}"))
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::ExpressionError);
}
