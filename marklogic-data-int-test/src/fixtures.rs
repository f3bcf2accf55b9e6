use fake::faker::address::en::{CityName, CountryCode, StreetName};
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use marklogic_data_derive::MarklogicEntity;
use uuid::Uuid;

#[derive(Debug, Clone, Default, MarklogicEntity)]
#[document(collection = "Person", uri = "/contact/person/#{id}.xml", id = "id")]
pub struct Person {
    pub id: Option<String>,
    pub lastname: Option<String>,
    pub firstname: Option<String>,
    pub age: Option<i32>,
    pub skills: Option<Vec<String>>,
    #[property(entity)]
    pub address: Option<Address>,
    #[property(collection_selector)]
    pub groups: Vec<String>,
    #[property(skip)]
    pub note: Option<String>,
}

impl Person {
    pub fn named(lastname: &str) -> Self {
        Person {
            lastname: Some(lastname.to_string()),
            ..Default::default()
        }
    }

    pub fn random() -> Self {
        Person {
            id: Some(Uuid::new_v4().to_string()),
            lastname: Some(LastName().fake()),
            firstname: Some(FirstName().fake()),
            age: Some((18..90).fake()),
            skills: None,
            address: Some(Address::random()),
            groups: Vec::new(),
            note: None,
        }
    }
}

#[derive(Debug, Clone, Default, MarklogicEntity)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

impl Address {
    pub fn random() -> Self {
        Address {
            street: Some(StreetName().fake()),
            city: Some(CityName().fake()),
            country: Some(CountryCode().fake()),
        }
    }
}

#[derive(Debug, Clone, Default, MarklogicEntity)]
#[document(name = "super", namespace = "/super/type", collection = "#{entityClass}")]
pub struct SuperType {
    pub name: Option<String>,
    #[property(name = "desc")]
    pub description: Option<String>,
    #[property(namespace = "/other/type")]
    pub code: Option<u32>,
}

#[derive(Debug, Clone, Default, MarklogicEntity)]
#[document(uri = "/articles/#{entityClass}-#{id}.xml", id = "slug", id_in_property_fragment)]
pub struct Article {
    pub slug: String,
    pub r#type: Option<String>,
    pub published: bool,
    pub tags: Vec<String>,
    #[property(entity)]
    pub author: Person,
}
