//! Sample Author / Address / Book domain for unit tests.

use crate::{
    model::{
        entity::EntityModel,
        field::{EnumModel, FieldKind, FieldModel},
        relation::{Cardinality, RelationModel},
    },
    traits::{EntityKind, EntityValue},
    value::{Value, ValueEnum},
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

///
/// MODELS
///

pub(crate) static ACTIVITY_STATUS: EnumModel = EnumModel {
    name: "ActivityStatus",
    variants: &["ACTIVE", "INACTIVE"],
};

pub(crate) static LEVEL: EnumModel = EnumModel {
    name: "Level",
    variants: &["BEGINNER", "INTERMEDIATE", "EXPERT"],
};

pub(crate) static ADDRESS_MODEL: EntityModel = EntityModel {
    path: "sieve_core::test_fixtures::Address",
    entity_name: "Address",
    primary_key: "id",
    fields: &[
        FieldModel::new("id", FieldKind::Int),
        FieldModel::new("city", FieldKind::Text),
        FieldModel::new("street", FieldKind::Text),
        FieldModel::new("house", FieldKind::Text),
        FieldModel::new("active", FieldKind::Bool),
        FieldModel::new("createdAt", FieldKind::Timestamp),
    ],
    relations: &[],
};

pub(crate) static BOOK_MODEL: EntityModel = EntityModel {
    path: "sieve_core::test_fixtures::Book",
    entity_name: "Book",
    primary_key: "id",
    fields: &[
        FieldModel::new("id", FieldKind::Int),
        FieldModel::new("title", FieldKind::Text),
        FieldModel::new("price", FieldKind::Float),
    ],
    relations: &[RelationModel {
        name: "author",
        target: &AUTHOR_MODEL,
        cardinality: Cardinality::One,
    }],
};

pub(crate) static AUTHOR_MODEL: EntityModel = EntityModel {
    path: "sieve_core::test_fixtures::Author",
    entity_name: "Author",
    primary_key: "id",
    fields: &[
        FieldModel::new("id", FieldKind::Int),
        FieldModel::new("authorName", FieldKind::Text),
        FieldModel::new("email", FieldKind::Text),
        FieldModel::new("age", FieldKind::Int),
        FieldModel::new("active", FieldKind::Bool),
        FieldModel::new("status", FieldKind::Enum(&ACTIVITY_STATUS)),
        FieldModel::new("level", FieldKind::Enum(&LEVEL)),
        FieldModel::new("rating", FieldKind::Float),
        FieldModel::new("createdAt", FieldKind::Timestamp),
        FieldModel::new("externalId", FieldKind::Uuid),
    ],
    relations: &[
        RelationModel {
            name: "address",
            target: &ADDRESS_MODEL,
            cardinality: Cardinality::One,
        },
        RelationModel {
            name: "books",
            target: &BOOK_MODEL,
            cardinality: Cardinality::Many,
        },
    ],
};

fn enum_value(model: &EnumModel, ordinal: Option<u32>) -> Value {
    ordinal
        .and_then(|ordinal| {
            model
                .variant_at(ordinal)
                .map(|name| Value::Enum(ValueEnum::new(ordinal, name)))
        })
        .unwrap_or(Value::Null)
}

fn millis(at: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(at)
}

///
/// Address
///

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Address {
    pub(crate) id: i64,
    pub(crate) city: Option<String>,
    pub(crate) street: Option<String>,
    pub(crate) house: Option<String>,
    pub(crate) active: Option<bool>,
    pub(crate) created_at: Option<DateTime<Utc>>,
}

impl Address {
    pub(crate) fn new(id: i64, city: &str, street: &str) -> Self {
        Self {
            id,
            city: Some(city.to_string()),
            street: Some(street.to_string()),
            ..Self::default()
        }
    }
}

impl EntityValue for Address {
    fn get_value(&self, field: &str) -> Option<Value> {
        let value = match field {
            "id" => Value::Int(self.id),
            "city" => self.city.clone().into(),
            "street" => self.street.clone().into(),
            "house" => self.house.clone().into(),
            "active" => self.active.into(),
            "createdAt" => self.created_at.into(),
            _ => return None,
        };

        Some(value)
    }
}

impl EntityKind for Address {
    type Key = i64;

    const MODEL: &'static EntityModel = &ADDRESS_MODEL;

    fn key(&self) -> Self::Key {
        self.id
    }
}

///
/// Book
/// Carries a shallow copy of its author (without books).
///

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Book {
    pub(crate) id: i64,
    pub(crate) title: Option<String>,
    pub(crate) price: Option<f64>,
    pub(crate) author: Option<Box<Author>>,
}

impl Book {
    pub(crate) fn new(id: i64, title: &str) -> Self {
        Self {
            id,
            title: Some(title.to_string()),
            ..Self::default()
        }
    }

    pub(crate) fn with_author(mut self, author: &Author) -> Self {
        let mut shallow = author.clone();
        shallow.books.clear();
        self.author = Some(Box::new(shallow));
        self
    }
}

impl EntityValue for Book {
    fn get_value(&self, field: &str) -> Option<Value> {
        let value = match field {
            "id" => Value::Int(self.id),
            "title" => self.title.clone().into(),
            "price" => self.price.into(),
            _ => return None,
        };

        Some(value)
    }

    fn related(&self, relation: &str) -> Vec<&dyn EntityValue> {
        match relation {
            "author" => self
                .author
                .iter()
                .map(|author| author.as_ref() as &dyn EntityValue)
                .collect(),
            _ => Vec::new(),
        }
    }
}

///
/// Author
///

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Author {
    pub(crate) id: i64,
    pub(crate) author_name: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) age: Option<i64>,
    pub(crate) active: Option<bool>,
    pub(crate) status: Option<u32>,
    pub(crate) level: Option<u32>,
    pub(crate) rating: Option<f64>,
    pub(crate) created_at: Option<DateTime<Utc>>,
    pub(crate) external_id: Option<Uuid>,
    pub(crate) address: Option<Address>,
    pub(crate) books: Vec<Book>,
}

impl Author {
    pub(crate) fn new(id: i64, name: &str, age: i64) -> Self {
        Self {
            id,
            author_name: Some(name.to_string()),
            age: Some(age),
            ..Self::default()
        }
    }

    pub(crate) fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub(crate) fn with_status(mut self, name: &str) -> Self {
        self.status = ACTIVITY_STATUS.ordinal_of(name);
        self
    }

    pub(crate) fn with_level(mut self, name: &str) -> Self {
        self.level = LEVEL.ordinal_of(name);
        self
    }

    pub(crate) fn with_created_at(mut self, at: i64) -> Self {
        self.created_at = millis(at);
        self
    }

    pub(crate) fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub(crate) fn with_book(mut self, book: Book) -> Self {
        self.books.push(book);
        self
    }
}

impl EntityValue for Author {
    fn get_value(&self, field: &str) -> Option<Value> {
        let value = match field {
            "id" => Value::Int(self.id),
            "authorName" => self.author_name.clone().into(),
            "email" => self.email.clone().into(),
            "age" => self.age.into(),
            "active" => self.active.into(),
            "status" => enum_value(&ACTIVITY_STATUS, self.status),
            "level" => enum_value(&LEVEL, self.level),
            "rating" => self.rating.into(),
            "createdAt" => self.created_at.into(),
            "externalId" => self.external_id.into(),
            _ => return None,
        };

        Some(value)
    }

    fn related(&self, relation: &str) -> Vec<&dyn EntityValue> {
        match relation {
            "address" => self
                .address
                .iter()
                .map(|address| address as &dyn EntityValue)
                .collect(),
            "books" => self
                .books
                .iter()
                .map(|book| book as &dyn EntityValue)
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl EntityKind for Author {
    type Key = i64;

    const MODEL: &'static EntityModel = &AUTHOR_MODEL;

    fn key(&self) -> Self::Key {
        self.id
    }
}
