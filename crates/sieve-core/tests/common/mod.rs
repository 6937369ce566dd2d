//! Employee / Department domain shared by the integration tests.
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use sieve_core::{
    db::{MemoryRepository, Service},
    model::{
        entity::EntityModel,
        field::{EnumModel, FieldKind, FieldModel},
        relation::{Cardinality, RelationModel},
    },
    traits::{EntityKind, EntityValue},
    value::{Value, ValueEnum},
};
use uuid::Uuid;

pub static ROLE: EnumModel = EnumModel {
    name: "Role",
    variants: &["ENGINEER", "MANAGER", "DIRECTOR"],
};

pub static DEPARTMENT_MODEL: EntityModel = EntityModel {
    path: "tests::Department",
    entity_name: "Department",
    primary_key: "id",
    fields: &[
        FieldModel::new("id", FieldKind::Int),
        FieldModel::new("name", FieldKind::Text),
        FieldModel::new("city", FieldKind::Text),
    ],
    relations: &[],
};

pub static EMPLOYEE_MODEL: EntityModel = EntityModel {
    path: "tests::Employee",
    entity_name: "Employee",
    primary_key: "id",
    fields: &[
        FieldModel::new("id", FieldKind::Int),
        FieldModel::new("name", FieldKind::Text),
        FieldModel::new("age", FieldKind::Int),
        FieldModel::new("salary", FieldKind::Float),
        FieldModel::new("active", FieldKind::Bool),
        FieldModel::new("role", FieldKind::Enum(&ROLE)),
        FieldModel::new("hiredAt", FieldKind::Timestamp),
        FieldModel::new("badge", FieldKind::Uuid),
    ],
    relations: &[RelationModel {
        name: "department",
        target: &DEPARTMENT_MODEL,
        cardinality: Cardinality::One,
    }],
};

///
/// Department
///

#[derive(Clone, Debug, PartialEq)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub city: Option<String>,
}

impl Department {
    pub fn new(id: i64, name: &str, city: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            city: Some(city.to_string()),
        }
    }
}

impl EntityValue for Department {
    fn get_value(&self, field: &str) -> Option<Value> {
        let value = match field {
            "id" => Value::Int(self.id),
            "name" => Value::Text(self.name.clone()),
            "city" => self.city.clone().into(),
            _ => return None,
        };

        Some(value)
    }
}

///
/// Employee
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Employee {
    pub id: i64,
    pub name: Option<String>,
    pub age: Option<i64>,
    pub salary: Option<f64>,
    pub active: Option<bool>,
    pub role: Option<u32>,
    pub hired_at: Option<DateTime<Utc>>,
    pub badge: Option<Uuid>,
    pub department: Option<Department>,
}

impl Employee {
    pub fn new(id: i64, name: &str, age: i64) -> Self {
        Self {
            id,
            name: Some(name.to_string()),
            age: Some(age),
            ..Self::default()
        }
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn role(mut self, role: &str) -> Self {
        self.role = ROLE.ordinal_of(role);
        self
    }

    pub fn hired_at(mut self, millis: i64) -> Self {
        self.hired_at = DateTime::from_timestamp_millis(millis);
        self
    }

    pub fn badge(mut self, badge: Uuid) -> Self {
        self.badge = Some(badge);
        self
    }

    pub fn department(mut self, department: Department) -> Self {
        self.department = Some(department);
        self
    }
}

impl EntityValue for Employee {
    fn get_value(&self, field: &str) -> Option<Value> {
        let value = match field {
            "id" => Value::Int(self.id),
            "name" => self.name.clone().into(),
            "age" => self.age.into(),
            "salary" => self.salary.into(),
            "active" => self.active.into(),
            "role" => self
                .role
                .and_then(|ordinal| {
                    ROLE.variant_at(ordinal)
                        .map(|name| Value::Enum(ValueEnum::new(ordinal, name)))
                })
                .unwrap_or(Value::Null),
            "hiredAt" => self.hired_at.into(),
            "badge" => self.badge.into(),
            _ => return None,
        };

        Some(value)
    }

    fn related(&self, relation: &str) -> Vec<&dyn EntityValue> {
        match relation {
            "department" => self
                .department
                .iter()
                .map(|department| department as &dyn EntityValue)
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl EntityKind for Employee {
    type Key = i64;

    const MODEL: &'static EntityModel = &EMPLOYEE_MODEL;

    fn key(&self) -> Self::Key {
        self.id
    }
}

pub type EmployeeService = Service<Employee, MemoryRepository<Employee>>;

pub const BADGE: &str = "6f1c2a4e-3b5d-4c7e-9f01-23456789abcd";

/// Three employees aged 25, 40, 60 in insertion order.
pub fn staff() -> Vec<Employee> {
    let engineering = Department::new(1, "Engineering", "Pune");
    let sales = Department::new(2, "Sales", "Surat");

    vec![
        Employee::new(1, "Asha Smith", 25)
            .active(true)
            .role("ENGINEER")
            .hired_at(0)
            .department(engineering.clone()),
        Employee::new(2, "Ravi Kumar", 40)
            .active(false)
            .role("MANAGER")
            .hired_at(86_400_000)
            .badge(Uuid::parse_str(BADGE).unwrap_or_default())
            .department(sales),
        Employee::new(3, "Meera Smithson", 60)
            .role("DIRECTOR")
            .hired_at(172_800_000),
    ]
}

pub fn service() -> EmployeeService {
    Service::new(MemoryRepository::with_rows(staff()))
}

pub fn ids<E: EntityKind<Key = i64>>(items: &[E]) -> Vec<i64> {
    items.iter().map(EntityKind::key).collect()
}
