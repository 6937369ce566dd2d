mod common;

use common::{BADGE, Employee, EMPLOYEE_MODEL, ids, service, staff};
use sieve_core::{
    MAX_PAGE_SIZE,
    config::FilterConfig,
    db::{
        EntityService, FilterRequest, MemoryRepository, Service,
        query::SpecificationBuilder,
        request::{CriteriaOperator, NO_VALUES, Operator, SortDirection},
    },
    error::{ErrorClass, ErrorOrigin},
};

#[test]
fn numeric_text_values_compare_as_numbers() {
    let request = FilterRequest::new(0, 10).append_criteria("age", Operator::GreaterEquals, ["40"]);

    let page = service().filter(&request).unwrap();

    assert_eq!(ids(&page.items), vec![2, 3]);
    assert_eq!(page.total, 2);
}

#[test]
fn and_and_or_groups_union_without_duplicates() {
    let request = FilterRequest::new(0, 10)
        .with_criteria_operator(CriteriaOperator::Or)
        .append_criteria("name", Operator::Contain, ["smith"])
        .append_or_criteria("age", Operator::GreaterThan, [50]);

    let page = service().filter(&request).unwrap();

    assert_eq!(ids(&page.items), vec![1, 3]);
    assert_eq!(service().count(&request).unwrap(), 2);
}

#[test]
fn zero_page_size_returns_every_row_in_one_page() {
    let page = service().filter(&FilterRequest::new(0, 0)).unwrap();

    assert_eq!(page.items.len(), 3);
    assert_eq!(page.size, MAX_PAGE_SIZE);
    assert_eq!(page.total_pages(), 1);
}

#[test]
fn configured_maximum_caps_unbounded_pages() {
    let config = FilterConfig::from_toml_str("max_page_size = 2").unwrap();
    let service = Service::with_config(MemoryRepository::with_rows(staff()), config);

    let page = service.filter(&FilterRequest::new(0, -1)).unwrap();
    assert_eq!(ids(&page.items), vec![1, 2]);
    assert!(page.has_next());

    let page = service.filter(&FilterRequest::new(0, 50)).unwrap();
    assert_eq!(page.size, 2);
}

#[test]
fn empty_groups_select_everything_or_nothing() {
    let service = service();
    let request = FilterRequest::new(0, 10);

    let mut builder = SpecificationBuilder::new(&EMPLOYEE_MODEL, service.config());
    let all = builder.build_and(&[]).unwrap();
    let spec = builder.finish(Some(all));
    assert_eq!(service.filter_with(&spec, &request).unwrap().items.len(), 3);

    let mut builder = SpecificationBuilder::new(&EMPLOYEE_MODEL, service.config());
    let none = builder.build_or(&[]).unwrap();
    let spec = builder.finish(Some(none));
    assert!(service.filter_with(&spec, &request).unwrap().is_empty());
    assert_eq!(service.count_specification(Some(&spec)).unwrap(), 0);
}

#[test]
fn storage_type_mismatch_is_an_illegal_argument() {
    let request = FilterRequest::new(0, 10).append_criteria("age", Operator::Equals, ["forty"]);

    let err = service().filter(&request).unwrap_err();

    assert_eq!(err.class, ErrorClass::IllegalArgument);
    assert_eq!(err.origin, ErrorOrigin::Executor);
    assert_eq!(err.message, "field type not support operator or value");
}

#[test]
fn ordering_a_boolean_column_is_an_illegal_argument() {
    let request = FilterRequest::new(0, 10).append_criteria("active", Operator::LesserThan, [true]);

    let err = service().count(&request).unwrap_err();

    assert_eq!(err.class, ErrorClass::IllegalArgument);
}

#[test]
fn relationship_paths_join_left_outer() {
    let service = service();

    let request = FilterRequest::new(0, 10).append_criteria("department.city", Operator::Equals, ["Surat"]);
    assert_eq!(ids(&service.filter(&request).unwrap().items), vec![2]);

    let request = FilterRequest::new(0, 10).append_criteria("department.city", Operator::Null, NO_VALUES);
    assert_eq!(ids(&service.filter(&request).unwrap().items), vec![3]);

    let request = FilterRequest::new(0, 10).append_criteria("department.name,city", Operator::Contain, ["PUNE"]);
    assert_eq!(ids(&service.filter(&request).unwrap().items), vec![1]);
}

#[test]
fn sorting_follows_directive_order_and_to_one_paths() {
    let request = FilterRequest::new(0, 10)
        .append_sort("department.name", SortDirection::Desc)
        .append_sort("age", SortDirection::Asc);

    let page = service().filter(&request).unwrap();

    // NULL department sorts first descending
    assert_eq!(ids(&page.items), vec![3, 2, 1]);
}

#[test]
fn dates_coerce_from_epoch_milliseconds() {
    let service = service();

    let request = FilterRequest::new(0, 10).append_criteria("hiredAt", Operator::Equals, ["0"]);
    assert_eq!(ids(&service.filter(&request).unwrap().items), vec![1]);

    let request = FilterRequest::new(0, 10).append_criteria("hiredAt", Operator::GreaterThan, [86_400_000]);
    assert_eq!(ids(&service.filter(&request).unwrap().items), vec![3]);

    let request = FilterRequest::new(0, 10).append_criteria("hiredAt", Operator::Equals, ["yesterday"]);
    let err = service.filter(&request).unwrap_err();
    assert_eq!(err.class, ErrorClass::InvalidValue);
}

#[test]
fn enums_coerce_from_name_or_ordinal() {
    let service = service();

    let request = FilterRequest::new(0, 10).append_criteria("role", Operator::In, ["DIRECTOR", "1"]);
    assert_eq!(ids(&service.filter(&request).unwrap().items), vec![2, 3]);

    let request = FilterRequest::new(0, 10).append_criteria("role", Operator::Equals, ["INTERN"]);
    let err = service.filter(&request).unwrap_err();
    assert_eq!(err.class, ErrorClass::InvalidValue);
    assert!(err.message.contains("Invalid Enum Value 'INTERN' for Role"));
}

#[test]
fn uuids_coerce_from_canonical_text() {
    let service = service();

    let request = FilterRequest::new(0, 10).append_criteria("badge", Operator::Equals, [BADGE]);
    assert_eq!(ids(&service.filter(&request).unwrap().items), vec![2]);

    let request = FilterRequest::new(0, 10).append_criteria("badge", Operator::Equals, ["not-a-uuid"]);
    assert_eq!(service.filter(&request).unwrap_err().class, ErrorClass::InvalidValue);
}

#[test]
fn contain_treats_pattern_characters_literally() {
    let mut service = service();
    service.create(Employee::new(4, "50%_off [sale]", 30));
    service.create(Employee::new(5, "500 offers", 30));

    let request = FilterRequest::new(0, 10).append_criteria("name", Operator::Contain, ["50%_OFF"]);
    assert_eq!(ids(&service.filter(&request).unwrap().items), vec![4]);

    let request = FilterRequest::new(0, 10).append_criteria("name", Operator::Contain, ["[sale]"]);
    assert_eq!(ids(&service.filter(&request).unwrap().items), vec![4]);

    let request = FilterRequest::new(0, 10).append_criteria("name", Operator::ContainWithWildcard, ["50_ off%"]);
    assert_eq!(ids(&service.filter(&request).unwrap().items), vec![5]);
}

#[test]
fn missing_values_abort_the_request() {
    let request = FilterRequest::new(0, 10)
        .append_criteria("age", Operator::GreaterThan, [10])
        .append_or_criteria("name", Operator::NotContain, NO_VALUES);

    let err = service().filter(&request).unwrap_err();

    assert_eq!(err.class, ErrorClass::MissingValue);
}

#[test]
fn wire_requests_run_end_to_end() {
    let request = FilterRequest::from_json(
        r#"{
            "page": 0,
            "pageSize": 1,
            "sort": [{ "column": "age", "sortType": "DESC" }],
            "criteria": [{ "column": "active", "operator": "!is_null" }]
        }"#,
    )
    .unwrap();

    let page = service().filter(&request).unwrap();

    assert_eq!(ids(&page.items), vec![2]);
    assert_eq!(page.total, 2);
    assert!(page.has_next());

    let err = FilterRequest::from_json(
        r#"{ "criteria": [{ "column": "age", "operator": "between", "values": [1, 2] }] }"#,
    )
    .unwrap_err();
    assert_eq!(err.class, ErrorClass::UnsupportedOperator);
}

#[test]
fn merged_search_and_default_requests() {
    let service = service();
    let search = FilterRequest::new(0, 10).append_criteria("name", Operator::Contain, ["smith"]);
    let default = FilterRequest::new(0, 10).append_criteria("active", Operator::True, NO_VALUES);

    let page = service
        .filter_merged(&search, &default, CriteriaOperator::And)
        .unwrap();
    assert_eq!(ids(&page.items), vec![1]);

    let total = service
        .count_merged(&search, &default, CriteriaOperator::Or)
        .unwrap();
    assert_eq!(total, 2);
}

#[test]
fn filter_as_projects_into_views() {
    #[derive(Debug, PartialEq)]
    struct Badge {
        name: String,
    }

    impl From<Employee> for Badge {
        fn from(employee: Employee) -> Self {
            Self {
                name: employee.name.unwrap_or_default(),
            }
        }
    }

    let request = FilterRequest::new(0, 10).append_criteria("active", Operator::False, NO_VALUES);
    let page = service().filter_as::<Badge>(&request).unwrap();

    assert_eq!(
        page.items,
        vec![Badge {
            name: "Ravi Kumar".to_string()
        }]
    );
}
