//! Integration tests for navigating parsed JSON:API responses


use jsonapi_assert_document::{related_link, Document, Error};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_support::{employees_document, employees_json, errors_json};

#[test]
fn test_link_returns_relationship_link() {
    let doc = employees_document();
    let employee = doc.data().unwrap().into_nodes().remove(0);
    assert_eq!(
        employee.link("positions", "related").unwrap(),
        Some(&json!("http://example.com/positions?filter[employee_id]=100"))
    );
}

#[test]
fn test_link_without_links_block() {
    let mut json = employees_json();
    json["data"][0]["relationships"]["positions"]
        .as_object_mut()
        .unwrap()
        .remove("links");
    let doc = Document::from_value(json);
    let employee = doc.data().unwrap().into_nodes().remove(0);

    let err = employee.link("positions", "related").unwrap_err();
    assert!(matches!(err, Error::LinksNotFound { .. }));
    assert_eq!(err.to_string(), "Relationship with name 'positions' has no links!");
}

#[test]
fn test_to_many_sideload() {
    let doc = employees_document();
    let employee = doc.data().unwrap().into_nodes().remove(0);
    let positions = employee.sideload("positions").unwrap().unwrap().into_nodes();
    let attributes: Vec<_> = positions.iter().map(|p| p.item()).collect();
    assert_eq!(
        attributes,
        vec![json!({"id": "200", "jsonapi_type": "positions", "title": "Manager"})]
    );
}

#[test]
fn test_to_one_sideload_from_included_node() {
    let doc = employees_document();
    let position = doc.included().unwrap().remove(0);
    let department = position.sideload("department").unwrap().unwrap().one().unwrap();
    assert_eq!(
        department.item(),
        json!({"id": "300", "jsonapi_type": "departments", "name": "Engineering"})
    );
}

#[test]
fn test_unknown_sideload() {
    let doc = employees_document();
    let employee = doc.data().unwrap().into_nodes().remove(0);
    assert_eq!(
        employee.sideload("foo").unwrap_err().to_string(),
        "Relationship with name 'foo' not found!"
    );
}

#[test]
fn test_null_sideload() {
    let mut json = employees_json();
    json["included"][0]["relationships"]["department"]["data"] = json!(null);
    let doc = Document::from_value(json);
    let position = doc.included().unwrap().remove(0);
    assert!(position.sideload("department").unwrap().is_none());
}

#[test]
fn test_sideload_without_included() {
    let mut json = employees_json();
    json.as_object_mut().unwrap().remove("included");
    let doc = Document::from_value(json);
    let employee = doc.data().unwrap().into_nodes().remove(0);

    let err = employee.sideload("positions").unwrap_err();
    assert!(err
        .to_string()
        .starts_with("Tried to find sideload, but the payload did not contain 'included'!"));
}

#[test]
fn test_sideload_missing_from_included() {
    let mut json = employees_json();
    json["included"].as_array_mut().unwrap().remove(1);
    let doc = Document::from_value(json);
    let position = doc.included().unwrap().remove(0);
    assert_eq!(
        position.sideload("department").unwrap_err().to_string(),
        "No included resource with type 'departments' and id '300'"
    );
}

#[test]
fn test_single_resource_data() {
    let mut json = employees_json();
    json["data"] = json["data"][0].clone();
    let doc = Document::from_value(json);

    let employee = doc.data().unwrap().one().unwrap();
    assert_eq!(employee.id().unwrap(), 100);
    assert_eq!(employee.jsonapi_type(), Some("employees"));
    assert_eq!(employee.attribute("first_name").unwrap(), &json!("John"));
}

#[test]
fn test_collection_data() {
    let doc = employees_document();
    let employees = doc.data().unwrap().into_nodes();
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].id().unwrap(), 100);
    assert_eq!(employees[0].get("first_name"), Some(&json!("John")));
}

#[test]
fn test_missing_data() {
    let mut json = employees_json();
    json.as_object_mut().unwrap().remove("data");
    let doc = Document::from_value(json);
    assert!(matches!(doc.data(), Err(Error::NoData { .. })));
}

#[test]
fn test_included_nodes() {
    let doc = employees_document();
    let included = doc.included().unwrap();
    assert_eq!(included.len(), 2);
    assert_eq!(included[0].id().unwrap(), 200);
    assert_eq!(included[0].jsonapi_type(), Some("positions"));
    assert_eq!(included[0].get("title"), Some(&json!("Manager")));
    assert_eq!(included[1].id().unwrap(), 300);
    assert_eq!(included[1].get("name"), Some(&json!("Engineering")));
}

#[test]
fn test_errors_proxy() {
    let doc = Document::from_value(errors_json());
    let errors = doc.errors();
    assert_eq!(errors.len(), 1);

    let error = errors.get(0).unwrap();
    assert_eq!(error.attribute(), Some("name"));
    assert_eq!(error.status(), Some("422"));
    assert_eq!(error.title(), Some("Validation Error"));
    assert_eq!(error.detail(), Some("Name can't be blank"));
    assert_eq!(error.code(), Some("blank"));
    assert_eq!(error.message(), Some("can't be blank"));

    assert_eq!(errors.find("name").unwrap().message(), Some("can't be blank"));
    let map = errors.to_map();
    assert_eq!(map.get("name").map(String::as_str), Some("can't be blank"));
}

#[test]
fn test_item_helpers() {
    let doc = employees_document();
    assert_eq!(
        doc.items().unwrap(),
        vec![json!({"id": "100", "jsonapi_type": "employees", "first_name": "John"})]
    );
    assert_eq!(doc.ids().unwrap(), vec!["100"]);
    assert_eq!(doc.integer_ids().unwrap(), vec![100]);
    assert_eq!(doc.included_types(), vec!["positions", "departments"]);
    assert_eq!(
        doc.include("departments", 0).unwrap(),
        json!({"id": "300", "jsonapi_type": "departments", "name": "Engineering"})
    );
    assert!(matches!(
        doc.includes_at("positions", &[0, 3]),
        Err(Error::IndexOutOfBounds { index: 3, len: 1, .. })
    ));
}

#[test]
fn test_related_link_decodes() {
    let json = employees_json();
    let url = related_link(&json["data"][0], "positions").unwrap();
    assert_eq!(url.host_str(), Some("example.com"));
    assert_eq!(url.path(), "/positions");
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(pairs, vec![("filter[employee_id]".to_string(), "100".to_string())]);
}
