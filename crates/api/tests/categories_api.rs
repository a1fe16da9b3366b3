//! Integration tests for the category filter endpoints.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, category, get, StubSource};

fn source() -> Arc<StubSource> {
    Arc::new(StubSource {
        tree: vec![
            category(
                "1",
                "Property",
                vec![
                    category("11", "Rent", vec![category("111", "Flats", vec![])]),
                    category("12", "Sale", vec![]),
                ],
            ),
            category("2", "Jobs", vec![]),
        ],
        ..StubSource::default()
    })
}

#[tokio::test]
async fn flat_tree_lists_parents_before_children() {
    let app = common::build_test_app(source());

    let response = get(app, "/api/v1/categories/flat").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let rows = json["data"].as_array().unwrap();
    let order: Vec<&str> = rows.iter().map(|r| r["id"].as_str().unwrap()).collect();
    assert_eq!(order, vec!["1", "11", "111", "12", "2"]);

    assert_eq!(rows[2]["depth"], 2);
    assert_eq!(rows[2]["parentId"], "11");
    assert!(rows[0]["parentId"].is_null());
}

#[tokio::test]
async fn null_sub_categories_read_as_leaves() {
    let tree = serde_json::from_value(serde_json::json!([
        { "id": 1, "name": "Property", "subCategories": null },
        { "id": 2, "name": "Jobs", "subCategories": [
            { "id": 21, "name": "Drivers", "subCategories": null },
            { "name": "missing id" }
        ]}
    ]))
    .unwrap();
    let source = Arc::new(StubSource {
        tree,
        ..StubSource::default()
    });

    let app = common::build_test_app(Arc::clone(&source));
    let json = body_json(get(app, "/api/v1/categories/flat").await).await;
    let order: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(order, vec!["1", "2", "21"]);

    let app = common::build_test_app(source);
    let response = get(app, "/api/v1/categories/1/children").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn children_are_direct_descendants_only() {
    let app = common::build_test_app(source());

    let json = body_json(get(app, "/api/v1/categories/1/children").await).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Rent", "Sale"]);
}

#[tokio::test]
async fn leaf_category_has_no_children() {
    let app = common::build_test_app(source());

    let response = get(app, "/api/v1/categories/111/children").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_category_is_not_found() {
    let app = common::build_test_app(source());

    let response = get(app, "/api/v1/categories/404/children").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Category with id 404 not found");
}
