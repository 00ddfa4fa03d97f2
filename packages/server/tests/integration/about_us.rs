use serde_json::json;

use crate::common::{TestApp, assert_error, routes};

#[tokio::test]
async fn empty_profile_before_first_save() {
    let app = TestApp::spawn().await;

    for path in [routes::ABOUT_US, routes::PUBLIC_ABOUT_US] {
        let res = app.get(path).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert!(res.body["id"].is_null());
        assert!(res.body["company_name"].is_null());
    }
}

#[tokio::test]
async fn put_creates_then_replaces_single_profile() {
    let app = TestApp::spawn().await;

    let res = app
        .put(
            routes::ABOUT_US,
            &json!({
                "company_name": "Cool Breeze",
                "owner_name": "Alex",
                "owner_image_url": "/uploads/owner.jpg",
                "management_team": [{"name": "Sam", "role": "Sales"}],
            }),
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    let id = res.body["id"].as_i64().unwrap();
    assert_eq!(res.body["management_team"][0]["name"], "Sam");

    let res = app
        .put(routes::ABOUT_US, &json!({"company_name": "Cool Breeze Ltd"}))
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["id"], id);
    assert_eq!(res.body["company_name"], "Cool Breeze Ltd");
    assert!(res.body["owner_image_url"].is_null());

    let res = app.get(routes::PUBLIC_ABOUT_US).await;
    assert_eq!(res.body["id"], id);
    assert_eq!(res.body["company_name"], "Cool Breeze Ltd");
}

#[tokio::test]
async fn put_validates_json_lists() {
    let app = TestApp::spawn().await;

    let res = app
        .put(routes::ABOUT_US, &json!({"milestones": "founded 1999"}))
        .await;
    assert_error(&res, 400, "VALIDATION_ERROR");
}
