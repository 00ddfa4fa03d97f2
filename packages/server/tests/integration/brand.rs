use serde_json::json;

use crate::common::{TestApp, assert_error, routes};

async fn create_brand(app: &TestApp, name: &str, active: bool) -> i64 {
    let res = app
        .post(routes::BRANDS, &json!({"name": name, "is_active": active}))
        .await;
    assert_eq!(res.status, 201, "create failed: {}", res.text);
    res.body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn create_defaults_to_active() {
    let app = TestApp::spawn().await;

    let res = app
        .post(routes::BRANDS, &json!({"name": "Daikin", "image_url": "/uploads/d.png"}))
        .await;
    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["is_active"], true);
    assert_eq!(res.body["image_url"], "/uploads/d.png");
}

#[tokio::test]
async fn duplicate_name_conflicts() {
    let app = TestApp::spawn().await;
    create_brand(&app, "Carrier", true).await;
    let other = create_brand(&app, "Midea", true).await;

    let res = app.post(routes::BRANDS, &json!({"name": "Carrier"})).await;
    assert_error(&res, 409, "CONFLICT");

    let res = app
        .patch(&routes::brand(other), &json!({"name": "Carrier"}))
        .await;
    assert_error(&res, 409, "CONFLICT");
}

#[tokio::test]
async fn admin_lists_all_public_lists_active() {
    let app = TestApp::spawn().await;
    create_brand(&app, "Zeta", true).await;
    create_brand(&app, "Alpha", false).await;
    create_brand(&app, "Beta", true).await;

    let res = app.get(routes::BRANDS).await;
    let names: Vec<&str> = res
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Alpha", "Beta", "Zeta"]);

    let res = app.get(routes::PUBLIC_BRANDS).await;
    let names: Vec<&str> = res
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Beta", "Zeta"]);
}

#[tokio::test]
async fn update_and_delete_brand() {
    let app = TestApp::spawn().await;
    let id = create_brand(&app, "LG", true).await;

    let res = app
        .patch(
            &routes::brand(id),
            &json!({"image_url": "/uploads/lg.png", "is_active": false}),
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["image_url"], "/uploads/lg.png");
    assert_eq!(res.body["is_active"], false);

    let res = app
        .patch(&routes::brand(id), &json!({"image_url": null}))
        .await;
    assert!(res.body["image_url"].is_null());

    assert_eq!(app.delete(&routes::brand(id)).await.status, 204);
    assert_error(&app.get(&routes::brand(id)).await, 404, "NOT_FOUND");
}
