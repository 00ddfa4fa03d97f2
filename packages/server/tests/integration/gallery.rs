use serde_json::json;

use crate::common::{TestApp, assert_error, routes};

async fn create_item(app: &TestApp, title: &str) -> i64 {
    let res = app
        .post(
            routes::GALLERY,
            &json!({"title": title, "image_url": format!("/uploads/{title}.jpg")}),
        )
        .await;
    assert_eq!(res.status, 201, "create failed: {}", res.text);
    res.body["id"].as_i64().unwrap()
}

fn titles(body: &serde_json::Value) -> Vec<&str> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|item| item["title"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn create_appends_to_the_end() {
    let app = TestApp::spawn().await;

    create_item(&app, "first").await;
    create_item(&app, "second").await;

    let res = app.get(routes::GALLERY).await;
    assert_eq!(res.status, 200);
    assert_eq!(titles(&res.body), vec!["first", "second"]);
    assert_eq!(res.body[0]["display_order"], 0);
    assert_eq!(res.body[1]["display_order"], 1);
}

#[tokio::test]
async fn create_validates_input() {
    let app = TestApp::spawn().await;

    let res = app
        .post(routes::GALLERY, &json!({"title": "  ", "image_url": "/uploads/a.jpg"}))
        .await;
    assert_error(&res, 400, "VALIDATION_ERROR");

    let res = app
        .post(routes::GALLERY, &json!({"title": "ok", "image_url": ""}))
        .await;
    assert_error(&res, 400, "VALIDATION_ERROR");

    let res = app
        .post(
            routes::GALLERY,
            &json!({"title": "ok", "image_url": "/uploads/a.jpg", "display_order": -1}),
        )
        .await;
    assert_error(&res, 400, "VALIDATION_ERROR");

    let res = app.post(routes::GALLERY, &json!({"title": "missing url"})).await;
    assert_error(&res, 400, "VALIDATION_ERROR");
}

#[tokio::test]
async fn get_update_and_delete() {
    let app = TestApp::spawn().await;
    let id = create_item(&app, "showroom").await;

    let res = app.get(&routes::gallery_item(id)).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["image_url"], "/uploads/showroom.jpg");

    let res = app
        .patch(
            &routes::gallery_item(id),
            &json!({"title": "Showroom 2024", "category": "events", "description": "Opening day"}),
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["title"], "Showroom 2024");
    assert_eq!(res.body["category"], "events");

    let res = app
        .patch(&routes::gallery_item(id), &json!({"description": null}))
        .await;
    assert_eq!(res.status, 200);
    assert!(res.body["description"].is_null());
    assert_eq!(res.body["category"], "events");

    let res = app.delete(&routes::gallery_item(id)).await;
    assert_eq!(res.status, 204);

    let res = app.get(&routes::gallery_item(id)).await;
    assert_error(&res, 404, "NOT_FOUND");
    let res = app.delete(&routes::gallery_item(id)).await;
    assert_error(&res, 404, "NOT_FOUND");
}

#[tokio::test]
async fn empty_patch_returns_current_item() {
    let app = TestApp::spawn().await;
    let id = create_item(&app, "same").await;

    let res = app.patch(&routes::gallery_item(id), &json!({})).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["title"], "same");

    let res = app.patch(&routes::gallery_item(9999), &json!({})).await;
    assert_error(&res, 404, "NOT_FOUND");
}

#[tokio::test]
async fn reorder_assigns_contiguous_positions() {
    let app = TestApp::spawn().await;
    let a = create_item(&app, "a").await;
    let b = create_item(&app, "b").await;
    let c = create_item(&app, "c").await;

    let res = app
        .post(routes::GALLERY_REORDER, &json!({"gallery_item_ids": [c, a, b]}))
        .await;
    assert_eq!(res.status, 204, "{}", res.text);

    let res = app.get(routes::GALLERY).await;
    assert_eq!(titles(&res.body), vec!["c", "a", "b"]);
    let orders: Vec<i64> = res
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["display_order"].as_i64().unwrap())
        .collect();
    assert_eq!(orders, vec![0, 1, 2]);
}

#[tokio::test]
async fn reorder_rejects_bad_id_lists() {
    let app = TestApp::spawn().await;
    let a = create_item(&app, "a").await;
    let b = create_item(&app, "b").await;

    let res = app
        .post(routes::GALLERY_REORDER, &json!({"gallery_item_ids": []}))
        .await;
    assert_error(&res, 400, "VALIDATION_ERROR");

    let res = app
        .post(routes::GALLERY_REORDER, &json!({"gallery_item_ids": [a, a]}))
        .await;
    assert_error(&res, 400, "VALIDATION_ERROR");

    let res = app
        .post(routes::GALLERY_REORDER, &json!({"gallery_item_ids": [b, 4242]}))
        .await;
    assert_error(&res, 404, "NOT_FOUND");

    // A failed reorder leaves the order untouched.
    let res = app.get(routes::GALLERY).await;
    assert_eq!(titles(&res.body), vec!["a", "b"]);
}

#[tokio::test]
async fn public_gallery_mirrors_admin_listing() {
    let app = TestApp::spawn().await;
    let id = create_item(&app, "public").await;

    let res = app.get(routes::PUBLIC_GALLERY).await;
    assert_eq!(res.status, 200);
    assert_eq!(titles(&res.body), vec!["public"]);

    let res = app.get(&routes::public_gallery_item(id)).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["id"], id);

    let res = app.get(&routes::public_gallery_item(id + 1)).await;
    assert_error(&res, 404, "NOT_FOUND");
}

#[tokio::test]
async fn malformed_json_is_a_validation_error() {
    let app = TestApp::spawn().await;

    let res = app
        .client
        .post(format!("http://{}{}", app.addr, routes::GALLERY))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 400);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["code"], "VALIDATION_ERROR");
}
