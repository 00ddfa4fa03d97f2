use serde_json::{Value, json};

use crate::common::{TestApp, assert_error, routes};

async fn create_news(app: &TestApp, body: Value) -> i64 {
    let res = app.post(routes::NEWS, &body).await;
    assert_eq!(res.status, 201, "create failed: {}", res.text);
    res.body["id"].as_i64().unwrap()
}

fn titles(body: &Value) -> Vec<&str> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["title"].as_str().unwrap())
        .collect()
}

fn item(title: &str, category: &str) -> Value {
    json!({
        "title": title,
        "image_url": format!("/uploads/{title}.jpg"),
        "category": category,
    })
}

#[tokio::test]
async fn create_defaults() {
    let app = TestApp::spawn().await;

    let res = app.post(routes::NEWS, &item("launch", "event")).await;
    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["is_published"], true);
    assert_eq!(res.body["is_featured"], false);
    assert_eq!(res.body["view_count"], 0);
    assert_eq!(res.body["display_order"], 0);
}

#[tokio::test]
async fn create_requires_image_and_category() {
    let app = TestApp::spawn().await;

    let res = app
        .post(
            routes::NEWS,
            &json!({"title": "x", "image_url": "", "category": "event"}),
        )
        .await;
    assert_error(&res, 400, "VALIDATION_ERROR");

    let res = app
        .post(
            routes::NEWS,
            &json!({"title": "x", "image_url": "/uploads/x.jpg", "category": " "}),
        )
        .await;
    assert_error(&res, 400, "VALIDATION_ERROR");
}

#[tokio::test]
async fn admin_list_includes_everything_newest_first() {
    let app = TestApp::spawn().await;
    create_news(&app, item("old", "event")).await;
    let mut hidden = item("hidden", "promotion");
    hidden["is_published"] = json!(false);
    create_news(&app, hidden).await;

    let res = app.get(routes::NEWS).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(titles(&res.body), vec!["hidden", "old"]);

    let res = app.get(&format!("{}?category=event", routes::NEWS)).await;
    assert_eq!(titles(&res.body), vec!["old"]);
}

#[tokio::test]
async fn public_list_hides_unpublished_and_expired() {
    let app = TestApp::spawn().await;
    create_news(&app, item("live", "event")).await;

    let mut draft = item("draft", "event");
    draft["is_published"] = json!(false);
    create_news(&app, draft).await;

    let mut expired = item("expired", "event");
    expired["expire_date"] = json!("2000-01-01T00:00:00Z");
    create_news(&app, expired).await;

    let mut future = item("future-expiry", "event");
    future["expire_date"] = json!("2999-01-01T00:00:00Z");
    create_news(&app, future).await;

    let res = app.get(routes::PUBLIC_NEWS).await;
    assert_eq!(res.status, 200, "{}", res.text);
    let mut visible = titles(&res.body);
    visible.sort();
    assert_eq!(visible, vec!["future-expiry", "live"]);
    assert_eq!(res.body["pagination"]["total"], 2);
}

#[tokio::test]
async fn public_list_filters_by_category_and_featured() {
    let app = TestApp::spawn().await;
    let mut featured = item("featured", "promotion");
    featured["is_featured"] = json!(true);
    create_news(&app, featured).await;
    create_news(&app, item("plain", "promotion")).await;
    create_news(&app, item("other", "event")).await;

    let res = app
        .get(&format!("{}?category=promotion&featured=true", routes::PUBLIC_NEWS))
        .await;
    assert_eq!(titles(&res.body), vec!["featured"]);

    let res = app
        .get(&format!("{}?category=promotion", routes::PUBLIC_NEWS))
        .await;
    assert_eq!(res.body["pagination"]["total"], 2);
}

#[tokio::test]
async fn public_get_counts_views() {
    let app = TestApp::spawn().await;
    let id = create_news(&app, item("popular", "event")).await;

    let res = app.get(&routes::public_news_item(id)).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["view_count"], 1);

    let res = app.get(&routes::public_news_item(id)).await;
    assert_eq!(res.body["view_count"], 2);

    let res = app.get(&routes::news_item(id)).await;
    assert_eq!(res.body["view_count"], 2);
}

#[tokio::test]
async fn public_get_hides_unpublished() {
    let app = TestApp::spawn().await;
    let mut draft = item("draft", "event");
    draft["is_published"] = json!(false);
    let id = create_news(&app, draft).await;

    assert_error(&app.get(&routes::public_news_item(id)).await, 404, "NOT_FOUND");

    let res = app.get(&routes::news_item(id)).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["view_count"], 0);
}

#[tokio::test]
async fn patch_and_delete_news() {
    let app = TestApp::spawn().await;
    let mut body = item("story", "event");
    body["thumbnail_url"] = json!("/uploads/thumb.jpg");
    body["expire_date"] = json!("2999-01-01T00:00:00Z");
    let id = create_news(&app, body).await;

    let res = app
        .patch(
            &routes::news_item(id),
            &json!({"thumbnail_url": null, "expire_date": null, "is_featured": true}),
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert!(res.body["thumbnail_url"].is_null());
    assert!(res.body["expire_date"].is_null());
    assert_eq!(res.body["is_featured"], true);
    assert_eq!(res.body["image_url"], "/uploads/story.jpg");

    assert_eq!(app.delete(&routes::news_item(id)).await.status, 204);
    assert_error(&app.get(&routes::news_item(id)).await, 404, "NOT_FOUND");
}

#[tokio::test]
async fn huge_page_number_is_rejected() {
    let app = TestApp::spawn().await;
    create_news(&app, item("launch", "event")).await;

    for path in [routes::NEWS, routes::PUBLIC_NEWS] {
        let res = app
            .get(&format!("{path}?page=18446744073709551615&per_page=100"))
            .await;
        assert_error(&res, 400, "VALIDATION_ERROR");
    }
}
