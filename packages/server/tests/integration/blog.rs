use serde_json::{Value, json};

use crate::common::{TestApp, assert_error, routes};

fn post(topic: &str, date: &str, division: &str) -> Value {
    json!({
        "topic": topic,
        "date": date,
        "division": division,
        "image_url": "/uploads/blog.jpg",
        "short_description": format!("About {topic}"),
        "paragraph": "Body text.",
    })
}

async fn create_blog(app: &TestApp, body: Value) -> i64 {
    let res = app.post(routes::BLOGS, &body).await;
    assert_eq!(res.status, 201, "create failed: {}", res.text);
    res.body["id"].as_i64().unwrap()
}

fn topics(body: &Value) -> Vec<&str> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["topic"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn create_derives_slug_and_defaults() {
    let app = TestApp::spawn().await;

    let res = app
        .post(routes::BLOGS, &post("Solar Panels: A Guide!", "2024-05-01", "Solar"))
        .await;
    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["slug"], "solar-panels-a-guide");
    assert_eq!(res.body["is_published"], true);
    assert_eq!(res.body["view_count"], 0);
    assert_eq!(res.body["date"], "2024-05-01");
}

#[tokio::test]
async fn create_validates_fields() {
    let app = TestApp::spawn().await;

    let mut body = post("Guide", "2024-05-01", "Solar");
    body["image_url"] = json!("");
    let res = app.post(routes::BLOGS, &body).await;
    assert_error(&res, 400, "VALIDATION_ERROR");

    let mut body = post("Guide", "2024-05-01", "Solar");
    body["slug"] = json!("Has Spaces");
    let res = app.post(routes::BLOGS, &body).await;
    assert_error(&res, 400, "VALIDATION_ERROR");

    let res = app.post(routes::BLOGS, &post("!!!", "2024-05-01", "Solar")).await;
    assert_error(&res, 400, "VALIDATION_ERROR");
}

#[tokio::test]
async fn duplicate_slug_conflicts() {
    let app = TestApp::spawn().await;
    create_blog(&app, post("Guide", "2024-05-01", "Solar")).await;
    let other = create_blog(&app, post("Other", "2024-05-02", "Solar")).await;

    let res = app.post(routes::BLOGS, &post("Guide", "2024-06-01", "Wind")).await;
    assert_error(&res, 409, "CONFLICT");

    let res = app
        .patch(&routes::blog(other), &json!({"slug": "guide"}))
        .await;
    assert_error(&res, 409, "CONFLICT");
}

#[tokio::test]
async fn admin_list_filters_and_orders_by_date() {
    let app = TestApp::spawn().await;
    create_blog(&app, post("Old solar", "2023-01-10", "Solar")).await;
    create_blog(&app, post("New solar", "2024-03-01", "Solar")).await;
    create_blog(&app, post("Wind farms", "2023-08-15", "Wind")).await;

    let res = app.get(routes::BLOGS).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(topics(&res.body), vec!["New solar", "Wind farms", "Old solar"]);
    assert_eq!(res.body["pagination"]["total"], 3);

    let res = app.get(&format!("{}?division=Wind", routes::BLOGS)).await;
    assert_eq!(topics(&res.body), vec!["Wind farms"]);

    let res = app.get(&format!("{}?search=SOLAR", routes::BLOGS)).await;
    assert_eq!(topics(&res.body), vec!["New solar", "Old solar"]);

    let res = app
        .get(&format!(
            "{}?start_date=2023-06-01&end_date=2023-12-31",
            routes::BLOGS
        ))
        .await;
    assert_eq!(topics(&res.body), vec!["Wind farms"]);

    let res = app
        .get(&format!(
            "{}?start_date=2024-01-01&end_date=2023-01-01",
            routes::BLOGS
        ))
        .await;
    assert_error(&res, 400, "VALIDATION_ERROR");

    let res = app.get(routes::BLOG_DIVISIONS).await;
    assert_eq!(res.body, json!(["Solar", "Wind"]));
}

#[tokio::test]
async fn unpublished_posts_are_hidden_publicly() {
    let app = TestApp::spawn().await;
    let shown = create_blog(&app, post("Shown", "2024-01-01", "Solar")).await;
    let mut hidden = post("Hidden", "2024-02-01", "Wind");
    hidden["is_published"] = json!(false);
    let hidden = create_blog(&app, hidden).await;

    let res = app.get(routes::PUBLIC_BLOGS).await;
    assert_eq!(topics(&res.body), vec!["Shown"]);

    let res = app.get(routes::PUBLIC_RECENT_BLOGS).await;
    assert_eq!(res.body.as_array().unwrap().len(), 1);
    assert_eq!(res.body[0]["id"], shown);

    let res = app.get(routes::PUBLIC_BLOG_DIVISIONS).await;
    assert_eq!(res.body, json!(["Solar"]));

    let res = app.get(&routes::public_blog(hidden)).await;
    assert_error(&res, 404, "NOT_FOUND");
    let res = app.get(&routes::public_blog_by_slug("hidden")).await;
    assert_error(&res, 404, "NOT_FOUND");

    let res = app.patch(&routes::blog_toggle_publish(hidden), &json!({})).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["is_published"], true);

    let res = app.get(&routes::public_blog(hidden)).await;
    assert_eq!(res.status, 200, "{}", res.text);
}

#[tokio::test]
async fn public_reads_count_views() {
    let app = TestApp::spawn().await;
    let id = create_blog(&app, post("Counted", "2024-01-01", "Solar")).await;

    let res = app.get(&routes::public_blog(id)).await;
    assert_eq!(res.body["view_count"], 1);
    let res = app.get(&routes::public_blog_by_slug("counted")).await;
    assert_eq!(res.body["view_count"], 2);

    let res = app.get(&routes::blog(id)).await;
    assert_eq!(res.body["view_count"], 2);
}

#[tokio::test]
async fn update_and_delete_blog() {
    let app = TestApp::spawn().await;
    let id = create_blog(&app, post("Draft", "2024-01-01", "Solar")).await;

    let res = app
        .patch(
            &routes::blog(id),
            &json!({"topic": "Final", "image_url": "/uploads/final.jpg"}),
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["topic"], "Final");
    assert_eq!(res.body["image_url"], "/uploads/final.jpg");
    assert_eq!(res.body["slug"], "draft");

    let res = app.delete(&routes::blog(id)).await;
    assert_eq!(res.status, 204);
    let res = app.delete(&routes::blog(id)).await;
    assert_error(&res, 404, "NOT_FOUND");
    let res = app.get(&routes::blog(id)).await;
    assert_error(&res, 404, "NOT_FOUND");
}

#[tokio::test]
async fn huge_page_number_is_rejected() {
    let app = TestApp::spawn().await;

    let res = app
        .get(&format!(
            "{}?page=18446744073709551615&per_page=100",
            routes::PUBLIC_BLOGS
        ))
        .await;
    assert_error(&res, 400, "VALIDATION_ERROR");
}
