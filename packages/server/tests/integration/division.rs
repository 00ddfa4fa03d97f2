use serde_json::{Value, json};

use crate::common::{TestApp, assert_error, routes};

fn division(id: &str, slug: &str, status: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Division {id}"),
        "slug": slug,
        "status": status,
    })
}

async fn create_division(app: &TestApp, body: Value) {
    let res = app.post(routes::DIVISIONS, &body).await;
    assert_eq!(res.status, 201, "create failed: {}", res.text);
}

fn ids(list: &Value) -> Vec<&str> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|d| d["id"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn create_keeps_client_id_and_sections() {
    let app = TestApp::spawn().await;
    let mut body = division("IND_SOLAR_001", "solar", "active");
    body["basic_info"] = json!({"description": "Panels", "banner_image": "/uploads/solar.jpg"});
    body["sub_divisions"] = json!([{"name": "Rooftop"}]);

    let res = app.post(routes::DIVISIONS, &body).await;
    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["id"], "IND_SOLAR_001");
    assert_eq!(res.body["status"], "active");
    assert_eq!(res.body["display_order"], 0);
    assert_eq!(res.body["basic_info"]["banner_image"], "/uploads/solar.jpg");

    let res = app.get(&routes::division("IND_SOLAR_001")).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["sub_divisions"][0]["name"], "Rooftop");
}

#[tokio::test]
async fn create_validates_fields() {
    let app = TestApp::spawn().await;

    let res = app
        .post(routes::DIVISIONS, &division("has space", "ok", "active"))
        .await;
    assert_error(&res, 400, "VALIDATION_ERROR");

    let res = app
        .post(routes::DIVISIONS, &division("D1", "Bad Slug", "active"))
        .await;
    assert_error(&res, 400, "VALIDATION_ERROR");

    let res = app
        .post(routes::DIVISIONS, &division("D1", "ok", "paused"))
        .await;
    assert_error(&res, 400, "VALIDATION_ERROR");

    let mut body = division("D1", "ok", "active");
    body["sub_divisions"] = json!({"not": "a list"});
    let res = app.post(routes::DIVISIONS, &body).await;
    assert_error(&res, 400, "VALIDATION_ERROR");
}

#[tokio::test]
async fn duplicate_id_or_slug_conflicts() {
    let app = TestApp::spawn().await;
    create_division(&app, division("D1", "one", "active")).await;
    create_division(&app, division("D2", "two", "active")).await;

    let res = app
        .post(routes::DIVISIONS, &division("D1", "fresh", "active"))
        .await;
    assert_error(&res, 409, "CONFLICT");

    let res = app
        .post(routes::DIVISIONS, &division("D3", "one", "active"))
        .await;
    assert_error(&res, 409, "CONFLICT");

    let res = app
        .patch(&routes::division("D2"), &json!({"slug": "one"}))
        .await;
    assert_error(&res, 409, "CONFLICT");
}

#[tokio::test]
async fn public_routes_show_active_only() {
    let app = TestApp::spawn().await;
    create_division(&app, division("ON", "on", "active")).await;
    create_division(&app, division("OFF", "off", "inactive")).await;

    let res = app.get(routes::PUBLIC_DIVISIONS).await;
    assert_eq!(ids(&res.body), vec!["ON"]);

    let res = app.get(&routes::public_division("OFF")).await;
    assert_error(&res, 404, "NOT_FOUND");
    let res = app.get(&routes::public_division_by_slug("off")).await;
    assert_error(&res, 404, "NOT_FOUND");
    let res = app.get(&routes::public_division_by_slug("on")).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["id"], "ON");

    let res = app
        .patch(&routes::division_toggle_status("OFF"), &json!({}))
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["status"], "active");

    let res = app.get(&routes::public_division("OFF")).await;
    assert_eq!(res.status, 200, "{}", res.text);

    let res = app.get(routes::DIVISIONS).await;
    assert_eq!(res.body["pagination"]["total"], 2);
}

#[tokio::test]
async fn reorder_assigns_positions() {
    let app = TestApp::spawn().await;
    for id in ["A", "B", "C"] {
        create_division(&app, division(id, &id.to_lowercase(), "active")).await;
    }

    let res = app
        .post(routes::DIVISIONS_REORDER, &json!({"division_ids": ["C", "A", "B"]}))
        .await;
    assert_eq!(res.status, 204, "{}", res.text);

    let res = app.get(routes::ALL_DIVISIONS).await;
    assert_eq!(ids(&res.body), vec!["C", "A", "B"]);

    let res = app
        .post(routes::DIVISIONS_REORDER, &json!({"division_ids": ["A", "Z"]}))
        .await;
    assert_error(&res, 404, "NOT_FOUND");

    let res = app
        .post(routes::DIVISIONS_REORDER, &json!({"division_ids": ["A", "A"]}))
        .await;
    assert_error(&res, 400, "VALIDATION_ERROR");
}

#[tokio::test]
async fn update_clears_section_and_delete_removes() {
    let app = TestApp::spawn().await;
    let mut body = division("D1", "one", "active");
    body["contact_us"] = json!({"email": "d1@example.com"});
    create_division(&app, body).await;

    let res = app
        .patch(
            &routes::division("D1"),
            &json!({"contact_us": null, "status": "inactive"}),
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["contact_us"], Value::Null);
    assert_eq!(res.body["status"], "inactive");

    let res = app.delete(&routes::division("D1")).await;
    assert_eq!(res.status, 204);
    let res = app.delete(&routes::division("D1")).await;
    assert_error(&res, 404, "NOT_FOUND");
    let res = app.get(&routes::division("D1")).await;
    assert_error(&res, 404, "NOT_FOUND");
}

#[tokio::test]
async fn huge_page_number_is_rejected() {
    let app = TestApp::spawn().await;

    let res = app
        .get(&format!(
            "{}?page=18446744073709551615&per_page=100",
            routes::DIVISIONS
        ))
        .await;
    assert_error(&res, 400, "VALIDATION_ERROR");
}
