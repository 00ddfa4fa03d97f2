use serde_json::{Value, json};

use crate::common::{TestApp, assert_error, routes};

#[tokio::test]
async fn empty_details_before_first_save() {
    let app = TestApp::spawn().await;

    for path in [routes::CONTACT, routes::PUBLIC_CONTACT] {
        let res = app.get(path).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["id"], Value::Null);
        assert_eq!(res.body["email"], Value::Null);
    }
}

#[tokio::test]
async fn put_creates_then_replaces_single_record() {
    let app = TestApp::spawn().await;

    let res = app
        .put(
            routes::CONTACT,
            &json!({
                "email": " sales@example.com ",
                "phone": "+1 555 0100",
                "facebook_url": "https://facebook.com/example",
            }),
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["email"], "sales@example.com");
    let id = res.body["id"].clone();

    let res = app
        .put(routes::CONTACT, &json!({"address": "1 Main Street"}))
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["id"], id);
    assert_eq!(res.body["email"], Value::Null);
    assert_eq!(res.body["facebook_url"], Value::Null);

    let res = app.get(routes::PUBLIC_CONTACT).await;
    assert_eq!(res.body["address"], "1 Main Street");
}

#[tokio::test]
async fn put_rejects_malformed_email() {
    let app = TestApp::spawn().await;

    let res = app
        .put(routes::CONTACT, &json!({"email": "not-an-address"}))
        .await;
    assert_error(&res, 400, "VALIDATION_ERROR");
}
