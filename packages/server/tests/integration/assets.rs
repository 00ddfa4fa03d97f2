use serde_json::json;

use crate::common::{TestApp, assert_error, routes};

#[tokio::test]
async fn upload_stores_file_and_serves_it() {
    let app = TestApp::spawn().await;

    let res = app
        .upload("banner.PNG", b"fake png bytes".to_vec(), "image/png")
        .await;
    assert_eq!(res.status, 201, "{}", res.text);

    let url = res.body["file_url"].as_str().unwrap();
    assert!(url.starts_with("/uploads/"));
    assert!(url.ends_with(".png"));
    assert_eq!(res.body["file_type"], "image/png");
    assert_eq!(res.body["file_size"], 14);
    assert_eq!(
        format!("/uploads/{}", res.body["file_name"].as_str().unwrap()),
        url
    );
    assert!(app.asset_exists(url));

    let served = app.get(url).await;
    assert_eq!(served.status, 200);
    assert_eq!(served.text, "fake png bytes");
}

#[tokio::test]
async fn upload_guesses_type_from_file_name() {
    let app = TestApp::spawn().await;

    let part = reqwest::multipart::Part::bytes(b"<svg/>".to_vec()).file_name("logo.svg");
    let form = reqwest::multipart::Form::new().part("file", part);
    let res = app
        .client
        .post(format!("http://{}{}", app.addr, routes::UPLOAD))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 201);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["file_type"], "image/svg+xml");
}

#[tokio::test]
async fn upload_without_extension_has_no_trailing_dot() {
    let app = TestApp::spawn().await;

    let url = app.upload_file("photo", b"jpeg-ish").await;
    let name = url.strip_prefix("/uploads/").unwrap();
    assert!(!name.is_empty());
    assert!(!name.contains('.'));
    assert!(app.asset_exists(&url));
}

#[tokio::test]
async fn empty_upload_is_rejected_before_writing() {
    let app = TestApp::spawn().await;
    let before = app.upload_dir_listing();

    let res = app.upload("x.png", Vec::new(), "image/png").await;
    assert_error(&res, 400, "VALIDATION_ERROR");
    assert_eq!(res.body["message"], "Please select a file to upload");

    assert_eq!(app.upload_dir_listing(), before);
}

#[tokio::test]
async fn upload_without_file_field_is_rejected() {
    let app = TestApp::spawn().await;

    let form = reqwest::multipart::Form::new().text("note", "no file here");
    let res = app
        .client
        .post(format!("http://{}{}", app.addr, routes::UPLOAD))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 400);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn oversize_upload_is_rejected() {
    let app = TestApp::spawn_with_max_upload(16).await;

    let res = app
        .upload("big.bin", vec![7u8; 64], "application/octet-stream")
        .await;
    assert_error(&res, 413, "PAYLOAD_TOO_LARGE");
    assert!(app.upload_dir_listing().is_empty());
}

#[tokio::test]
async fn upload_dir_holds_only_finished_assets() {
    let app = TestApp::spawn().await;
    let url = app.upload_file("a.jpg", b"a").await;

    let name = url.strip_prefix("/uploads/").unwrap().to_string();
    assert_eq!(app.upload_dir_listing(), vec![name]);
    assert_eq!(app.get("/uploads/.tmp/").await.status, 404);
}

#[tokio::test]
async fn find_unused_reports_unreferenced_assets() {
    let app = TestApp::spawn().await;
    let a = app.write_upload("a.jpg", b"a");
    let b = app.write_upload("b.jpg", b"b");

    let res = app
        .post(
            routes::GALLERY,
            &json!({"title": "Front", "image_url": a}),
        )
        .await;
    assert_eq!(res.status, 201, "{}", res.text);

    let res = app.get(routes::UNUSED_FILES).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["unused_files"], json!([b]));
    assert_eq!(res.body["count"], 1);
}

#[tokio::test]
async fn find_unused_does_not_touch_disk() {
    let app = TestApp::spawn().await;
    app.write_upload("orphan.jpg", b"x");
    let before = app.upload_dir_listing();

    for _ in 0..2 {
        let res = app.get(routes::UNUSED_FILES).await;
        assert_eq!(res.body["count"], 1);
    }
    assert_eq!(app.upload_dir_listing(), before);
}

#[tokio::test]
async fn find_unused_with_missing_directory_is_empty() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::UNUSED_FILES).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["unused_files"], json!([]));
    assert_eq!(res.body["count"], 0);
}

#[tokio::test]
async fn delete_unused_removes_orphans_only() {
    let app = TestApp::spawn().await;
    let kept = app.upload_file("kept.jpg", b"kept").await;
    let orphan = app.write_upload("a.jpg", b"a");

    app.post(routes::GALLERY, &json!({"title": "Kept", "image_url": kept}))
        .await;

    let res = app.delete(routes::UNUSED_FILES).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["unused_files"], json!([orphan]));
    assert_eq!(res.body["count"], 1);
    assert_eq!(res.body["deleted_count"], 1);
    assert_eq!(res.body["failed"], json!([]));

    assert!(!app.asset_exists(&orphan));
    assert!(app.asset_exists(&kept));

    let res = app.get(routes::UNUSED_FILES).await;
    assert_eq!(res.body["unused_files"], json!([]));
}

#[tokio::test]
async fn dangling_reference_is_not_an_error() {
    let app = TestApp::spawn().await;
    app.post(
        routes::GALLERY,
        &json!({"title": "Ghost", "image_url": "/uploads/missing.jpg"}),
    )
    .await;
    let orphan = app.write_upload("orphan.jpg", b"x");

    let res = app.get(routes::UNUSED_FILES).await;
    assert_eq!(res.body["unused_files"], json!([orphan]));
}

#[tokio::test]
async fn references_from_every_content_type_are_honoured() {
    let app = TestApp::spawn().await;
    let gallery = app.write_upload("gallery.jpg", b"g");
    let owner = app.write_upload("owner.jpg", b"o");
    let product = app.write_upload("product.jpg", b"p");
    let brand = app.write_upload("brand.jpg", b"b");
    let news = app.write_upload("news.jpg", b"n");
    let thumb = app.write_upload("thumb.jpg", b"t");
    let team = app.write_upload("team.jpg", b"m");
    let blog = app.write_upload("blog.jpg", b"l");
    let banner = app.write_upload("banner.jpg", b"d");
    let partner = app.write_upload("partner.jpg", b"s");
    let logo = app.write_upload("logo.png", b"h");
    let orphan = app.write_upload("orphan.jpg", b"x");

    let responses = [
        app.post(routes::GALLERY, &json!({"title": "G", "image_url": gallery}))
            .await,
        app.put(
            routes::ABOUT_US,
            &json!({
                "owner_image_url": owner,
                "management_team": [{"name": "Lee", "photo": team}],
            }),
        )
        .await,
        app.post(routes::PRODUCTS, &json!({"name": "P", "image_url_4": product}))
            .await,
        app.post(routes::BRANDS, &json!({"name": "B", "image_url": brand}))
            .await,
        app.post(
            routes::NEWS,
            &json!({
                "title": "N",
                "image_url": news,
                "thumbnail_url": thumb,
                "category": "promotion",
                "is_published": false,
            }),
        )
        .await,
        app.post(
            routes::BLOGS,
            &json!({
                "topic": "B",
                "date": "2024-01-01",
                "division": "Solar",
                "image_url": blog,
                "short_description": "s",
                "paragraph": "p",
                "is_published": false,
            }),
        )
        .await,
        app.post(
            routes::DIVISIONS,
            &json!({
                "id": "D1",
                "name": "D",
                "slug": "d",
                "status": "inactive",
                "basic_info": {"banner_image": banner},
                "sub_divisions": [{"partners": [{"logo": partner}]}],
            }),
        )
        .await,
        app.put(
            routes::HOME_CONTENT,
            &json!({"our_brands": [{"name": "H", "image": logo}]}),
        )
        .await,
    ];
    for res in &responses {
        assert!(res.status == 200 || res.status == 201, "{}", res.text);
    }

    let res = app.delete(routes::UNUSED_FILES).await;
    assert_eq!(res.body["unused_files"], json!([orphan]));
    assert_eq!(res.body["deleted_count"], 1);

    for url in [
        &gallery, &owner, &product, &brand, &news, &thumb, &team, &blog, &banner, &partner,
        &logo,
    ] {
        assert!(app.asset_exists(url), "{url} should survive the sweep");
    }
}

#[tokio::test]
async fn clearing_a_product_image_releases_it() {
    let app = TestApp::spawn().await;
    let p1 = app.upload_file("p1.jpg", b"one").await;
    let p2 = app.upload_file("p2.jpg", b"two").await;

    let res = app
        .post(
            routes::PRODUCTS,
            &json!({"name": "Fan", "image_url_1": p1, "image_url_2": p2}),
        )
        .await;
    assert_eq!(res.status, 201, "{}", res.text);
    let id = res.body["id"].as_i64().unwrap();

    let res = app.get(routes::UNUSED_FILES).await;
    assert_eq!(res.body["count"], 0);

    let res = app
        .patch(&routes::product(id), &json!({"image_url_2": null}))
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["image_url_2"], serde_json::Value::Null);
    assert_eq!(res.body["image_url_1"], p1);

    let res = app.get(routes::UNUSED_FILES).await;
    assert_eq!(res.body["unused_files"], json!([p2]));
}

#[tokio::test]
async fn clearing_a_division_section_releases_nested_images() {
    let app = TestApp::spawn().await;
    let banner = app.upload_file("banner.jpg", b"banner").await;
    let partner = app.upload_file("partner.jpg", b"partner").await;

    let res = app
        .post(
            routes::DIVISIONS,
            &json!({
                "id": "SOLAR",
                "name": "Solar",
                "slug": "solar",
                "status": "active",
                "basic_info": {"banner_image": banner},
                "sub_divisions": [{"name": "Rooftop", "partners": [{"logo": partner}]}],
            }),
        )
        .await;
    assert_eq!(res.status, 201, "{}", res.text);

    let res = app.get(routes::UNUSED_FILES).await;
    assert_eq!(res.body["count"], 0);

    let res = app
        .patch(&routes::division("SOLAR"), &json!({"sub_divisions": null}))
        .await;
    assert_eq!(res.status, 200, "{}", res.text);

    let res = app.get(routes::UNUSED_FILES).await;
    assert_eq!(res.body["unused_files"], json!([partner]));
}

#[tokio::test]
async fn deleting_a_record_releases_its_asset() {
    let app = TestApp::spawn().await;
    let url = app.upload_file("g.jpg", b"g").await;

    let res = app
        .post(routes::GALLERY, &json!({"title": "G", "image_url": url}))
        .await;
    let id = res.body["id"].as_i64().unwrap();

    assert_eq!(app.get(routes::UNUSED_FILES).await.body["count"], 0);

    let res = app.delete(&routes::gallery_item(id)).await;
    assert_eq!(res.status, 204);

    let res = app.delete(routes::UNUSED_FILES).await;
    assert_eq!(res.body["deleted_count"], 1);
    assert!(!app.asset_exists(&url));
}

#[tokio::test]
async fn sweep_ignores_nested_directories() {
    let app = TestApp::spawn().await;
    let orphan = app.write_upload("top.jpg", b"x");
    let nested = app.upload_dir.join("nested");
    std::fs::create_dir_all(&nested).unwrap();
    std::fs::write(nested.join("inner.jpg"), b"inner").unwrap();

    let res = app.delete(routes::UNUSED_FILES).await;
    assert_eq!(res.body["unused_files"], json!([orphan]));
    assert!(nested.join("inner.jpg").exists());
}

#[tokio::test]
async fn concurrent_sweeps_report_consistent_totals() {
    let app = TestApp::spawn().await;
    for i in 0..5 {
        app.write_upload(&format!("orphan-{i}.jpg"), b"x");
    }

    let (first, second) = tokio::join!(
        app.delete(routes::UNUSED_FILES),
        app.delete(routes::UNUSED_FILES)
    );
    assert_eq!(first.status, 200);
    assert_eq!(second.status, 200);

    let deleted = first.body["deleted_count"].as_u64().unwrap()
        + second.body["deleted_count"].as_u64().unwrap();
    assert_eq!(deleted, 5);
    assert!(first.body["failed"].as_array().unwrap().is_empty());
    assert!(second.body["failed"].as_array().unwrap().is_empty());
}
