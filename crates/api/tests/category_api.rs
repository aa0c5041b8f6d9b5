//! HTTP-level tests for the gallery categories.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_json_auth, get, patch_json_auth, post_json_auth, send_raw_auth,
};
use folio_db::models::image::CreateImage;
use folio_db::repositories::ImageRepo;
use sqlx::PgPool;

async fn create_category(app: axum::Router, token: &str, id: &str, name: &str) {
    let body = serde_json::json!({ "id": id, "name": name, "description": "" });
    let response = post_json_auth(app, "/api/categories", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_gallery_is_an_empty_list(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/categories").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["categories"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_then_list_includes_category_once(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::admin_token(app.clone()).await;

    let response = post_json_auth(
        app.clone(),
        "/api/categories",
        serde_json::json!({ "id": "nature", "name": "Nature" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["success"], true);

    let json = body_json(get(app, "/api/categories").await).await;
    let categories = json["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["id"], "nature");
    assert_eq!(categories[0]["name"], "Nature");
    assert_eq!(categories[0]["description"], "");
    assert_eq!(categories[0]["images"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn gallery_nests_images_in_creation_order(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = common::admin_token(app.clone()).await;
    create_category(app.clone(), &token, "nature", "Nature").await;
    create_category(app.clone(), &token, "city", "City").await;

    for src in ["/images/nature/1.jpg", "/images/nature/2.jpg"] {
        ImageRepo::create(
            &pool,
            &CreateImage {
                category_id: "nature".into(),
                src: src.into(),
                alt: String::new(),
                title: String::new(),
                date: String::new(),
            },
        )
        .await
        .unwrap();
    }

    let json = body_json(get(app, "/api/categories").await).await;
    let categories = json["categories"].as_array().unwrap();
    assert_eq!(categories[0]["id"], "nature");
    assert_eq!(categories[1]["id"], "city");

    let images = categories[0]["images"].as_array().unwrap();
    assert_eq!(images.len(), 2);
    assert_eq!(images[0]["src"], "/images/nature/1.jpg");
    assert_eq!(images[1]["src"], "/images/nature/2.jpg");
    assert_eq!(categories[1]["images"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_id_is_409_and_store_unchanged(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::admin_token(app.clone()).await;
    create_category(app.clone(), &token, "nature", "Nature").await;

    let response = post_json_auth(
        app.clone(),
        "/api/categories",
        serde_json::json!({ "id": "nature", "name": "Other" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");

    let json = body_json(get(app, "/api/categories").await).await;
    let categories = json["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["name"], "Nature");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn blank_id_or_name_is_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::admin_token(app.clone()).await;

    for body in [
        serde_json::json!({ "id": "  ", "name": "Nature" }),
        serde_json::json!({ "id": "nature", "name": "" }),
        serde_json::json!({ "name": "Nature" }),
    ] {
        let response = post_json_auth(app.clone(), "/api/categories", body, &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_overwrites_name_and_description(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::admin_token(app.clone()).await;
    create_category(app.clone(), &token, "nature", "Nature").await;

    let response = patch_json_auth(
        app.clone(),
        "/api/categories",
        serde_json::json!({ "id": "nature", "name": "Wild Nature", "description": "Outdoors" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(app, "/api/categories").await).await;
    assert_eq!(json["categories"][0]["name"], "Wild Nature");
    assert_eq!(json["categories"][0]["description"], "Outdoors");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_unknown_category_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::admin_token(app.clone()).await;

    let response = patch_json_auth(
        app,
        "/api/categories",
        serde_json::json!({ "id": "ghost", "name": "Ghost" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_removes_category_and_its_images(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = common::admin_token(app.clone()).await;
    create_category(app.clone(), &token, "nature", "Nature").await;

    for n in 0..3 {
        ImageRepo::create(
            &pool,
            &CreateImage {
                category_id: "nature".into(),
                src: format!("/images/{n}.jpg"),
                alt: String::new(),
                title: String::new(),
                date: String::new(),
            },
        )
        .await
        .unwrap();
    }

    let response = delete_json_auth(
        app.clone(),
        "/api/categories",
        serde_json::json!({ "id": "nature" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], true);

    assert!(ImageRepo::list_by_category(&pool, "nature").await.unwrap().is_empty());
    let json = body_json(get(app, "/api/categories").await).await;
    assert_eq!(json["categories"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_unknown_category_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::admin_token(app.clone()).await;

    let response = delete_json_auth(
        app,
        "/api/categories",
        serde_json::json!({ "id": "ghost" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_one_category_nests_only_its_images(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = common::admin_token(app.clone()).await;
    create_category(app.clone(), &token, "nature", "Nature").await;
    create_category(app.clone(), &token, "city", "City").await;

    for (category_id, src) in [("nature", "/n/1.jpg"), ("city", "/c/1.jpg"), ("nature", "/n/2.jpg")] {
        ImageRepo::create(
            &pool,
            &CreateImage {
                category_id: category_id.into(),
                src: src.into(),
                alt: String::new(),
                title: String::new(),
                date: String::new(),
            },
        )
        .await
        .unwrap();
    }

    let response = get(app.clone(), "/api/categories/nature").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["category"]["id"], "nature");
    assert_eq!(json["category"]["name"], "Nature");
    let srcs: Vec<_> = json["category"]["images"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["src"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(srcs, vec!["/n/1.jpg", "/n/2.jpg"]);

    let response = get(app, "/api/categories/ghost").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unreadable_json_body_gets_the_error_envelope(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::admin_token(app.clone()).await;

    let cases = [
        (Some("application/json"), "{\"id\": \"nature\","),
        (Some("application/json"), "{\"id\": 7, \"name\": \"Seven\"}"),
        (None, "{\"id\": \"nature\", \"name\": \"Nature\"}"),
        (Some("text/plain"), "{\"id\": \"nature\", \"name\": \"Nature\"}"),
    ];
    for (content_type, body) in cases {
        let response = send_raw_auth(
            app.clone(),
            "POST",
            "/api/categories",
            content_type,
            body,
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");

        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR", "body: {body}");
        assert!(json["error"].is_string());
    }

    let json = body_json(get(app, "/api/categories").await).await;
    assert_eq!(json["categories"], serde_json::json!([]));
}
