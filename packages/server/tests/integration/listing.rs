use ::common::ImageRecord;
use ::common::store::RecordStore;

use crate::common::{TestApp, routes};

fn record(file_name: &str, order: &str) -> ImageRecord {
    ImageRecord {
        order: order.into(),
        ..ImageRecord::new(file_name, format!("https://cdn.test/{file_name}"))
    }
}

#[tokio::test]
async fn lists_category_sorted_by_order() {
    let app = TestApp::spawn().await;
    app.store
        .append("illustration", record("b.jpg", "p34"))
        .await
        .unwrap();
    app.store
        .append("illustration", record("a.jpg", "i09"))
        .await
        .unwrap();

    let res = app.get(&routes::images("illustration")).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(
        res.body,
        serde_json::json!([
            {"fileName": "a.jpg", "url": "https://cdn.test/a.jpg", "text": "", "order": "i09"},
            {"fileName": "b.jpg", "url": "https://cdn.test/b.jpg", "text": "", "order": "p34"},
        ])
    );
}

#[tokio::test]
async fn unordered_records_come_first() {
    let app = TestApp::spawn().await;
    app.store
        .append("painting", record("late.jpg", "p01"))
        .await
        .unwrap();
    app.store
        .append("painting", ImageRecord::new("new.jpg", "https://cdn.test/new.jpg"))
        .await
        .unwrap();

    let res = app.get(&routes::images("painting")).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.file_names(), ["new.jpg", "late.jpg"]);
}

#[tokio::test]
async fn unknown_category_is_empty_array() {
    let app = TestApp::spawn().await;

    let res = app.get(&routes::images("sculpture")).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.text, "[]");
    assert!(
        res.header("content-type")
            .is_some_and(|ct| ct.starts_with("application/json"))
    );
}

#[tokio::test]
async fn missing_category_is_empty_array() {
    let app = TestApp::spawn().await;
    app.store
        .append("illustration", record("a.jpg", "i01"))
        .await
        .unwrap();

    for path in ["/api/images", "/api/images/"] {
        let res = app.get(path).await;
        assert_eq!(res.status, 200, "{path}");
        assert_eq!(res.text, "[]", "{path}");
        assert!(
            res.header("content-type")
                .is_some_and(|ct| ct.starts_with("application/json")),
            "{path}"
        );
    }

    let res = app
        .get_with_origin("/api/images/", "https://portfolio.example")
        .await;
    assert_eq!(res.header("access-control-allow-origin"), Some("*"));
}

#[tokio::test]
async fn equal_orders_keep_arrival_order() {
    let app = TestApp::spawn().await;
    for name in ["first.jpg", "second.jpg", "third.jpg"] {
        app.store
            .append("painting", record(name, "p01"))
            .await
            .unwrap();
    }
    app.store
        .append("painting", record("zero.jpg", "-"))
        .await
        .unwrap();

    let res = app.get(&routes::images("painting")).await;

    assert_eq!(
        res.file_names(),
        ["zero.jpg", "first.jpg", "second.jpg", "third.jpg"]
    );
}

#[tokio::test]
async fn captions_and_orders_round_trip_through_the_database() {
    let app = TestApp::spawn().await;
    app.store
        .append(
            "portrait",
            ImageRecord {
                text: "Grandma, 1962 \"at home\"".into(),
                ..record("grandma.jpg", "r01")
            },
        )
        .await
        .unwrap();

    let res = app.get(&routes::images("portrait")).await;

    assert_eq!(res.body[0]["text"], "Grandma, 1962 \"at home\"");
    assert_eq!(res.body[0]["order"], "r01");
}

#[tokio::test]
async fn categories_do_not_leak_into_each_other() {
    let app = TestApp::spawn().await;
    app.store
        .append("illustration", record("a.jpg", "i01"))
        .await
        .unwrap();
    app.store
        .append("portrait", record("b.jpg", "r01"))
        .await
        .unwrap();

    let res = app.get(&routes::images("portrait")).await;

    assert_eq!(res.file_names(), ["b.jpg"]);
}

#[tokio::test]
async fn trailing_segments_are_ignored() {
    let app = TestApp::spawn().await;
    app.store
        .append("illustration", record("a.jpg", "i01"))
        .await
        .unwrap();

    let res = app.get("/api/images/illustration/extra/segments").await;

    assert_eq!(res.status, 200);
    assert_eq!(res.file_names(), ["a.jpg"]);
}

#[tokio::test]
async fn any_origin_may_read() {
    let app = TestApp::spawn().await;

    let res = app
        .get_with_origin(&routes::images("illustration"), "https://portfolio.example")
        .await;

    assert_eq!(res.status, 200);
    assert_eq!(res.header("access-control-allow-origin"), Some("*"));
}

#[tokio::test]
async fn preflight_is_answered() {
    let app = TestApp::spawn().await;

    let res = app
        .preflight(&routes::images("illustration"), "https://elsewhere.example")
        .await;

    assert_eq!(res.status, 200);
    assert_eq!(res.header("access-control-allow-origin"), Some("*"));
    assert!(
        res.header("access-control-allow-methods")
            .is_some_and(|m| m.contains("GET"))
    );
}
