//! SHELF Application Library
//!
//! Wires the bookshelf module into the kernel registry; the binary in
//! `main.rs` drives configuration, telemetry, and serving.

pub mod modules;

/// Re-export commonly used types
pub use modules::*;

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use shelf_kernel::{settings::Settings, ModuleRegistry};

    fn app_router() -> axum::Router {
        let mut registry = ModuleRegistry::new();
        crate::modules::register_all(&mut registry);
        shelf_http::build_router(&registry, &Settings::default())
    }

    #[tokio::test]
    async fn books_routes_are_mounted_under_api() {
        let response = app_router()
            .oneshot(
                Request::builder()
                    .uri("/api/books")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"status": "success", "data": {"books": []}}));
    }

    #[tokio::test]
    async fn add_then_fetch_works_through_the_full_stack() {
        let router = app_router();

        let payload = json!({
            "name": "Buku A",
            "year": 2010,
            "author": "John Doe",
            "summary": "Lorem ipsum",
            "publisher": "Dicoding Indonesia",
            "pageCount": 100,
            "readPage": 25,
            "reading": false
        });
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/books")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        let id = body["data"]["bookId"].as_str().unwrap();

        let response = router
            .oneshot(
                Request::builder()
                    .uri(format!("/api/books/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn openapi_document_lists_the_book_paths() {
        let response = app_router()
            .oneshot(
                Request::builder()
                    .uri("/docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let document: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(document["paths"].get("/api/books").is_some());
        assert!(document["paths"].get("/api/books/{id}").is_some());
        assert!(document["components"]["schemas"].get("Book").is_some());
    }
}
