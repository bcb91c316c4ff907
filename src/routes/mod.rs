// Route definitions

use axum::{routing::get, Router};

use crate::AppState;

// Declare submodules for different route groups
mod api;
mod share;

// Static site files are attached by the caller (see main.rs) as the fallback service
pub fn create_router(app_state: AppState) -> Router {
    // JSON API for the site's listing pages
    let api_router = Router::new()
        .route("/cars/featured", get(api::featured_cars))
        .route("/cars/inventory", get(api::inventory))
        .route("/cars/auction", get(api::auction_picks))
        .route("/cars/:id", get(api::car_by_id))
        .with_state(app_state.clone());

    Router::new()
        // Share links: path form, bare path (no id) and query form
        .route("/c/:id", get(share::share_page))
        .route("/c", get(share::share_page))
        .route("/c/", get(share::share_page))
        .route("/share", get(share::share_page))
        .nest("/api", api_router)
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Settings,
        models::{ListingSummary, StockType},
        store::{ListingStore, MemoryStore},
    };
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use reqwest::Client;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(store: MemoryStore) -> Router {
        let state = AppState::new(Settings::default(), Arc::new(Client::new()))
            .with_store(Arc::new(store) as Arc<dyn ListingStore>);
        create_router(state)
    }

    fn store() -> MemoryStore {
        MemoryStore::new().with_listing(ListingSummary {
            id: "car 7".to_string(),
            title: Some("Suzuki Jimny".to_string()),
            year: Some(2020),
            grade: Some("4".to_string()),
            stock_type: Some(StockType::Inventory),
            photos: vec!["https://cdn.sanity.io/images/p/d/jimny-1600x1067.jpg".to_string()],
            ..Default::default()
        })
    }

    async fn get(app: Router, uri: &str, host: Option<&str>) -> (StatusCode, String, String) {
        let mut builder = Request::builder().uri(uri);
        if let Some(host) = host {
            builder = builder
                .header(header::HOST, host)
                .header("x-forwarded-proto", "https");
        }
        let response = app
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let cache = response
            .headers()
            .get(header::CACHE_CONTROL)
            .map(|v| v.to_str().unwrap().to_string())
            .unwrap_or_default();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, cache, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn path_form_renders_listing() {
        let (status, cache, body) = get(app(store()), "/c/car%207", Some("vinvel.com")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache, "public, max-age=300");
        assert!(body.contains("Suzuki Jimny 2020 | Vinvel"));
        assert!(body.contains(r#"property="og:image:width" content="1600""#));
        assert!(body.contains(r#"content="0; url=https://vinvel.com/cars.html?car=car%207""#));
        assert!(body.contains(r#"content="https://vinvel.com/c/car%207""#));
    }

    #[tokio::test]
    async fn query_form_with_debug() {
        let (status, _, body) = get(app(store()), "/share?id=car%207&debug=1", Some("localhost:8888")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body.contains(r#"http-equiv="refresh""#));
        assert!(body.contains("OG Preview Debug"));
        // Loopback host wins over the forwarded https
        assert!(body.contains(r#"content="http://localhost:8888/c/car%207""#));
    }

    #[tokio::test]
    async fn missing_id_without_host_uses_relative_inventory_link() {
        let (status, cache, body) = get(app(store()), "/c", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache, "public, max-age=300");
        assert!(body.contains(r#"content="0; url=/cars.html""#));
        assert!(body.contains("https://placehold.co/1200x630?text=Vehicle"));
    }

    #[tokio::test]
    async fn trailing_slash_share_path_gets_brand_preview() {
        let (status, cache, body) = get(app(store()), "/c/", Some("vinvel.com")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache, "public, max-age=300");
        assert!(body.contains(r#"property="og:title" content="Vinvel Motor Trading""#));
        assert!(body.contains(r#"content="0; url=https://vinvel.com/cars.html""#));
    }

    #[tokio::test]
    async fn failing_store_still_answers_200() {
        let (status, cache, body) = get(app(MemoryStore::failing(500)), "/c/car-1", Some("vinvel.com")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache, "no-store");
        assert_eq!(body, crate::preview::page::FALLBACK_PAGE);
    }
}
