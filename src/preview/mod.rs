// Social preview pages for individual car listings.
//
// Link-preview scrapers (WhatsApp, Facebook, X) do not run the site's
// JavaScript, so a shared car link is answered with a small HTML document
// carrying Open Graph / Twitter tags for that car, plus an instant refresh
// that takes human visitors on to the real car page.
//
// The response is always `200 text/html`. Four shapes exist:
//
// - no id: brand preview that routes to the inventory page
// - listing: car preview with a refresh to the car page
// - debug (`?debug=1`): same tags, no refresh, thumbnails visible
// - fallback: bare redirect to the inventory page, `no-store`, used when
//   anything in the pipeline fails

pub mod meta;
pub mod page;
pub mod request;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::error::PreviewError;
use crate::store::ListingStore;

pub use request::PreviewRequest;

pub const SITE_NAME: &str = "Vinvel";
pub const BRAND_TITLE: &str = "Vinvel Motor Trading";
pub const DEFAULT_TITLE: &str = "Vinvel Vehicle";
pub const TITLE_SUFFIX: &str = " | Vinvel";
pub const CERTIFIED_PHRASE: &str = "Vinvel Certified™ vehicle.";
pub const CALL_TO_ACTION: &str = "Tap to view photos and details.";
pub const GENERIC_DESCRIPTION: &str =
    "Vinvel Certified™ vehicles. Browse live inventory and auction picks.";
pub const INVENTORY_PAGE: &str = "/cars.html";
pub const AUCTION_PAGE: &str = "/auction.html";
pub const DEBUG_IMAGE_LIMIT: usize = 6;

// Short so new cars and photos propagate quickly
pub const CACHE_PUBLIC: &str = "public, max-age=300";
pub const CACHE_NO_STORE: &str = "no-store";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewResponse {
    pub cache_control: &'static str,
    pub body: String,
}

impl PreviewResponse {
    fn cacheable(body: String) -> Self {
        Self {
            cache_control: CACHE_PUBLIC,
            body,
        }
    }

    pub fn fallback() -> Self {
        Self {
            cache_control: CACHE_NO_STORE,
            body: page::FALLBACK_PAGE.to_string(),
        }
    }
}

impl IntoResponse for PreviewResponse {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [
                (
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("text/html; charset=utf-8"),
                ),
                (
                    header::CACHE_CONTROL,
                    HeaderValue::from_static(self.cache_control),
                ),
            ],
            self.body,
        )
            .into_response()
    }
}

// Build the preview for one request. Errors go back to the caller; handle turns them into the fallback page
pub async fn respond(
    store: &dyn ListingStore,
    request: &PreviewRequest,
    placeholder: &str,
) -> Result<PreviewResponse, PreviewError> {
    if request.listing_id.is_empty() {
        tracing::debug!(debug = request.debug, "Share link without car id, serving brand preview");
        let body = page::render_generic(request, placeholder)?;
        return Ok(PreviewResponse::cacheable(body));
    }

    let listing = store.fetch_listing(&request.listing_id).await?;
    if listing.is_none() {
        tracing::debug!(car_id = %request.listing_id, "No listing found, using defaults");
    }

    let meta = meta::synthesize(request, listing.as_ref(), placeholder);
    let body = page::render_listing(&meta, request.debug)?;
    Ok(PreviewResponse::cacheable(body))
}

// Preview responder boundary: every failure becomes the fallback page.
pub async fn handle(
    store: &dyn ListingStore,
    request: &PreviewRequest,
    placeholder: &str,
) -> PreviewResponse {
    match respond(store, request, placeholder).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(car_id = %request.listing_id, error = %e, "Preview failed, serving fallback page");
            PreviewResponse::fallback()
        }
    }
}
