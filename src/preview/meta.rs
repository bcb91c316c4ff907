// Field synthesis for listing previews.
//
// Every field tolerates a missing listing or missing listing fields; the
// result always carries exactly one image.

use once_cell::sync::Lazy;
use regex::Regex;

use super::request::PreviewRequest;
use super::{
    AUCTION_PAGE, CALL_TO_ACTION, CERTIFIED_PHRASE, DEBUG_IMAGE_LIMIT, DEFAULT_TITLE,
    INVENTORY_PAGE, TITLE_SUFFIX,
};
use crate::models::{ListingSummary, StockType};

// CDN image URLs commonly end with -{w}x{h}.{ext}
static IMAGE_DIMS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)-(\d+)x(\d+)\.[a-z0-9]+(?:\?|#|$)").expect("image dims regex should compile")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDims {
    pub width: u32,
    pub height: u32,
}

// Everything the listing page template needs, unescaped.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewMeta {
    pub title: String,
    pub description: String,
    // The single image scrapers will pick up.
    pub image: String,
    pub image_dims: Option<ImageDims>,
    // Thumbnails for the debug page.
    pub candidates: Vec<String>,
    // Relative target, used for the visible continue link.
    pub redirect_path: String,
    // Target of the meta refresh; absolute when the origin is known.
    pub redirect_url: String,
    // Share URL when the origin is known, otherwise the redirect target.
    pub canonical_url: String,
}

pub fn synthesize(
    request: &PreviewRequest,
    listing: Option<&ListingSummary>,
    placeholder: &str,
) -> PreviewMeta {
    let image = listing
        .and_then(|l| first_non_empty(&l.photos))
        .unwrap_or(placeholder)
        .to_string();
    let photos: Vec<&str> = listing
        .map(|l| non_empty_photos(&l.photos))
        .unwrap_or_default();
    let candidates = if photos.is_empty() {
        vec![image.clone()]
    } else {
        photos
            .iter()
            .take(DEBUG_IMAGE_LIMIT)
            .map(|p| p.to_string())
            .collect()
    };

    let redirect_path = redirect_path(&request.listing_id, listing.and_then(|l| l.stock_type));
    let redirect_url = absolute_url(request.origin.as_deref(), &redirect_path);
    let canonical_url = match &request.origin {
        Some(origin) => share_url(origin, &request.listing_id),
        None => redirect_url.clone(),
    };

    PreviewMeta {
        title: listing_title(listing),
        description: listing_description(listing),
        image_dims: extract_image_dims(&image),
        image,
        candidates,
        redirect_path,
        redirect_url,
        canonical_url,
    }
}

// "<title or Vinvel Vehicle> <year>" + " | Vinvel"
pub fn listing_title(listing: Option<&ListingSummary>) -> String {
    let base = listing
        .and_then(|l| l.title.as_deref())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_TITLE);
    let mut title = base.to_string();
    if let Some(year) = listing.and_then(|l| l.year).filter(|y| *y != 0) {
        title.push(' ');
        title.push_str(&year.to_string());
    }
    title.push_str(TITLE_SUFFIX);
    title
}

pub fn listing_description(listing: Option<&ListingSummary>) -> String {
    let mut parts = vec![CERTIFIED_PHRASE.to_string()];
    if let Some(grade) = listing.and_then(|l| non_blank(l.grade.as_deref())) {
        parts.push(format!("Auction Grade: {}.", grade));
    }
    if let Some(status) = listing.and_then(|l| non_blank(l.status.as_deref())) {
        parts.push(format!("Status: {}.", status));
    }
    parts.push(CALL_TO_ACTION.to_string());
    parts.join(" ")
}

pub fn first_non_empty(photos: &[String]) -> Option<&str> {
    photos.iter().map(|p| p.trim()).find(|p| !p.is_empty())
}

fn non_empty_photos(photos: &[String]) -> Vec<&str> {
    photos
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// Explicit width/height only when the URL says so; never guesses
pub fn extract_image_dims(url: &str) -> Option<ImageDims> {
    let caps = IMAGE_DIMS.captures(url)?;
    let width: u32 = caps.get(1)?.as_str().parse().ok()?;
    let height: u32 = caps.get(2)?.as_str().parse().ok()?;
    if width == 0 || height == 0 {
        return None;
    }
    Some(ImageDims { width, height })
}

pub fn redirect_path(listing_id: &str, stock_type: Option<StockType>) -> String {
    let page = match stock_type {
        Some(StockType::Auction) => AUCTION_PAGE,
        _ => INVENTORY_PAGE,
    };
    format!("{}?car={}", page, urlencoding::encode(listing_id))
}

pub fn share_url(origin: &str, listing_id: &str) -> String {
    format!("{}/c/{}", origin, urlencoding::encode(listing_id))
}

// Relative paths keep localhost from being forced onto https
pub fn absolute_url(origin: Option<&str>, path: &str) -> String {
    match origin {
        Some(origin) => format!("{}{}", origin, path),
        None => path.to_string(),
    }
}
