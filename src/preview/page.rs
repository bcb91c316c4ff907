// HTML rendering for preview pages
// askama escapes every interpolated value, numbers included.

use askama::Template;

use super::meta::{absolute_url, ImageDims, PreviewMeta};
use super::request::PreviewRequest;
use super::{BRAND_TITLE, GENERIC_DESCRIPTION, INVENTORY_PAGE, SITE_NAME};

// Served when anything in the pipeline fails: no metadata, straight to the inventory page
pub const FALLBACK_PAGE: &str = r#"<!doctype html><html><head><meta charset="utf-8" /><meta http-equiv="refresh" content="0; url=/cars.html" /></head><body><a href="/cars.html">Continue</a></body></html>"#;

#[derive(Template)]
#[template(path = "preview.html")]
struct PreviewPage<'a> {
    title: &'a str,
    description: &'a str,
    site_name: &'a str,
    canonical_url: &'a str,
    image: &'a str,
    image_size: Option<ImageDims>,
    refresh_url: Option<&'a str>,
    continue_url: &'a str,
    continue_label: &'a str,
    debug_images: Option<Vec<&'a str>>,
}

// Page for a specific listing (found or not)
pub fn render_listing(meta: &PreviewMeta, debug: bool) -> Result<String, askama::Error> {
    let page = PreviewPage {
        title: &meta.title,
        description: &meta.description,
        site_name: SITE_NAME,
        canonical_url: &meta.canonical_url,
        image: &meta.image,
        image_size: meta.image_dims,
        refresh_url: (!debug).then_some(meta.redirect_url.as_str()),
        continue_url: &meta.redirect_path,
        continue_label: if debug {
            "Continue to car page"
        } else {
            "Continue to Vinvel"
        },
        debug_images: debug.then(|| meta.candidates.iter().map(String::as_str).collect()),
    };
    page.render()
}

// Brand page for share links that carry no id; routes people to the inventory
pub fn render_generic(request: &PreviewRequest, placeholder: &str) -> Result<String, askama::Error> {
    let inventory_url = absolute_url(request.origin.as_deref(), INVENTORY_PAGE);
    let page = PreviewPage {
        title: BRAND_TITLE,
        description: GENERIC_DESCRIPTION,
        site_name: SITE_NAME,
        canonical_url: &inventory_url,
        image: placeholder,
        image_size: None,
        refresh_url: (!request.debug).then_some(inventory_url.as_str()),
        continue_url: &inventory_url,
        continue_label: "Continue to Vinvel",
        debug_images: request.debug.then(|| vec![placeholder]),
    };
    page.render()
}
