// Vinvel Motor Trading website backend.
//
// - share previews: `/c/<id>` answers link-preview scrapers with Open
//   Graph / Twitter tags for one car, then refreshes humans on to the car page
// - listing API: read-only JSON over the Sanity content API for the
//   inventory, featured and auction pages
// - manifests: `generate_manifest` writes the image manifests the static
//   gallery pages load

use axum::extract::FromRef;
use reqwest::Client;
use std::sync::Arc;

pub mod config;
pub mod error;
pub mod manifest;
pub mod models;
pub mod preview;
pub mod routes;
pub mod sanity;
pub mod store;

use crate::{config::Settings, sanity::SanityClient, store::ListingStore};

// Shared application state
#[derive(Clone, FromRef)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub sanity: Arc<SanityClient>,
    // What share previews look cars up in; the Sanity client outside of tests
    pub store: Arc<dyn ListingStore>,
}

impl AppState {
    pub fn new(settings: Settings, http_client: Arc<Client>) -> Self {
        let sanity = Arc::new(SanityClient::new(
            http_client,
            settings.sanity.clone(),
            &settings.placeholder_image,
        ));
        Self {
            settings: Arc::new(settings),
            store: sanity.clone(),
            sanity,
        }
    }

    // Same state, but previews read from `store` instead of the content API
    pub fn with_store(mut self, store: Arc<dyn ListingStore>) -> Self {
        self.store = store;
        self
    }
}
