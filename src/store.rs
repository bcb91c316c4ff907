// The Listing Store capability: look up a car summary by id

use std::collections::HashMap;

use crate::{error::StoreError, models::ListingSummary};

#[axum::async_trait]
pub trait ListingStore: Send + Sync {
    // `Ok(None)` when no car has this id
    async fn fetch_listing(&self, id: &str) -> Result<Option<ListingSummary>, StoreError>;
}

// In-memory store, used to exercise the responder without the network
#[derive(Debug, Default)]
pub struct MemoryStore {
    listings: HashMap<String, ListingSummary>,
    // When set, every lookup fails with this status
    failure: Option<u16>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listing(mut self, listing: ListingSummary) -> Self {
        self.listings.insert(listing.id.clone(), listing);
        self
    }

    pub fn failing(status: u16) -> Self {
        Self {
            listings: HashMap::new(),
            failure: Some(status),
        }
    }
}

#[axum::async_trait]
impl ListingStore for MemoryStore {
    async fn fetch_listing(&self, id: &str) -> Result<Option<ListingSummary>, StoreError> {
        if let Some(status) = self.failure {
            return Err(StoreError::Status(status));
        }
        Ok(self.listings.get(id).cloned())
    }
}
