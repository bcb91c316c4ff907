// Client for the Sanity content API: GROQ queries over HTTP and CDN image URLs

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::{
    config::SanitySettings,
    error::StoreError,
    models::{CarListing, ListingSummary, QueryResponse, SanityImage},
    store::ListingStore,
};

// Preview lookup: only what the share page needs, with photos dereferenced to URLs
const CAR_SUMMARY_QUERY: &str = r#"*[_type == "car" && _id == $id][0]{
    _id,
    title,
    year,
    grade,
    status,
    stockType,
    "images": images[].asset->url
}"#;

const CAR_FIELDS: &str = "_id, _createdAt, title, year, mileage, engine, fuel, transmission, grade, price, hidePrice, status, stockType, auctionDate, images";

#[derive(Clone)]
pub struct SanityClient {
    http_client: Arc<Client>,
    settings: SanitySettings,
    images: ImageUrlBuilder,
}

impl SanityClient {
    pub fn new(http_client: Arc<Client>, settings: SanitySettings, placeholder_image: &str) -> Self {
        let images = ImageUrlBuilder::new(&settings, placeholder_image);
        Self {
            http_client,
            settings,
            images,
        }
    }

    pub fn images(&self) -> &ImageUrlBuilder {
        &self.images
    }

    // e.g. https://qsql7lvj.apicdn.sanity.io/v2023-12-16/data/query/production
    pub fn query_url(&self, use_cdn: bool) -> String {
        let host = if use_cdn { "apicdn" } else { "api" };
        format!(
            "https://{}.{}.sanity.io/v{}/data/query/{}",
            self.settings.project_id, host, self.settings.api_version, self.settings.dataset
        )
    }

    // Runs a GROQ query. Parameters are passed as `$name` with JSON-encoded values.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        query: &str,
        params: &[(&str, &str)],
        use_cdn: bool,
    ) -> Result<Option<T>, StoreError> {
        let mut pairs: Vec<(String, String)> = vec![("query".to_string(), query.to_string())];
        for (name, value) in params {
            pairs.push((format!("${}", name), serde_json::to_string(value)?));
        }

        let response = self
            .http_client
            .get(self.query_url(use_cdn))
            .query(&pairs)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let envelope: QueryResponse<T> = serde_json::from_str(&body)?;
        Ok(envelope.result)
    }

    // Always hits the live API so freshly published cars preview correctly
    pub async fn car_summary(&self, id: &str) -> Result<Option<ListingSummary>, StoreError> {
        self.fetch(CAR_SUMMARY_QUERY, &[("id", id)], false).await
    }

    pub async fn car(&self, id: &str) -> Result<Option<CarListing>, StoreError> {
        let query = format!(r#"*[_type == "car" && _id == $id][0]{{{}}}"#, CAR_FIELDS);
        self.fetch(&query, &[("id", id)], self.settings.use_cdn).await
    }

    // Homepage strip: three newest unsold inventory cars, pinned ones first
    pub async fn featured_cars(&self) -> Result<Vec<CarListing>, StoreError> {
        let query = format!(
            r#"*[_type == "car" && stockType == "inventory" && status != "Sold"] | order(priority desc, _createdAt desc)[0...3]{{{}}}"#,
            CAR_FIELDS
        );
        self.fetch_list(&query).await
    }

    pub async fn inventory(&self) -> Result<Vec<CarListing>, StoreError> {
        let query = format!(
            r#"*[_type == "car" && stockType == "inventory"] | order(_createdAt desc){{{}}}"#,
            CAR_FIELDS
        );
        self.fetch_list(&query).await
    }

    pub async fn auction_picks(&self) -> Result<Vec<CarListing>, StoreError> {
        let query = format!(
            r#"*[_type == "car" && stockType == "auction"] | order(auctionDate asc){{{}}}"#,
            CAR_FIELDS
        );
        self.fetch_list(&query).await
    }

    async fn fetch_list(&self, query: &str) -> Result<Vec<CarListing>, StoreError> {
        let cars: Option<Vec<CarListing>> = self.fetch(query, &[], self.settings.use_cdn).await?;
        Ok(cars.unwrap_or_default())
    }
}

// The content API is best-effort for previews: any failure reads as "no such car"
#[axum::async_trait]
impl ListingStore for SanityClient {
    async fn fetch_listing(&self, id: &str) -> Result<Option<ListingSummary>, StoreError> {
        match self.car_summary(id).await {
            Ok(summary) => Ok(summary),
            Err(e) => {
                tracing::warn!(car_id = %id, error = %e, "Listing lookup failed, treating as absent");
                Ok(None)
            }
        }
    }
}

// Builds cdn.sanity.io URLs from image asset references
#[derive(Debug, Clone)]
pub struct ImageUrlBuilder {
    project_id: String,
    dataset: String,
    width: u32,
    placeholder: String,
}

impl ImageUrlBuilder {
    pub fn new(settings: &SanitySettings, placeholder: &str) -> Self {
        Self {
            project_id: settings.project_id.clone(),
            dataset: settings.dataset.clone(),
            width: settings.image_width,
            placeholder: placeholder.to_string(),
        }
    }

    // Asset refs look like `image-<assetId>-<W>x<H>-<ext>`
    pub fn asset_url(&self, reference: &str) -> Option<String> {
        let rest = reference.strip_prefix("image-")?;
        let (stem, ext) = rest.rsplit_once('-')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(format!(
            "https://cdn.sanity.io/images/{}/{}/{}.{}",
            self.project_id, self.dataset, stem, ext
        ))
    }

    // Single image at its original size; placeholder when missing or unresolvable
    pub fn url_for(&self, image: Option<&SanityImage>) -> String {
        image
            .and_then(|img| self.resolve(img, None))
            .unwrap_or_else(|| self.placeholder.clone())
    }

    // Gallery images at the configured width; never empty
    pub fn car_images(&self, images: &[SanityImage]) -> Vec<String> {
        let urls: Vec<String> = images
            .iter()
            .filter_map(|img| self.resolve(img, Some(self.width)))
            .collect();
        if urls.is_empty() {
            vec![self.placeholder.clone()]
        } else {
            urls
        }
    }

    fn resolve(&self, image: &SanityImage, width: Option<u32>) -> Option<String> {
        let asset = image.asset.as_ref()?;
        let base = match (&asset.url, &asset.reference) {
            (Some(url), _) if !url.trim().is_empty() => url.trim().to_string(),
            (_, Some(reference)) => self.asset_url(reference)?,
            _ => return None,
        };
        Some(match width {
            Some(w) if !base.contains('?') => format!("{}?w={}", base, w),
            Some(w) => format!("{}&w={}", base, w),
            None => base,
        })
    }
}
