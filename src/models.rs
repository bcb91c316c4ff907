// Data structures for car listings as stored in the content API and served to the site

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// Whether a car is standing inventory or an upcoming auction item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockType {
    Inventory,
    Auction,
    // Anything else the editors type into the field
    #[serde(other)]
    Other,
}

// Minimal projection of a car used for social previews
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<i32>,
    // Grades are often typed as numbers (4.5)
    #[serde(default, deserialize_with = "lenient_text")]
    pub grade: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: Option<String>,
    #[serde(rename = "stockType")]
    pub stock_type: Option<StockType>,
    // Absolute photo URLs, already resolved from asset references by the query
    #[serde(rename = "images", default, deserialize_with = "photo_urls")]
    pub photos: Vec<String>,
}

// Numeric fields editors sometimes fill with text ("85,000 km", "Ask")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(serde_json::Number),
    Text(String),
}

// Sanity image object: `{ asset: { _ref } }` or, when dereferenced, `{ asset: { url } }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SanityImage {
    #[serde(default)]
    pub asset: Option<AssetRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetRef {
    #[serde(rename = "_ref")]
    pub reference: Option<String>,
    pub url: Option<String>,
}

// Full car document used by the inventory, featured and auction pages
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarListing {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<i32>,
    pub mileage: Option<NumberOrText>,
    pub engine: Option<String>,
    pub fuel: Option<String>,
    pub transmission: Option<String>,
    pub grade: Option<String>,
    pub price: Option<NumberOrText>,
    #[serde(default)]
    pub hide_price: Option<bool>,
    pub status: Option<String>,
    pub stock_type: Option<StockType>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub auction_date: Option<NaiveDate>,
    #[serde(rename = "_createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<SanityImage>,
}

// What the JSON API hands to the static pages: images resolved, hidden prices dropped
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarCard {
    pub id: String,
    pub title: Option<String>,
    pub year: Option<i32>,
    pub mileage: Option<NumberOrText>,
    pub engine: Option<String>,
    pub fuel: Option<String>,
    pub transmission: Option<String>,
    pub grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<NumberOrText>,
    pub status: Option<String>,
    pub stock_type: Option<StockType>,
    pub auction_date: Option<NaiveDate>,
    pub images: Vec<String>,
}

impl CarCard {
    pub fn new(listing: CarListing, images: Vec<String>) -> Self {
        let price = if listing.hide_price.unwrap_or(false) {
            None
        } else {
            listing.price
        };
        Self {
            id: listing.id,
            title: listing.title,
            year: listing.year,
            mileage: listing.mileage,
            engine: listing.engine,
            fuel: listing.fuel,
            transmission: listing.transmission,
            grade: listing.grade,
            price,
            status: listing.status,
            stock_type: listing.stock_type,
            auction_date: listing.auction_date,
            images,
        }
    }
}

// Response envelope of the Sanity query endpoint
#[derive(Debug, Deserialize)]
pub struct QueryResponse<T> {
    pub result: Option<T>,
}

// `images[].asset->url` yields null entries for images whose asset was deleted
fn photo_urls<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Option<String>>> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default().into_iter().flatten().collect())
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let raw: Option<Vec<T>> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default())
}

// Free-text fields that sometimes hold a bare number; rendered the way they were typed
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<NumberOrText> = Option::deserialize(deserializer)?;
    Ok(raw.map(|value| match value {
        NumberOrText::Number(n) => n.to_string(),
        NumberOrText::Text(s) => s,
    }))
}

// Year is a number in the schema, but older documents stored it as a string
fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<NumberOrText> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(NumberOrText::Number(n)) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        Some(NumberOrText::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

// Accepts a plain date ("2024-05-01") or a full datetime; anything else reads as absent
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(&s).ok().map(|dt| dt.date_naive()))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summary_flattens_null_photos() {
        let summary: ListingSummary = serde_json::from_value(json!({
            "_id": "car-1",
            "title": "Toyota Aqua",
            "year": 2019,
            "stockType": "auction",
            "images": ["https://cdn.example.com/a.jpg", null, "https://cdn.example.com/b.jpg"]
        }))
        .unwrap();

        assert_eq!(summary.id, "car-1");
        assert_eq!(summary.year, Some(2019));
        assert_eq!(summary.stock_type, Some(StockType::Auction));
        assert_eq!(
            summary.photos,
            vec!["https://cdn.example.com/a.jpg", "https://cdn.example.com/b.jpg"]
        );
    }

    #[test]
    fn summary_tolerates_missing_and_null_fields() {
        let summary: ListingSummary = serde_json::from_value(json!({
            "_id": "car-2",
            "title": null,
            "images": null
        }))
        .unwrap();

        assert!(summary.title.is_none());
        assert!(summary.year.is_none());
        assert!(summary.stock_type.is_none());
        assert!(summary.photos.is_empty());
    }

    #[test]
    fn numeric_text_fields_keep_the_listing() {
        let summary: ListingSummary = serde_json::from_value(json!({
            "_id": "car-1",
            "title": 86,
            "grade": 4.5,
            "status": "Available",
            "images": ["https://cdn.example.com/a-1200x800.jpg"]
        }))
        .unwrap();

        assert_eq!(summary.title.as_deref(), Some("86"));
        assert_eq!(summary.grade.as_deref(), Some("4.5"));
        assert_eq!(summary.status.as_deref(), Some("Available"));
        assert_eq!(summary.photos, vec!["https://cdn.example.com/a-1200x800.jpg"]);
    }

    #[test]
    fn unknown_stock_type_is_other() {
        let summary: ListingSummary =
            serde_json::from_value(json!({ "_id": "x", "stockType": "consignment" })).unwrap();
        assert_eq!(summary.stock_type, Some(StockType::Other));
    }

    #[test]
    fn year_as_string_is_parsed() {
        let summary: ListingSummary =
            serde_json::from_value(json!({ "_id": "x", "year": " 2021 " })).unwrap();
        assert_eq!(summary.year, Some(2021));
    }

    #[test]
    fn listing_reads_dates_and_mixed_numbers() {
        let listing: CarListing = serde_json::from_value(json!({
            "_id": "car-3",
            "_createdAt": "2024-03-01T10:00:00Z",
            "auctionDate": "2024-05-01",
            "mileage": 85000,
            "price": "Ask",
            "hidePrice": false,
            "images": [{ "asset": { "_ref": "image-abc-800x600-jpg" } }]
        }))
        .unwrap();

        assert_eq!(listing.auction_date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert!(listing.created_at.is_some());
        assert_eq!(listing.mileage, Some(NumberOrText::Number(85000.into())));
        assert_eq!(listing.price, Some(NumberOrText::Text("Ask".to_string())));
        assert_eq!(listing.images.len(), 1);
    }

    #[test]
    fn auction_datetime_reduces_to_date() {
        let listing: CarListing = serde_json::from_value(json!({
            "_id": "car-4",
            "auctionDate": "2024-05-01T09:30:00+09:00"
        }))
        .unwrap();
        assert_eq!(listing.auction_date, NaiveDate::from_ymd_opt(2024, 5, 1));
    }

    #[test]
    fn card_drops_hidden_price() {
        let listing = CarListing {
            id: "car-5".to_string(),
            price: Some(NumberOrText::Number(1_500_000.into())),
            hide_price: Some(true),
            ..Default::default()
        };
        let card = CarCard::new(listing, vec![]);
        assert!(card.price.is_none());

        let value = serde_json::to_value(&card).unwrap();
        assert!(value.get("price").is_none());
        assert_eq!(value["id"], "car-5");
    }
}
