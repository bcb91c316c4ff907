// Read-only JSON endpoints backing the inventory, featured and auction pages

use axum::{
    extract::{Path, State},
    response::Json,
};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{CarCard, CarListing},
    sanity::SanityClient,
};

fn to_cards(sanity: &SanityClient, cars: Vec<CarListing>) -> Vec<CarCard> {
    cars.into_iter()
        .map(|car| {
            let images = sanity.images().car_images(&car.images);
            CarCard::new(car, images)
        })
        .collect()
}

pub async fn featured_cars(State(sanity): State<Arc<SanityClient>>) -> AppResult<Json<Vec<CarCard>>> {
    tracing::info!("API call: featured_cars");
    let cars = sanity.featured_cars().await?;
    Ok(Json(to_cards(&sanity, cars)))
}

pub async fn inventory(State(sanity): State<Arc<SanityClient>>) -> AppResult<Json<Vec<CarCard>>> {
    tracing::info!("API call: inventory");
    let cars = sanity.inventory().await?;
    tracing::debug!("Inventory returned {} cars", cars.len());
    Ok(Json(to_cards(&sanity, cars)))
}

pub async fn auction_picks(State(sanity): State<Arc<SanityClient>>) -> AppResult<Json<Vec<CarCard>>> {
    tracing::info!("API call: auction_picks");
    let cars = sanity.auction_picks().await?;
    Ok(Json(to_cards(&sanity, cars)))
}

pub async fn car_by_id(
    State(sanity): State<Arc<SanityClient>>,
    Path(id): Path<String>,
) -> AppResult<Json<CarCard>> {
    tracing::info!("API call: car_by_id for id: {}", id);
    match sanity.car(&id).await? {
        Some(car) => {
            let images = sanity.images().car_images(&car.images);
            Ok(Json(CarCard::new(car, images)))
        }
        None => Err(AppError::NotFound(format!("car {}", id))),
    }
}
