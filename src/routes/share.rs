// Share-link previews for individual cars (GET /c/:id, GET /share?id=)

use axum::{
    extract::{OriginalUri, Query, State},
    http::HeaderMap,
};
use std::collections::HashMap;

use crate::preview::{self, PreviewRequest, PreviewResponse};
use crate::AppState;

// Never rejects: a malformed query string reads as "no parameters"
pub async fn share_page(
    State(app_state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    query: Option<Query<HashMap<String, String>>>,
    headers: HeaderMap,
) -> PreviewResponse {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let request = PreviewRequest::from_parts(uri.path(), &query, &headers);
    tracing::debug!(
        car_id = %request.listing_id,
        debug = request.debug,
        origin = ?request.origin,
        "Share preview requested"
    );

    preview::handle(
        app_state.store.as_ref(),
        &request,
        &app_state.settings.placeholder_image,
    )
    .await
}
