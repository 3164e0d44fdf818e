//! Public availability calendar

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::booked_date::{BlockedDate, BookedDatesQuery},
};

use super::non_empty;

/// List blocked dates, optionally for one accommodation
#[utoipa::path(
    get,
    path = "/booked-dates",
    tag = "booked_dates",
    params(BookedDatesQuery),
    responses(
        (status = 200, description = "Blocked dates", body = Vec<BlockedDate>)
    )
)]
pub async fn list_booked_dates(
    State(state): State<crate::AppState>,
    Query(query): Query<BookedDatesQuery>,
) -> AppResult<Json<Vec<BlockedDate>>> {
    let dates = state
        .services
        .bookings
        .booked_dates(non_empty(query.cottage))
        .await?;
    Ok(Json(dates))
}
