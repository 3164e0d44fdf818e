//! Accommodation rate endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppResult,
    models::{Rate, UpdateRate},
};

use super::AuthenticatedAdmin;

/// Current nightly rates
#[utoipa::path(
    get,
    path = "/rates",
    tag = "rates",
    responses(
        (status = 200, description = "Rates per accommodation", body = Vec<Rate>)
    )
)]
pub async fn list_rates(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Rate>>> {
    let rates = state.services.rates.list().await?;
    Ok(Json(rates))
}

/// Set the nightly rate of an accommodation
#[utoipa::path(
    put,
    path = "/rates/{accommodation}",
    tag = "rates",
    security(("bearer_auth" = [])),
    params(
        ("accommodation" = String, Path, description = "Accommodation label, e.g. 1 BHK")
    ),
    request_body = UpdateRate,
    responses(
        (status = 200, description = "Rate saved", body = Rate),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn update_rate(
    State(state): State<crate::AppState>,
    AuthenticatedAdmin(_claims): AuthenticatedAdmin,
    Path(accommodation): Path<String>,
    Json(update): Json<UpdateRate>,
) -> AppResult<Json<Rate>> {
    let rate = state.services.rates.upsert(&accommodation, update).await?;
    Ok(Json(rate))
}
