//! Enquiry endpoints: public submission and the admin workflow

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    calendar,
    error::AppResult,
    listing::{EnquiryFilter, ListQuery},
    models::{CreateEnquiry, Enquiry, EnquiryStatus},
    services::bookings::TransitionOutcome,
};

use super::{non_empty, AuthenticatedAdmin, PaginatedResponse};

/// Admin list filters. Blank values are ignored.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct EnquiryListQuery {
    /// Case-insensitive substring of the phone number
    pub phone: Option<String>,
    /// Exact status: New, contacted, booked or cancelled
    pub status: Option<String>,
    /// Earliest check-in (YYYY-MM-DD, inclusive)
    pub from_date: Option<String>,
    /// Latest check-in (YYYY-MM-DD, inclusive)
    pub to_date: Option<String>,
    /// Page number (default: 1)
    pub page: Option<usize>,
}

impl EnquiryListQuery {
    fn into_list_query(self) -> AppResult<ListQuery<EnquiryFilter>> {
        let status = non_empty(self.status)
            .map(|s| s.parse::<EnquiryStatus>())
            .transpose()?;
        let from_date = non_empty(self.from_date)
            .map(|d| calendar::parse_day_token(&d))
            .transpose()?;
        let to_date = non_empty(self.to_date)
            .map(|d| calendar::parse_day_token(&d))
            .transpose()?;

        let filter = EnquiryFilter {
            phone: non_empty(self.phone),
            status,
            from_date,
            to_date,
        };

        Ok(ListQuery::new(filter).with_page(self.page.unwrap_or(1)))
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    /// Target status: contacted, booked or cancelled
    pub status: String,
}

/// Submit a booking enquiry
#[utoipa::path(
    post,
    path = "/enquiries",
    tag = "enquiries",
    request_body = CreateEnquiry,
    responses(
        (status = 201, description = "Enquiry stored", body = Enquiry),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_enquiry(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateEnquiry>,
) -> AppResult<(StatusCode, Json<Enquiry>)> {
    let enquiry = state.services.enquiries.submit(request).await?;
    Ok((StatusCode::CREATED, Json(enquiry)))
}

/// List enquiries, newest first, with filters and pagination
#[utoipa::path(
    get,
    path = "/enquiries",
    tag = "enquiries",
    security(("bearer_auth" = [])),
    params(EnquiryListQuery),
    responses(
        (status = 200, description = "Page of enquiries", body = PaginatedResponse<Enquiry>),
        (status = 400, description = "Invalid filter"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_enquiries(
    State(state): State<crate::AppState>,
    AuthenticatedAdmin(_claims): AuthenticatedAdmin,
    Query(query): Query<EnquiryListQuery>,
) -> AppResult<Json<PaginatedResponse<Enquiry>>> {
    let query = query.into_list_query()?;
    let page = state.services.enquiries.list(&query).await?;
    Ok(Json(page.into()))
}

/// Get one enquiry
#[utoipa::path(
    get,
    path = "/enquiries/{id}",
    tag = "enquiries",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Enquiry ID")
    ),
    responses(
        (status = 200, description = "Enquiry details", body = Enquiry),
        (status = 404, description = "Enquiry not found")
    )
)]
pub async fn get_enquiry(
    State(state): State<crate::AppState>,
    AuthenticatedAdmin(_claims): AuthenticatedAdmin,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Enquiry>> {
    let enquiry = state.services.enquiries.get(id).await?;
    Ok(Json(enquiry))
}

/// Move an enquiry through the booking workflow.
///
/// `booked` blocks every night of the stay on the accommodation calendar and
/// `cancelled` releases them again.
#[utoipa::path(
    put,
    path = "/enquiries/{id}/status",
    tag = "enquiries",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Enquiry ID")
    ),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = TransitionOutcome),
        (status = 400, description = "Invalid status or stay dates"),
        (status = 404, description = "Enquiry not found"),
        (status = 500, description = "Status written but calendar not updated", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_enquiry_status(
    State(state): State<crate::AppState>,
    AuthenticatedAdmin(claims): AuthenticatedAdmin,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> AppResult<Json<TransitionOutcome>> {
    let target: EnquiryStatus = request.status.trim().parse()?;

    tracing::debug!(enquiry_id = %id, admin = %claims.email, target = %target, "Status change requested");

    let outcome = state.services.bookings.transition(id, target).await?;
    Ok(Json(outcome))
}
