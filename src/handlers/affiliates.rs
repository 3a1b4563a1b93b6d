// Affiliate code check (public) and affiliate administration (admin only)

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::{
    app::AppState,
    models::affiliate::{CheckAffiliateParams, CreateAffiliateRequest, MarkPaidRequest},
    utils::{FirstValueQuery, ServiceError},
};

use super::invalid_body;

// =============================================================================
// PUBLIC
// =============================================================================

/// Check whether an affiliate code is active
/// GET /api/affiliates/check?code=
#[utoipa::path(
    get,
    path = "/api/affiliates/check",
    tag = "Affiliates",
    operation_id = "checkAffiliate",
    params(CheckAffiliateParams),
    responses(
        (status = 200, description = "Always 200; `valid` tells whether the code is active", body = AffiliateCheckResponse)
    )
)]
pub async fn check_affiliate(
    State(state): State<AppState>,
    params: Result<FirstValueQuery<CheckAffiliateParams>, ServiceError>,
) -> Response {
    // an unreadable query is answered like a missing code
    let code = params.ok().and_then(|FirstValueQuery(p)| p.code);
    let response = state.affiliate_service().check(code.as_deref()).await;

    (StatusCode::OK, Json(response)).into_response()
}

// =============================================================================
// ADMIN
// =============================================================================

/// List affiliates with their sales statistics
/// GET /api/affiliates
#[utoipa::path(
    get,
    path = "/api/affiliates",
    tag = "Affiliates",
    operation_id = "listAffiliates",
    responses(
        (status = 200, description = "All affiliates with their sales counts", body = [AffiliateWithStats]),
        (status = 401, description = "Missing or wrong admin password"),
        (status = 500, description = "Store failure")
    ),
    security(("adminPassword" = []))
)]
pub async fn list_affiliates(State(state): State<AppState>) -> Response {
    match state.affiliate_service().list().await {
        Ok(affiliates) => (
            StatusCode::OK,
            Json(json!({ "success": true, "affiliates": affiliates })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create an affiliate
/// POST /api/affiliates/create
#[utoipa::path(
    post,
    path = "/api/affiliates/create",
    tag = "Affiliates",
    operation_id = "createAffiliate",
    request_body = CreateAffiliateRequest,
    responses(
        (status = 200, description = "Affiliate created", body = Affiliate),
        (status = 400, description = "Missing fields or duplicate code"),
        (status = 401, description = "Missing or wrong admin password"),
        (status = 500, description = "Store failure")
    ),
    security(("adminPassword" = []))
)]
pub async fn create_affiliate(
    State(state): State<AppState>,
    payload: Result<Json<CreateAffiliateRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(body) => body,
        Err(rejection) => return invalid_body(rejection),
    };

    match state.affiliate_service().create(request).await {
        Ok(affiliate) => (
            StatusCode::OK,
            Json(json!({ "success": true, "affiliate": affiliate })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Latest referral sales
/// GET /api/affiliates/sales
#[utoipa::path(
    get,
    path = "/api/affiliates/sales",
    tag = "Affiliates",
    operation_id = "listReferralSales",
    responses(
        (status = 200, description = "Latest referral sales, newest first", body = [ReferralSaleView]),
        (status = 401, description = "Missing or wrong admin password"),
        (status = 500, description = "Store failure")
    ),
    security(("adminPassword" = []))
)]
pub async fn list_sales(State(state): State<AppState>) -> Response {
    match state.affiliate_service().recent_sales().await {
        Ok(sales) => (StatusCode::OK, Json(json!({ "success": true, "sales": sales }))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Record a commission payout
/// POST /api/affiliates/mark-paid
#[utoipa::path(
    post,
    path = "/api/affiliates/mark-paid",
    tag = "Affiliates",
    operation_id = "markAffiliatePaid",
    request_body = MarkPaidRequest,
    responses(
        (status = 200, description = "Payment recorded", body = MarkPaidResponse),
        (status = 400, description = "Missing affiliateId or nothing due"),
        (status = 401, description = "Missing or wrong admin password"),
        (status = 404, description = "Unknown affiliate"),
        (status = 500, description = "Store failure")
    ),
    security(("adminPassword" = []))
)]
pub async fn mark_paid(
    State(state): State<AppState>,
    payload: Result<Json<MarkPaidRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(body) => body,
        Err(rejection) => return invalid_body(rejection),
    };

    match state.affiliate_service().mark_paid(request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => e.into_response(),
    }
}
