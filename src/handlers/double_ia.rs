// AI-double reads

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use crate::{
    app::AppState,
    models::ai_double::{DoubleListResponse, DoubleResponse, GetDoubleParams, ListDoublesParams},
    utils::{store_failure, FirstValueQuery, IntParam, ServiceError},
};

/// List the AI doubles owned by a user
/// GET /api/double-ia/list?userId=
#[utoipa::path(
    get,
    path = "/api/double-ia/list",
    tag = "AI doubles",
    operation_id = "listDoubles",
    params(ListDoublesParams),
    responses(
        (status = 200, description = "Doubles of the user, possibly empty", body = DoubleListResponse),
        (status = 400, description = "Missing or invalid userId"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list_doubles(
    State(state): State<AppState>,
    FirstValueQuery(params): FirstValueQuery<ListDoublesParams>,
) -> Response {
    let user_id = match IntParam::from_query(params.user_id.as_deref()) {
        IntParam::Value(id) => id,
        IntParam::Missing => return ServiceError::validation("UserId requis").into_response(),
        IntParam::Invalid => return ServiceError::validation("UserId invalide").into_response(),
    };

    match state.store.list_doubles_for_user(user_id).await {
        Ok(doubles) => {
            debug!("Found {} doubles for user {}", doubles.len(), user_id);
            (StatusCode::OK, Json(DoubleListResponse { success: true, doubles })).into_response()
        },
        Err(e) => store_failure(
            "Failed to list AI doubles",
            "Erreur lors du chargement des doubles IA",
        )(e)
        .into_response(),
    }
}

/// Fetch one AI double by id, or the oldest double of a user
/// GET /api/double-ia/get?id=|userId=
#[utoipa::path(
    get,
    path = "/api/double-ia/get",
    tag = "AI doubles",
    operation_id = "getDouble",
    params(GetDoubleParams),
    responses(
        (status = 200, description = "The double", body = DoubleResponse),
        (status = 400, description = "Neither id nor userId, or not numeric"),
        (status = 404, description = "No matching double"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn get_double(
    State(state): State<AppState>,
    FirstValueQuery(params): FirstValueQuery<GetDoubleParams>,
) -> Response {
    let id = IntParam::from_query(params.id.as_deref());
    let user_id = IntParam::from_query(params.user_id.as_deref());

    let lookup = match (id, user_id) {
        (IntParam::Value(id), _) => state.store.find_double(id).await,
        (IntParam::Invalid, _) => return ServiceError::validation("id invalide").into_response(),
        (IntParam::Missing, IntParam::Value(user_id)) => {
            state.store.find_first_double_for_user(user_id).await
        },
        (IntParam::Missing, IntParam::Invalid) => {
            return ServiceError::validation("UserId invalide").into_response()
        },
        (IntParam::Missing, IntParam::Missing) => {
            return ServiceError::validation("UserId ou id requis").into_response()
        },
    };

    match lookup {
        Ok(Some(double)) => (StatusCode::OK, Json(DoubleResponse { success: true, double })).into_response(),
        Ok(None) => ServiceError::not_found("Double IA non trouvé").into_response(),
        Err(e) => store_failure(
            "Failed to load AI double",
            "Erreur lors du chargement du double IA",
        )(e)
        .into_response(),
    }
}
