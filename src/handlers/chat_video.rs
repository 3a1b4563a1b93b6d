// Character media lookups for the chat-video screen

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::{
    app::AppState,
    services::MediaKind,
    utils::{FirstValueQuery, IntParam},
};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ImageParams {
    pub character_id: Option<String>,
    pub image_id: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct VideoParams {
    pub character_id: Option<String>,
    pub video_id: Option<String>,
}

fn failure(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "success": false, "error": message }))).into_response()
}

/// Shared resolution for both media kinds. Bodies always carry `success`.
fn resolve_media(
    state: &AppState,
    kind: MediaKind,
    character_id: Option<&str>,
    media_id: Option<&str>,
) -> Response {
    let (character_id, media_id) = match (
        IntParam::from_query(character_id),
        IntParam::from_query(media_id),
    ) {
        (IntParam::Missing, _) | (_, IntParam::Missing) => {
            return failure(StatusCode::BAD_REQUEST, kind.missing_message())
        },
        (IntParam::Value(c), IntParam::Value(m)) => (c, m),
        _ => return failure(StatusCode::BAD_REQUEST, kind.not_numeric_message()),
    };

    let Some(url) = state.catalog.resolve(kind, character_id, media_id) else {
        return failure(StatusCode::NOT_FOUND, kind.not_found_message());
    };

    let mut body = Map::new();
    body.insert("success".to_string(), Value::Bool(true));
    body.insert(kind.url_field().to_string(), Value::String(url.to_string()));
    body.insert("characterId".to_string(), json!(character_id));
    body.insert(kind.id_param().to_string(), json!(media_id));

    (StatusCode::OK, Json(Value::Object(body))).into_response()
}

/// Resolve a character image
/// GET /api/chat-video/image?characterId=&imageId=
#[utoipa::path(
    get,
    path = "/api/chat-video/image",
    tag = "Chat video",
    operation_id = "getCharacterImage",
    params(ImageParams),
    responses(
        (status = 200, description = "`{success, imageUrl, characterId, imageId}`"),
        (status = 400, description = "Missing or non-numeric ids"),
        (status = 404, description = "No such image for this character")
    )
)]
pub async fn character_image(
    State(state): State<AppState>,
    FirstValueQuery(params): FirstValueQuery<ImageParams>,
) -> Response {
    resolve_media(
        &state,
        MediaKind::Image,
        params.character_id.as_deref(),
        params.image_id.as_deref(),
    )
}

/// Resolve a character video
/// GET /api/chat-video/video?characterId=&videoId=
#[utoipa::path(
    get,
    path = "/api/chat-video/video",
    tag = "Chat video",
    operation_id = "getCharacterVideo",
    params(VideoParams),
    responses(
        (status = 200, description = "`{success, videoUrl, characterId, videoId}`"),
        (status = 400, description = "Missing or non-numeric ids"),
        (status = 404, description = "No such video for this character")
    )
)]
pub async fn character_video(
    State(state): State<AppState>,
    FirstValueQuery(params): FirstValueQuery<VideoParams>,
) -> Response {
    resolve_media(
        &state,
        MediaKind::Video,
        params.character_id.as_deref(),
        params.video_id.as_deref(),
    )
}
