// Conversation history: save, list, bulk sync and attach generated videos

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::{
    app::AppState,
    models::message::{
        normalize_role, BulkSyncRequest, BulkSyncResponse, ConversationSync, ListMessagesParams,
        MessageFilter, MessageListResponse, MessageResponse, NewMessage, SaveMessageRequest,
        UpdateMessageVideoRequest,
    },
    utils::{body_int, store_failure, FirstValueQuery, IntParam, ServiceError},
};

use super::invalid_body;

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn required_user_id(param: IntParam) -> Result<i32, ServiceError> {
    match param {
        IntParam::Value(id) => Ok(id),
        IntParam::Missing => Err(ServiceError::validation("UserId requis")),
        IntParam::Invalid => Err(ServiceError::validation("UserId invalide")),
    }
}

/// Save a chat message
/// POST /api/messages
#[utoipa::path(
    post,
    path = "/api/messages",
    tag = "Messages",
    operation_id = "saveMessage",
    request_body = SaveMessageRequest,
    responses(
        (status = 200, description = "Message saved", body = MessageResponse),
        (status = 400, description = "Missing userId, role or content"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn save_message(
    State(state): State<AppState>,
    payload: Result<Json<SaveMessageRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(body) => body,
        Err(rejection) => return invalid_body(rejection),
    };

    let user_id = body_int(request.user_id.as_ref());
    if user_id == IntParam::Missing {
        return ServiceError::validation("UserId requis").into_response();
    }

    let (role, content) = match (non_empty(request.role), non_empty(request.content)) {
        (Some(role), Some(content)) => (role, content),
        _ => return ServiceError::validation("Role et contenu requis").into_response(),
    };

    let user_id = match required_user_id(user_id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    let new_message = NewMessage {
        user_id,
        character_id: body_int(request.character_id.as_ref()).as_filter(),
        story_id: body_int(request.story_id.as_ref()).as_filter(),
        role,
        content,
        audio_url: non_empty(request.audio_url),
        video_url: non_empty(request.video_url),
    };

    match state.store.insert_message(new_message).await {
        Ok(message) => (StatusCode::OK, Json(MessageResponse { success: true, message })).into_response(),
        Err(e) => store_failure(
            "Failed to save message",
            "Erreur lors de la sauvegarde du message",
        )(e)
        .into_response(),
    }
}

/// List a user's messages, oldest first
/// GET /api/messages?userId=&characterId=&storyId=
#[utoipa::path(
    get,
    path = "/api/messages",
    tag = "Messages",
    operation_id = "listMessages",
    params(ListMessagesParams),
    responses(
        (status = 200, description = "Messages of the conversation", body = MessageListResponse),
        (status = 400, description = "Missing or invalid userId"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list_messages(
    State(state): State<AppState>,
    FirstValueQuery(params): FirstValueQuery<ListMessagesParams>,
) -> Response {
    let user_id = match required_user_id(IntParam::from_query(params.user_id.as_deref())) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    let filter = MessageFilter {
        user_id,
        character_id: IntParam::from_query(params.character_id.as_deref()).as_filter(),
        story_id: IntParam::from_query(params.story_id.as_deref()).as_filter(),
    };

    match state.store.list_messages(filter).await {
        Ok(messages) => (StatusCode::OK, Json(MessageListResponse { success: true, messages })).into_response(),
        Err(e) => store_failure(
            "Failed to list messages",
            "Erreur lors de la récupération des messages",
        )(e)
        .into_response(),
    }
}

/// Attach (or clear) the generated video of a message
/// PUT /api/messages
#[utoipa::path(
    put,
    path = "/api/messages",
    tag = "Messages",
    operation_id = "updateMessageVideo",
    request_body = UpdateMessageVideoRequest,
    responses(
        (status = 200, description = "Message updated", body = MessageResponse),
        (status = 400, description = "Missing or invalid messageId"),
        (status = 404, description = "Unknown message"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn update_message_video(
    State(state): State<AppState>,
    payload: Result<Json<UpdateMessageVideoRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(body) => body,
        Err(rejection) => return invalid_body(rejection),
    };

    let message_id = match body_int(request.message_id.as_ref()) {
        IntParam::Value(id) => id,
        IntParam::Missing => return ServiceError::validation("MessageId requis").into_response(),
        IntParam::Invalid => return ServiceError::validation("MessageId invalide").into_response(),
    };

    let video_url = non_empty(request.video_url);
    let attached = video_url.is_some();

    match state.store.set_message_video(message_id, video_url).await {
        Ok(Some(message)) => {
            info!(
                "Message {} video {}",
                message.id,
                if attached { "attached" } else { "cleared" }
            );
            (StatusCode::OK, Json(MessageResponse { success: true, message })).into_response()
        },
        Ok(None) => ServiceError::not_found("Message non trouvé").into_response(),
        Err(e) => store_failure(
            "Failed to update message",
            "Erreur lors de la mise à jour du message",
        )(e)
        .into_response(),
    }
}

/// Push locally stored conversations. A conversation that already has
/// messages on the server is skipped whole; otherwise each valid message is
/// inserted and failures are counted, not fatal.
/// POST /api/messages/bulk
#[utoipa::path(
    post,
    path = "/api/messages/bulk",
    tag = "Messages",
    operation_id = "syncConversations",
    request_body = BulkSyncRequest,
    responses(
        (status = 200, description = "Sync report", body = BulkSyncResponse),
        (status = 400, description = "Missing or invalid userId or conversations"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn sync_conversations(
    State(state): State<AppState>,
    payload: Result<Json<BulkSyncRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(body) => body,
        Err(rejection) => return invalid_body(rejection),
    };

    let user_id = match required_user_id(body_int(request.user_id.as_ref())) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    let conversations: Vec<ConversationSync> = match request.conversations {
        Some(items @ Value::Array(_)) => match serde_json::from_value(items) {
            Ok(conversations) => conversations,
            Err(e) => {
                debug!("Rejected conversations payload: {}", e);
                return ServiceError::validation("Conversations invalides").into_response();
            },
        },
        _ => return ServiceError::validation("Conversations requises").into_response(),
    };

    let mut report = BulkSyncResponse {
        success: true,
        ..BulkSyncResponse::default()
    };

    for conversation in conversations {
        let filter = MessageFilter {
            user_id,
            character_id: body_int(conversation.character_id.as_ref()).as_filter(),
            story_id: body_int(conversation.story_id.as_ref()).as_filter(),
        };

        match state.store.has_messages(filter).await {
            Ok(true) => {
                report.total_skipped += conversation.messages.len();
                continue;
            },
            Ok(false) => {},
            Err(e) => {
                return store_failure("Failed to sync conversations", "Erreur lors du sync")(e)
                    .into_response()
            },
        }

        for message in conversation.messages {
            let (Some(role), Some(content)) = (non_empty(message.role), non_empty(message.content))
            else {
                continue;
            };

            let new_message = NewMessage {
                user_id,
                character_id: filter.character_id,
                story_id: filter.story_id,
                role: normalize_role(&role).to_string(),
                content,
                audio_url: non_empty(message.audio_url),
                video_url: non_empty(message.video_url),
            };

            match state.store.insert_message(new_message).await {
                Ok(_) => report.total_synced += 1,
                Err(e) => {
                    error!("Failed to insert synced message for user {}: {}", user_id, e);
                    report.total_errors += 1;
                },
            }
        }
    }

    info!(
        "Synced conversations for user {}: {} inserted, {} skipped, {} failed",
        user_id, report.total_synced, report.total_skipped, report.total_errors
    );

    (StatusCode::OK, Json(report)).into_response()
}
