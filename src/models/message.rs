use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::schema::messages;
use crate::utils::params::FlexibleInt;

#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Selectable, Identifiable, ToSchema,
)]
#[diesel(table_name = messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: i32,
    pub user_id: i32,
    pub character_id: Option<i32>,
    pub story_id: Option<i32>,
    pub role: String,
    pub content: String,
    pub audio_url: Option<String>,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = messages)]
pub struct NewMessage {
    pub user_id: i32,
    pub character_id: Option<i32>,
    pub story_id: Option<i32>,
    pub role: String,
    pub content: String,
    pub audio_url: Option<String>,
    pub video_url: Option<String>,
}

/// Conversation selector: a user's messages, optionally narrowed to one
/// character and/or one story.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageFilter {
    pub user_id: i32,
    pub character_id: Option<i32>,
    pub story_id: Option<i32>,
}

impl MessageFilter {
    pub fn matches(&self, message: &Message) -> bool {
        message.user_id == self.user_id
            && self.character_id.map_or(true, |c| message.character_id == Some(c))
            && self.story_id.map_or(true, |s| message.story_id == Some(s))
    }
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListMessagesParams {
    pub user_id: Option<String>,
    pub character_id: Option<String>,
    pub story_id: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveMessageRequest {
    #[schema(value_type = Option<String>)]
    pub user_id: Option<FlexibleInt>,
    #[schema(value_type = Option<String>)]
    pub character_id: Option<FlexibleInt>,
    #[schema(value_type = Option<String>)]
    pub story_id: Option<FlexibleInt>,
    pub role: Option<String>,
    pub content: Option<String>,
    pub audio_url: Option<String>,
    pub video_url: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMessageVideoRequest {
    #[schema(value_type = Option<String>)]
    pub message_id: Option<FlexibleInt>,
    pub video_url: Option<String>,
}

/// Local conversations pushed by a client catching up with the server.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkSyncRequest {
    #[schema(value_type = Option<String>)]
    pub user_id: Option<FlexibleInt>,
    /// Kept raw so a non-array value gets its own error message.
    #[schema(value_type = Option<Vec<ConversationSync>>)]
    pub conversations: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSync {
    #[schema(value_type = Option<String>)]
    pub character_id: Option<FlexibleInt>,
    #[schema(value_type = Option<String>)]
    pub story_id: Option<FlexibleInt>,
    #[serde(default)]
    pub messages: Vec<SyncedMessage>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncedMessage {
    pub role: Option<String>,
    pub content: Option<String>,
    pub audio_url: Option<String>,
    pub video_url: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkSyncResponse {
    pub success: bool,
    pub total_synced: usize,
    pub total_skipped: usize,
    pub total_errors: usize,
}

/// Stored role for a synced message: anything but `assistant` is `user`.
pub fn normalize_role(role: &str) -> &'static str {
    if role == "assistant" {
        "assistant"
    } else {
        "user"
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: Message,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageListResponse {
    pub success: bool,
    pub messages: Vec<Message>,
}

impl Message {
    pub async fn create(
        conn: &mut AsyncPgConnection,
        new_message: NewMessage,
    ) -> Result<Self, diesel::result::Error> {
        diesel::insert_into(messages::table)
            .values(&new_message)
            .returning(Self::as_returning())
            .get_result(conn)
            .await
    }

    /// Messages matching `filter`, oldest first.
    pub async fn find_by_filter(
        conn: &mut AsyncPgConnection,
        filter: MessageFilter,
    ) -> Result<Vec<Self>, diesel::result::Error> {
        let mut query = messages::table
            .select(Self::as_select())
            .filter(messages::user_id.eq(filter.user_id))
            .into_boxed();

        if let Some(character_id) = filter.character_id {
            query = query.filter(messages::character_id.eq(character_id));
        }
        if let Some(story_id) = filter.story_id {
            query = query.filter(messages::story_id.eq(story_id));
        }

        query
            .order((messages::created_at.asc(), messages::id.asc()))
            .load(conn)
            .await
    }

    /// Whether any message matches `filter`.
    pub async fn exists_for_filter(
        conn: &mut AsyncPgConnection,
        filter: MessageFilter,
    ) -> Result<bool, diesel::result::Error> {
        let mut query = messages::table
            .select(messages::id)
            .filter(messages::user_id.eq(filter.user_id))
            .into_boxed();

        if let Some(character_id) = filter.character_id {
            query = query.filter(messages::character_id.eq(character_id));
        }
        if let Some(story_id) = filter.story_id {
            query = query.filter(messages::story_id.eq(story_id));
        }

        let found: Option<i32> = query.first(conn).await.optional()?;
        Ok(found.is_some())
    }

    pub async fn set_video_url(
        conn: &mut AsyncPgConnection,
        id: i32,
        video_url: Option<String>,
    ) -> Result<Option<Self>, diesel::result::Error> {
        diesel::update(messages::table.find(id))
            .set(messages::video_url.eq(video_url))
            .returning(Self::as_returning())
            .get_result(conn)
            .await
            .optional()
    }

    /// Deletes every message. Returns the number of rows removed.
    pub async fn delete_all(conn: &mut AsyncPgConnection) -> Result<usize, diesel::result::Error> {
        diesel::delete(messages::table).execute(conn).await
    }
}
