use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

use crate::schema::ai_doubles;

/// A user-owned AI persona.
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Selectable, Identifiable, ToSchema,
)]
#[diesel(table_name = ai_doubles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct AiDouble {
    pub id: i32,
    pub user_id: i32,
    #[schema(value_type = Object)]
    pub personality: JsonValue,
    #[schema(value_type = Option<Object>)]
    pub style_rules: Option<JsonValue>,
    pub voice_id: Option<String>,
    pub messages_count: i32,
    pub improvement_level: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListDoublesParams {
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct GetDoubleParams {
    pub id: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DoubleListResponse {
    pub success: bool,
    pub doubles: Vec<AiDouble>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DoubleResponse {
    pub success: bool,
    pub double: AiDouble,
}

impl AiDouble {
    pub async fn find_by_user_id(
        conn: &mut AsyncPgConnection,
        user_id: i32,
    ) -> Result<Vec<Self>, diesel::result::Error> {
        ai_doubles::table
            .filter(ai_doubles::user_id.eq(user_id))
            .order(ai_doubles::created_at.asc())
            .select(Self::as_select())
            .load(conn)
            .await
    }

    pub async fn find_by_id(
        conn: &mut AsyncPgConnection,
        id: i32,
    ) -> Result<Option<Self>, diesel::result::Error> {
        ai_doubles::table
            .find(id)
            .select(Self::as_select())
            .first(conn)
            .await
            .optional()
    }

    /// Oldest double owned by `user_id`.
    pub async fn find_first_for_user(
        conn: &mut AsyncPgConnection,
        user_id: i32,
    ) -> Result<Option<Self>, diesel::result::Error> {
        ai_doubles::table
            .filter(ai_doubles::user_id.eq(user_id))
            .order(ai_doubles::created_at.asc())
            .select(Self::as_select())
            .first(conn)
            .await
            .optional()
    }
}
