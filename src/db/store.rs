// Data-access seam. Handlers receive an `Arc<dyn Store>` through AppState;
// production wires `PgStore`, tests wire `MemoryStore`.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    Affiliate, AffiliateMatch, AffiliateWithStats, AiDouble, Message, MessageFilter,
    NewAffiliate, NewMessage, ReferralSaleView,
};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection pool error: {0}")]
    Pool(String),

    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Store unavailable")]
    Unavailable,
}

impl From<diesel::result::Error> for StoreError {
    fn from(error: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};
        match error {
            Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                StoreError::UniqueViolation(info.message().to_string())
            },
            other => StoreError::Database(other.to_string()),
        }
    }
}

impl<E: std::error::Error + 'static> From<bb8::RunError<E>> for StoreError {
    fn from(error: bb8::RunError<E>) -> Self {
        StoreError::Pool(error.to_string())
    }
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Active affiliate with exactly this (normalized) code.
    async fn find_active_affiliate(&self, code: &str)
        -> Result<Option<AffiliateMatch>, StoreError>;

    async fn find_affiliate_by_code(&self, code: &str) -> Result<Option<Affiliate>, StoreError>;

    async fn find_affiliate(&self, id: i32) -> Result<Option<Affiliate>, StoreError>;

    async fn list_affiliates(&self) -> Result<Vec<AffiliateWithStats>, StoreError>;

    async fn create_affiliate(&self, new_affiliate: NewAffiliate) -> Result<Affiliate, StoreError>;

    /// Atomically adds `amount` to the affiliate's paid total.
    async fn add_affiliate_payment(&self, id: i32, amount: i32) -> Result<Affiliate, StoreError>;

    /// Newest first.
    async fn recent_referral_sales(&self, limit: i64) -> Result<Vec<ReferralSaleView>, StoreError>;

    async fn list_doubles_for_user(&self, user_id: i32) -> Result<Vec<AiDouble>, StoreError>;

    async fn find_double(&self, id: i32) -> Result<Option<AiDouble>, StoreError>;

    /// Oldest double of the user.
    async fn find_first_double_for_user(&self, user_id: i32)
        -> Result<Option<AiDouble>, StoreError>;

    async fn insert_message(&self, new_message: NewMessage) -> Result<Message, StoreError>;

    /// Whether the conversation selected by `filter` already has messages.
    async fn has_messages(&self, filter: MessageFilter) -> Result<bool, StoreError>;

    /// Oldest first.
    async fn list_messages(&self, filter: MessageFilter) -> Result<Vec<Message>, StoreError>;

    async fn set_message_video(
        &self,
        id: i32,
        video_url: Option<String>,
    ) -> Result<Option<Message>, StoreError>;

    /// Removes every message; returns how many were deleted.
    async fn delete_all_messages(&self) -> Result<usize, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_map_to_pool_variant() {
        let timed_out: StoreError = bb8::RunError::<std::io::Error>::TimedOut.into();
        assert!(matches!(timed_out, StoreError::Pool(_)));

        let refused = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let user: StoreError = bb8::RunError::User(refused).into();
        match user {
            StoreError::Pool(message) => assert!(message.contains("refused")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
