// PostgreSQL implementation of the Store trait over the diesel-async pool

use async_trait::async_trait;

use super::{DieselPool, Store, StoreError};
use crate::models::{
    affiliate::ReferralSaleView, Affiliate, AffiliateMatch, AffiliateWithStats, AiDouble,
    Message, MessageFilter, NewAffiliate, NewMessage,
};

#[derive(Clone)]
pub struct PgStore {
    pool: DieselPool,
}

impl PgStore {
    pub fn new(pool: DieselPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_active_affiliate(
        &self,
        code: &str,
    ) -> Result<Option<AffiliateMatch>, StoreError> {
        let mut conn = self.pool.get().await?;
        Ok(Affiliate::find_active_by_code(&mut conn, code).await?)
    }

    async fn find_affiliate_by_code(&self, code: &str) -> Result<Option<Affiliate>, StoreError> {
        let mut conn = self.pool.get().await?;
        Ok(Affiliate::find_by_code(&mut conn, code).await?)
    }

    async fn find_affiliate(&self, id: i32) -> Result<Option<Affiliate>, StoreError> {
        let mut conn = self.pool.get().await?;
        Ok(Affiliate::find_by_id(&mut conn, id).await?)
    }

    async fn list_affiliates(&self) -> Result<Vec<AffiliateWithStats>, StoreError> {
        let mut conn = self.pool.get().await?;
        Ok(Affiliate::list_with_stats(&mut conn).await?)
    }

    async fn create_affiliate(&self, new_affiliate: NewAffiliate) -> Result<Affiliate, StoreError> {
        let mut conn = self.pool.get().await?;
        Ok(Affiliate::create(&mut conn, new_affiliate).await?)
    }

    async fn add_affiliate_payment(&self, id: i32, amount: i32) -> Result<Affiliate, StoreError> {
        let mut conn = self.pool.get().await?;
        Ok(Affiliate::add_payment(&mut conn, id, amount).await?)
    }

    async fn recent_referral_sales(&self, limit: i64) -> Result<Vec<ReferralSaleView>, StoreError> {
        let mut conn = self.pool.get().await?;
        Ok(ReferralSaleView::recent(&mut conn, limit).await?)
    }

    async fn list_doubles_for_user(&self, user_id: i32) -> Result<Vec<AiDouble>, StoreError> {
        let mut conn = self.pool.get().await?;
        Ok(AiDouble::find_by_user_id(&mut conn, user_id).await?)
    }

    async fn find_double(&self, id: i32) -> Result<Option<AiDouble>, StoreError> {
        let mut conn = self.pool.get().await?;
        Ok(AiDouble::find_by_id(&mut conn, id).await?)
    }

    async fn find_first_double_for_user(
        &self,
        user_id: i32,
    ) -> Result<Option<AiDouble>, StoreError> {
        let mut conn = self.pool.get().await?;
        Ok(AiDouble::find_first_for_user(&mut conn, user_id).await?)
    }

    async fn insert_message(&self, new_message: NewMessage) -> Result<Message, StoreError> {
        let mut conn = self.pool.get().await?;
        Ok(Message::create(&mut conn, new_message).await?)
    }

    async fn has_messages(&self, filter: MessageFilter) -> Result<bool, StoreError> {
        let mut conn = self.pool.get().await?;
        Ok(Message::exists_for_filter(&mut conn, filter).await?)
    }

    async fn list_messages(&self, filter: MessageFilter) -> Result<Vec<Message>, StoreError> {
        let mut conn = self.pool.get().await?;
        Ok(Message::find_by_filter(&mut conn, filter).await?)
    }

    async fn set_message_video(
        &self,
        id: i32,
        video_url: Option<String>,
    ) -> Result<Option<Message>, StoreError> {
        let mut conn = self.pool.get().await?;
        Ok(Message::set_video_url(&mut conn, id, video_url).await?)
    }

    async fn delete_all_messages(&self) -> Result<usize, StoreError> {
        let mut conn = self.pool.get().await?;
        Ok(Message::delete_all(&mut conn).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        super::check_diesel_health(&self.pool).await
    }
}
