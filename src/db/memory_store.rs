// In-memory Store used by tests and local tooling

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde_json::Value as JsonValue;
use tokio::sync::RwLock;

use super::{Store, StoreError};
use crate::models::{
    Affiliate, AffiliateMatch, AffiliateWithStats, AiDouble, Message, MessageFilter,
    NewAffiliate, NewMessage, ReferralSaleView,
};

#[derive(Debug, Clone)]
struct UserRow {
    id: i32,
    email: String,
    name: Option<String>,
}

#[derive(Debug, Clone)]
struct SaleRow {
    id: i32,
    affiliate_id: i32,
    user_id: i32,
    amount: i32,
    commission_amount: i32,
    plan: String,
    status: String,
    created_at: DateTime<Utc>,
}

#[derive(Default)]
struct Tables {
    users: Vec<UserRow>,
    affiliates: Vec<Affiliate>,
    sales: Vec<SaleRow>,
    doubles: Vec<AiDouble>,
    messages: Vec<Message>,
    next_id: i32,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

/// Store backed by plain vectors. `set_failing(true)` makes every call
/// return `StoreError::Unavailable`, which is how tests simulate outages.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable)
        } else {
            Ok(())
        }
    }

    pub async fn add_user(&self, email: &str, name: Option<&str>) -> i32 {
        let mut tables = self.tables.write().await;
        let id = tables.next_id();
        tables.users.push(UserRow {
            id,
            email: email.to_string(),
            name: name.map(str::to_string),
        });
        id
    }

    /// Inserts an affiliate verbatim (the code is stored as given).
    pub async fn add_affiliate(
        &self,
        code: &str,
        name: &str,
        is_active: bool,
        total_earned: i32,
        total_paid: i32,
    ) -> Affiliate {
        let mut tables = self.tables.write().await;
        let affiliate = Affiliate {
            id: tables.next_id(),
            code: code.to_string(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            user_id: None,
            commission_rate: crate::models::affiliate::DEFAULT_COMMISSION_RATE,
            total_earned,
            total_paid,
            is_active,
            created_at: Utc::now(),
        };
        tables.affiliates.push(affiliate.clone());
        affiliate
    }

    /// Records a referral sale; `age_minutes` backdates it for ordering tests.
    pub async fn add_sale(
        &self,
        affiliate_id: i32,
        user_id: i32,
        amount: i32,
        plan: &str,
        age_minutes: i64,
    ) -> i32 {
        let mut tables = self.tables.write().await;
        let id = tables.next_id();
        tables.sales.push(SaleRow {
            id,
            affiliate_id,
            user_id,
            amount,
            commission_amount: amount / 2,
            plan: plan.to_string(),
            status: "completed".to_string(),
            created_at: Utc::now() - Duration::minutes(age_minutes),
        });
        id
    }

    pub async fn add_double(&self, user_id: i32, personality: JsonValue, age_minutes: i64) -> AiDouble {
        let mut tables = self.tables.write().await;
        let created_at = Utc::now() - Duration::minutes(age_minutes);
        let double = AiDouble {
            id: tables.next_id(),
            user_id,
            personality,
            style_rules: None,
            voice_id: None,
            messages_count: 0,
            improvement_level: 0,
            created_at,
            updated_at: created_at,
        };
        tables.doubles.push(double.clone());
        double
    }

    pub async fn message_count(&self) -> usize {
        self.tables.read().await.messages.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_active_affiliate(
        &self,
        code: &str,
    ) -> Result<Option<AffiliateMatch>, StoreError> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .affiliates
            .iter()
            .find(|a| a.code == code && a.is_active)
            .map(|a| AffiliateMatch {
                name: a.name.clone(),
                code: a.code.clone(),
            }))
    }

    async fn find_affiliate_by_code(&self, code: &str) -> Result<Option<Affiliate>, StoreError> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables.affiliates.iter().find(|a| a.code == code).cloned())
    }

    async fn find_affiliate(&self, id: i32) -> Result<Option<Affiliate>, StoreError> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables.affiliates.iter().find(|a| a.id == id).cloned())
    }

    async fn list_affiliates(&self) -> Result<Vec<AffiliateWithStats>, StoreError> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .affiliates
            .iter()
            .map(|a| {
                let sales = tables.sales.iter().filter(|s| s.affiliate_id == a.id).count();
                AffiliateWithStats::new(a.clone(), sales as i64)
            })
            .collect())
    }

    async fn create_affiliate(&self, new_affiliate: NewAffiliate) -> Result<Affiliate, StoreError> {
        self.check()?;
        let mut tables = self.tables.write().await;
        if tables.affiliates.iter().any(|a| a.code == new_affiliate.code) {
            return Err(StoreError::UniqueViolation(format!(
                "affiliates.code {}",
                new_affiliate.code
            )));
        }
        let affiliate = Affiliate {
            id: tables.next_id(),
            code: new_affiliate.code,
            name: new_affiliate.name,
            email: new_affiliate.email,
            user_id: new_affiliate.user_id,
            commission_rate: new_affiliate.commission_rate,
            total_earned: 0,
            total_paid: 0,
            is_active: true,
            created_at: Utc::now(),
        };
        tables.affiliates.push(affiliate.clone());
        Ok(affiliate)
    }

    async fn add_affiliate_payment(&self, id: i32, amount: i32) -> Result<Affiliate, StoreError> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let affiliate = tables
            .affiliates
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::Database("Record not found".to_string()))?;
        affiliate.total_paid += amount;
        Ok(affiliate.clone())
    }

    async fn recent_referral_sales(&self, limit: i64) -> Result<Vec<ReferralSaleView>, StoreError> {
        self.check()?;
        let tables = self.tables.read().await;
        let mut rows: Vec<ReferralSaleView> = tables
            .sales
            .iter()
            .filter_map(|sale| {
                let affiliate = tables.affiliates.iter().find(|a| a.id == sale.affiliate_id)?;
                let buyer = tables.users.iter().find(|u| u.id == sale.user_id)?;
                Some(ReferralSaleView {
                    id: sale.id,
                    amount: sale.amount,
                    commission_amount: sale.commission_amount,
                    plan: sale.plan.clone(),
                    status: sale.status.clone(),
                    paypal_order_id: None,
                    created_at: sale.created_at,
                    affiliate_code: affiliate.code.clone(),
                    affiliate_name: affiliate.name.clone(),
                    buyer_email: buyer.email.clone(),
                    buyer_name: buyer.name.clone(),
                })
            })
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(rows)
    }

    async fn list_doubles_for_user(&self, user_id: i32) -> Result<Vec<AiDouble>, StoreError> {
        self.check()?;
        let tables = self.tables.read().await;
        let mut doubles: Vec<AiDouble> = tables
            .doubles
            .iter()
            .filter(|d| d.user_id == user_id)
            .cloned()
            .collect();
        doubles.sort_by_key(|d| d.created_at);
        Ok(doubles)
    }

    async fn find_double(&self, id: i32) -> Result<Option<AiDouble>, StoreError> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables.doubles.iter().find(|d| d.id == id).cloned())
    }

    async fn find_first_double_for_user(
        &self,
        user_id: i32,
    ) -> Result<Option<AiDouble>, StoreError> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .doubles
            .iter()
            .filter(|d| d.user_id == user_id)
            .min_by_key(|d| d.created_at)
            .cloned())
    }

    async fn insert_message(&self, new_message: NewMessage) -> Result<Message, StoreError> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let message = Message {
            id: tables.next_id(),
            user_id: new_message.user_id,
            character_id: new_message.character_id,
            story_id: new_message.story_id,
            role: new_message.role,
            content: new_message.content,
            audio_url: new_message.audio_url,
            video_url: new_message.video_url,
            created_at: Utc::now(),
        };
        tables.messages.push(message.clone());
        Ok(message)
    }

    async fn has_messages(&self, filter: MessageFilter) -> Result<bool, StoreError> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables.messages.iter().any(|m| filter.matches(m)))
    }

    async fn list_messages(&self, filter: MessageFilter) -> Result<Vec<Message>, StoreError> {
        self.check()?;
        let tables = self.tables.read().await;
        let mut messages: Vec<Message> = tables
            .messages
            .iter()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(messages)
    }

    async fn set_message_video(
        &self,
        id: i32,
        video_url: Option<String>,
    ) -> Result<Option<Message>, StoreError> {
        self.check()?;
        let mut tables = self.tables.write().await;
        Ok(tables.messages.iter_mut().find(|m| m.id == id).map(|m| {
            m.video_url = video_url;
            m.clone()
        }))
    }

    async fn delete_all_messages(&self) -> Result<usize, StoreError> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let deleted = tables.messages.len();
        tables.messages.clear();
        Ok(deleted)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check()
    }
}
