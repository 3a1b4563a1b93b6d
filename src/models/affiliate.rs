use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::schema::{affiliates, referral_sales, users};

/// Commission rate applied when an admin does not specify one, in percent.
pub const DEFAULT_COMMISSION_RATE: i32 = 50;

/// Maximum number of referral sales returned by the admin listing.
pub const RECENT_SALES_LIMIT: i64 = 100;

/// Affiliate codes are stored and compared uppercased.
pub fn normalize_code(code: &str) -> String {
    code.to_uppercase()
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable, ToSchema)]
#[diesel(table_name = affiliates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Affiliate {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub email: String,
    pub user_id: Option<i32>,
    pub commission_rate: i32,
    pub total_earned: i32, // cents
    pub total_paid: i32,   // cents
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Affiliate {
    pub fn commission_due(&self) -> i32 {
        self.total_earned - self.total_paid
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = affiliates)]
pub struct NewAffiliate {
    pub code: String,
    pub name: String,
    pub email: String,
    pub user_id: Option<i32>,
    pub commission_rate: i32,
}

/// Public projection returned by the code check.
#[derive(Debug, Clone, PartialEq, Serialize, Queryable)]
pub struct AffiliateMatch {
    pub name: String,
    pub code: String,
}

/// Admin listing row: the affiliate plus its sales statistics.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateWithStats {
    #[serde(flatten)]
    pub affiliate: Affiliate,
    pub sales_count: i64,
    pub commission_due: i32,
}

impl AffiliateWithStats {
    pub fn new(affiliate: Affiliate, sales_count: i64) -> Self {
        let commission_due = affiliate.commission_due();
        Self {
            affiliate,
            sales_count,
            commission_due,
        }
    }
}

/// Referral sale joined with its affiliate and buyer.
#[derive(Debug, Clone, Serialize, Queryable, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReferralSaleView {
    pub id: i32,
    pub amount: i32,
    pub commission_amount: i32,
    pub plan: String,
    pub status: String,
    pub paypal_order_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub affiliate_code: String,
    pub affiliate_name: String,
    pub buyer_email: String,
    pub buyer_name: Option<String>,
}

// =============================================================================
// REQUEST/RESPONSE TYPES
// =============================================================================

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct CheckAffiliateParams {
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AffiliateCheckResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl AffiliateCheckResponse {
    pub fn invalid() -> Self {
        Self {
            valid: false,
            name: None,
            code: None,
        }
    }

    pub fn valid(found: AffiliateMatch) -> Self {
        Self {
            valid: true,
            name: Some(found.name),
            code: Some(found.code),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAffiliateRequest {
    #[validate(length(max = 50))]
    pub code: Option<String>,
    #[validate(length(max = 255))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[schema(value_type = Option<String>)]
    pub user_id: Option<crate::utils::params::FlexibleInt>,
    #[schema(value_type = Option<String>)]
    pub commission_rate: Option<crate::utils::params::FlexibleInt>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkPaidRequest {
    #[schema(value_type = Option<String>)]
    pub affiliate_id: Option<crate::utils::params::FlexibleInt>,
    #[schema(value_type = Option<String>)]
    pub amount: Option<crate::utils::params::FlexibleInt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkPaidResponse {
    pub success: bool,
    pub paid: i32,
    pub new_total_paid: i32,
    pub remaining: i32,
}

// =============================================================================
// QUERIES
// =============================================================================

impl Affiliate {
    /// Active affiliate whose code equals `code` (already normalized).
    pub async fn find_active_by_code(
        conn: &mut AsyncPgConnection,
        code: &str,
    ) -> Result<Option<AffiliateMatch>, diesel::result::Error> {
        affiliates::table
            .filter(affiliates::code.eq(code))
            .filter(affiliates::is_active.eq(true))
            .select((affiliates::name, affiliates::code))
            .first::<AffiliateMatch>(conn)
            .await
            .optional()
    }

    pub async fn find_by_code(
        conn: &mut AsyncPgConnection,
        code: &str,
    ) -> Result<Option<Self>, diesel::result::Error> {
        affiliates::table
            .filter(affiliates::code.eq(code))
            .select(Self::as_select())
            .first(conn)
            .await
            .optional()
    }

    pub async fn find_by_id(
        conn: &mut AsyncPgConnection,
        id: i32,
    ) -> Result<Option<Self>, diesel::result::Error> {
        affiliates::table
            .find(id)
            .select(Self::as_select())
            .first(conn)
            .await
            .optional()
    }

    pub async fn list_with_stats(
        conn: &mut AsyncPgConnection,
    ) -> Result<Vec<AffiliateWithStats>, diesel::result::Error> {
        let all = affiliates::table
            .order(affiliates::id.asc())
            .select(Self::as_select())
            .load::<Self>(conn)
            .await?;

        let counts: Vec<(i32, i64)> = referral_sales::table
            .group_by(referral_sales::affiliate_id)
            .select((referral_sales::affiliate_id, diesel::dsl::count_star()))
            .load(conn)
            .await?;

        Ok(all
            .into_iter()
            .map(|affiliate| {
                let sales = counts
                    .iter()
                    .find(|(id, _)| *id == affiliate.id)
                    .map(|(_, count)| *count)
                    .unwrap_or(0);
                AffiliateWithStats::new(affiliate, sales)
            })
            .collect())
    }

    pub async fn create(
        conn: &mut AsyncPgConnection,
        new_affiliate: NewAffiliate,
    ) -> Result<Self, diesel::result::Error> {
        diesel::insert_into(affiliates::table)
            .values(&new_affiliate)
            .returning(Self::as_returning())
            .get_result(conn)
            .await
    }

    /// Adds `amount` to `total_paid` in a single statement.
    pub async fn add_payment(
        conn: &mut AsyncPgConnection,
        id: i32,
        amount: i32,
    ) -> Result<Self, diesel::result::Error> {
        diesel::update(affiliates::table.find(id))
            .set(affiliates::total_paid.eq(affiliates::total_paid + amount))
            .returning(Self::as_returning())
            .get_result(conn)
            .await
    }
}

impl ReferralSaleView {
    pub async fn recent(
        conn: &mut AsyncPgConnection,
        limit: i64,
    ) -> Result<Vec<Self>, diesel::result::Error> {
        referral_sales::table
            .inner_join(affiliates::table)
            .inner_join(users::table)
            .select((
                referral_sales::id,
                referral_sales::amount,
                referral_sales::commission_amount,
                referral_sales::plan,
                referral_sales::status,
                referral_sales::paypal_order_id,
                referral_sales::created_at,
                affiliates::code,
                affiliates::name,
                users::email,
                users::name,
            ))
            .order(referral_sales::created_at.desc())
            .limit(limit)
            .load::<Self>(conn)
            .await
    }
}
