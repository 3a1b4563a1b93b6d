// Affiliate code checks and affiliate administration

use std::sync::Arc;

use tracing::{debug, error, info};
use validator::{Validate, ValidationErrors};

use crate::{
    db::{Store, StoreError},
    models::affiliate::{
        normalize_code, Affiliate, AffiliateCheckResponse, AffiliateWithStats,
        CreateAffiliateRequest, MarkPaidRequest, MarkPaidResponse, NewAffiliate,
        ReferralSaleView, DEFAULT_COMMISSION_RATE, RECENT_SALES_LIMIT,
    },
    utils::{
        params::{body_int, IntParam},
        service_error::{store_failure, ServiceError},
    },
};

const SERVER_ERROR: &str = "Erreur serveur";

/// Amount to pay out: the requested amount capped at what is due, or the
/// whole due amount when nothing was requested.
pub fn payment_amount(requested: Option<i32>, due: i32) -> i32 {
    requested.map_or(due, |amount| amount.min(due))
}

pub struct AffiliateService {
    store: Arc<dyn Store>,
}

impl AffiliateService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Public validity check. Never fails: absence, unknown codes, inactive
    /// affiliates and store errors all answer `valid: false`.
    pub async fn check(&self, code: Option<&str>) -> AffiliateCheckResponse {
        let code = match code {
            Some(c) if !c.is_empty() => normalize_code(c),
            _ => return AffiliateCheckResponse::invalid(),
        };

        match self.store.find_active_affiliate(&code).await {
            Ok(Some(found)) => AffiliateCheckResponse::valid(found),
            Ok(None) => {
                debug!("Affiliate code {} is unknown or inactive", code);
                AffiliateCheckResponse::invalid()
            },
            Err(e) => {
                // Reported as an invalid code to the client; only the log shows the outage
                error!("Affiliate check failed for code {}: {}", code, e);
                AffiliateCheckResponse::invalid()
            },
        }
    }

    pub async fn list(&self) -> Result<Vec<AffiliateWithStats>, ServiceError> {
        self.store
            .list_affiliates()
            .await
            .map_err(store_failure("Affiliate listing failed", SERVER_ERROR))
    }

    pub async fn recent_sales(&self) -> Result<Vec<ReferralSaleView>, ServiceError> {
        self.store
            .recent_referral_sales(RECENT_SALES_LIMIT)
            .await
            .map_err(store_failure("Referral sales listing failed", SERVER_ERROR))
    }

    pub async fn create(&self, request: CreateAffiliateRequest) -> Result<Affiliate, ServiceError> {
        let (code, name, email) = match (
            non_empty(request.code.as_deref()),
            non_empty(request.name.as_deref()),
            non_empty(request.email.as_deref()),
        ) {
            (Some(code), Some(name), Some(email)) => (code, name, email),
            _ => return Err(ServiceError::validation("Code, nom et email sont requis")),
        };

        request.validate().map_err(|e| {
            debug!("Affiliate creation rejected: {}", e);
            ServiceError::validation(validation_message(&e))
        })?;

        let user_id = match body_int(request.user_id.as_ref()) {
            IntParam::Missing => None,
            IntParam::Value(id) => Some(id),
            IntParam::Invalid => return Err(ServiceError::validation("userId invalide")),
        };

        let commission_rate = match body_int(request.commission_rate.as_ref()) {
            IntParam::Missing => DEFAULT_COMMISSION_RATE,
            IntParam::Value(rate) if (0..=100).contains(&rate) => rate,
            _ => return Err(ServiceError::validation("commissionRate invalide")),
        };

        let code = normalize_code(code);

        let existing = self
            .store
            .find_affiliate_by_code(&code)
            .await
            .map_err(store_failure("Affiliate creation failed", SERVER_ERROR))?;
        if existing.is_some() {
            return Err(ServiceError::validation("Ce code affilié existe déjà"));
        }

        let new_affiliate = NewAffiliate {
            code,
            name: name.to_string(),
            email: email.to_string(),
            user_id,
            commission_rate,
        };

        match self.store.create_affiliate(new_affiliate).await {
            Ok(affiliate) => {
                info!("Created affiliate {} ({})", affiliate.code, affiliate.id);
                Ok(affiliate)
            },
            // Lost a race against a concurrent create with the same code
            Err(StoreError::UniqueViolation(_)) => {
                Err(ServiceError::validation("Ce code affilié existe déjà"))
            },
            Err(e) => Err(store_failure("Affiliate creation failed", SERVER_ERROR)(e)),
        }
    }

    pub async fn mark_paid(&self, request: MarkPaidRequest) -> Result<MarkPaidResponse, ServiceError> {
        let affiliate_id = match body_int(request.affiliate_id.as_ref()) {
            IntParam::Value(id) => id,
            IntParam::Missing => return Err(ServiceError::validation("affiliateId requis")),
            IntParam::Invalid => return Err(ServiceError::validation("affiliateId invalide")),
        };

        let requested = match body_int(request.amount.as_ref()) {
            IntParam::Missing => None,
            IntParam::Value(amount) => Some(amount),
            IntParam::Invalid => return Err(ServiceError::validation("amount invalide")),
        };

        let affiliate = self
            .store
            .find_affiliate(affiliate_id)
            .await
            .map_err(store_failure("Mark-paid lookup failed", SERVER_ERROR))?
            .ok_or_else(|| ServiceError::not_found("Affilié introuvable"))?;

        let due = affiliate.commission_due();
        let payment = payment_amount(requested, due);
        if payment <= 0 {
            return Err(ServiceError::validation("Aucune commission à payer"));
        }

        let updated = self
            .store
            .add_affiliate_payment(affiliate.id, payment)
            .await
            .map_err(store_failure("Mark-paid update failed", SERVER_ERROR))?;

        info!(
            "Recorded payment of {} to affiliate {} ({} remaining)",
            payment,
            updated.code,
            updated.commission_due()
        );

        Ok(MarkPaidResponse {
            success: true,
            paid: payment,
            new_total_paid: updated.total_paid,
            remaining: updated.commission_due(),
        })
    }
}

/// Client-facing message for a failed field check on an affiliate request.
fn validation_message(errors: &ValidationErrors) -> &'static str {
    let fields = errors.field_errors();
    if fields.contains_key("email") {
        "Email invalide"
    } else if fields.contains_key("code") {
        "Code affilié trop long"
    } else {
        "Nom trop long"
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::utils::params::FlexibleInt;

    fn service_with(store: Arc<MemoryStore>) -> AffiliateService {
        AffiliateService::new(store)
    }

    #[test]
    fn test_payment_amount() {
        assert_eq!(payment_amount(None, 3000), 3000);
        assert_eq!(payment_amount(Some(1000), 3000), 1000);
        assert_eq!(payment_amount(Some(5000), 3000), 3000);
        assert_eq!(payment_amount(None, 0), 0);
    }

    #[tokio::test]
    async fn test_check_is_case_insensitive() {
        let store = Arc::new(MemoryStore::new());
        store.add_affiliate("PROMO1", "Jane", true, 0, 0).await;
        let service = service_with(store);

        let response = service.check(Some("promo1")).await;
        assert!(response.valid);
        assert_eq!(response.name.as_deref(), Some("Jane"));
        assert_eq!(response.code.as_deref(), Some("PROMO1"));
    }

    #[tokio::test]
    async fn test_check_without_code() {
        let service = service_with(Arc::new(MemoryStore::new()));
        assert_eq!(service.check(None).await, AffiliateCheckResponse::invalid());
        assert_eq!(service.check(Some("")).await, AffiliateCheckResponse::invalid());
    }

    #[tokio::test]
    async fn test_check_swallows_store_errors() {
        let store = Arc::new(MemoryStore::new());
        store.add_affiliate("PROMO1", "Jane", true, 0, 0).await;
        store.set_failing(true);
        let service = service_with(store);

        assert_eq!(service.check(Some("PROMO1")).await, AffiliateCheckResponse::invalid());
    }

    #[tokio::test]
    async fn test_create_normalizes_and_defaults() {
        let service = service_with(Arc::new(MemoryStore::new()));
        let affiliate = service
            .create(CreateAffiliateRequest {
                code: Some("summer24".to_string()),
                name: Some("Max".to_string()),
                email: Some("max@example.com".to_string()),
                user_id: Some(FlexibleInt::Text("12".to_string())),
                commission_rate: None,
            })
            .await
            .unwrap();

        assert_eq!(affiliate.code, "SUMMER24");
        assert_eq!(affiliate.user_id, Some(12));
        assert_eq!(affiliate.commission_rate, DEFAULT_COMMISSION_RATE);
        assert!(affiliate.is_active);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_case_insensitively() {
        let store = Arc::new(MemoryStore::new());
        store.add_affiliate("SUMMER24", "Max", true, 0, 0).await;
        let service = service_with(store);

        let result = service
            .create(CreateAffiliateRequest {
                code: Some("Summer24".to_string()),
                name: Some("Other".to_string()),
                email: Some("other@example.com".to_string()),
                user_id: None,
                commission_rate: None,
            })
            .await;

        match result {
            Err(ServiceError::ValidationError(msg)) => assert_eq!(msg, "Ce code affilié existe déjà"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_field_errors_are_french() {
        let service = service_with(Arc::new(MemoryStore::new()));
        let request = |code: &str, email: &str| CreateAffiliateRequest {
            code: Some(code.to_string()),
            name: Some("Max".to_string()),
            email: Some(email.to_string()),
            user_id: None,
            commission_rate: None,
        };

        match service.create(request("MAX", "not-an-email")).await {
            Err(ServiceError::ValidationError(msg)) => assert_eq!(msg, "Email invalide"),
            other => panic!("unexpected result: {:?}", other),
        }

        match service.create(request(&"X".repeat(51), "max@example.com")).await {
            Err(ServiceError::ValidationError(msg)) => assert_eq!(msg, "Code affilié trop long"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_mark_paid_caps_at_due() {
        let store = Arc::new(MemoryStore::new());
        let affiliate = store.add_affiliate("AFF", "Aff", true, 5000, 1000).await;
        let service = service_with(store);

        let response = service
            .mark_paid(MarkPaidRequest {
                affiliate_id: Some(FlexibleInt::Text(affiliate.id.to_string())),
                amount: Some(FlexibleInt::Text("9000".to_string())),
            })
            .await
            .unwrap();

        assert_eq!(response.paid, 4000);
        assert_eq!(response.new_total_paid, 5000);
        assert_eq!(response.remaining, 0);
    }

    #[tokio::test]
    async fn test_mark_paid_nothing_due() {
        let store = Arc::new(MemoryStore::new());
        let affiliate = store.add_affiliate("AFF", "Aff", true, 1000, 1000).await;
        let service = service_with(store);

        let result = service
            .mark_paid(MarkPaidRequest {
                affiliate_id: Some(FlexibleInt::Text(affiliate.id.to_string())),
                amount: None,
            })
            .await;

        assert!(matches!(result, Err(ServiceError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_mark_paid_unknown_affiliate() {
        let service = service_with(Arc::new(MemoryStore::new()));
        let result = service
            .mark_paid(MarkPaidRequest {
                affiliate_id: Some(FlexibleInt::Text("404".to_string())),
                amount: None,
            })
            .await;

        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }
}
