pub mod affiliate;
pub mod ai_double;
pub mod message;

// Re-export common types
pub use affiliate::{
    normalize_code, Affiliate, AffiliateCheckResponse, AffiliateMatch, AffiliateWithStats,
    NewAffiliate, ReferralSaleView,
};
pub use ai_double::AiDouble;
pub use message::{normalize_role, Message, MessageFilter, NewMessage};
