// Middleware modules for the MyDouble backend

pub mod admin;
pub mod affiliate_ref;
pub mod cors;

pub use admin::{admin_password_matches, require_admin, ADMIN_PASSWORD_HEADER};
pub use affiliate_ref::{affiliate_attribution, is_excluded_path};
pub use cors::dynamic_cors_middleware;
