// Services module for the MyDouble backend
// Business logic layer for the application

pub mod affiliate;
pub mod blob;
pub mod character_catalog;

// Re-export commonly used services
pub use affiliate::AffiliateService;
pub use blob::{BlobError, BlobStore, UploadedBlob, VercelBlobClient};
pub use character_catalog::{Character, CharacterCatalog, MediaKind};
