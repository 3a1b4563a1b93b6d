pub mod diesel_pool;
pub mod memory_store;
pub mod pg_store;
pub mod store;

pub use diesel_pool::{
    check_diesel_health, create_diesel_pool, mask_connection_string, DieselDatabaseConfig,
    DieselPool, MIGRATIONS,
};
pub use memory_store::MemoryStore;
pub use pg_store::PgStore;
pub use store::{Store, StoreError};
