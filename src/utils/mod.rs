// Utility modules for the MyDouble backend

pub mod params;
pub mod service_error;

pub use params::{body_int, first_query_values, parse_int_prefix, FirstValueQuery, FlexibleInt, IntParam};
pub use service_error::{store_failure, ServiceError};
