pub mod api_key;

pub use api_key::{ApiKey, ApiKeyError, ApiKeyPolicy, get_api_key};
