//! Validated value types used across the client.

mod base_url;
mod scheme;
mod variant;

pub use base_url::BaseUrl;
pub use scheme::Scheme;
pub use variant::Variant;
