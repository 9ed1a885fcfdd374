//! qvrpro - client for the QVR Pro / QVR Elite recorder management API.
//!
//! All operations flow through a [`Client`], which detects the API variant
//! the recorder serves and logs in when it is constructed. Calls are
//! blocking; each issues one HTTP request.
//!
//! # Example
//!
//! ```no_run
//! use qvrpro::{Client, ClientConfig, StreamProtocol, DEFAULT_STREAM};
//!
//! # fn example() -> Result<(), qvrpro::Error> {
//! let mut client = Client::new(ClientConfig::new("admin", "secret", "10.7.7.100"))?;
//!
//! let channels = client.get_channel_list()?;
//! if let Some(guid) = channels["channels"][0]["guid"].as_str() {
//!     let stream = client.get_channel_live_stream(guid, DEFAULT_STREAM, StreamProtocol::Rtsp)?;
//!     println!("{:?}", stream.get("resourceUris"));
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod types;

// Re-export primary types at crate root for convenience
pub use api::{ApiResponse, StreamProtocol};
pub use auth::{Credentials, Session, SessionId};
pub use client::{Client, DEFAULT_STREAM, JsonObject};
pub use config::{ClientConfig, DEFAULT_PORT};
pub use error::Error;
pub use types::{BaseUrl, Scheme, Variant};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
