//! Recorder HTTP API plumbing.
//!
//! This module provides the transport, the endpoint definitions and the
//! content-type based response classification.

pub mod endpoints;
mod response;
mod transport;

pub use endpoints::StreamProtocol;
pub use response::{ApiResponse, CONTENT_TYPE_JPEG, CONTENT_TYPE_JSON};
pub(crate) use response::{ensure_success, interpret};
pub(crate) use transport::HttpTransport;
