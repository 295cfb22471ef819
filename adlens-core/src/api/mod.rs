//! Remote Data Client: the `DashboardApi` seam and its HTTP implementation.

pub mod http;
pub mod provider;

pub use http::HttpApi;
pub use provider::{decode_body, fetch, ApiError, DashboardApi, Payload};
