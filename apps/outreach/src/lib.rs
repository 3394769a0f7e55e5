//! Client for the HR outreach backend: contact management and resume sends,
//! with coalesced reads and single-flight writes.

pub mod api_client;
pub mod config;
pub mod coordinator;
pub mod dashboard;
pub mod errors;
pub mod models;

pub use api_client::{ApiClient, ReqwestTransport, Transport};
pub use coordinator::RequestCoordinator;
pub use dashboard::Dashboard;
pub use errors::ApiError;
