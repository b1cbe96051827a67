//! Warehouse requisition intake service.
//!
//! Accepts the requisition form as `multipart/form-data`, emails the
//! requisition to the warehouse and posts a summary to a chat webhook.

pub mod compose;
pub mod config;
pub mod delivery;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod requisition;

pub use config::schema::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
