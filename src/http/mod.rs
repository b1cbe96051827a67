//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware: request ID, trace, body limit)
//!     → handlers.rs (method check, multipart → FormFields → pipeline)
//!     → response.rs (JSON { message })
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use response::ApiMessage;
pub use server::{AppState, HttpServer};
