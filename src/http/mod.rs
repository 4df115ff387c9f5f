//! HTTP entry point for contact submissions.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (attach x-request-id)
//!     → contact.rs (decode body, derive source key via source.rs)
//!     → gate (rate limit, sanitize, validate)
//!     → notify (deliver accepted submissions)
//!     → response.rs (status + JSON body)
//! ```

pub mod contact;
pub mod request;
pub mod response;
pub mod server;
pub mod source;

pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer, CONTACT_PATH, HEALTH_PATH};
pub use source::source_key;
