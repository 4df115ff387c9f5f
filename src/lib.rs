//! Contact form back end for the coworking site.

pub mod config;
pub mod gate;
pub mod http;
pub mod lifecycle;
pub mod notify;
pub mod observability;
pub mod security;

pub use config::schema::GateConfig;
pub use gate::{Outcome, SubmissionGate};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
