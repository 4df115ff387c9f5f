//! Abuse protection for the contact endpoint.
//!
//! # Data Flow
//! ```text
//! Incoming submission:
//!     → http/source.rs (derive the source key)
//!     → rate_limit.rs (sliding window per source)
//!     → gate (sanitize + validate)
//!
//! Background:
//!     sweeper.rs evicts sources with no live timestamps
//! ```
//!
//! # Design Decisions
//! - Quota is checked before any field is inspected
//! - Rejected attempts are not recorded; admitted ones always are
//! - The ledger sits behind a trait so another store can replace the in-memory one

pub mod rate_limit;
pub mod sweeper;

pub use rate_limit::{Admission, MemoryLedger, RateLedger, RatePolicy};
pub use sweeper::LedgerSweeper;
