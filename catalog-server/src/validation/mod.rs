//! Request and response validation
//!
//! `request` guards the inbound API surface; `response` guards the
//! outbound remote-catalog contract. Both are pure so the coordinator
//! can run them without holding any lock.

pub mod request;
pub mod response;

pub use response::ProtocolViolation;
