//! # Marginal Shared
//!
//! Wire types shared by the server and its tests: admin form payloads and
//! RFC 7807 problem responses.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
