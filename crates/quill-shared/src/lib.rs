//! # Quill Shared
//!
//! Types shared across the API boundary: the response envelope and the
//! request/response DTOs.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
