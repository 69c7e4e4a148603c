//! Domain logic for the ASCO optimization service.
//!
//! Everything here is pure: request validation, prompt templates, tag
//! extraction and response assembly. Network and HTTP concerns live in
//! `asco-completion` and `asco-api`.

pub mod error;
pub mod metrics;
pub mod prompt;
pub mod request;
pub mod response;
