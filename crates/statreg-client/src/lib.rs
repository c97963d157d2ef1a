//! HTTP client for the import backend.
//!
//! The four operations of the import protocol — read headers, preview,
//! confirm, poll status — behind the [`ImportService`] trait, with a
//! reqwest implementation that speaks the backend's multipart/JSON
//! protocol.

pub mod api;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod types;

pub use api::ImportService;
pub use client::HttpImportClient;
pub use endpoints::ImportEndpoints;
pub use error::{ClientError, Result};
