//! JSON-over-HTTP client for the Eventfund API.

pub mod client;
pub mod error;

pub use client::{HttpClient, HttpConfig};
pub use error::HttpError;
