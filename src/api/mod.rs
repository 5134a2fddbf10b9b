//! Backend API access
//! The HTTP client and the response envelope rules it applies

pub mod client;
pub mod envelope;

pub use client::{BackendClient, SignedIn};
