//! Typed client for the remote blog API.
//!
//! [`HttpTransport`] speaks the wire protocol (JSON bodies, bearer token on
//! protected calls, multipart for uploads) behind the [`Transport`] trait;
//! [`BlogClient`] layers the read cache and write-path invalidation on top.
//! The split keeps cache behavior testable against a fake transport.

pub mod error;
pub mod http;
pub mod models;
pub mod service;

pub use error::ApiError;
pub use http::{HttpTransport, ImageUpload, Transport};
pub use service::BlogClient;
