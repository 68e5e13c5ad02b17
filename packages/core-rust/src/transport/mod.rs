//! [`CallContext`](crate::CallContext) implementations for concrete transports.
//!
//! - [`http`]: `http::Request<B>` and `http::request::Parts` (feature `http`,
//!   plus axum `ConnectInfo` lookup with feature `axum`)
//! - [`grpc`]: `tonic::Request<T>` (feature `tonic`)

#[cfg(feature = "tonic")]
pub mod grpc;
#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use self::http::metadata_from_headers;
