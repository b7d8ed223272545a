//! `RemoteSource` implementations.
//!
//! - `MockSource` - Scripted pages for tests (always available)
//! - `HttpSource` - The live REST feed (requires `http` feature)

mod mock;

#[cfg(feature = "http")]
mod http;

pub use mock::MockSource;

#[cfg(feature = "http")]
pub use http::HttpSource;

pub use crate::traits::source::RemoteSource;
