//! Async digesting.
//!
//! Counterparts to the blocking APIs in the crate root, built on Tokio's
//! [`AsyncRead`](::tokio::io::AsyncRead).
//!
//! Requires the `async` feature.

pub(crate) mod ops;
pub(crate) mod tee;
