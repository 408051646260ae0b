//! Common test infrastructure
//!
//! Provides a fake Last.fm API served over HTTP so the real client and the
//! whole pipeline can be exercised end to end.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{FakeLastFm, TEST_API_KEY};
//!
//! #[tokio::test]
//! async fn test_collect() {
//!     let server = FakeLastFm::builder()
//!         .page("overall", &[("Teardrop", "Massive Attack", 42)])
//!         .spawn()
//!         .await;
//!     let client = server.client();
//! }
//! ```

mod constants;
mod fake_lastfm;

pub use constants::*;
pub use fake_lastfm::FakeLastFm;
