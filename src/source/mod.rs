//! Status source abstraction for obtaining the router's status text.
//!
//! A source produces the raw text of the xDSL status element, either by
//! logging into the router or by reading a page saved earlier.

mod file;
pub mod html;
mod router;

pub use file::FileSource;
pub use router::{RouterSource, RouterSourceBuilder};

use std::fmt::Debug;

use async_trait::async_trait;

use crate::FetchError;

/// Trait for obtaining status text from various places.
///
/// # Example
///
/// ```no_run
/// use router_check::{FileSource, StatusSource};
///
/// # tokio_test::block_on(async {
/// let source = FileSource::new("xdslStatistics.html", "VdslInfoDisplay");
/// let text = source.fetch().await?;
/// println!("{} bytes of status text from {}", text.len(), source.description());
/// # Ok::<(), router_check::FetchError>(())
/// # });
/// ```
#[async_trait]
pub trait StatusSource: Send + Sync + Debug {
    /// Fetch the status text once.
    async fn fetch(&self) -> Result<String, FetchError>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;
}
