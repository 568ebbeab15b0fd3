//! # router-check
//!
//! Fetch xDSL line statistics from a ZyXEL router's web interface and print
//! them either as the router's own text or as a compact numeric record for
//! RRDTool and similar loggers.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   status text   ┌────────────┐   SectionMap   ┌──────────┐
//! │    source    │────────────────▶│ dsl-status │───────────────▶│  output  │──▶ stdout
//! │ Router|File  │                 │ (parsing)  │   PortTable    │ (render) │
//! └──────────────┘                 └────────────┘                └──────────┘
//!        ▲
//!        │ RouterSettings
//! ┌──────────────┐
//! │    config    │◀── defaults, --config file, ROUTER_CHECK_* env
//! └──────────────┘
//! ```
//!
//! - **[`source`]**: the [`StatusSource`] trait with a router scraper and a
//!   saved-page reader
//! - **[`config`]**: layered connection settings
//! - **[`output`]**: text, data record and JSON export rendering
//! - **[`dsl_status`]**: section splitting, port table parsing and value
//!   extraction (re-exported)
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Router's own text for the header section
//! router-check --text header
//!
//! # RRDTool record
//! router-check --data actual_up actual_down snr_up snr_down
//! 00.448:01.152:25.000:29.300
//! ```
//!
//! ### As a library with a saved page
//!
//! ```no_run
//! use router_check::{FileSource, Report, SectionMap, StatusSource};
//!
//! # tokio_test::block_on(async {
//! let source = FileSource::new("xdslStatistics.html", "VdslInfoDisplay");
//! let text = source.fetch().await?;
//! let sections = SectionMap::split(&text)?;
//!
//! let report = Report::Data(vec!["snr_down".parse()?]);
//! println!("{}", report.render(&sections)?);
//! # Ok::<(), anyhow::Error>(())
//! # });
//! ```

pub mod config;
pub mod duration;
pub mod error;
pub mod output;
pub mod source;

pub use dsl_status;

pub use config::{RouterSettings, Settings};
pub use dsl_status::{DataKey, Direction, FieldDictionary, ParseError, PortTable, Section, SectionMap};
pub use error::FetchError;
pub use output::Report;
pub use source::{FileSource, RouterSource, StatusSource};
