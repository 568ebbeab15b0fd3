//! # dsl-status
//!
//! Parser for the xDSL statistics dump shown by ZyXEL router web
//! interfaces (tested against the VMG8924-B10A).
//!
//! The router renders line statistics as one block of preformatted text.
//! This crate turns that text into named sections, parses the port rate
//! table, and extracts single values in a fixed-width form that RRDTool
//! and similar loggers accept.
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`SectionMap`], [`PortTable`]
//!   and friends
//!
//! ## Example
//!
//! ```rust
//! use dsl_status::{extract_record, DataKey, FieldDictionary, PortTable, SectionMap};
//!
//! let text = "
//! ====
//!   xDSL Training Status:   Showtime
//! ====
//!                        Upstream      Downstream
//! Actual Net Data Rate:  0.448 Mbps    1.152 Mbps
//!           SNR Margin:  25.0 dB       29.3 dB
//! ====
//!   HEC Errors:  0  0
//! ";
//!
//! let sections = SectionMap::split(text)?;
//! let table = PortTable::parse(&sections.port)?;
//!
//! let keys: Vec<DataKey> = ["actual_up", "actual_down", "snr_up", "snr_down"]
//!     .iter()
//!     .map(|k| k.parse())
//!     .collect::<Result<_, _>>()?;
//!
//! let record = extract_record(&table, &FieldDictionary::standard(), &keys)?;
//! assert_eq!(record, "00.448:01.152:25.000:29.300");
//! # Ok::<(), dsl_status::ParseError>(())
//! ```

mod error;
mod extract;
mod fields;
mod key;
mod sections;
mod table;

pub use error::ParseError;
pub use extract::{extract, extract_record, format_value, parse_magnitude, RECORD_SEPARATOR};
pub use fields::{FieldDictionary, DATA_FIELDS};
pub use key::{DataKey, Direction};
pub use sections::{is_separator, split_runs, Section, SectionMap};
pub use table::{PortRow, PortTable};
