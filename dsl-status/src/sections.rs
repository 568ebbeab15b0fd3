//! Splitting the raw status dump into named sections.
//!
//! The router renders its xDSL statistics as a block of preformatted text
//! where groups of lines are separated by `====` bars:
//!
//! ```text
//! (blank preamble)
//! ================================================
//!     xDSL Training Status:   Showtime
//!                     Mode:   G.DMT Annex A
//! ================================================
//!                       Upstream        Downstream
//!            Line Rate:   0.512 Mbps      1.536 Mbps
//! ================================================
//!     HEC Errors:  0   0
//! ```

use std::fmt;
use std::str::FromStr;

use crate::ParseError;

/// One of the three named blocks of the status dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Section {
    /// Training status, mode, traffic type and uptime.
    Header,
    /// The upstream/downstream rate table.
    Port,
    /// Error counters.
    Counters,
}

impl Section {
    /// All sections, in the order they appear in the dump.
    pub const ALL: [Section; 3] = [Section::Header, Section::Port, Section::Counters];

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Section::Header => "header",
            Section::Port => "port",
            Section::Counters => "counters",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.name() == s)
            .ok_or_else(|| format!("unknown section: {}", s))
    }
}

/// The status dump decoded into its three named blocks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionMap {
    pub header: Vec<String>,
    pub port: Vec<String>,
    pub counters: Vec<String>,
}

impl SectionMap {
    /// Split status text into sections.
    ///
    /// The first run (the blank preamble) is discarded and the next three
    /// become `header`, `port` and `counters`. Anything after the fourth run
    /// is ignored. Fails with [`ParseError::MalformedStatusText`] when fewer
    /// than four runs are present.
    pub fn split(text: &str) -> Result<Self, ParseError> {
        let lines: Vec<&str> = text.lines().collect();
        let runs = split_runs(&lines);

        match runs.as_slice() {
            [_preamble, header, port, counters, ..] => Ok(Self {
                header: owned(header),
                port: owned(port),
                counters: owned(counters),
            }),
            _ => Err(ParseError::MalformedStatusText { found: runs.len() }),
        }
    }

    /// Lines of one section.
    pub fn get(&self, section: Section) -> &[String] {
        match section {
            Section::Header => &self.header,
            Section::Port => &self.port,
            Section::Counters => &self.counters,
        }
    }

    /// Render one section the way the router displays it.
    pub fn text(&self, section: Section) -> String {
        self.get(section).join("\n")
    }
}

/// Returns true if a line is a separator bar.
///
/// Only lines starting with `=` count; an empty line is content.
pub fn is_separator(line: &str) -> bool {
    line.starts_with('=')
}

/// Group consecutive non-separator lines, dropping the separators.
///
/// Back-to-back separators collapse, so no empty run is ever produced.
pub fn split_runs<'a>(lines: &[&'a str]) -> Vec<Vec<&'a str>> {
    let mut runs = Vec::new();
    let mut current: Vec<&'a str> = Vec::new();
    let mut in_run = false;

    for &line in lines {
        if is_separator(line) {
            if in_run {
                runs.push(std::mem::take(&mut current));
                in_run = false;
            }
        } else {
            current.push(line);
            in_run = true;
        }
    }
    if in_run {
        runs.push(current);
    }

    runs
}

fn owned(run: &[&str]) -> Vec<String> {
    run.iter().map(|line| line.to_string()).collect()
}
