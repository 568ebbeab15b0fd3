//! Fixed-width port table parsing.
//!
//! The port section looks like this (label column right-aligned on some
//! firmware, left-aligned on others):
//!
//! ```text
//!                        Upstream        Downstream
//!            Line Rate:   0.512 Mbps      1.536 Mbps
//! Actual Net Data Rate:   0.448 Mbps      1.152 Mbps
//!           SNR Margin:    25.0 dB         29.3 dB
//! ```
//!
//! ## Column rules
//!
//! - A colon, or two or more whitespace characters in a row, end a cell.
//!   A single space is part of the cell (`0.512 Mbps`).
//! - The header is the first line whose cells include `Upstream` and
//!   `Downstream`; anything above it is ignored.
//! - The first cell of every later line is the row label. Remaining cells
//!   map positionally when their count matches the data columns, otherwise
//!   each goes to the column whose header span is nearest.
//! - A row with fewer cells than the header may have single-space gaps
//!   between columns. Any cell running across the start of a header column
//!   is cut at the last space before that column.

use std::collections::BTreeMap;

use crate::{Direction, ParseError};

/// A trimmed cell and the character columns it occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Cell<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

impl Cell<'_> {
    /// Horizontal gap to another span, zero when they overlap.
    fn distance(&self, start: usize, end: usize) -> usize {
        if self.end <= start {
            start - self.end
        } else if end <= self.start {
            self.start - end
        } else {
            0
        }
    }
}

/// Cut a line into cells at colons and runs of 2+ whitespace.
pub(crate) fn cells(line: &str) -> Vec<Cell<'_>> {
    let chars: Vec<(usize, char)> = line.char_indices().collect();
    let mut spans = Vec::new();
    let mut start = None;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i].1;
        let is_break = c == ':'
            || (c.is_whitespace()
                && chars.get(i + 1).map_or(true, |&(_, next)| next.is_whitespace()));

        if is_break {
            if let Some(from) = start.take() {
                spans.push((from, i));
            }
            i += 1;
            while i < chars.len() && chars[i].1.is_whitespace() {
                i += 1;
            }
            continue;
        }

        if start.is_none() && !c.is_whitespace() {
            start = Some(i);
        }
        i += 1;
    }
    if let Some(from) = start {
        spans.push((from, chars.len()));
    }

    spans
        .into_iter()
        .filter_map(|(from, to)| {
            let begin = chars[from].0;
            let finish = chars.get(to).map_or(line.len(), |&(byte, _)| byte);
            let text = line[begin..finish].trim_end();
            (!text.is_empty()).then(|| Cell {
                text,
                start: from,
                end: from + text.chars().count(),
            })
        })
        .collect()
}

/// Cut a cell at every column start it runs across.
///
/// The cut goes at the last whitespace at or before the column start; a
/// cell with no such whitespace is left whole.
fn split_at_columns<'a>(cell: Cell<'a>, starts: &[usize]) -> Vec<Cell<'a>> {
    let mut pieces = Vec::new();
    let mut rest = cell;

    for &column in starts {
        if column <= rest.start || column >= rest.end {
            continue;
        }
        let text = rest.text;
        let cut = text
            .char_indices()
            .enumerate()
            .filter(|&(offset, (_, c))| c.is_whitespace() && rest.start + offset <= column)
            .last();
        let Some((offset, (byte, c))) = cut else {
            continue;
        };

        let head = text[..byte].trim_end();
        let after = &text[byte + c.len_utf8()..];
        let tail = after.trim_start();
        let skipped = after.chars().count() - tail.chars().count();

        pieces.push(Cell {
            text: head,
            start: rest.start,
            end: rest.start + head.chars().count(),
        });
        rest = Cell {
            text: tail,
            start: rest.start + offset + 1 + skipped,
            end: rest.end,
        };
    }

    pieces.push(rest);
    pieces
}

/// One labelled row of the port table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PortRow {
    pub label: String,
    /// Cells keyed by column name. A column may be missing.
    pub cells: BTreeMap<String, String>,
}

/// The port section parsed into labelled rows and named columns.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PortTable {
    /// Name of the label column, if the header gives one.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub index: Option<String>,
    /// Data column names in header order.
    pub columns: Vec<String>,
    /// Rows in table order, first occurrence of each label only.
    pub rows: Vec<PortRow>,
}

impl PortTable {
    /// Parse the lines of the `port` section.
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Result<Self, ParseError> {
        let mut lines = lines.iter().map(|line| line.as_ref());

        let header = lines
            .by_ref()
            .map(cells)
            .find(|row| is_header(row))
            .ok_or(ParseError::MalformedPortTable)?;

        let first_data = header
            .iter()
            .position(|c| is_direction(c.text))
            .unwrap_or(0);

        let index = match first_data {
            0 => None,
            n => Some(
                header[..n]
                    .iter()
                    .map(|c| c.text)
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
        };
        let columns: Vec<&Cell<'_>> = header[first_data..].iter().collect();
        let starts: Vec<usize> = columns.iter().map(|c| c.start).collect();

        let mut rows: Vec<PortRow> = Vec::new();
        for line in lines {
            let mut row_cells = cells(line);
            if row_cells.len() < header.len() {
                row_cells = row_cells
                    .into_iter()
                    .flat_map(|cell| split_at_columns(cell, &starts))
                    .collect();
            }
            let Some((label, values)) = row_cells.split_first() else {
                continue;
            };
            if rows.iter().any(|r| r.label == label.text) {
                continue;
            }

            let mut by_column = BTreeMap::new();
            if values.len() == columns.len() {
                for (column, value) in columns.iter().zip(values) {
                    by_column.insert(column.text.to_string(), value.text.to_string());
                }
            } else {
                for value in values {
                    if let Some(column) = nearest_column(&columns, value) {
                        by_column
                            .entry(column.text.to_string())
                            .or_insert_with(|| value.text.to_string());
                    }
                }
            }

            rows.push(PortRow {
                label: label.text.to_string(),
                cells: by_column,
            });
        }

        Ok(Self {
            index,
            columns: columns.iter().map(|c| c.text.to_string()).collect(),
            rows,
        })
    }

    /// Find a row by its label.
    pub fn row(&self, label: &str) -> Option<&PortRow> {
        self.rows.iter().find(|r| r.label == label)
    }

    /// Cell text at (label, column).
    pub fn cell(&self, label: &str, column: &str) -> Option<&str> {
        self.row(label)?.cells.get(column).map(String::as_str)
    }

    /// Row labels in table order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.label.as_str())
    }
}

fn is_direction(text: &str) -> bool {
    text == Direction::Upstream.column() || text == Direction::Downstream.column()
}

fn is_header(cells: &[Cell<'_>]) -> bool {
    let has = |name: &str| cells.iter().any(|c| c.text == name);
    has(Direction::Upstream.column()) && has(Direction::Downstream.column())
}

/// The header column closest to a value cell; ties go to the left column.
fn nearest_column<'c, 'a>(columns: &[&'c Cell<'a>], value: &Cell<'_>) -> Option<&'c Cell<'a>> {
    columns
        .iter()
        .copied()
        .min_by_key(|column| value.distance(column.start, column.end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(line: &str) -> Vec<&str> {
        cells(line).into_iter().map(|c| c.text).collect()
    }

    #[test]
    fn test_cells_keep_single_spaces() {
        assert_eq!(
            texts("Actual Net Data Rate   2.00 Mbps     10.00 Mbps"),
            vec!["Actual Net Data Rate", "2.00 Mbps", "10.00 Mbps"]
        );
    }

    #[test]
    fn test_cells_split_on_colon() {
        assert_eq!(
            texts("           Line Rate:   0.512 Mbps      1.536 Mbps"),
            vec!["Line Rate", "0.512 Mbps", "1.536 Mbps"]
        );
        assert_eq!(texts("a:b"), vec!["a", "b"]);
    }

    #[test]
    fn test_cells_spans() {
        let cells = cells("  ab  cd e");
        assert_eq!(cells.len(), 2);
        assert_eq!((cells[0].start, cells[0].end), (2, 4));
        assert_eq!((cells[1].start, cells[1].end), (6, 10));
        assert_eq!(cells[1].text, "cd e");
    }

    #[test]
    fn test_cells_empty_line() {
        assert!(cells("").is_empty());
        assert!(cells("    ").is_empty());
        assert!(cells(" : ").is_empty());
    }

    #[test]
    fn test_cells_trailing_single_space() {
        assert_eq!(texts("SNR Margin "), vec!["SNR Margin"]);
    }

    #[test]
    fn test_parse_left_aligned() {
        let lines = [
            "Name                   Upstream      Downstream",
            "Actual Net Data Rate   2.00 Mbps     10.00 Mbps",
            "SNR Margin             5.5 dB        6.0 dB",
        ];
        let table = PortTable::parse(&lines).unwrap();

        assert_eq!(table.index.as_deref(), Some("Name"));
        assert_eq!(table.columns, vec!["Upstream", "Downstream"]);
        assert_eq!(table.cell("Actual Net Data Rate", "Upstream"), Some("2.00 Mbps"));
        assert_eq!(table.cell("SNR Margin", "Downstream"), Some("6.0 dB"));
        assert_eq!(
            table.labels().collect::<Vec<_>>(),
            vec!["Actual Net Data Rate", "SNR Margin"]
        );
    }

    #[test]
    fn test_parse_router_layout() {
        let lines = [
            "                       Upstream        Downstream",
            "           Line Rate:   0.512 Mbps      1.536 Mbps",
            "Actual Net Data Rate:   0.448 Mbps      1.152 Mbps",
            "",
            "          SNR Margin:    25.0 dB         29.3 dB",
        ];
        let table = PortTable::parse(&lines).unwrap();

        assert_eq!(table.index, None);
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.cell("Line Rate", "Downstream"), Some("1.536 Mbps"));
        assert_eq!(table.cell("SNR Margin", "Upstream"), Some("25.0 dB"));
    }

    #[test]
    fn test_lines_before_header_ignored() {
        let lines = [
            "Port statistics",
            "      Upstream   Downstream",
            "Line Rate  1 Mbps   2 Mbps",
        ];
        let table = PortTable::parse(&lines).unwrap();
        assert!(table.row("Port statistics").is_none());
        assert_eq!(table.cell("Line Rate", "Upstream"), Some("1 Mbps"));
    }

    #[test]
    fn test_short_row_uses_nearest_column() {
        let lines = [
            "Name            Upstream      Downstream",
            "Trellis                       ON",
            "Path            Fast",
        ];
        let table = PortTable::parse(&lines).unwrap();

        assert_eq!(table.cell("Trellis", "Downstream"), Some("ON"));
        assert_eq!(table.cell("Trellis", "Upstream"), None);
        assert_eq!(table.cell("Path", "Upstream"), Some("Fast"));
        assert_eq!(table.cell("Path", "Downstream"), None);
    }

    #[test]
    fn test_duplicate_label_keeps_first() {
        let lines = [
            "Name        Upstream   Downstream",
            "SNR Margin  1 dB       2 dB",
            "SNR Margin  3 dB       4 dB",
        ];
        let table = PortTable::parse(&lines).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.cell("SNR Margin", "Upstream"), Some("1 dB"));
    }

    #[test]
    fn test_no_header() {
        let lines = ["Line Rate   1 Mbps   2 Mbps"];
        assert_eq!(PortTable::parse(&lines).unwrap_err(), ParseError::MalformedPortTable);

        let empty: [&str; 0] = [];
        assert_eq!(PortTable::parse(&empty).unwrap_err(), ParseError::MalformedPortTable);
    }

    #[test]
    fn test_parse_owned_lines() {
        let lines = vec![
            "Name      Upstream   Downstream".to_string(),
            "Line Rate 1 Mbps     2 Mbps".to_string(),
        ];
        let table = PortTable::parse(&lines).unwrap();
        assert_eq!(table.row("Line Rate").map(|r| r.cells.len()), Some(2));
    }

    #[test]
    fn test_single_space_before_value() {
        let lines = [
            "Name                     Upstream   Downstream",
            "Attainable Net Data Rate 1.024 Mbps 12.288 Mbps",
            "SNR Margin               6.1 dB     8.4 dB",
        ];
        let table = PortTable::parse(&lines).unwrap();

        assert_eq!(
            table.labels().collect::<Vec<_>>(),
            vec!["Attainable Net Data Rate", "SNR Margin"]
        );
        assert_eq!(
            table.cell("Attainable Net Data Rate", "Upstream"),
            Some("1.024 Mbps")
        );
        assert_eq!(
            table.cell("Attainable Net Data Rate", "Downstream"),
            Some("12.288 Mbps")
        );
        assert_eq!(table.cell("SNR Margin", "Downstream"), Some("8.4 dB"));
    }

    #[test]
    fn test_split_at_columns() {
        let line = "Line Rate 1 Mbps     2 Mbps";
        let first = cells(line).remove(0);
        let pieces = split_at_columns(first, &[10, 21]);

        assert_eq!(
            pieces.iter().map(|c| c.text).collect::<Vec<_>>(),
            vec!["Line Rate", "1 Mbps"]
        );
        assert_eq!((pieces[1].start, pieces[1].end), (10, 16));
    }

    #[test]
    fn test_split_at_columns_without_space() {
        let cell = cells("Downstreamish").remove(0);
        assert_eq!(split_at_columns(cell, &[4]).len(), 1);
    }

    #[test]
    fn test_full_row_is_not_cut() {
        let lines = [
            "      Upstream   Downstream",
            "Line Rate  1 Mbps   2 Mbps",
        ];
        let table = PortTable::parse(&lines).unwrap();
        assert_eq!(table.cell("Line Rate", "Upstream"), Some("1 Mbps"));
        assert_eq!(table.cell("Line Rate", "Downstream"), Some("2 Mbps"));
    }

    #[test]
    fn test_parse_is_repeatable() {
        let lines = [
            "Name      Upstream   Downstream",
            "Line Rate  1 Mbps     2 Mbps",
        ];
        assert_eq!(PortTable::parse(&lines), PortTable::parse(&lines));
    }
}
