//! Pulling numeric values out of the port table.

use crate::{DataKey, FieldDictionary, ParseError, PortTable};

/// Separator between values in a data record.
pub const RECORD_SEPARATOR: &str = ":";

/// Resolve one data key to its numeric value.
///
/// The cell text before the first space is the magnitude; the unit after
/// it is dropped, so `"2.00 Mbps"` yields `2.0`.
pub fn extract(table: &PortTable, dict: &FieldDictionary, key: &DataKey) -> Result<f64, ParseError> {
    let label = dict
        .label(&key.field)
        .ok_or_else(|| ParseError::UnknownField(key.field.clone()))?;

    let row = table
        .row(label)
        .ok_or_else(|| ParseError::MissingRow(label.to_string()))?;

    let column = key.direction.column();
    let cell = row.cells.get(column).ok_or_else(|| ParseError::MissingCell {
        label: label.to_string(),
        column: column.to_string(),
    })?;

    parse_magnitude(cell).ok_or_else(|| ParseError::UnparsableValue {
        label: label.to_string(),
        value: cell.clone(),
    })
}

/// Parse the part of a cell before the first space.
///
/// Non-finite values are rejected; a logging tool has no use for `NaN`.
pub fn parse_magnitude(cell: &str) -> Option<f64> {
    let magnitude = cell.split(' ').next().unwrap_or_default();
    magnitude.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Six characters wide, zero padded, three decimal places.
pub fn format_value(value: f64) -> String {
    format!("{:06.3}", value)
}

/// Resolve every key in order and join the formatted values with `:`.
///
/// The first key that fails aborts the record.
pub fn extract_record(
    table: &PortTable,
    dict: &FieldDictionary,
    keys: &[DataKey],
) -> Result<String, ParseError> {
    let values = keys
        .iter()
        .map(|key| extract(table, dict, key).map(format_value))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(values.join(RECORD_SEPARATOR))
}
