//! Data keys such as `actual_up` or `snr_down`.

use std::fmt;
use std::str::FromStr;

use crate::ParseError;

/// Measurement direction, one column of the port table each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Upstream,
    Downstream,
}

impl Direction {
    /// Column header used by the router.
    pub fn column(&self) -> &'static str {
        match self {
            Direction::Upstream => "Upstream",
            Direction::Downstream => "Downstream",
        }
    }

    /// Suffix used in data keys.
    pub fn suffix(&self) -> &'static str {
        match self {
            Direction::Upstream => "up",
            Direction::Downstream => "down",
        }
    }

    /// `up` selects upstream; every other suffix selects downstream.
    pub fn from_suffix(suffix: &str) -> Self {
        if suffix == "up" {
            Direction::Upstream
        } else {
            Direction::Downstream
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// A requested value: short field name plus direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataKey {
    pub field: String,
    pub direction: Direction,
}

impl DataKey {
    pub fn new(field: impl Into<String>, direction: Direction) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

impl FromStr for DataKey {
    type Err = ParseError;

    /// Split at the last underscore into field and direction suffix.
    ///
    /// A key without an underscore names no field.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, suffix) = s
            .rsplit_once('_')
            .ok_or_else(|| ParseError::UnknownField(s.to_string()))?;
        Ok(Self::new(field, Direction::from_suffix(suffix)))
    }
}

impl fmt::Display for DataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.field, self.direction.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_up_down() {
        let key: DataKey = "actual_up".parse().unwrap();
        assert_eq!(key, DataKey::new("actual", Direction::Upstream));

        let key: DataKey = "snr_down".parse().unwrap();
        assert_eq!(key, DataKey::new("snr", Direction::Downstream));
    }

    #[test]
    fn test_splits_at_last_underscore() {
        let key: DataKey = "rx_power_up".parse().unwrap();
        assert_eq!(key.field, "rx_power");
        assert_eq!(key.direction, Direction::Upstream);
    }

    #[test]
    fn test_other_suffix_is_downstream() {
        let key: DataKey = "snr_dn".parse().unwrap();
        assert_eq!(key.direction, Direction::Downstream);
    }

    #[test]
    fn test_no_underscore() {
        let err = "actual".parse::<DataKey>().unwrap_err();
        assert_eq!(err, ParseError::UnknownField("actual".to_string()));
    }

    #[test]
    fn test_display_round_trip() {
        let key = DataKey::new("attainable", Direction::Downstream);
        assert_eq!(key.to_string(), "attainable_down");
        assert_eq!(Direction::Upstream.to_string(), "Upstream");
    }
}
