//! Short field names and the labels the router uses for them.

use crate::Direction;

/// Port table rows, keyed by the short name used on the command line.
///
/// Labels are matched verbatim, including the firmware's own spelling.
pub const DATA_FIELDS: &[(&str, &str)] = &[
    ("line", "Line Rate"),
    ("actual", "Actual Net Data Rate"),
    ("snr", "SNR Margin"),
    ("delay", "Actual Delay"),
    ("txpower", "Transmit Power"),
    ("rxpower", "Recieve Power"),
    ("inp", "Actual INP"),
    ("attenuation", "Total Attenuation"),
    ("attainable", "Attainable Net Data Rate"),
];

/// Lookup from short field name to port table row label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDictionary {
    fields: &'static [(&'static str, &'static str)],
}

impl FieldDictionary {
    /// The dictionary for the router's xDSL statistics page.
    pub const fn standard() -> Self {
        Self {
            fields: DATA_FIELDS,
        }
    }

    /// The row label for a short field name.
    pub fn label(&self, short: &str) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|(key, _)| *key == short)
            .map(|(_, label)| *label)
    }

    /// Short field names in dictionary order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(key, _)| *key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Every selectable data key: all `_up` keys, then all `_down` keys.
    pub fn choices(&self) -> Vec<String> {
        [Direction::Upstream, Direction::Downstream]
            .into_iter()
            .flat_map(|direction| {
                self.keys()
                    .map(move |key| format!("{}_{}", key, direction.suffix()))
            })
            .collect()
    }
}

impl Default for FieldDictionary {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_lookup() {
        let dict = FieldDictionary::standard();
        assert_eq!(dict.label("actual"), Some("Actual Net Data Rate"));
        assert_eq!(dict.label("snr"), Some("SNR Margin"));
        assert_eq!(dict.label("rxpower"), Some("Recieve Power"));
        assert_eq!(dict.label("bogus"), None);
        assert_eq!(dict.label("Actual Net Data Rate"), None);
    }

    #[test]
    fn test_choices_cross_product() {
        let dict = FieldDictionary::standard();
        let choices = dict.choices();

        assert_eq!(choices.len(), dict.len() * 2);
        assert_eq!(choices[0], "line_up");
        assert_eq!(choices[1], "actual_up");
        assert_eq!(choices[dict.len()], "line_down");
        assert!(choices.contains(&"attainable_down".to_string()));
    }
}
