//! Request timeouts written as an amount and a unit, e.g. `timeout = "10s"`.

use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Parse a timeout such as `"10s"`, `"2.5s"`, `"750ms"` or `"1m"`.
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();
    let (amount, unit) = s.split_at(s.find(char::is_alphabetic).unwrap_or(s.len()));

    let nanos_per_unit = match unit {
        "ms" => 1e6,
        "s" => 1e9,
        "m" => 60e9,
        _ => bail!("Unknown duration format: {}", s),
    };
    let amount: f64 = amount
        .trim()
        .parse()
        .with_context(|| format!("Invalid timeout amount: {}", s))?;
    if !amount.is_finite() || amount < 0.0 {
        bail!("Invalid duration: {}", s);
    }

    Ok(Duration::from_nanos((amount * nanos_per_unit).round() as u64))
}

/// Serde `deserialize_with` helper for timeout strings.
pub fn deserialize_duration<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = serde::Deserialize::deserialize(deserializer)?;
    parse_duration(&s).map_err(serde::de::Error::custom)
}
