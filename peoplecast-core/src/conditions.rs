//! WMO weather interpretation codes, reduced to displayable conditions.
//!
//! The weather service reports current conditions as a bare integer code.
//! The table here maps every code the service documents to a description
//! and a Font Awesome icon id; everything else falls back to an "Unknown
//! weather" entry, so the mapping is total over all integers.

use serde::Serialize;

/// Human-readable weather condition paired with an icon id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Condition {
    pub description: &'static str,
    pub icon: &'static str,
}

/// Classify a WMO weather code.
///
/// Pure lookup, never fails: unmapped codes (including negatives) return
/// the `"Unknown weather"` / `"fa-question"` fallback.
pub fn classify(weather_code: i32) -> Condition {
    let (description, icon) = match weather_code {
        0 => ("Clear sky", "fa-sun"),
        1 => ("Mostly clear", "fa-cloud-sun"),
        2 => ("Partly cloudy", "fa-cloud-sun"),
        3 => ("Cloudy", "fa-cloud"),
        45 => ("Foggy", "fa-smog"),
        48 => ("Depositing rime fog", "fa-smog"),
        51 | 53 | 55 => ("Drizzle", "fa-cloud-rain"),
        56 | 57 => ("Freezing drizzle", "fa-snowflake"),
        61 | 63 | 65 => ("Rain", "fa-cloud-showers-heavy"),
        66 | 67 => ("Freezing rain", "fa-snowflake"),
        71 | 73 | 75 => ("Snow fall", "fa-snowflake"),
        77 => ("Snow grains", "fa-snowflake"),
        80 | 81 | 82 => ("Showers", "fa-cloud-showers-heavy"),
        85 | 86 => ("Snow showers", "fa-snowflake"),
        95 => ("Thunderstorms", "fa-bolt"),
        96 | 99 => ("Thunderstorms with hail", "fa-bolt"),
        _ => ("Unknown weather", "fa-question"),
    };

    Condition { description, icon }
}
