//! Locale rules for number and date rendering
//!
//! Covers the handful of locales the demo accounts use. Unknown tags fall
//! back to `en-US` rules.

use serde::{Deserialize, Serialize};

/// Supported display locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    EnUs,
    EnGb,
    DeDe,
    PtPt,
    FrFr,
}

impl Locale {
    /// Parse a BCP 47 tag such as `pt-PT` or `en_us`
    pub fn parse(tag: &str) -> Self {
        match tag.trim().replace('_', "-").to_lowercase().as_str() {
            "en-gb" => Locale::EnGb,
            "de-de" | "de" => Locale::DeDe,
            "pt-pt" | "pt" => Locale::PtPt,
            "fr-fr" | "fr" => Locale::FrFr,
            _ => Locale::EnUs,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::EnGb => "en-GB",
            Locale::DeDe => "de-DE",
            Locale::PtPt => "pt-PT",
            Locale::FrFr => "fr-FR",
        }
    }

    /// Thousands separator
    pub fn group_separator(&self) -> &'static str {
        match self {
            Locale::EnUs | Locale::EnGb => ",",
            Locale::DeDe => ".",
            Locale::PtPt | Locale::FrFr => " ",
        }
    }

    pub fn decimal_separator(&self) -> &'static str {
        match self {
            Locale::EnUs | Locale::EnGb => ".",
            Locale::DeDe | Locale::PtPt | Locale::FrFr => ",",
        }
    }

    /// Minimum integer digits before grouping kicks in.
    ///
    /// Portuguese leaves four-digit numbers ungrouped (`1300,00 €`).
    pub fn min_grouping_digits(&self) -> usize {
        match self {
            Locale::PtPt => 5,
            _ => 4,
        }
    }

    /// Whether the currency symbol trails the number (`1.300,00 €`)
    pub fn symbol_after(&self) -> bool {
        !matches!(self, Locale::EnUs | Locale::EnGb)
    }

    /// chrono format for a short numeric date
    pub fn date_pattern(&self) -> &'static str {
        match self {
            Locale::EnUs => "%-m/%-d/%Y",
            Locale::DeDe => "%-d.%-m.%Y",
            Locale::EnGb | Locale::PtPt | Locale::FrFr => "%d/%m/%Y",
        }
    }

    /// chrono format for hour and minute
    pub fn time_pattern(&self) -> &'static str {
        match self {
            Locale::EnUs => "%-I:%M %p",
            _ => "%H:%M",
        }
    }
}
