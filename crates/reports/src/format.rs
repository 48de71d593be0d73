//! Currency and date formatting

use crate::locale::Locale;
use bankist_core::Currency;
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

const MS_PER_DAY: f64 = 1000.0 * 60.0 * 60.0 * 24.0;

/// Format an amount the way the account's locale writes money.
///
/// ```
/// use bankist_core::Currency;
/// use bankist_reports::format_currency;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_currency(dec!(1300), "en-US", &Currency::usd()), "$1,300.00");
/// assert_eq!(format_currency(dec!(-306.5), "de-DE", &Currency::eur()), "-306,50 €");
/// ```
pub fn format_currency(value: Decimal, locale: &str, currency: &Currency) -> String {
    let locale = Locale::parse(locale);
    let rounded =
        value.round_dp_with_strategy(currency.decimals, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded < Decimal::ZERO;

    let digits = format!("{:.*}", currency.decimals as usize, rounded.abs());
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits.as_str(), None),
    };

    let mut number = group_digits(int_part, locale);
    if let Some(frac) = frac_part {
        number.push_str(locale.decimal_separator());
        number.push_str(frac);
    }

    let sign = if negative { "-" } else { "" };
    if locale.symbol_after() {
        format!("{sign}{number} {}", currency.symbol)
    } else {
        format!("{sign}{}{number}", currency.symbol)
    }
}

fn group_digits(int_part: &str, locale: Locale) -> String {
    if int_part.len() < locale.min_grouping_digits() {
        return int_part.to_string();
    }

    let separator = locale.group_separator();
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Whole days between two instants, rounded
pub fn days_between(a: DateTime<Utc>, b: DateTime<Utc>) -> i64 {
    ((b - a).num_milliseconds().abs() as f64 / MS_PER_DAY).round() as i64
}

/// Relative label for recent movements, locale short date otherwise
pub fn format_movement_date(date: DateTime<Utc>, now: DateTime<Utc>, locale: &str) -> String {
    match days_between(now, date) {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        days if days <= 7 => format!("{days} days ago"),
        _ => format_date(date, locale),
    }
}

/// Short numeric date (`5/4/2024`, `04/05/2024`, `4.5.2024`)
pub fn format_date(date: DateTime<Utc>, locale: &str) -> String {
    date.format(Locale::parse(locale).date_pattern()).to_string()
}

/// Date plus hour and minute, used by the dashboard clock
pub fn format_date_time(now: DateTime<Utc>, locale: &str) -> String {
    let locale = Locale::parse(locale);
    format!(
        "{}, {}",
        now.format(locale.date_pattern()),
        now.format(locale.time_pattern())
    )
}

/// `mm:ss` countdown label
pub fn format_countdown(remaining_secs: u32) -> String {
    format!("{:02}:{:02}", remaining_secs / 60, remaining_secs % 60)
}
