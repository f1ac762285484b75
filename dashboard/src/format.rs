//! Display formatting for ticker values.
//!
//! Pure functions only. Every input is accepted: absent, zero and NaN values
//! are "falsy" and render as `"0"` (or `"0.00"` for change percentages).
//! Numbers use `,` grouping and `.` as the decimal separator.

use std::fmt;

use chrono::{DateTime, Local, TimeZone, Utc};

/// Direction of a 24h change, also used to pick the sign and accent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeClass {
    Up,
    Down,
    Neutral,
}

impl ChangeClass {
    pub fn css_class(&self) -> &'static str {
        match self {
            ChangeClass::Up => "price-up",
            ChangeClass::Down => "price-down",
            ChangeClass::Neutral => "price-neutral",
        }
    }
}

impl fmt::Display for ChangeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_class())
    }
}

fn truthy(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

/// Grouped decimal with 0-2 fraction digits: `50000000` → `"50,000,000"`,
/// `1234.5` → `"1,234.5"`.
pub fn format_price(value: Option<f64>) -> String {
    let Some(v) = truthy(value) else {
        return "0".to_string();
    };

    let fixed = format!("{:.2}", v.abs());
    let (int, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + int.len() / 3 + 1);
    if v < 0.0 && !(int == "0" && frac.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_thousands(int));
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Compact volume: `B` / `M` / `K` suffixes, always 2 fraction digits.
pub fn format_volume(value: Option<f64>) -> String {
    let Some(v) = truthy(value) else {
        return "0".to_string();
    };

    let magnitude = v.abs();
    if magnitude >= 1e9 {
        format!("{:.2}B", v / 1e9)
    } else if magnitude >= 1e6 {
        format!("{:.2}M", v / 1e6)
    } else if magnitude >= 1e3 {
        format!("{:.2}K", v / 1e3)
    } else {
        format!("{v:.2}")
    }
}

pub fn change_class(change_percent: Option<f64>) -> ChangeClass {
    match truthy(change_percent) {
        Some(v) if v > 0.0 => ChangeClass::Up,
        Some(v) if v < 0.0 => ChangeClass::Down,
        _ => ChangeClass::Neutral,
    }
}

/// Signed, 2 fraction digits, no `%`: `"+1.23"`, `"-2.30"`, `"0.00"`.
/// The `+` appears only for strictly positive values.
pub fn format_change_percent(change_percent: Option<f64>) -> String {
    match truthy(change_percent) {
        Some(v) if v > 0.0 => format!("+{v:.2}"),
        Some(v) => format!("{v:.2}"),
        None => "0.00".to_string(),
    }
}

/// Clock time of `ts` in the local zone. Absent timestamps render as `"-"`.
pub fn format_time(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => format_time_in(&ts, &Local),
        None => "-".to_string(),
    }
}

pub fn format_time_in<Tz>(ts: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    ts.with_timezone(tz).format("%H:%M:%S").to_string()
}

/// Wall-clock label for the last successful sync.
pub fn format_clock_now() -> String {
    format_time_in(&Utc::now(), &Local)
}
