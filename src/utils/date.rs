//! ISO-like project dates: `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.

use anyhow::{Result, bail};

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar date with optional month and day precision.
///
/// Ordering compares year, then month, then day; a missing component sorts
/// before any present one, so `2024 < 2024-01 < 2024-01-01`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PartialDate {
    pub year: u16,
    pub month: Option<u8>,
    pub day: Option<u8>,
}

impl PartialDate {
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();

        let date = match bytes.len() {
            4 => Self {
                year: parse_u16(bytes)?,
                month: None,
                day: None,
            },
            7 if bytes[4] == b'-' => Self {
                year: parse_u16(&bytes[0..4])?,
                month: Some(parse_u8(&bytes[5..7])?),
                day: None,
            },
            10 if bytes[4] == b'-' && bytes[7] == b'-' => Self {
                year: parse_u16(&bytes[0..4])?,
                month: Some(parse_u8(&bytes[5..7])?),
                day: Some(parse_u8(&bytes[8..10])?),
            },
            _ => return None,
        };

        date.validate().ok()?;
        Some(date)
    }

    pub fn validate(&self) -> Result<()> {
        let Some(month) = self.month else {
            return Ok(());
        };
        if !(1..=12).contains(&month) {
            bail!("month is invalid: {month}");
        }

        if let Some(day) = self.day {
            let max_days = days_in_month(self.year, month);
            if day == 0 || day > max_days {
                bail!("day is invalid: {day}");
            }
        }

        Ok(())
    }

    /// Full `YYYY-MM-DD`, filling missing components with `01`.
    pub fn to_ymd(self) -> String {
        format!(
            "{:04}-{:02}-{:02}",
            self.year,
            self.month.unwrap_or(1),
            self.day.unwrap_or(1)
        )
    }

    /// Short display form, e.g. `Mar 2024` or `2024`.
    pub fn display(self) -> String {
        match self.month {
            Some(month) => format!("{} {}", MONTH_ABBR[usize::from(month) - 1], self.year),
            None => self.year.to_string(),
        }
    }
}

#[inline]
fn is_leap_year(year: u16) -> bool {
    year.is_multiple_of(4) && (!year.is_multiple_of(100) || year.is_multiple_of(400))
}

#[inline]
fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

fn parse_u8(bytes: &[u8]) -> Option<u8> {
    if bytes.len() != 2 || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    Some((bytes[0] - b'0') * 10 + (bytes[1] - b'0'))
}

fn parse_u16(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 4 || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    Some(
        bytes
            .iter()
            .fold(0u16, |acc, b| acc * 10 + u16::from(b - b'0')),
    )
}

/// Format a project's date range for display.
///
/// Ongoing work (no end, or end equal to start) reads `Mar 2024 – Present`.
pub fn format_range(start: &str, end: Option<&str>) -> String {
    let fmt = |s: &str| PartialDate::parse(s).map_or_else(|| s.to_owned(), PartialDate::display);
    match end {
        Some(end) if end != start => format!("{} – {}", fmt(start), fmt(end)),
        _ => format!("{} – Present", fmt(start)),
    }
}
