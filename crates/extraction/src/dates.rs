//! Date and trip-length parsing
//!
//! Recognizes, in precedence order: ISO date ranges, single ISO dates,
//! free-form "D1 to D2 Month" ranges, single day + month mentions,
//! relative terms (today / tomorrow / in N days) and "next/this Weekday".
//! A separate duration pass fills `travel_days` from "N days" / "N nights"
//! phrasing. The year defaults to the current calendar year when omitted.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use regex::Regex;

const MONTHS: [(&str, u32); 12] = [
    ("january", 1),
    ("february", 2),
    ("march", 3),
    ("april", 4),
    ("may", 5),
    ("june", 6),
    ("july", 7),
    ("august", 8),
    ("september", 9),
    ("october", 10),
    ("november", 11),
    ("december", 12),
];

/// Resolve a month name or three-letter abbreviation to its number.
fn month_number(name: &str) -> Option<u32> {
    let name = name.to_lowercase();
    MONTHS
        .iter()
        .find(|(full, _)| *full == name || (name.len() >= 3 && full.starts_with(&name)))
        .map(|(_, n)| *n)
}

fn weekday_from_name(name: &str) -> Option<Weekday> {
    match name.to_lowercase().as_str() {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Result of the date pass. `travel_days` is only set from explicit
/// duration phrasing; deriving it from both endpoints happens when the
/// update is applied to the checklist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDates {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub travel_days: Option<u32>,
}

/// Date parser with patterns compiled once at construction.
pub struct DateParser {
    iso_range: Regex,
    iso: Regex,
    day_range_month: Regex,
    day_month: Regex,
    month_day: Regex,
    in_days: Regex,
    named_weekday: Regex,
    today_word: Regex,
    tomorrow_word: Regex,
    duration: Regex,
}

impl DateParser {
    pub fn new() -> Self {
        let months: Vec<&str> = MONTHS.iter().map(|(m, _)| *m).collect();
        let month_alt = format!(
            "{}|{}",
            months.join("|"),
            months.iter().map(|m| &m[..3]).collect::<Vec<_>>().join("|")
        );

        Self {
            iso_range: Regex::new(
                r"(\d{4}-\d{2}-\d{2})\s*(?:to|until|till|-|–)\s*(\d{4}-\d{2}-\d{2})",
            )
            .unwrap(),
            iso: Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").unwrap(),
            day_range_month: Regex::new(&format!(
                r"(?i)\b(\d{{1,2}})(?:st|nd|rd|th)?\s*(?:to|till|until|-|–)\s*(\d{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?({month_alt})\b"
            ))
            .unwrap(),
            day_month: Regex::new(&format!(
                r"(?i)\b(\d{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?({month_alt})\b"
            ))
            .unwrap(),
            month_day: Regex::new(&format!(
                r"(?i)\b({month_alt})\s+(\d{{1,2}})(?:st|nd|rd|th)?\b"
            ))
            .unwrap(),
            in_days: Regex::new(r"(?i)\bin\s+(\d{1,3})\s+days?\b").unwrap(),
            named_weekday: Regex::new(
                r"(?i)\b(?:next|this)\s+(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b",
            )
            .unwrap(),
            today_word: Regex::new(r"(?i)\btoday\b").unwrap(),
            tomorrow_word: Regex::new(r"(?i)\btomorrow\b").unwrap(),
            duration: Regex::new(r"(?i)\b(\d{1,2})\s*(?:-\s*)?(days?|nights?)\b").unwrap(),
        }
    }

    /// Parse a message relative to `today` (injected for determinism).
    pub fn parse(&self, message: &str, today: NaiveDate) -> ParsedDates {
        let mut out = ParsedDates::default();
        let year = today.year();

        if let Some(caps) = self.iso_range.captures(message) {
            out.start = NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").ok();
            out.end = NaiveDate::parse_from_str(&caps[2], "%Y-%m-%d").ok();
        } else if self.iso.is_match(message) {
            let mut found = self.iso.captures_iter(message).filter_map(|c| {
                NaiveDate::from_ymd_opt(c[1].parse().ok()?, c[2].parse().ok()?, c[3].parse().ok()?)
            });
            out.start = found.next();
            out.end = found.next();
        } else if let Some(caps) = self.day_range_month.captures(message) {
            if let Some(month) = month_number(&caps[3]) {
                let d1: u32 = caps[1].parse().unwrap_or(0);
                let d2: u32 = caps[2].parse().unwrap_or(0);
                out.start = NaiveDate::from_ymd_opt(year, month, d1);
                out.end = NaiveDate::from_ymd_opt(year, month, d2);
            }
        } else if let Some(caps) = self.day_month.captures(message) {
            if let Some(month) = month_number(&caps[2]) {
                out.start = NaiveDate::from_ymd_opt(year, month, caps[1].parse().unwrap_or(0));
            }
        } else if let Some(caps) = self.month_day.captures(message) {
            if let Some(month) = month_number(&caps[1]) {
                out.start = NaiveDate::from_ymd_opt(year, month, caps[2].parse().unwrap_or(0));
            }
        } else if self.tomorrow_word.is_match(message) {
            out.start = today.checked_add_days(Days::new(1));
        } else if self.today_word.is_match(message) {
            out.start = Some(today);
        } else if let Some(caps) = self.in_days.captures(message) {
            if let Ok(n) = caps[1].parse::<u64>() {
                out.start = today.checked_add_days(Days::new(n));
            }
        } else if let Some(caps) = self.named_weekday.captures(message) {
            if let Some(target) = weekday_from_name(&caps[1]) {
                let mut offset = target.num_days_from_monday() as i64
                    - today.weekday().num_days_from_monday() as i64;
                // Never resolve to today or the past.
                if offset <= 0 {
                    offset += 7;
                }
                out.start = today.checked_add_days(Days::new(offset as u64));
            }
        }

        out.travel_days = self.parse_duration(message);
        out
    }

    /// "5 days" / "4 nights" style trip length. "in N days" is a start-date
    /// phrase, not a duration, and is skipped here.
    fn parse_duration(&self, message: &str) -> Option<u32> {
        for caps in self.duration.captures_iter(message) {
            let whole = caps.get(0)?;
            let prefix = &message[..whole.start()];
            if prefix.trim_end().to_lowercase().ends_with("in") {
                continue;
            }
            let n: u32 = caps[1].parse().ok()?;
            if n == 0 {
                continue;
            }
            let nights = caps[2].to_lowercase().starts_with("night");
            return Some(if nights { n + 1 } else { n });
        }
        None
    }
}

impl Default for DateParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        // A Tuesday.
        NaiveDate::from_ymd_opt(2026, 8, 25).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_range_with_month() {
        let parser = DateParser::new();
        let parsed = parser.parse("we're thinking 20th to 23rd December", today());
        assert_eq!(parsed.start, Some(date(2026, 12, 20)));
        assert_eq!(parsed.end, Some(date(2026, 12, 23)));
    }

    #[test]
    fn iso_dates_and_ranges() {
        let parser = DateParser::new();

        let parsed = parser.parse("from 2026-11-02 to 2026-11-06", today());
        assert_eq!(parsed.start, Some(date(2026, 11, 2)));
        assert_eq!(parsed.end, Some(date(2026, 11, 6)));

        let parsed = parser.parse("leaving on 2026-09-14", today());
        assert_eq!(parsed.start, Some(date(2026, 9, 14)));
        assert_eq!(parsed.end, None);
    }

    #[test]
    fn single_day_and_month_both_orders() {
        let parser = DateParser::new();
        assert_eq!(
            parser.parse("around 5th October", today()).start,
            Some(date(2026, 10, 5))
        );
        assert_eq!(
            parser.parse("around October 5", today()).start,
            Some(date(2026, 10, 5))
        );
    }

    #[test]
    fn relative_terms() {
        let parser = DateParser::new();
        assert_eq!(parser.parse("starting today", today()).start, Some(today()));
        assert_eq!(
            parser.parse("leaving tomorrow", today()).start,
            Some(date(2026, 8, 26))
        );
        assert_eq!(
            parser.parse("we leave in 10 days", today()).start,
            Some(date(2026, 9, 4))
        );
    }

    #[test]
    fn next_weekday_is_always_in_the_future() {
        let parser = DateParser::new();
        // today() is a Tuesday; "this tuesday" must jump a full week.
        assert_eq!(
            parser.parse("this tuesday", today()).start,
            Some(date(2026, 9, 1))
        );
        assert_eq!(
            parser.parse("next friday", today()).start,
            Some(date(2026, 8, 28))
        );
    }

    #[test]
    fn duration_phrases() {
        let parser = DateParser::new();
        assert_eq!(parser.parse("a 5 day trip", today()).travel_days, Some(5));
        assert_eq!(parser.parse("staying 4 nights", today()).travel_days, Some(5));
        // "in N days" is a start date, not a duration.
        let parsed = parser.parse("we leave in 3 days", today());
        assert_eq!(parsed.travel_days, None);
        assert_eq!(parsed.start, Some(date(2026, 8, 28)));
    }

    #[test]
    fn invalid_day_numbers_are_dropped() {
        let parser = DateParser::new();
        let parsed = parser.parse("maybe 35th December", today());
        assert_eq!(parsed.start, None);
    }

    #[test]
    fn no_date_text_yields_nothing() {
        let parser = DateParser::new();
        assert_eq!(parser.parse("we love beaches", today()), ParsedDates::default());
    }
}
