//! Date parsing, display formatting, and most-recent-first ordering of dated entries.
//!
//! Sort key ("effective end instant"):
//! - ongoing entry → `today`
//! - otherwise the parsed end date
//! - missing or unparseable → `NaiveDate::MIN` (sorts last)
//!
//! Ties are broken by start date, also descending. The sort is stable, so entries
//! with identical keys keep their input order and re-sorting is a no-op.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::models::{EducationEntry, ExperienceEntry};

/// Anything the sorter can order: a start, an optional end, and an ongoing flag.
pub trait Dated {
    fn start_date(&self) -> Option<&str>;
    fn end_date(&self) -> Option<&str>;
    fn is_ongoing(&self) -> bool;
}

impl Dated for ExperienceEntry {
    fn start_date(&self) -> Option<&str> {
        self.start_date.as_deref()
    }

    fn end_date(&self) -> Option<&str> {
        self.end_date.as_deref()
    }

    fn is_ongoing(&self) -> bool {
        self.currently_working
    }
}

/// Education has a single date; it is both ends of the range.
impl Dated for EducationEntry {
    fn start_date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    fn end_date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    fn is_ongoing(&self) -> bool {
        false
    }
}

/// Parses the date shapes the editor produces. Returns `None` for anything else.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    // Month pickers emit "YYYY-MM"; pin to the first of the month.
    if let Ok(d) = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d") {
        return Some(d);
    }
    if raw.len() == 4 && raw.chars().all(|c| c.is_ascii_digit()) {
        return raw
            .parse::<i32>()
            .ok()
            .and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1));
    }

    None
}

/// `"Jan 2022"`-style label, or `None` when the date is absent or unparseable.
pub fn format_month_year(raw: Option<&str>) -> Option<String> {
    raw.and_then(parse_date)
        .map(|d| d.format("%b %Y").to_string())
}

fn instant_or_earliest(raw: Option<&str>) -> NaiveDate {
    raw.and_then(parse_date).unwrap_or(NaiveDate::MIN)
}

/// The date an entry sorts by.
pub fn effective_end<T: Dated>(entry: &T, today: NaiveDate) -> NaiveDate {
    if entry.is_ongoing() {
        today
    } else {
        instant_or_earliest(entry.end_date())
    }
}

fn most_recent_first<T: Dated>(a: &T, b: &T, today: NaiveDate) -> Ordering {
    effective_end(b, today)
        .cmp(&effective_end(a, today))
        .then_with(|| instant_or_earliest(b.start_date()).cmp(&instant_or_earliest(a.start_date())))
}

/// Returns a freshly ordered copy of `entries`, most recent first. The input is untouched.
pub fn sort_chronologically<T: Dated + Clone>(entries: &[T], today: NaiveDate) -> Vec<T> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| most_recent_first(a, b, today));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn job(company: &str, start: Option<&str>, end: Option<&str>, current: bool) -> ExperienceEntry {
        ExperienceEntry {
            company: Some(company.to_string()),
            start_date: start.map(str::to_string),
            end_date: end.map(str::to_string),
            currently_working: current,
            ..Default::default()
        }
    }

    fn companies(entries: &[ExperienceEntry]) -> Vec<&str> {
        entries
            .iter()
            .map(|e| e.company.as_deref().unwrap_or(""))
            .collect()
    }

    #[test]
    fn test_parse_date_shapes() {
        let jan = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        assert_eq!(parse_date("2022-01"), Some(jan));
        assert_eq!(parse_date("2022-01-01"), Some(jan));
        assert_eq!(parse_date("2022"), Some(jan));
        assert_eq!(parse_date("2022-01-01T10:30:00.000Z"), Some(jan));
        assert_eq!(parse_date("2022-01-01T10:30:00"), Some(jan));
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("  "), None);
    }

    #[test]
    fn test_format_month_year() {
        assert_eq!(format_month_year(Some("2022-03")), Some("Mar 2022".to_string()));
        assert_eq!(format_month_year(Some("garbage")), None);
        assert_eq!(format_month_year(None), None);
    }

    #[test]
    fn test_ongoing_sorts_before_past_end() {
        let entries = vec![
            job("A", None, Some("2022-01"), false),
            job("B", Some("2023-01"), None, true),
        ];
        let sorted = sort_chronologically(&entries, today());
        assert_eq!(companies(&sorted), vec!["B", "A"]);
    }

    #[test]
    fn test_ongoing_ignores_recorded_end_date() {
        let entries = vec![
            job("Old", Some("2010-01"), Some("2015-01"), true),
            job("Recent", Some("2020-01"), Some("2023-12"), false),
        ];
        let sorted = sort_chronologically(&entries, today());
        assert_eq!(companies(&sorted), vec!["Old", "Recent"]);
    }

    #[test]
    fn test_tie_broken_by_start_descending() {
        let entries = vec![
            job("Early", Some("2018-01"), Some("2022-01"), false),
            job("Late", Some("2020-06"), Some("2022-01"), false),
        ];
        let sorted = sort_chronologically(&entries, today());
        assert_eq!(companies(&sorted), vec!["Late", "Early"]);
    }

    #[test]
    fn test_two_ongoing_entries_order_by_start() {
        let entries = vec![
            job("Side", Some("2019-01"), None, true),
            job("Main", Some("2023-01"), None, true),
        ];
        let sorted = sort_chronologically(&entries, today());
        assert_eq!(companies(&sorted), vec!["Main", "Side"]);
    }

    #[test]
    fn test_missing_and_unparseable_dates_sort_last() {
        let entries = vec![
            job("NoDates", None, None, false),
            job("Junk", Some("soon"), Some("later"), false),
            job("Dated", Some("2001-01"), Some("2002-01"), false),
        ];
        let sorted = sort_chronologically(&entries, today());
        assert_eq!(companies(&sorted), vec!["Dated", "NoDates", "Junk"]);
    }

    #[test]
    fn test_sort_is_idempotent_and_does_not_mutate_input() {
        let entries = vec![
            job("C", Some("2015-01"), Some("2016-01"), false),
            job("A", Some("2020-01"), None, true),
            job("X", None, None, false),
            job("B", Some("2017-01"), Some("2019-05"), false),
            job("Y", None, None, false),
        ];
        let snapshot = entries.clone();

        let once = sort_chronologically(&entries, today());
        let twice = sort_chronologically(&once, today());

        assert_eq!(once, twice);
        assert_eq!(entries, snapshot);
        assert_eq!(companies(&once), vec!["A", "B", "C", "X", "Y"]);
    }

    #[test]
    fn test_education_sorted_by_single_date() {
        let entries = vec![
            EducationEntry {
                degree: Some("BSc".to_string()),
                date: Some("2016-05".to_string()),
                ..Default::default()
            },
            EducationEntry {
                degree: Some("MSc".to_string()),
                date: Some("2018-05".to_string()),
                ..Default::default()
            },
            EducationEntry {
                degree: Some("Cert".to_string()),
                ..Default::default()
            },
        ];
        let sorted = sort_chronologically(&entries, today());
        let degrees: Vec<_> = sorted.iter().map(|e| e.degree.as_deref().unwrap()).collect();
        assert_eq!(degrees, vec!["MSc", "BSc", "Cert"]);
    }
}
