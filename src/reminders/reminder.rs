use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Accepted shapes for the stored datetime string. The first is what the
/// form produces; the rest tolerate records written by hand or by older
/// versions of the data file.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub name: String,
    #[serde(rename = "dateTime")]
    pub date_time: String,
}

impl Reminder {
    pub fn new(name: impl Into<String>, date_time: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date_time: date_time.into(),
        }
    }

    /// Parse the stored datetime. `None` means the record is malformed;
    /// callers decide whether that is a tie (sorting) or a fallback to now
    /// (formatting and edit prefill).
    pub fn parsed(&self) -> Option<NaiveDateTime> {
        parse_date_time(&self.date_time)
    }

    /// Natural-language rendering of the due time: "Today at 9:00 AM",
    /// "Tomorrow at 9:00 AM", or "Wednesday, January 1 at 9:00 AM".
    /// "Today"/"Tomorrow" compare calendar dates against the current local
    /// date, not elapsed hours. A malformed datetime renders as now.
    pub fn display_when(&self) -> String {
        let now = Local::now().naive_local();
        let dt = self.parsed().unwrap_or(now);
        let today = now.date();

        let time = dt.format("%-I:%M %p");
        if dt.date() == today {
            format!("Today at {}", time)
        } else if Some(dt.date()) == today.succ_opt() {
            format!("Tomorrow at {}", time)
        } else {
            dt.format("%A, %B %-d at %-I:%M %p").to_string()
        }
    }

    /// Stored datetime normalized to the form's `YYYY-MM-DDTHH:MM` shape,
    /// falling back to the current time when the record is malformed.
    pub fn form_value(&self) -> String {
        let dt = self
            .parsed()
            .unwrap_or_else(|| Local::now().naive_local());
        dt.format("%Y-%m-%dT%H:%M").to_string()
    }
}

pub fn parse_date_time(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local, Timelike};

    #[test]
    fn parses_form_and_seconds_variants() {
        assert!(parse_date_time("2025-01-01T09:00").is_some());
        assert!(parse_date_time("2025-01-01T09:00:30").is_some());
        assert!(parse_date_time("2025-01-01 09:00").is_some());
        assert!(parse_date_time("  2025-01-01T09:00  ").is_some());
        assert!(parse_date_time("next tuesday").is_none());
        assert!(parse_date_time("").is_none());
    }

    #[test]
    fn displays_full_date_for_other_days() {
        // 2025-01-01 was a Wednesday.
        let r = Reminder::new("Pay rent", "2025-01-01T09:00");
        assert_eq!(r.display_when(), "Wednesday, January 1 at 9:00 AM");
    }

    #[test]
    fn displays_today_and_tomorrow_by_calendar_date() {
        let today = Local::now()
            .naive_local()
            .with_hour(23)
            .unwrap()
            .with_minute(59)
            .unwrap();
        let r = Reminder::new("late", today.format("%Y-%m-%dT%H:%M").to_string());
        assert_eq!(r.display_when(), "Today at 11:59 PM");

        // Less than 24h away but on the next calendar day.
        let tomorrow = today.date().succ_opt().unwrap().and_hms_opt(0, 5, 0).unwrap();
        let r = Reminder::new("early", tomorrow.format("%Y-%m-%dT%H:%M").to_string());
        assert_eq!(r.display_when(), "Tomorrow at 12:05 AM");
    }

    #[test]
    fn malformed_datetime_formats_as_now() {
        let r = Reminder::new("broken", "not-a-date");
        let before = Local::now().naive_local() - Duration::minutes(1);
        // Prefill should be a valid form value close to the current time.
        let prefill = parse_date_time(&r.form_value()).unwrap();
        assert!(prefill >= before.with_second(0).unwrap().with_nanosecond(0).unwrap());
    }

    #[test]
    fn form_value_normalizes_seconds_away() {
        let r = Reminder::new("x", "2025-06-30 18:45:12");
        assert_eq!(r.form_value(), "2025-06-30T18:45");
    }

    #[test]
    fn json_uses_camel_case_date_time_key() {
        let r = Reminder::new("Pay rent", "2025-01-01T09:00");
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"{"name":"Pay rent","dateTime":"2025-01-01T09:00"}"#);
        let back: Reminder = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
