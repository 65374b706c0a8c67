//! Publication-time parsing for the formats news sites print.
//!
//! Supported, in order of preference:
//! - RFC 3339 (`2025-10-21T14:30:00+07:00`)
//! - other ISO-looking stamps, reduced to their date at local midnight
//! - `dd/mm/yyyy`, `dd-mm-yyyy`, optionally followed by `hh:mm`
//! - relative phrases: "hôm nay"/"today", "hôm qua"/"yesterday",
//!   "N giờ trước"/"N hours ago", "phút trước"/"minutes ago"

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use regex::Regex;
use std::sync::LazyLock;

static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4})-(\d{2})-(\d{2})").expect("ISO date pattern must compile")
});

static DMY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2})\s*[/-]\s*(\d{1,2})\s*[/-]\s*(\d{4})(?:\D+(\d{1,2}):(\d{2}))?")
        .expect("day-month-year pattern must compile")
});

static HOURS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)").expect("hours pattern must compile"));

/// Parse a publication stamp relative to `now`, in `now`'s offset.
///
/// Returns `None` when nothing recognizable is found.
pub fn parse_published(text: &str, now: DateTime<FixedOffset>) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let tz = *now.offset();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&tz));
    }

    if let Some(c) = ISO_DATE.captures(text) {
        let date = ymd(&c[1], &c[2], &c[3])?;
        return local(tz, date, NaiveTime::MIN);
    }

    if let Some(c) = DMY.captures(text) {
        let date = ymd(&c[3], &c[2], &c[1])?;
        let time = match (c.get(4), c.get(5)) {
            (Some(h), Some(m)) => {
                NaiveTime::from_hms_opt(h.as_str().parse().ok()?, m.as_str().parse().ok()?, 0)?
            }
            _ => NaiveTime::MIN,
        };
        return local(tz, date, time);
    }

    relative(text, now)
}

fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

fn local(tz: FixedOffset, date: NaiveDate, time: NaiveTime) -> Option<DateTime<FixedOffset>> {
    tz.from_local_datetime(&NaiveDateTime::new(date, time)).single()
}

fn relative(text: &str, now: DateTime<FixedOffset>) -> Option<DateTime<FixedOffset>> {
    let lower = text.to_lowercase();
    if lower.contains("hôm nay") || lower.contains("today") {
        Some(now)
    } else if lower.contains("hôm qua") || lower.contains("yesterday") {
        Some(now - Duration::days(1))
    } else if lower.contains("giờ trước") || lower.contains("hours ago") {
        let hours: i64 = HOURS.captures(&lower)?[1].parse().ok()?;
        now.checked_sub_signed(Duration::try_hours(hours)?)
    } else if lower.contains("phút trước") || lower.contains("minutes ago") {
        Some(now)
    } else {
        None
    }
}
