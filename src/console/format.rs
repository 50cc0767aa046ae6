//! Human-readable message timestamps.

use chrono::{DateTime, Datelike, Days, Local, TimeZone, Utc};

/// `HH:MM` for today, `Yesterday, HH:MM`, else `MM/DD/YY, HH:MM`.
///
/// Both instants are compared in the time zone of `now`.
pub fn format_timestamp<Tz>(timestamp: DateTime<Utc>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let local = timestamp.with_timezone(&now.timezone());
    let time = local.format("%H:%M").to_string();

    let day = local.date_naive();
    let today = now.date_naive();
    if day == today {
        return time;
    }
    if today.checked_sub_days(Days::new(1)) == Some(day) {
        return format!("Yesterday, {time}");
    }
    format!(
        "{:02}/{:02}/{:02}, {time}",
        day.month(),
        day.day(),
        day.year().rem_euclid(100)
    )
}

/// [`format_timestamp`] against the local clock.
pub fn format_local(timestamp: DateTime<Utc>) -> String {
    format_timestamp(timestamp, &Local::now())
}
