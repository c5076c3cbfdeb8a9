use chrono::{
    DateTime, Datelike, Days, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone, Utc,
};
use chrono_tz::Tz;

/// Resolve a wall-clock time in `tz`, taking the earlier instant when the clock is ambiguous
pub fn resolve_local(tz: &Tz, naive: &NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => None,
    }
}

/// Midnight at the start of `now`'s local date
pub fn start_of_day(now: &DateTime<Tz>) -> DateTime<Tz> {
    let midnight = now.date_naive().and_time(NaiveTime::MIN);
    resolve_local(&now.timezone(), &midnight)
        // Midnight skipped by a DST jump: shift by the wall-clock distance instead
        .unwrap_or_else(|| *now - (now.naive_local() - midnight))
}

/// 23:59:59.999 on `now`'s local date
pub fn end_of_day(now: &DateTime<Tz>) -> DateTime<Tz> {
    let last_milli = now
        .date_naive()
        .and_hms_milli_opt(23, 59, 59, 999)
        .unwrap_or_else(|| now.naive_local());
    match now.timezone().from_local_datetime(&last_milli) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(_, latest) => latest,
        LocalResult::None => *now + (last_milli - now.naive_local()),
    }
}

/// Same wall-clock time `days` calendar days after `now`.
///
/// `None` when the result lies beyond the representable range.
pub fn days_ahead(now: &DateTime<Tz>, days: u64) -> Option<DateTime<Tz>> {
    now.checked_add_days(Days::new(days)).or_else(|| {
        // Wall-clock time missing on the target day: fall back to exact days
        i64::try_from(days)
            .ok()
            .and_then(Duration::try_days)
            .and_then(|delta| now.checked_add_signed(delta))
    })
}

/// Monday of the week containing `date`; a Sunday belongs to the week ending on it
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let days_to_monday = date.weekday().num_days_from_monday();
    date - Duration::days(days_to_monday as i64)
}

/// The seven dates from Monday to Sunday of the week containing `date`
pub fn week_dates(date: NaiveDate) -> [NaiveDate; 7] {
    let monday = week_start(date);
    std::array::from_fn(|offset| monday + Duration::days(offset as i64))
}

/// 12-hour clock time without a leading zero, e.g. `9:05 AM`
pub fn format_clock(dt: &DateTime<Tz>) -> String {
    dt.format("%-I:%M %p").to_string()
}

/// `start - end` with 12-hour clock times; only the start when the end is unknown
pub fn format_time_range(start: &DateTime<Tz>, end: Option<&DateTime<Tz>>) -> String {
    match end {
        Some(end) => format!("{} - {}", format_clock(start), format_clock(end)),
        None => format_clock(start),
    }
}

/// Parse an ISO-8601 timestamp into the board timezone.
///
/// Accepts date-times with a `Z` or numeric offset (seconds optional), naive
/// date-times (read as wall-clock time in `tz`) and plain dates (read as UTC
/// midnight).
pub fn parse_timestamp(value: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(tz));
    }

    let zoned = match value.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{}+00:00", rest),
        None => value.to_string(),
    };
    const ZONED_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];
    for format in ZONED_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&zoned, format) {
            return Some(dt.with_timezone(tz));
        }
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return resolve_local(tz, &naive);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)).with_timezone(tz))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use chrono_tz::America::Chicago;
    use chrono_tz::UTC;

    #[test]
    fn test_start_and_end_of_day() {
        let now = Chicago.with_ymd_and_hms(2024, 10, 16, 14, 30, 0).unwrap();

        let start = start_of_day(&now);
        assert_eq!(start, Chicago.with_ymd_and_hms(2024, 10, 16, 0, 0, 0).unwrap());

        let end = end_of_day(&now);
        assert_eq!(end.date_naive(), now.date_naive());
        assert_eq!((end.hour(), end.minute(), end.second()), (23, 59, 59));
        assert_eq!(end.timestamp_subsec_millis(), 999);
    }

    #[test]
    fn test_days_ahead_keeps_wall_clock_across_dst() {
        // DST ends in Chicago on 2024-11-03
        let now = Chicago.with_ymd_and_hms(2024, 11, 1, 9, 0, 0).unwrap();
        let later = days_ahead(&now, 5).unwrap();
        assert_eq!(later, Chicago.with_ymd_and_hms(2024, 11, 6, 9, 0, 0).unwrap());
        assert_eq!(later - now, Duration::days(5) + Duration::hours(1));
    }

    #[test]
    fn test_days_ahead_out_of_range() {
        let now = Chicago.with_ymd_and_hms(2024, 10, 16, 10, 0, 0).unwrap();
        assert_eq!(days_ahead(&now, 1_000_000_000_000), None);
        assert_eq!(days_ahead(&now, u64::MAX), None);
        assert_eq!(days_ahead(&now, 0), Some(now));
    }

    #[test]
    fn test_week_start() {
        // Wednesday, 2024-10-16
        let wednesday = NaiveDate::from_ymd_opt(2024, 10, 16).unwrap();
        assert_eq!(week_start(wednesday), NaiveDate::from_ymd_opt(2024, 10, 14).unwrap());

        // Monday is its own week start
        let monday = NaiveDate::from_ymd_opt(2024, 10, 14).unwrap();
        assert_eq!(week_start(monday), monday);

        // Sunday belongs to the week that ends on it
        let sunday = NaiveDate::from_ymd_opt(2024, 10, 20).unwrap();
        assert_eq!(week_start(sunday), monday);
    }

    #[test]
    fn test_week_dates_cross_month_boundary() {
        let thursday = NaiveDate::from_ymd_opt(2024, 10, 31).unwrap();
        let dates = week_dates(thursday);
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2024, 10, 28).unwrap());
        assert_eq!(dates[6], NaiveDate::from_ymd_opt(2024, 11, 3).unwrap());
    }

    #[test]
    fn test_format_clock() {
        let morning = UTC.with_ymd_and_hms(2024, 10, 16, 9, 5, 0).unwrap();
        assert_eq!(format_clock(&morning), "9:05 AM");

        let noon = UTC.with_ymd_and_hms(2024, 10, 16, 12, 0, 0).unwrap();
        assert_eq!(format_clock(&noon), "12:00 PM");

        let midnight = UTC.with_ymd_and_hms(2024, 10, 16, 0, 30, 0).unwrap();
        assert_eq!(format_clock(&midnight), "12:30 AM");

        let evening = UTC.with_ymd_and_hms(2024, 10, 16, 18, 45, 0).unwrap();
        assert_eq!(format_time_range(&morning, Some(&evening)), "9:05 AM - 6:45 PM");
        assert_eq!(format_time_range(&morning, None), "9:05 AM");
    }

    #[test]
    fn test_parse_timestamp() {
        // Offset timestamps are converted into the board timezone
        let parsed = parse_timestamp("2024-10-16T15:00:00Z", &Chicago).unwrap();
        assert_eq!(parsed, Chicago.with_ymd_and_hms(2024, 10, 16, 10, 0, 0).unwrap());

        let parsed = parse_timestamp("2024-10-16T10:00:00-05:00", &UTC).unwrap();
        assert_eq!(parsed, UTC.with_ymd_and_hms(2024, 10, 16, 15, 0, 0).unwrap());

        // Minute precision with a zone, as browsers accept
        let parsed = parse_timestamp("2024-10-16T15:00Z", &Chicago).unwrap();
        assert_eq!(parsed, Chicago.with_ymd_and_hms(2024, 10, 16, 10, 0, 0).unwrap());

        let parsed = parse_timestamp("2024-10-16T10:00-05:00", &UTC).unwrap();
        assert_eq!(parsed, UTC.with_ymd_and_hms(2024, 10, 16, 15, 0, 0).unwrap());

        let parsed = parse_timestamp("2024-10-16T10:00:30.500+0530", &UTC).unwrap();
        assert_eq!(parsed, UTC.with_ymd_and_hms(2024, 10, 16, 4, 30, 30).unwrap() + Duration::milliseconds(500));

        // Naive timestamps are wall-clock time in the board timezone
        let parsed = parse_timestamp("2024-10-16T10:00:00", &Chicago).unwrap();
        assert_eq!(parsed, Chicago.with_ymd_and_hms(2024, 10, 16, 10, 0, 0).unwrap());

        let parsed = parse_timestamp("2024-10-16T10:00", &Chicago).unwrap();
        assert_eq!(parsed, Chicago.with_ymd_and_hms(2024, 10, 16, 10, 0, 0).unwrap());

        // Plain dates are UTC midnight
        let parsed = parse_timestamp("2024-10-16", &Chicago).unwrap();
        assert_eq!(parsed, Chicago.with_ymd_and_hms(2024, 10, 15, 19, 0, 0).unwrap());

        // Invalid values
        assert_eq!(parse_timestamp("", &UTC), None);
        assert_eq!(parse_timestamp("tomorrow", &UTC), None);
        assert_eq!(parse_timestamp("2024-13-40T10:00:00", &UTC), None);
    }

    #[test]
    fn test_parse_timestamp_in_dst_gap() {
        // 2:30 AM does not exist in Chicago on 2024-03-10
        assert_eq!(parse_timestamp("2024-03-10T02:30:00", &Chicago), None);
    }
}
